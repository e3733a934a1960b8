use chrono::NaiveDate;
use tracing::{debug, instrument};

use crate::error::Result;
use crate::model::Match;
use crate::normalize;
use crate::sportsdb::raw::RawEvent;
use crate::sportsdb::{self, endpoint};

/// Every fixture on `date`, across all leagues.
#[instrument(skip(client))]
pub(crate) async fn get_events_by_date(
    client: &reqwest::Client,
    base_url: &str,
    date: NaiveDate,
) -> Result<Vec<Match>> {
    let url = endpoint(base_url, &format!("eventsday.php?d={}", date.format("%Y-%m-%d")));
    let matches = fetch_matches(client, &url).await?;
    debug!(count = matches.len(), %date, "normalized events for date");
    Ok(matches)
}

/// The current season of a league.
#[instrument(skip(client))]
pub(crate) async fn get_events_by_league(
    client: &reqwest::Client,
    base_url: &str,
    league_id: &str,
) -> Result<Vec<Match>> {
    let url = endpoint(
        base_url,
        &format!("eventsseason.php?id={}", urlencoding::encode(league_id)),
    );
    let matches = fetch_matches(client, &url).await?;
    debug!(count = matches.len(), league_id, "normalized league season");
    Ok(matches)
}

/// Upcoming fixtures of a team or league.
#[instrument(skip(client))]
pub(crate) async fn get_next_events(
    client: &reqwest::Client,
    base_url: &str,
    id: &str,
) -> Result<Vec<Match>> {
    let url = endpoint(
        base_url,
        &format!("eventsnext.php?id={}", urlencoding::encode(id)),
    );
    let matches = fetch_matches(client, &url).await?;
    debug!(count = matches.len(), id, "normalized upcoming events");
    Ok(matches)
}

/// Recent results of a team or league.
#[instrument(skip(client))]
pub(crate) async fn get_last_events(
    client: &reqwest::Client,
    base_url: &str,
    id: &str,
) -> Result<Vec<Match>> {
    let url = endpoint(
        base_url,
        &format!("eventslast.php?id={}", urlencoding::encode(id)),
    );
    let matches = fetch_matches(client, &url).await?;
    debug!(count = matches.len(), id, "normalized past events");
    Ok(matches)
}

/// Free-text event search, e.g. `"Arsenal_vs_Chelsea"`.
#[instrument(skip(client))]
pub(crate) async fn search_events(
    client: &reqwest::Client,
    base_url: &str,
    query: &str,
) -> Result<Vec<Match>> {
    let url = endpoint(
        base_url,
        &format!("searchevents.php?e={}", urlencoding::encode(query)),
    );
    let matches = fetch_matches(client, &url).await?;
    debug!(count = matches.len(), query, "normalized search results");
    Ok(matches)
}

async fn fetch_matches(client: &reqwest::Client, url: &str) -> Result<Vec<Match>> {
    let records = sportsdb::get_envelope::<RawEvent>(client, url)
        .await?
        .into_list();
    Ok(normalize::to_matches(&records))
}
