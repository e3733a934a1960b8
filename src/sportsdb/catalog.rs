use tracing::{debug, instrument, warn};

use crate::error::Result;
use crate::model::{League, Team};
use crate::normalize;
use crate::sportsdb::raw::{RawLeague, RawTeam};
use crate::sportsdb::{self, endpoint};

#[instrument(skip(client))]
pub(crate) async fn get_teams_by_league(
    client: &reqwest::Client,
    base_url: &str,
    league_id: &str,
) -> Result<Vec<Team>> {
    let url = endpoint(
        base_url,
        &format!("lookup_all_teams.php?id={}", urlencoding::encode(league_id)),
    );
    let teams: Vec<Team> = sportsdb::get_envelope::<RawTeam>(client, &url)
        .await?
        .into_list()
        .iter()
        .filter_map(|raw| {
            normalize::to_team(raw)
                .inspect_err(|e| warn!(error = %e, "skipping malformed team record"))
                .ok()
        })
        .collect();
    debug!(count = teams.len(), league_id, "parsed league teams");
    Ok(teams)
}

#[instrument(skip(client))]
pub(crate) async fn get_all_leagues(
    client: &reqwest::Client,
    base_url: &str,
) -> Result<Vec<League>> {
    let url = endpoint(base_url, "all_leagues.php");
    let leagues: Vec<League> = sportsdb::get_envelope::<RawLeague>(client, &url)
        .await?
        .into_list()
        .iter()
        .filter_map(|raw| {
            normalize::to_league(raw)
                .inspect_err(|e| warn!(error = %e, "skipping malformed league record"))
                .ok()
        })
        .collect();
    debug!(count = leagues.len(), "parsed league catalog");
    Ok(leagues)
}
