use tracing::{debug, instrument};

use crate::error::{MatchdayError, Result};
use crate::model::MatchDetails;
use crate::normalize;
use crate::sportsdb::raw::RawEventDetail;
use crate::sportsdb::{self, endpoint};

#[instrument(skip(client))]
pub(crate) async fn get_match_details(
    client: &reqwest::Client,
    base_url: &str,
    event_id: &str,
) -> Result<MatchDetails> {
    let url = endpoint(
        base_url,
        &format!("lookupevent.php?id={}", urlencoding::encode(event_id)),
    );
    let raw = sportsdb::get_envelope::<RawEventDetail>(client, &url)
        .await?
        .into_single()
        .ok_or_else(|| MatchdayError::NotFound(format!("event {event_id}")))?;

    let fixture = normalize::to_match_detail(&raw)?;
    let events = normalize::to_match_events(&raw);
    debug!(event_id, events = events.len(), "parsed match detail");

    Ok(MatchDetails { fixture, events })
}
