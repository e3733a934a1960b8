//! Status inference as an ordered rule table. The first matching rule wins,
//! so explicit provider text always outranks score-based inference.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::MatchStatus;

static RE_LIVE_MINUTE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)\s*'").unwrap());

const LIVE_MARKERS: &[&str] = &["live", "1h", "2h", "first half", "second half"];
const HALF_TIME_MARKERS: &[&str] = &["half time", "ht"];
const FINISHED_MARKERS: &[&str] = &["finished", "ft", "result"];

/// What the rules look at.
#[derive(Debug, Clone, Copy)]
pub(crate) struct StatusInput<'a> {
    /// Provider status text, lower-cased.
    pub text: &'a str,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
}

type StatusRule = (fn(&StatusInput) -> bool, MatchStatus);

const STATUS_RULES: &[StatusRule] = &[
    (has_live_marker, MatchStatus::Live),
    (has_half_time_marker, MatchStatus::HalfTime),
    (has_finished_marker, MatchStatus::FullTime),
    (has_both_scores, MatchStatus::FullTime),
];

fn contains_any(text: &str, markers: &[&str]) -> bool {
    markers.iter().any(|m| text.contains(m))
}

fn has_live_marker(input: &StatusInput) -> bool {
    contains_any(input.text, LIVE_MARKERS)
}

fn has_half_time_marker(input: &StatusInput) -> bool {
    contains_any(input.text, HALF_TIME_MARKERS)
}

fn has_finished_marker(input: &StatusInput) -> bool {
    contains_any(input.text, FINISHED_MARKERS)
}

// The provider sometimes leaves the status blank on concluded matches.
fn has_both_scores(input: &StatusInput) -> bool {
    input.home_score.is_some() && input.away_score.is_some()
}

pub(crate) fn infer_status(input: &StatusInput) -> MatchStatus {
    STATUS_RULES
        .iter()
        .find(|(applies, _)| applies(input))
        .map(|(_, status)| *status)
        .unwrap_or(MatchStatus::Scheduled)
}

/// Label shown next to the score.
pub(crate) fn status_text(status: MatchStatus, text: &str, kickoff: Option<&str>) -> String {
    match status {
        MatchStatus::Live => RE_LIVE_MINUTE
            .captures(text)
            .map(|caps| format!("{}'", &caps[1]))
            .unwrap_or_else(|| "LIVE".to_string()),
        MatchStatus::HalfTime => "HT".to_string(),
        MatchStatus::FullTime => "FT".to_string(),
        MatchStatus::Scheduled => kickoff
            .map(str::to_string)
            .unwrap_or_else(|| "Scheduled".to_string()),
    }
}
