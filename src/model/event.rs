use serde::Serialize;

use super::common::Side;

/// A discrete occurrence on the match timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchEvent {
    /// `"<side>-<kind>-<minute>-<player>"`. Not guaranteed unique: two
    /// identical annotations produce the same id.
    pub id: String,
    /// Match clock as written by the provider, e.g. `"45+2'"`.
    pub minute: String,
    pub kind: EventKind,
    pub side: Side,
    pub player: Option<String>,
    pub assist: Option<String>,
    pub player_out: Option<String>,
    pub player_in: Option<String>,
    pub description: Option<String>,
    pub corner_number: Option<String>,
}

impl MatchEvent {
    pub(crate) fn new(kind: EventKind, side: Side, minute: String, player: Option<String>) -> Self {
        let id = format!(
            "{side}-{kind}-{minute}-{}",
            player.as_deref().unwrap_or_default()
        );
        Self {
            id,
            minute,
            kind,
            side,
            player,
            assist: None,
            player_out: None,
            player_in: None,
            description: None,
            corner_number: None,
        }
    }

    /// Base minute used for ordering. Stoppage time is ignored, so `"45+2'"`
    /// sorts as 45. Unreadable minutes sort as 0.
    pub fn sort_minute(&self) -> u32 {
        let digits: String = self
            .minute
            .trim()
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        digits.parse().unwrap_or_default()
    }
}

/// What happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum_macros::Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum EventKind {
    Goal,
    Substitution,
    YellowCard,
    RedCard,
    Corner,
    Shot,
    Injury,
}
