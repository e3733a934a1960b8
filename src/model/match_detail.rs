use chrono::NaiveDate;
use serde::Serialize;

use super::common::Side;
use super::event::MatchEvent;

/// A single fixture, normalized from a provider event record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Match {
    pub id: String,
    pub status: MatchStatus,
    /// Short label for the status column: `"67'"`, `"HT"`, `"FT"`, kickoff time.
    pub status_text: String,
    pub home: TeamSide,
    pub away: TeamSide,
    pub time: Option<String>,
    /// Display date such as `"11 AUG"`.
    pub date: Option<String>,
    pub full_date: Option<NaiveDate>,
    pub league: Option<String>,
    pub league_badge: Option<String>,
    pub season: Option<String>,
    pub sport: Option<String>,
    pub round: Option<u32>,
    pub postponed: bool,
    pub venue: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub spectators: Option<u32>,
    pub official: Option<String>,
    pub indicators: Option<Indicators>,

    // Only populated by the match detail lookup.
    pub home_formation: Option<String>,
    pub away_formation: Option<String>,
    pub home_shots: Option<u32>,
    pub away_shots: Option<u32>,
    pub home_cards: Option<CardCount>,
    pub away_cards: Option<CardCount>,
    pub home_lineup: Option<Lineup>,
    pub away_lineup: Option<Lineup>,
}

impl Match {
    /// The side record for `side`.
    pub fn team(&self, side: Side) -> &TeamSide {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }
}

/// Derived match state. Exactly one holds for every normalized match.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum MatchStatus {
    Live,
    HalfTime,
    FullTime,
    Scheduled,
}

impl MatchStatus {
    /// True while the ball is (or is about to be) rolling again: live or at half time.
    pub fn is_in_play(self) -> bool {
        matches!(self, MatchStatus::Live | MatchStatus::HalfTime)
    }

    pub fn has_started(self) -> bool {
        self != MatchStatus::Scheduled
    }
}

/// One side of a fixture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamSide {
    pub name: String,
    pub logo: Option<String>,
    pub score: Option<u32>,
    pub aggregate_score: Option<u32>,
}

/// Card tallies for one side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CardCount {
    pub yellow: u32,
    pub red: u32,
}

/// Starting eleven and bench for one side, in provider order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Lineup {
    pub goalkeeper: Vec<String>,
    pub defense: Vec<String>,
    pub midfield: Vec<String>,
    pub forward: Vec<String>,
    pub substitutes: Vec<String>,
}

/// Display-only emphasis markers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Indicators {
    pub aggregate: Option<Side>,
    pub penalty: Option<Side>,
    pub red_card: Option<Side>,
}

/// Result of a single match lookup: the enriched match plus its timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchDetails {
    #[serde(rename = "match")]
    pub fixture: Match,
    /// Most recent first.
    pub events: Vec<MatchEvent>,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_status_labels() {
        assert_eq!(MatchStatus::HalfTime.to_string(), "half-time");
        assert_eq!(MatchStatus::from_str("full-time").unwrap(), MatchStatus::FullTime);
        assert!(MatchStatus::HalfTime.is_in_play());
        assert!(!MatchStatus::FullTime.is_in_play());
        assert!(!MatchStatus::Scheduled.has_started());
    }
}
