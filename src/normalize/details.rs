//! Parser for the goal and card annotations the provider packs into one text
//! column, e.g. `"Saka (12') assist: Odegaard, Havertz (45+2')"`.
//!
//! Occurrences are found by scanning with a regex rather than splitting, so
//! separators inside odd names do not break the list. Every occurrence yields
//! one entry; duplicates are kept.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::{EventKind, MatchEvent, Side};

static RE_ANNOTATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?P<player>[^(),;]+?)\s*\(\s*(?P<minute>\d+(?:\s*\+\s*\d*)?)\s*['’]?\s*\)(?:\s*assist:\s*(?P<assist>[^(),;]+))?",
    )
    .unwrap()
});

/// Which provider column is being parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailField {
    Goals,
    YellowCards,
    RedCards,
}

/// One parsed annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailEntry {
    Goal {
        player: String,
        minute: String,
        assist: Option<String>,
    },
    YellowCard {
        player: String,
        minute: String,
    },
    RedCard {
        player: String,
        minute: String,
    },
}

impl DetailEntry {
    pub fn minute(&self) -> &str {
        match self {
            DetailEntry::Goal { minute, .. }
            | DetailEntry::YellowCard { minute, .. }
            | DetailEntry::RedCard { minute, .. } => minute,
        }
    }

    pub fn into_event(self, side: Side) -> MatchEvent {
        match self {
            DetailEntry::Goal {
                player,
                minute,
                assist,
            } => {
                let mut event = MatchEvent::new(EventKind::Goal, side, minute, Some(player));
                event.assist = assist;
                event
            }
            DetailEntry::YellowCard { player, minute } => {
                MatchEvent::new(EventKind::YellowCard, side, minute, Some(player))
            }
            DetailEntry::RedCard { player, minute } => {
                MatchEvent::new(EventKind::RedCard, side, minute, Some(player))
            }
        }
    }
}

/// Extract every annotation from `raw`. Text that does not match the pattern
/// is ignored.
pub fn parse_details(raw: &str, field: DetailField) -> Vec<DetailEntry> {
    RE_ANNOTATION
        .captures_iter(raw)
        .filter_map(|caps| {
            let player = caps.name("player")?.as_str().trim().to_string();
            if player.is_empty() {
                return None;
            }
            let minute = format_minute(caps.name("minute")?.as_str());
            let entry = match field {
                DetailField::Goals => DetailEntry::Goal {
                    player,
                    minute,
                    assist: caps
                        .name("assist")
                        .map(|a| a.as_str().trim().to_string())
                        .filter(|a| !a.is_empty()),
                },
                DetailField::YellowCards => DetailEntry::YellowCard { player, minute },
                DetailField::RedCards => DetailEntry::RedCard { player, minute },
            };
            Some(entry)
        })
        .collect()
}

/// Number of non-empty `,`/`;` separated entries. Used for card tallies, where
/// names are not needed.
pub fn count_entries(raw: Option<&str>) -> u32 {
    raw.map(|raw| {
        raw.split([',', ';'])
            .filter(|entry| !entry.trim().is_empty())
            .count() as u32
    })
    .unwrap_or_default()
}

fn format_minute(token: &str) -> String {
    let compact: String = token.chars().filter(|c| !c.is_whitespace()).collect();
    format!("{compact}'")
}
