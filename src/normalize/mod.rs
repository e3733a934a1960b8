//! Conversion from provider records to the crate's match model.
//!
//! Optional fields never fail conversion: anything unreadable is simply left
//! out. Only a missing event id or team name rejects a record, with
//! [`MatchdayError::MalformedRecord`]; the batch helpers skip such records and
//! keep going.

pub mod details;
mod lineup;
mod status;

use std::cmp::Reverse;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use itertools::Itertools;
use strum::IntoEnumIterator;
use tracing::warn;

use crate::error::{MatchdayError, Result};
use crate::model::{
    CardCount, Indicators, League, Match, MatchEvent, MatchStatus, Side, Team, TeamSide,
};
use crate::sportsdb::raw::{RawEvent, RawEventDetail, RawLeague, RawTeam};
use details::{count_entries, parse_details, DetailField};
use lineup::LineupColumns;
use status::StatusInput;

/// Normalize a list record into a [`Match`].
pub fn to_match(raw: &RawEvent) -> Result<Match> {
    let id = required(raw.id_event.as_deref(), "idEvent", None)?;
    let home_name = required(raw.str_home_team.as_deref(), "strHomeTeam", Some(id.as_str()))?;
    let away_name = required(raw.str_away_team.as_deref(), "strAwayTeam", Some(id.as_str()))?;

    let home_score = parse_number::<u32>(raw.int_home_score.as_deref());
    let away_score = parse_number::<u32>(raw.int_away_score.as_deref());
    let time = text(raw.str_time.as_deref());

    let status_raw = raw.str_status.as_deref().unwrap_or_default().to_lowercase();
    let status = status::infer_status(&StatusInput {
        text: &status_raw,
        home_score,
        away_score,
    });
    let status_text = status::status_text(status, &status_raw, time.as_deref());

    // Scores are only meaningful once the match is under way.
    let (home_score, away_score) = if status.has_started() {
        (home_score, away_score)
    } else {
        (None, None)
    };

    let full_date = parse_date(raw.date_event.as_deref());

    Ok(Match {
        id,
        status,
        status_text,
        home: TeamSide {
            name: home_name,
            logo: text(raw.str_home_team_badge.as_deref()),
            score: home_score,
            aggregate_score: None,
        },
        away: TeamSide {
            name: away_name,
            logo: text(raw.str_away_team_badge.as_deref()),
            score: away_score,
            aggregate_score: None,
        },
        time,
        date: full_date.map(short_date),
        full_date,
        league: text(raw.str_league.as_deref()),
        league_badge: text(raw.str_league_badge.as_deref()),
        season: text(raw.str_season.as_deref()),
        sport: text(raw.str_sport.as_deref()),
        round: parse_number(raw.int_round.as_deref()),
        postponed: raw
            .str_postponed
            .as_deref()
            .is_some_and(|p| p.trim().eq_ignore_ascii_case("yes")),
        venue: text(raw.str_venue.as_deref()),
        city: text(raw.str_city.as_deref()),
        country: text(raw.str_country.as_deref()),
        spectators: parse_number(raw.int_spectators.as_deref()),
        official: text(raw.str_official.as_deref()),
        indicators: None,
        home_formation: None,
        away_formation: None,
        home_shots: None,
        away_shots: None,
        home_cards: None,
        away_cards: None,
        home_lineup: None,
        away_lineup: None,
    })
}

/// Normalize a batch, skipping malformed records.
pub fn to_matches<'a>(records: impl IntoIterator<Item = &'a RawEvent>) -> Vec<Match> {
    records
        .into_iter()
        .filter_map(|raw| match to_match(raw) {
            Ok(m) => Some(m),
            Err(e) => {
                warn!(error = %e, "skipping malformed event record");
                None
            }
        })
        .collect()
}

/// Normalize a `lookupevent` record, including formations, shots, card
/// tallies and lineups.
pub fn to_match_detail(raw: &RawEventDetail) -> Result<Match> {
    let mut fixture = to_match(&raw.event)?;

    fixture.home_formation = text(raw.str_home_formation.as_deref());
    fixture.away_formation = text(raw.str_away_formation.as_deref());
    fixture.home_shots = parse_number(raw.int_home_shots.as_deref());
    fixture.away_shots = parse_number(raw.int_away_shots.as_deref());

    fixture.home_cards = card_count(
        raw.str_home_yellow_cards.as_deref(),
        raw.str_home_red_cards.as_deref(),
    );
    fixture.away_cards = card_count(
        raw.str_away_yellow_cards.as_deref(),
        raw.str_away_red_cards.as_deref(),
    );

    fixture.home_lineup = LineupColumns {
        goalkeeper: raw.str_home_lineup_goalkeeper.as_deref(),
        defense: raw.str_home_lineup_defense.as_deref(),
        midfield: raw.str_home_lineup_midfield.as_deref(),
        forward: raw.str_home_lineup_forward.as_deref(),
        substitutes: raw.str_home_lineup_substitutes.as_deref(),
    }
    .into_lineup();
    fixture.away_lineup = LineupColumns {
        goalkeeper: raw.str_away_lineup_goalkeeper.as_deref(),
        defense: raw.str_away_lineup_defense.as_deref(),
        midfield: raw.str_away_lineup_midfield.as_deref(),
        forward: raw.str_away_lineup_forward.as_deref(),
        substitutes: raw.str_away_lineup_substitutes.as_deref(),
    }
    .into_lineup();

    fixture.indicators = indicators(&fixture);

    Ok(fixture)
}

/// Build the event timeline of a `lookupevent` record, most recent first.
/// Events sharing a minute keep their relative order.
pub fn to_match_events(raw: &RawEventDetail) -> Vec<MatchEvent> {
    DetailField::iter_all()
        .flat_map(move |field| {
            Side::iter().flat_map(move |side| {
                detail_column(raw, field, side)
                    .map(|column| parse_details(column, field))
                    .unwrap_or_default()
                    .into_iter()
                    .map(move |entry| entry.into_event(side))
            })
        })
        .sorted_by_key(|e| Reverse(e.sort_minute()))
        .collect_vec()
}

/// Normalize a roster record.
pub fn to_team(raw: &RawTeam) -> Result<Team> {
    let id = required(raw.id_team.as_deref(), "idTeam", None)?;
    let name = required(raw.str_team.as_deref(), "strTeam", Some(id.as_str()))?;
    Ok(Team {
        id,
        name,
        short_name: text(raw.str_team_short.as_deref()),
        alternate: text(raw.str_alternate.as_deref()),
        sport: text(raw.str_sport.as_deref()),
        league: text(raw.str_league.as_deref()),
        league_id: text(raw.id_league.as_deref()),
        formed_year: parse_number(raw.int_formed_year.as_deref()),
        stadium: text(raw.str_stadium.as_deref()),
        stadium_capacity: parse_number(raw.int_stadium_capacity.as_deref()),
        country: text(raw.str_country.as_deref()),
        badge: text(raw.str_team_badge.as_deref()),
        logo: text(raw.str_team_logo.as_deref()),
        jersey: text(raw.str_team_jersey.as_deref()),
        website: text(raw.str_website.as_deref()),
        description: text(raw.str_description_en.as_deref()),
    })
}

/// Normalize a league catalog record.
pub fn to_league(raw: &RawLeague) -> Result<League> {
    let id = required(raw.id_league.as_deref(), "idLeague", None)?;
    let name = required(raw.str_league.as_deref(), "strLeague", Some(id.as_str()))?;
    Ok(League {
        id,
        name,
        sport: text(raw.str_sport.as_deref()),
        alternate: text(raw.str_league_alternate.as_deref()),
    })
}

/// Render a date as `"11 AUG"`.
pub fn short_date(date: NaiveDate) -> String {
    format!("{} {}", date.day(), date.format("%b").to_string().to_uppercase())
}

impl DetailField {
    fn iter_all() -> impl Iterator<Item = DetailField> {
        [
            DetailField::Goals,
            DetailField::YellowCards,
            DetailField::RedCards,
        ]
        .into_iter()
    }
}

fn detail_column(raw: &RawEventDetail, field: DetailField, side: Side) -> Option<&str> {
    let column = match (field, side) {
        (DetailField::Goals, Side::Home) => &raw.str_home_goal_details,
        (DetailField::Goals, Side::Away) => &raw.str_away_goal_details,
        (DetailField::YellowCards, Side::Home) => &raw.str_home_yellow_cards,
        (DetailField::YellowCards, Side::Away) => &raw.str_away_yellow_cards,
        (DetailField::RedCards, Side::Home) => &raw.str_home_red_cards,
        (DetailField::RedCards, Side::Away) => &raw.str_away_red_cards,
    };
    column.as_deref()
}

fn card_count(yellow: Option<&str>, red: Option<&str>) -> Option<CardCount> {
    let yellow = yellow.filter(|s| !s.trim().is_empty());
    let red = red.filter(|s| !s.trim().is_empty());
    if yellow.is_none() && red.is_none() {
        return None;
    }
    Some(CardCount {
        yellow: count_entries(yellow),
        red: count_entries(red),
    })
}

// Only one emphasis is derivable from this provider: a single side reduced to ten.
fn indicators(fixture: &Match) -> Option<Indicators> {
    let sent_off = |cards: Option<CardCount>| cards.is_some_and(|c| c.red > 0);
    let red_card = match (sent_off(fixture.home_cards), sent_off(fixture.away_cards)) {
        (true, false) => Some(Side::Home),
        (false, true) => Some(Side::Away),
        _ => None,
    };
    red_card.map(|side| Indicators {
        red_card: Some(side),
        ..Indicators::default()
    })
}

fn required(value: Option<&str>, field: &'static str, id: Option<&str>) -> Result<String> {
    text(value).ok_or_else(|| MatchdayError::MalformedRecord {
        field,
        id: id.map(str::to_string),
    })
}

fn text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn parse_number<T: FromStr>(value: Option<&str>) -> Option<T> {
    value.and_then(|v| v.trim().parse().ok())
}

/// Accepts `2024-08-11` as well as a full ISO timestamp.
fn parse_date(value: Option<&str>) -> Option<NaiveDate> {
    let value = value?.trim();
    let date_part = value.get(..10).unwrap_or(value);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}
