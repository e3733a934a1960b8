//! Wire records exactly as TheSportsDB returns them.
//!
//! Every field is optional: identity checks happen during normalization, and
//! the response envelope decodes each record separately, so a single broken
//! record cannot fail a whole batch at decode time. Numeric columns arrive as
//! strings, numbers or `null` depending on the endpoint, so they go through
//! `lenient_string` when a record is decoded directly.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use tracing::warn;

/// A fixture as listed by `eventsday`, `eventsseason`, `eventsnext`,
/// `eventslast` and `searchevents`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id_event: Option<String>,
    pub str_event: Option<String>,
    pub str_sport: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub id_league: Option<String>,
    pub str_league: Option<String>,
    pub str_league_badge: Option<String>,
    pub str_season: Option<String>,
    pub str_home_team: Option<String>,
    pub str_away_team: Option<String>,
    pub str_home_team_badge: Option<String>,
    pub str_away_team_badge: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub int_home_score: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub int_away_score: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub int_round: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub int_spectators: Option<String>,
    pub str_official: Option<String>,
    pub date_event: Option<String>,
    pub str_time: Option<String>,
    pub str_venue: Option<String>,
    pub str_city: Option<String>,
    pub str_country: Option<String>,
    pub str_status: Option<String>,
    pub str_postponed: Option<String>,
}

/// The richer record returned by `lookupevent`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEventDetail {
    #[serde(flatten)]
    pub event: RawEvent,
    pub str_home_formation: Option<String>,
    pub str_away_formation: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub int_home_shots: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub int_away_shots: Option<String>,
    pub str_home_goal_details: Option<String>,
    pub str_away_goal_details: Option<String>,
    pub str_home_red_cards: Option<String>,
    pub str_away_red_cards: Option<String>,
    pub str_home_yellow_cards: Option<String>,
    pub str_away_yellow_cards: Option<String>,
    pub str_home_lineup_goalkeeper: Option<String>,
    pub str_home_lineup_defense: Option<String>,
    pub str_home_lineup_midfield: Option<String>,
    pub str_home_lineup_forward: Option<String>,
    pub str_home_lineup_substitutes: Option<String>,
    pub str_away_lineup_goalkeeper: Option<String>,
    pub str_away_lineup_defense: Option<String>,
    pub str_away_lineup_midfield: Option<String>,
    pub str_away_lineup_forward: Option<String>,
    pub str_away_lineup_substitutes: Option<String>,
}

/// A club from `lookup_all_teams`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTeam {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id_team: Option<String>,
    pub str_team: Option<String>,
    pub str_team_short: Option<String>,
    pub str_alternate: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub int_formed_year: Option<String>,
    pub str_sport: Option<String>,
    pub str_league: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub id_league: Option<String>,
    pub str_stadium: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub int_stadium_capacity: Option<String>,
    pub str_country: Option<String>,
    pub str_team_badge: Option<String>,
    pub str_team_logo: Option<String>,
    pub str_team_jersey: Option<String>,
    pub str_website: Option<String>,
    #[serde(rename = "strDescriptionEN")]
    pub str_description_en: Option<String>,
}

/// An entry of `all_leagues`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLeague {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id_league: Option<String>,
    pub str_league: Option<String>,
    pub str_sport: Option<String>,
    pub str_league_alternate: Option<String>,
}

/// Response envelope shared by every endpoint. At most one list key is set;
/// `error` wins over everything else.
///
/// Records are kept as raw JSON until [`Envelope::into_list`] so each one is
/// decoded on its own.
#[derive(Debug, Deserialize)]
#[serde(bound = "")]
pub(crate) struct Envelope<T> {
    pub events: Option<Vec<Value>>,
    pub event: Option<Value>,
    pub results: Option<Vec<Value>>,
    pub teams: Option<Vec<Value>>,
    pub leagues: Option<Vec<Value>>,
    pub error: Option<String>,
    #[serde(skip)]
    record: PhantomData<T>,
}

impl<T: DeserializeOwned> Envelope<T> {
    /// All decodable records in the envelope. A `null` list means "no data",
    /// not a failure; records that cannot be decoded are skipped.
    pub fn into_list(self) -> Vec<T> {
        // `lookupevent` answers with a bare object under `event`,
        // `searchevents` with a list under the same key.
        let event = self.event.map(|value| match value {
            Value::Array(items) => items,
            other => vec![other],
        });
        self.events
            .or(self.results)
            .or(self.teams)
            .or(self.leagues)
            .or(event)
            .unwrap_or_default()
            .into_iter()
            .filter_map(decode_record)
            .collect()
    }

    /// The first decodable record, for single-item lookups.
    pub fn into_single(self) -> Option<T> {
        self.into_list().into_iter().next()
    }
}

/// Decode one record. Scalar columns of the wrong JSON type are read as
/// text and nested values as absent, so only a non-object element is lost.
fn decode_record<T: DeserializeOwned>(value: Value) -> Option<T> {
    let fields = match value {
        Value::Object(fields) => fields,
        other => {
            warn!(kind = json_kind(&other), "skipping non-object record");
            return None;
        }
    };
    let fields: Map<String, Value> = fields
        .into_iter()
        .map(|(key, value)| (key, coerce_scalar(value)))
        .collect();
    serde_json::from_value(Value::Object(fields))
        .inspect_err(|e| warn!(error = %e, "skipping undecodable record"))
        .ok()
}

fn coerce_scalar(value: Value) -> Value {
    match value {
        Value::Number(n) => Value::String(n.to_string()),
        Value::Bool(b) => Value::String(b.to_string()),
        Value::Array(_) | Value::Object(_) => Value::Null,
        other => other,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Accept a JSON string, number or null as an optional string.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}
