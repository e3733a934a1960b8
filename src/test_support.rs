//! Helpers shared by the unit tests: a loopback axum server standing in for
//! the provider, and a few representative payloads.

use axum::Router;

use crate::sportsdb::raw::{RawEvent, RawEventDetail};

/// Serve `router` on an ephemeral loopback port and return its base URL.
pub(crate) async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// A client that never routes loopback traffic through a system proxy.
pub(crate) fn test_http_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

pub(crate) const EVENTS_DAY_JSON: &str = r#"{
  "events": [
    {
      "idEvent": "2052711",
      "strEvent": "Arsenal vs Liverpool",
      "strSport": "Soccer",
      "idLeague": "4328",
      "strLeague": "English Premier League",
      "strLeagueBadge": "https://r2.thesportsdb.com/images/media/league/badge/epl.png",
      "strSeason": "2024-2025",
      "strHomeTeam": "Arsenal",
      "strAwayTeam": "Liverpool",
      "strHomeTeamBadge": "https://r2.thesportsdb.com/images/media/team/badge/ars.png",
      "strAwayTeamBadge": "https://r2.thesportsdb.com/images/media/team/badge/liv.png",
      "intHomeScore": "2",
      "intAwayScore": "1",
      "intRound": "1",
      "intSpectators": "60260",
      "strOfficial": "Michael Oliver",
      "dateEvent": "2024-08-11",
      "strTime": "20:00:00",
      "strVenue": "Emirates Stadium",
      "strCity": "London",
      "strCountry": "England",
      "strStatus": "Match Finished",
      "strPostponed": "no"
    },
    {
      "idEvent": "2052712",
      "strHomeTeam": "Chelsea",
      "strAwayTeam": "Manchester City",
      "intHomeScore": "0",
      "intAwayScore": "0",
      "dateEvent": "2024-08-11",
      "strTime": "16:30:00",
      "strStatus": "2H 67'",
      "strPostponed": "no"
    },
    {
      "idEvent": "2052713",
      "strHomeTeam": "Everton",
      "strAwayTeam": "Brighton",
      "intHomeScore": "1",
      "intAwayScore": "1",
      "dateEvent": "2024-08-11",
      "strStatus": "HT",
      "strPostponed": "no"
    },
    {
      "idEvent": "2052714",
      "strHomeTeam": "Newcastle",
      "strAwayTeam": "Southampton",
      "intHomeScore": null,
      "intAwayScore": null,
      "dateEvent": "2024-08-11",
      "strTime": "17:30:00",
      "strStatus": "Not Started",
      "strPostponed": "no"
    },
    {
      "idEvent": "2052715",
      "strAwayTeam": "Fulham",
      "dateEvent": "2024-08-11"
    }
  ]
}"#;

pub(crate) const LOOKUP_EVENT_JSON: &str = r#"{
  "events": [
    {
      "idEvent": "2052711",
      "strHomeTeam": "Arsenal",
      "strAwayTeam": "Liverpool",
      "intHomeScore": "2",
      "intAwayScore": "1",
      "dateEvent": "2024-08-11",
      "strTime": "20:00:00",
      "strStatus": "FT",
      "strPostponed": "no",
      "strVenue": "Emirates Stadium",
      "strHomeFormation": "4-3-3",
      "strAwayFormation": "4-2-3-1",
      "intHomeShots": "14",
      "intAwayShots": 9,
      "strHomeGoalDetails": "Saka (12') assist: Odegaard, Havertz (45+2')",
      "strAwayGoalDetails": "Salah (78')",
      "strHomeYellowCards": "Rice (33'); White (70')",
      "strAwayYellowCards": "Konate (50')",
      "strHomeRedCards": "",
      "strAwayRedCards": "Van Dijk (88')",
      "strHomeLineupGoalkeeper": "Raya;",
      "strHomeLineupDefense": "White; Saliba; Gabriel; Zinchenko;",
      "strHomeLineupMidfield": "Rice; Odegaard; Havertz;",
      "strHomeLineupForward": "Saka; Jesus; Martinelli;",
      "strHomeLineupSubstitutes": "Trossard; Jorginho;",
      "strAwayLineupGoalkeeper": null,
      "strAwayLineupDefense": null,
      "strAwayLineupMidfield": null,
      "strAwayLineupForward": null,
      "strAwayLineupSubstitutes": "Gakpo"
    }
  ]
}"#;

/// A minimal valid record with the given status and scores.
pub(crate) fn raw_event(
    id: &str,
    status: Option<&str>,
    home_score: Option<&str>,
    away_score: Option<&str>,
) -> RawEvent {
    RawEvent {
        id_event: Some(id.to_string()),
        str_home_team: Some("Arsenal".to_string()),
        str_away_team: Some("Liverpool".to_string()),
        int_home_score: home_score.map(str::to_string),
        int_away_score: away_score.map(str::to_string),
        str_status: status.map(str::to_string),
        date_event: Some("2024-08-11".to_string()),
        str_time: Some("20:00".to_string()),
        ..RawEvent::default()
    }
}

pub(crate) fn lookup_event_detail() -> RawEventDetail {
    let envelope: crate::sportsdb::raw::Envelope<RawEventDetail> =
        serde_json::from_str(LOOKUP_EVENT_JSON).unwrap();
    envelope.into_single().unwrap()
}
