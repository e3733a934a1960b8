use serde::Serialize;

/// A club from a league roster lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub short_name: Option<String>,
    pub alternate: Option<String>,
    pub sport: Option<String>,
    pub league: Option<String>,
    pub league_id: Option<String>,
    pub formed_year: Option<u16>,
    pub stadium: Option<String>,
    pub stadium_capacity: Option<u32>,
    pub country: Option<String>,
    pub badge: Option<String>,
    pub logo: Option<String>,
    pub jersey: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
}

/// An entry of the global league catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct League {
    pub id: String,
    pub name: String,
    pub sport: Option<String>,
    pub alternate: Option<String>,
}
