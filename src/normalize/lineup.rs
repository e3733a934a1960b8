use itertools::Itertools;

use crate::model::Lineup;

/// Split a `;` separated roster column into trimmed names. Absent input is an
/// empty list.
pub(crate) fn parse_lineup(raw: Option<&str>) -> Vec<String> {
    raw.map(|raw| {
        raw.split(';')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect_vec()
    })
    .unwrap_or_default()
}

/// Raw lineup columns for one side.
pub(crate) struct LineupColumns<'a> {
    pub goalkeeper: Option<&'a str>,
    pub defense: Option<&'a str>,
    pub midfield: Option<&'a str>,
    pub forward: Option<&'a str>,
    pub substitutes: Option<&'a str>,
}

impl LineupColumns<'_> {
    /// A lineup exists once any starting section is filled in; the bench alone
    /// does not count.
    pub fn into_lineup(self) -> Option<Lineup> {
        let has_starters = [self.goalkeeper, self.defense, self.midfield, self.forward]
            .iter()
            .flatten()
            .any(|column| !column.trim().is_empty());
        if !has_starters {
            return None;
        }
        Some(Lineup {
            goalkeeper: parse_lineup(self.goalkeeper),
            defense: parse_lineup(self.defense),
            midfield: parse_lineup(self.midfield),
            forward: parse_lineup(self.forward),
            substitutes: parse_lineup(self.substitutes),
        })
    }
}
