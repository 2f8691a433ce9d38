use serde_json::Value;

use crate::json::{pick, pick_string, pick_u64};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeagueCandidate {
    pub id: Option<u64>,
    pub name: String,
    pub country_id: Option<u64>,
    pub country_name: Option<String>,
    pub current_season_id: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeagueQuery {
    pub name: String,
    pub country_id: Option<u64>,
}

impl LeagueQuery {
    pub fn new(name: &str, country_id: Option<u64>) -> Self {
        Self {
            name: name.trim().to_string(),
            country_id,
        }
    }

    pub fn matches(&self, candidate: &LeagueCandidate) -> bool {
        if !candidate
            .name
            .to_lowercase()
            .contains(&self.name.to_lowercase())
        {
            return false;
        }
        match self.country_id {
            Some(wanted) => candidate.country_id == Some(wanted),
            None => true,
        }
    }

    /// First matching candidate in listed order, whether or not it carries an id.
    pub fn select<'a>(&self, candidates: &'a [LeagueCandidate]) -> Option<&'a LeagueCandidate> {
        candidates.iter().find(|c| self.matches(c))
    }
}

pub fn parse_league_candidate(v: &Value) -> Option<LeagueCandidate> {
    if !v.is_object() {
        return None;
    }
    let id = pick_u64(v, &["id"]).filter(|id| *id > 0);
    let name = pick_string(v, &["name"]).unwrap_or_default();

    // Flat country fields only count when `country` is present but not an object.
    let (country_id, country_name) = match pick(v, &["country"]) {
        Some(c) if !c.is_object() => (
            pick_u64(v, &["country_id"]),
            pick_string(v, &["country_name"]),
        ),
        nested => (
            nested.and_then(|c| pick_u64(c, &["id"])),
            nested.and_then(|c| pick_string(c, &["name"])),
        ),
    };

    Some(LeagueCandidate {
        id,
        name,
        country_id,
        country_name,
        current_season_id: pick_u64(v, &["currentseason_id", "current_season_id"]),
    })
}

pub fn parse_league_candidates(items: &[Value]) -> Vec<LeagueCandidate> {
    items.iter().filter_map(parse_league_candidate).collect()
}
