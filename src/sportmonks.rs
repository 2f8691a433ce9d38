use serde::Deserialize;
use serde_json::Value;

use crate::error::{ResolveError, ResolveResult, TransportError};
use crate::fetch::JsonSource;
use crate::json::{pick, pick_string, pick_u64};
use crate::league_matcher::{LeagueCandidate, parse_league_candidate, parse_league_candidates};

pub const FULL_LISTING_PAGE_SIZE: u32 = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonDetails {
    pub id: u64,
    pub name: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureSummary {
    pub id: Option<u64>,
    pub starting_at: Option<String>,
    pub teams: Vec<String>,
}

impl FixtureSummary {
    pub fn display(&self) -> String {
        let id = self.id.map_or_else(|| "?".to_string(), |id| id.to_string());
        let teams = if self.teams.is_empty() {
            "-".to_string()
        } else {
            self.teams.join(" vs. ")
        };
        format!(
            "Fixture {id}: {} | Teams: {teams}",
            self.starting_at.as_deref().unwrap_or("-")
        )
    }
}

pub fn search_endpoint(name: &str) -> String {
    format!("leagues/search/{}", name.trim())
}

pub fn country_endpoint(country_id: u64) -> String {
    format!("leagues/countries/{country_id}")
}

pub const LEAGUES_ENDPOINT: &str = "leagues";

/// `{ "data": ... }` wrapper every response comes in. `data` is a list for
/// listings and a single record for lookups.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Value,
}

impl Envelope {
    fn list(&self) -> &[Value] {
        self.data.as_array().map(Vec::as_slice).unwrap_or_default()
    }

    fn record(&self) -> Option<&Value> {
        Some(&self.data).filter(|d| d.as_object().is_some_and(|o| !o.is_empty()))
    }
}

fn api_get(
    source: &dyn JsonSource,
    endpoint: &str,
    query: &[(&str, &str)],
) -> Result<Envelope, TransportError> {
    let payload = source.get_json(endpoint, query)?;
    // A bare array would deserialize positionally into the struct.
    if !payload.is_object() {
        return Err(unexpected(endpoint, "expected a JSON object envelope".to_string()));
    }
    serde_json::from_value(payload).map_err(|err| unexpected(endpoint, err.to_string()))
}

fn unexpected(endpoint: &str, message: String) -> TransportError {
    TransportError::UnexpectedPayload {
        url: endpoint.to_string(),
        message,
    }
}

pub fn search_league_records(
    source: &dyn JsonSource,
    name: &str,
) -> Result<Vec<Value>, TransportError> {
    let envelope = api_get(source, &search_endpoint(name), &[("include", "country")])?;
    Ok(envelope.list().to_vec())
}

pub fn search_leagues(
    source: &dyn JsonSource,
    name: &str,
) -> Result<Vec<LeagueCandidate>, TransportError> {
    Ok(parse_league_candidates(&search_league_records(source, name)?))
}

pub fn leagues_for_country(
    source: &dyn JsonSource,
    country_id: u64,
) -> Result<Vec<LeagueCandidate>, TransportError> {
    let envelope = api_get(source, &country_endpoint(country_id), &[("include", "country")])?;
    Ok(parse_league_candidates(envelope.list()))
}

pub fn list_leagues(
    source: &dyn JsonSource,
    per_page: u32,
) -> Result<Vec<LeagueCandidate>, TransportError> {
    let per_page = per_page.to_string();
    let envelope = api_get(
        source,
        LEAGUES_ENDPOINT,
        &[("per_page", per_page.as_str()), ("include", "country")],
    )?;
    Ok(parse_league_candidates(envelope.list()))
}

pub fn fetch_league(source: &dyn JsonSource, league_id: u64) -> ResolveResult<LeagueCandidate> {
    let envelope = api_get(
        source,
        &format!("leagues/{league_id}"),
        &[("include", "country")],
    )?;
    envelope
        .record()
        .and_then(parse_league_candidate)
        .ok_or(ResolveError::LeagueMissing { league_id })
}

pub fn fetch_season_details(
    source: &dyn JsonSource,
    season_id: u64,
) -> Result<SeasonDetails, TransportError> {
    let envelope = api_get(
        source,
        &format!("seasons/{season_id}"),
        &[("include", "league,stages")],
    )?;
    let data = envelope.record().unwrap_or(&Value::Null);
    Ok(SeasonDetails {
        id: pick_u64(data, &["id"]).unwrap_or(season_id),
        name: pick_string(data, &["name"]),
        start_date: pick_string(data, &["starting_at", "start_date"]),
        end_date: pick_string(data, &["ending_at", "end_date"]),
    })
}

pub fn fetch_season_fixtures(
    source: &dyn JsonSource,
    season_id: u64,
    limit: u32,
) -> Result<Vec<FixtureSummary>, TransportError> {
    let per_page = limit.to_string();
    let envelope = api_get(
        source,
        &format!("fixtures/seasons/{season_id}"),
        &[("per_page", per_page.as_str()), ("include", "participants")],
    )?;
    Ok(envelope.list().iter().map(parse_fixture).collect())
}

fn parse_fixture(v: &Value) -> FixtureSummary {
    let teams = pick(v, &["participants"])
        .and_then(|p| p.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|team| pick_string(team, &["name"]))
                .collect()
        })
        .unwrap_or_default();
    FixtureSummary {
        id: pick_u64(v, &["id"]),
        starting_at: pick_string(v, &["starting_at"]),
        teams,
    }
}

pub fn format_search_match(item: &Value) -> String {
    let country = parse_league_candidate(item).and_then(|c| c.country_name);
    format!(
        "  - {} (ID={}, Country={})",
        pick_string(item, &["name"]).as_deref().unwrap_or("-"),
        pick_u64(item, &["id"]).map_or_else(|| "-".to_string(), |id| id.to_string()),
        country.as_deref().unwrap_or("-")
    )
}
