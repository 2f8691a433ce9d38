use serde_json::Value;

use crate::error::TransportError;
use crate::fetch::JsonSource;
use crate::json::{pick, pick_string};
use crate::matches::{MatchRecord, parse_match_record};
use crate::season_year::{SeasonYear, candidate_set, extract_year_value};
use crate::table::{TableEntry, parse_table};

pub const AVAILABLE_LEAGUES_ENDPOINT: &str = "getavailableleagues";

pub fn matches_endpoint(league_code: &str, season: SeasonYear, matchday: Option<u32>) -> String {
    match matchday {
        Some(day) => format!("getmatchdata/{league_code}/{season}/{day}"),
        None => format!("getmatchdata/{league_code}/{season}"),
    }
}

pub fn table_endpoint(league_code: &str, season: SeasonYear) -> String {
    format!("getbltable/{league_code}/{season}")
}

pub fn parse_available_seasons(records: &[Value], league_code: &str) -> Vec<SeasonYear> {
    let wanted = league_code.trim();
    candidate_set(records.iter().filter_map(|record| {
        let shortcut = pick_string(record, &["leagueShortcut", "LeagueShortcut", "shortcut"])?;
        if !shortcut.eq_ignore_ascii_case(wanted) {
            return None;
        }
        pick(record, &["leagueSeason", "LeagueSeason", "season"]).and_then(extract_year_value)
    }))
}

pub fn fetch_available_seasons(
    source: &dyn JsonSource,
    league_code: &str,
) -> Result<Vec<SeasonYear>, TransportError> {
    let payload = source.get_json(AVAILABLE_LEAGUES_ENDPOINT, &[])?;
    let records = expect_array(AVAILABLE_LEAGUES_ENDPOINT, &payload, "league list")?;
    Ok(parse_available_seasons(records, league_code))
}

pub fn fetch_matches(
    source: &dyn JsonSource,
    league_code: &str,
    season: SeasonYear,
    matchday: Option<u32>,
) -> Result<Vec<MatchRecord>, TransportError> {
    let endpoint = matches_endpoint(league_code, season, matchday);
    let payload = source.get_json(&endpoint, &[])?;
    let items = expect_array(&endpoint, &payload, "match data")?;
    Ok(items.iter().filter_map(parse_match_record).collect())
}

pub fn fetch_table(
    source: &dyn JsonSource,
    league_code: &str,
    season: SeasonYear,
) -> Result<Vec<TableEntry>, TransportError> {
    let endpoint = table_endpoint(league_code, season);
    let payload = source.get_json(&endpoint, &[])?;
    let rows = expect_array(&endpoint, &payload, "league table")?;
    Ok(parse_table(rows))
}

fn expect_array<'a>(
    endpoint: &str,
    payload: &'a Value,
    what: &str,
) -> Result<&'a [Value], TransportError> {
    payload
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| TransportError::UnexpectedPayload {
            url: endpoint.to_string(),
            message: format!("expected a JSON array of {what}"),
        })
}
