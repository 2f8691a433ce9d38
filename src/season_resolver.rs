use tracing::{debug, info};

use crate::error::{ResolveError, ResolveResult};
use crate::fetch::JsonSource;
use crate::matches::MatchRecord;
use crate::openligadb::{fetch_available_seasons, fetch_matches};
use crate::outcome::ResolutionOutcome;
use crate::season_year::{SeasonYear, join_years};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeasonRequest {
    pub season: Option<i32>,
    pub matchday: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeasonSource {
    Requested,
    Substituted,
    FirstWithFixtures,
    NewestPlaceholder,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonCorrection {
    pub requested: i32,
    pub substituted: SeasonYear,
    pub available: Vec<SeasonYear>,
}

impl SeasonCorrection {
    pub fn notice(&self, league_code: &str) -> String {
        format!(
            "note: season {} is not listed for league {league_code}; using {}. Available seasons: {}",
            self.requested,
            self.substituted,
            join_years(&self.available)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonResolution {
    pub league_code: String,
    pub candidates: Vec<SeasonYear>,
    pub season: SeasonYear,
    pub matches: Vec<MatchRecord>,
    pub source: SeasonSource,
    pub correction: Option<SeasonCorrection>,
    pub fallback_source: Option<SeasonYear>,
    pub degraded: bool,
}

impl SeasonResolution {
    pub fn outcome(&self) -> ResolutionOutcome<SeasonYear, SeasonSource> {
        ResolutionOutcome {
            resolved: self.season,
            source: self.source,
            degraded: self.degraded,
        }
    }

    pub fn notices(&self) -> Vec<String> {
        let mut out = Vec::new();
        if let Some(correction) = &self.correction {
            out.push(correction.notice(&self.league_code));
        }
        match self.source {
            SeasonSource::NewestPlaceholder => out.push(format!(
                "note: no listed season of {} has fixtures with assigned teams yet; showing the placeholder schedule of {}",
                self.league_code, self.season
            )),
            SeasonSource::FirstWithFixtures => {
                if let Some(newest) = self.candidates.first().filter(|n| **n != self.season) {
                    out.push(format!(
                        "note: season {newest} of {} has no fixtures with assigned teams yet; using {}",
                        self.league_code, self.season
                    ));
                }
            }
            SeasonSource::Requested | SeasonSource::Substituted => {}
        }
        out
    }
}

/// Explicit season if listed, otherwise the newest candidate plus a correction.
/// `None` only when `candidates` is empty.
pub fn choose_season(
    candidates: &[SeasonYear],
    requested: Option<i32>,
) -> Option<(SeasonYear, Option<SeasonCorrection>)> {
    let newest = *candidates.first()?;
    let Some(requested) = requested else {
        return Some((newest, None));
    };
    if let Some(found) = candidates.iter().find(|y| y.get() == requested) {
        return Some((*found, None));
    }
    Some((
        newest,
        Some(SeasonCorrection {
            requested,
            substituted: newest,
            available: candidates.to_vec(),
        }),
    ))
}

pub fn resolve_season(
    source: &dyn JsonSource,
    league_code: &str,
    request: SeasonRequest,
) -> ResolveResult<SeasonResolution> {
    let candidates = fetch_available_seasons(source, league_code)?;
    debug!(league = league_code, candidates = %join_years(&candidates), "season candidates");
    let Some(&newest) = candidates.first() else {
        return Err(ResolveError::NoSeasonsFound {
            league: league_code.to_string(),
        });
    };

    if request.season.is_some() {
        let (season, correction) =
            choose_season(&candidates, request.season).unwrap_or((newest, None));
        if let Some(c) = &correction {
            info!(requested = c.requested, substituted = %c.substituted, "requested season not listed");
        }
        let matches = fetch_matches(source, league_code, season, request.matchday)?;
        let season_source = if correction.is_some() {
            SeasonSource::Substituted
        } else {
            SeasonSource::Requested
        };
        return Ok(SeasonResolution {
            league_code: league_code.to_string(),
            candidates,
            season,
            matches,
            source: season_source,
            correction,
            fallback_source: None,
            degraded: false,
        });
    }

    let mut newest_matches = Vec::new();
    for season in candidates.clone() {
        let matches = fetch_matches(source, league_code, season, request.matchday)?;
        if matches.iter().any(MatchRecord::is_real) {
            info!(league = league_code, %season, "resolved season with real fixtures");
            return Ok(SeasonResolution {
                league_code: league_code.to_string(),
                candidates,
                season,
                matches,
                source: SeasonSource::FirstWithFixtures,
                correction: None,
                fallback_source: None,
                degraded: false,
            });
        }
        debug!(%season, count = matches.len(), "season has placeholder fixtures only");
        if season == newest {
            newest_matches = matches;
        }
    }

    info!(league = league_code, season = %newest, "no season with real fixtures; using newest placeholder data");
    Ok(SeasonResolution {
        league_code: league_code.to_string(),
        candidates,
        season: newest,
        matches: newest_matches,
        source: SeasonSource::NewestPlaceholder,
        correction: None,
        fallback_source: Some(newest),
        degraded: true,
    })
}
