use std::fmt;

use tracing::{debug, info};

use crate::error::{ResolveError, ResolveResult, TransportError};
use crate::fetch::JsonSource;
use crate::league_matcher::{LeagueCandidate, LeagueQuery};
use crate::outcome::ResolutionOutcome;
use crate::sportmonks::{self, FULL_LISTING_PAGE_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    NameSearch,
    CountryListing,
    FullListing,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StrategyKind::NameSearch => "name search",
            StrategyKind::CountryListing => "country listing",
            StrategyKind::FullListing => "full listing",
        };
        f.write_str(label)
    }
}

pub trait CandidateSource {
    fn kind(&self) -> StrategyKind;

    /// * `None` - strategy does not apply to this query (try next)
    /// * `Some(Ok(list))` - candidates in upstream order
    /// * `Some(Err(err))` - the endpoint failed
    fn candidates(
        &self,
        source: &dyn JsonSource,
        query: &LeagueQuery,
    ) -> Option<Result<Vec<LeagueCandidate>, TransportError>>;

    fn recovers_failures(&self) -> bool {
        false
    }
}

pub struct NameSearch;

impl CandidateSource for NameSearch {
    fn kind(&self) -> StrategyKind {
        StrategyKind::NameSearch
    }

    fn candidates(
        &self,
        source: &dyn JsonSource,
        query: &LeagueQuery,
    ) -> Option<Result<Vec<LeagueCandidate>, TransportError>> {
        Some(sportmonks::search_leagues(source, &query.name))
    }

    fn recovers_failures(&self) -> bool {
        true
    }
}

pub struct CountryListing;

impl CandidateSource for CountryListing {
    fn kind(&self) -> StrategyKind {
        StrategyKind::CountryListing
    }

    fn candidates(
        &self,
        source: &dyn JsonSource,
        query: &LeagueQuery,
    ) -> Option<Result<Vec<LeagueCandidate>, TransportError>> {
        let country_id = query.country_id?;
        Some(sportmonks::leagues_for_country(source, country_id))
    }
}

pub struct FullListing {
    pub page_size: u32,
}

impl Default for FullListing {
    fn default() -> Self {
        Self {
            page_size: FULL_LISTING_PAGE_SIZE,
        }
    }
}

impl CandidateSource for FullListing {
    fn kind(&self) -> StrategyKind {
        StrategyKind::FullListing
    }

    fn candidates(
        &self,
        source: &dyn JsonSource,
        _query: &LeagueQuery,
    ) -> Option<Result<Vec<LeagueCandidate>, TransportError>> {
        Some(sportmonks::list_leagues(source, self.page_size))
    }
}

pub fn default_strategies() -> Vec<Box<dyn CandidateSource>> {
    vec![
        Box::new(NameSearch),
        Box::new(CountryListing),
        Box::new(FullListing::default()),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptResult {
    Skipped,
    Failed(String),
    NoMatch { candidates: usize },
    /// The first matching candidate had no usable id.
    MatchWithoutId,
    Matched,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyAttempt {
    pub strategy: StrategyKind,
    pub result: AttemptResult,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeagueResolution {
    pub query: LeagueQuery,
    pub league_id: u64,
    pub league: LeagueCandidate,
    pub strategy: StrategyKind,
    pub attempts: Vec<StrategyAttempt>,
}

impl LeagueResolution {
    pub fn outcome(&self) -> ResolutionOutcome<u64, StrategyKind> {
        ResolutionOutcome {
            resolved: self.league_id,
            source: self.strategy,
            degraded: false,
        }
    }

    pub fn used_fallback(&self) -> bool {
        self.strategy != StrategyKind::NameSearch
    }

    pub fn notices(&self) -> Vec<String> {
        let mut out = Vec::new();
        for attempt in &self.attempts {
            if let AttemptResult::Failed(reason) = &attempt.result {
                out.push(format!("note: league {} failed ({reason}); continuing", attempt.strategy));
            }
        }
        if self.used_fallback() {
            out.push(format!(
                "note: league {:?} resolved via {} to {} (ID={})",
                self.query.name, self.strategy, self.league.name, self.league_id
            ));
        }
        out
    }
}

pub fn resolve_league(
    source: &dyn JsonSource,
    query: &LeagueQuery,
) -> ResolveResult<LeagueResolution> {
    resolve_league_with(source, query, &default_strategies())
}

pub fn resolve_league_with(
    source: &dyn JsonSource,
    query: &LeagueQuery,
    strategies: &[Box<dyn CandidateSource>],
) -> ResolveResult<LeagueResolution> {
    let mut attempts = Vec::with_capacity(strategies.len());

    for strategy in strategies {
        let kind = strategy.kind();
        let candidates = match strategy.candidates(source, query) {
            None => {
                debug!(strategy = %kind, "strategy not applicable");
                attempts.push(StrategyAttempt {
                    strategy: kind,
                    result: AttemptResult::Skipped,
                });
                continue;
            }
            Some(Ok(list)) => list,
            Some(Err(err)) if strategy.recovers_failures() => {
                info!(strategy = %kind, error = %err, "strategy failed; treating as no candidates");
                attempts.push(StrategyAttempt {
                    strategy: kind,
                    result: AttemptResult::Failed(err.to_string()),
                });
                continue;
            }
            Some(Err(err)) => return Err(err.into()),
        };

        let result = match query.select(&candidates) {
            Some(found) => match found.id {
                Some(id) => {
                    info!(strategy = %kind, id, name = %found.name, "league resolved");
                    attempts.push(StrategyAttempt {
                        strategy: kind,
                        result: AttemptResult::Matched,
                    });
                    return Ok(LeagueResolution {
                        query: query.clone(),
                        league_id: id,
                        league: found.clone(),
                        strategy: kind,
                        attempts,
                    });
                }
                None => {
                    debug!(strategy = %kind, name = %found.name, "first match has no id");
                    AttemptResult::MatchWithoutId
                }
            },
            None => {
                debug!(strategy = %kind, count = candidates.len(), "no matching league");
                AttemptResult::NoMatch {
                    candidates: candidates.len(),
                }
            }
        };
        attempts.push(StrategyAttempt {
            strategy: kind,
            result,
        });
    }

    Err(ResolveError::LeagueNotFound {
        name: query.name.clone(),
    })
}
