use std::env;
use std::time::Duration;

use crate::error::{ResolveError, ResolveResult};

pub const OPENLIGADB_BASE_URL: &str = "https://api.openligadb.de";
pub const SPORTMONKS_BASE_URL: &str = "https://api.sportmonks.com/v3/football";
pub const SPORTMONKS_TOKEN_VAR: &str = "SPORTMONKS_API_TOKEN";

pub const DEFAULT_LEAGUE_SHORT: &str = "bl1";
pub const DEFAULT_LEAGUE_NAME: &str = "Bundesliga";
pub const GERMANY_COUNTRY_ID: i64 = 11;

const OPENLIGADB_TIMEOUT_SECS: u64 = 15;
const SPORTMONKS_TIMEOUT_SECS: u64 = 30;

pub fn load_dotenv() {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
}

pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[derive(Debug, Clone)]
pub struct OpenLigaDbConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl OpenLigaDbConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            base_url: non_empty(lookup("OPENLIGADB_BASE_URL"))
                .unwrap_or_else(|| OPENLIGADB_BASE_URL.to_string()),
            timeout: timeout_from(&lookup, OPENLIGADB_TIMEOUT_SECS),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SportmonksConfig {
    pub base_url: String,
    pub api_token: Option<String>,
    pub timeout: Duration,
}

impl SportmonksConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            base_url: non_empty(lookup("SPORTMONKS_BASE_URL"))
                .unwrap_or_else(|| SPORTMONKS_BASE_URL.to_string()),
            api_token: non_empty(lookup(SPORTMONKS_TOKEN_VAR)),
            timeout: timeout_from(&lookup, SPORTMONKS_TIMEOUT_SECS),
        }
    }

    pub fn require_token(&self) -> ResolveResult<&str> {
        self.api_token
            .as_deref()
            .ok_or(ResolveError::MissingCredential {
                var: SPORTMONKS_TOKEN_VAR,
            })
    }
}

/// Negative ids switch the country filter off.
pub fn country_filter(raw: i64) -> Option<u64> {
    u64::try_from(raw).ok()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn timeout_from(lookup: &impl Fn(&str) -> Option<String>, default_secs: u64) -> Duration {
    let secs = lookup("FETCH_TIMEOUT_SECS")
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(default_secs)
        .clamp(1, 120);
    Duration::from_secs(secs)
}
