use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },

    #[error("http {status} from {url}: {snippet}")]
    Status {
        url: String,
        status: u16,
        snippet: String,
    },

    #[error("non-json response from {url}: {message}")]
    InvalidJson { url: String, message: String },

    #[error("unexpected payload from {url}: {message}")]
    UnexpectedPayload { url: String, message: String },
}

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("missing {var} environment variable; export your API token first")]
    MissingCredential { var: &'static str },

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("no seasons found for league {league:?}")]
    NoSeasonsFound { league: String },

    #[error("could not find league named {name:?} via search, country listing or full listing")]
    LeagueNotFound { name: String },

    #[error("league with id {league_id} not found")]
    LeagueMissing { league_id: u64 },
}

pub type ResolveResult<T> = Result<T, ResolveError>;
