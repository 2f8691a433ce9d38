pub mod config;
pub mod error;
pub mod fetch;
pub mod json;
pub mod league_matcher;
pub mod league_resolver;
pub mod matches;
pub mod openligadb;
pub mod outcome;
pub mod season_resolver;
pub mod season_year;
pub mod sportmonks;
pub mod table;
