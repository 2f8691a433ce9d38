use std::fmt;

use serde_json::Value;

const MIN_YEAR_EXCLUSIVE: i32 = 1900;
const MAX_YEAR_EXCLUSIVE: i32 = 2100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SeasonYear(i32);

impl SeasonYear {
    pub fn new(year: i32) -> Option<Self> {
        if year > MIN_YEAR_EXCLUSIVE && year < MAX_YEAR_EXCLUSIVE {
            Some(Self(year))
        } else {
            None
        }
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for SeasonYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Pulls the season year out of labels like `"2023"` or `"2023/2024"`.
///
/// Tokens are split on `/` and whitespace and tried left to right; the first
/// one that parses into the plausible range wins.
pub fn extract_year(raw: &str) -> Option<SeasonYear> {
    raw.split(|c: char| c == '/' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .filter_map(|token| token.parse::<i32>().ok())
        .find_map(SeasonYear::new)
}

pub fn extract_year_value(value: &Value) -> Option<SeasonYear> {
    match value {
        Value::String(s) => extract_year(s),
        Value::Number(n) => n
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .and_then(SeasonYear::new),
        _ => None,
    }
}

pub fn candidate_set(years: impl IntoIterator<Item = SeasonYear>) -> Vec<SeasonYear> {
    let mut out: Vec<SeasonYear> = years.into_iter().collect();
    out.sort_unstable_by(|a, b| b.cmp(a));
    out.dedup();
    out
}

pub fn join_years(years: &[SeasonYear]) -> String {
    years
        .iter()
        .map(|y| y.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
