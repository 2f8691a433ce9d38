use chrono::{DateTime, NaiveDateTime};
use serde_json::Value;

use crate::json::{pick, pick_i64, pick_string, pick_u64};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreUpdate {
    pub order: i64,
    pub home_points: Option<i64>,
    pub away_points: Option<i64>,
}

impl ScoreUpdate {
    pub fn display(&self) -> String {
        format!(
            "{}:{}",
            points_label(self.home_points),
            points_label(self.away_points)
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchdayGroup {
    pub order: Option<i64>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    pub id: Option<u64>,
    pub home: Option<String>,
    pub away: Option<String>,
    pub results: Vec<ScoreUpdate>,
    pub kickoff: Option<String>,
    pub group: MatchdayGroup,
}

impl MatchRecord {
    pub fn is_real(&self) -> bool {
        has_name(self.home.as_deref()) && has_name(self.away.as_deref())
    }

    pub fn is_placeholder(&self) -> bool {
        !self.is_real()
    }

    /// Highest ordering key wins; on equal keys the later entry wins.
    pub fn latest_score(&self) -> Option<&ScoreUpdate> {
        self.results.iter().max_by_key(|r| r.order)
    }

    pub fn kickoff_display(&self) -> String {
        match self.kickoff.as_deref() {
            Some(raw) => match parse_kickoff(raw) {
                Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
                None => raw.to_string(),
            },
            None => "tbd".to_string(),
        }
    }
}

fn has_name(name: Option<&str>) -> bool {
    name.is_some_and(|n| !n.trim().is_empty())
}

fn points_label(points: Option<i64>) -> String {
    points.map_or_else(|| "?".to_string(), |p| p.to_string())
}

// Offset timestamps keep their wall-clock time.
pub fn parse_kickoff(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_local());
    }
    let naive = trimmed.trim_end_matches('Z');
    NaiveDateTime::parse_from_str(naive, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(naive, "%Y-%m-%dT%H:%M"))
        .ok()
}

pub fn parse_match_record(v: &Value) -> Option<MatchRecord> {
    if !v.is_object() {
        return None;
    }
    let id = pick_u64(v, &["matchID", "MatchID", "matchId"]);
    let home = pick(v, &["team1", "Team1"]).and_then(team_name);
    let away = pick(v, &["team2", "Team2"]).and_then(team_name);
    let kickoff = pick_string(
        v,
        &[
            "matchDateTime",
            "MatchDateTime",
            "matchDateTimeUTC",
            "MatchDateTimeUTC",
        ],
    );
    let group = pick(v, &["group", "Group"])
        .map(|g| MatchdayGroup {
            order: pick_i64(g, &["groupOrderID", "GroupOrderID"]),
            name: pick_string(g, &["groupName", "GroupName"]),
        })
        .unwrap_or_default();

    let results = pick(v, &["matchResults", "MatchResults"])
        .and_then(|r| r.as_array())
        .map(|arr| arr.iter().filter_map(parse_score_update).collect())
        .unwrap_or_default();

    Some(MatchRecord {
        id,
        home,
        away,
        results,
        kickoff,
        group,
    })
}

fn team_name(team: &Value) -> Option<String> {
    pick_string(team, &["teamName", "TeamName"])
}

fn parse_score_update(v: &Value) -> Option<ScoreUpdate> {
    if !v.is_object() {
        return None;
    }
    Some(ScoreUpdate {
        order: pick_i64(v, &["resultOrderID", "ResultOrderID"]).unwrap_or(0),
        home_points: pick_i64(v, &["pointsTeam1", "PointsTeam1"]),
        away_points: pick_i64(v, &["pointsTeam2", "PointsTeam2"]),
    })
}

/// `MD 5 2024-08-23 20:30 FC Bayern 2:1 VfL Wolfsburg`
pub fn format_match(m: &MatchRecord) -> String {
    let matchday = match (m.group.order, m.group.name.as_deref()) {
        (Some(order), _) => format!("{order:>2}"),
        (None, Some(name)) => name.to_string(),
        (None, None) => " ?".to_string(),
    };
    let score = m
        .latest_score()
        .map_or_else(|| "-".to_string(), ScoreUpdate::display);
    format!(
        "MD{matchday} {} {} {score} {}",
        m.kickoff_display(),
        m.home.as_deref().unwrap_or("?"),
        m.away.as_deref().unwrap_or("?"),
    )
}

pub fn preview_lines(matches: &[MatchRecord], limit: usize) -> Vec<String> {
    matches.iter().take(limit).map(format_match).collect()
}
