use serde_json::Value;

use crate::json::{pick_i64, pick_string};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableEntry {
    pub rank: i64,
    pub team: String,
    pub matches: Option<i64>,
    pub goal_diff: Option<i64>,
    pub points: Option<i64>,
}

pub fn parse_table(rows: &[Value]) -> Vec<TableEntry> {
    rows.iter()
        .enumerate()
        .filter(|(_, row)| row.is_object())
        .map(|(idx, row)| TableEntry {
            rank: pick_i64(row, &["rank", "Rank"]).unwrap_or(idx as i64 + 1),
            team: pick_string(row, &["teamName", "TeamName", "shortName"])
                .unwrap_or_else(|| "?".to_string()),
            matches: pick_i64(row, &["matches", "Matches"]),
            goal_diff: pick_i64(row, &["goalDiff", "GoalDiff"]),
            points: pick_i64(row, &["points", "Points"]),
        })
        .collect()
}

pub fn format_table_entry(entry: &TableEntry) -> String {
    let matches = entry
        .matches
        .map_or_else(|| format!("{:>2}", "?"), |m| format!("{m:>2}"));
    let goal_diff = entry
        .goal_diff
        .map_or_else(|| format!("{:>3}", "?"), |d| format!("{d:>+3}"));
    let points = entry
        .points
        .map_or_else(|| format!("{:>3}", "?"), |p| format!("{p:>3}"));
    format!(
        "{:>2}. {:<24} {matches} games  GD {goal_diff}  Pts {points}",
        entry.rank, entry.team
    )
}
