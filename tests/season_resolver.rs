mod common;

use common::{FakeSource, logged_at, read_fixture};
use fixture_probe::error::ResolveError;
use fixture_probe::season_resolver::{
    SeasonRequest, SeasonSource, choose_season, resolve_season,
};
use fixture_probe::season_year::SeasonYear;
use serde_json::{Value, json};

fn year(y: i32) -> SeasonYear {
    SeasonYear::new(y).expect("valid year")
}

fn leagues(seasons: &[&str]) -> Value {
    Value::Array(
        seasons
            .iter()
            .map(|s| json!({ "leagueShortcut": "bl1", "leagueSeason": s }))
            .collect(),
    )
}

fn real_match(home: &str, away: &str) -> Value {
    json!({
        "group": { "groupOrderID": 1 },
        "team1": { "teamName": home },
        "team2": { "teamName": away },
        "matchResults": []
    })
}

fn placeholder_match(order: i64) -> Value {
    json!({
        "group": { "groupOrderID": order },
        "team1": { "teamName": "" },
        "team2": {},
        "matchResults": []
    })
}

#[test]
fn auto_mode_skips_placeholder_seasons() {
    let source = FakeSource::new()
        .with("getavailableleagues", leagues(&["2025", "2024", "2023"]))
        .with("getmatchdata/bl1/2025", json!([placeholder_match(1), placeholder_match(2)]))
        .with("getmatchdata/bl1/2024", json!([]))
        .with("getmatchdata/bl1/2023", json!([placeholder_match(1), real_match("SC Freiburg", "1. FC Union Berlin")]));

    let res = resolve_season(&source, "bl1", SeasonRequest::default()).expect("resolves");
    assert_eq!(res.season, year(2023));
    assert_eq!(res.source, SeasonSource::FirstWithFixtures);
    assert!(!res.degraded);
    assert_eq!(res.fallback_source, None);
    assert_eq!(res.matches.len(), 2);
    assert_eq!(
        source.endpoints(),
        vec![
            "getavailableleagues",
            "getmatchdata/bl1/2025",
            "getmatchdata/bl1/2024",
            "getmatchdata/bl1/2023",
        ]
    );
    assert_eq!(res.notices().len(), 1);
}

#[test]
fn short_names_alone_do_not_make_a_season_real() {
    let tbd = json!({
        "group": { "groupOrderID": 1 },
        "team1": { "teamName": "", "shortName": "TBD" },
        "team2": { "teamName": "", "shortName": "TBD" },
        "matchResults": []
    });
    let source = FakeSource::new()
        .with("getavailableleagues", leagues(&["2025", "2024"]))
        .with("getmatchdata/bl1/2025", json!([tbd]))
        .with("getmatchdata/bl1/2024", json!([real_match("Borussia Dortmund", "RB Leipzig")]));

    let res = resolve_season(&source, "bl1", SeasonRequest::default()).expect("resolves");
    assert_eq!(res.season, year(2024));
    assert_eq!(res.source, SeasonSource::FirstWithFixtures);
    assert!(!res.degraded);
}

#[test]
fn auto_mode_stops_at_first_real_season() {
    let source = FakeSource::new()
        .with("getavailableleagues", leagues(&["2025", "2024"]))
        .with("getmatchdata/bl1/2025", json!([real_match("Hamburger SV", "1. FC Köln")]));

    let res = resolve_season(&source, "bl1", SeasonRequest::default()).expect("resolves");
    assert_eq!(res.season, year(2025));
    assert!(res.notices().is_empty());
    // 2024 never requested; the fake would have answered 404.
    assert_eq!(source.endpoints().len(), 2);
}

#[test]
fn all_placeholder_falls_back_to_newest_degraded() {
    let source = FakeSource::new()
        .with("getavailableleagues", leagues(&["2024", "2025"]))
        .with("getmatchdata/bl1/2025", json!([placeholder_match(1), placeholder_match(2)]))
        .with("getmatchdata/bl1/2024", json!([placeholder_match(1)]));

    let res = resolve_season(&source, "bl1", SeasonRequest::default()).expect("resolves");
    assert_eq!(res.season, year(2025));
    assert_eq!(res.source, SeasonSource::NewestPlaceholder);
    assert!(res.degraded);
    assert_eq!(res.fallback_source, Some(year(2025)));
    assert_eq!(res.matches.len(), 2);
    assert!(res.matches.iter().all(|m| m.is_placeholder()));
    assert_eq!(res.notices().len(), 1);
}

#[test]
fn notices_are_not_repeated_in_default_log_output() {
    let source = FakeSource::new()
        .with("getavailableleagues", leagues(&["2025", "2024"]))
        .with("getmatchdata/bl1/2025", json!([placeholder_match(1)]))
        .with("getmatchdata/bl1/2024", json!([placeholder_match(1)]));

    let (res, quiet) = logged_at("warn", || resolve_season(&source, "bl1", SeasonRequest::default()));
    assert!(res.expect("resolves").degraded);
    assert_eq!(quiet, "");

    let explicit = SeasonRequest {
        season: Some(2019),
        matchday: None,
    };
    let (res, quiet) = logged_at("warn", || resolve_season(&source, "bl1", explicit));
    assert!(res.expect("resolves").correction.is_some());
    assert_eq!(quiet, "");

    let (_, verbose) = logged_at("info", || resolve_season(&source, "bl1", SeasonRequest::default()));
    assert!(verbose.contains("no season with real fixtures"));
}

#[test]
fn matchday_is_part_of_the_endpoint() {
    let source = FakeSource::new()
        .with("getavailableleagues", leagues(&["2024"]))
        .with("getmatchdata/bl1/2024/7", json!([real_match("VfL Bochum", "FC St. Pauli")]));

    let res = resolve_season(
        &source,
        "bl1",
        SeasonRequest {
            season: None,
            matchday: Some(7),
        },
    )
    .expect("resolves");
    assert_eq!(res.season, year(2024));
    assert!(source.endpoints().contains(&"getmatchdata/bl1/2024/7".to_string()));
}

#[test]
fn explicit_season_is_trusted_without_placeholder_scan() {
    let source = FakeSource::new()
        .with("getavailableleagues", leagues(&["2025", "2024"]))
        .with("getmatchdata/bl1/2024", json!([placeholder_match(1)]));

    let res = resolve_season(
        &source,
        "bl1",
        SeasonRequest {
            season: Some(2024),
            matchday: None,
        },
    )
    .expect("resolves");
    assert_eq!(res.season, year(2024));
    assert_eq!(res.source, SeasonSource::Requested);
    assert!(!res.degraded);
    assert!(res.correction.is_none());
    assert_eq!(source.endpoints().len(), 2);
}

#[test]
fn unlisted_explicit_season_is_replaced_by_newest() {
    let source = FakeSource::new()
        .with("getavailableleagues", leagues(&["2025", "2024"]))
        .with("getmatchdata/bl1/2025", json!([real_match("Werder Bremen", "FC Augsburg")]));

    let res = resolve_season(
        &source,
        "bl1",
        SeasonRequest {
            season: Some(2019),
            matchday: None,
        },
    )
    .expect("resolves");
    assert_eq!(res.season, year(2025));
    assert_eq!(res.source, SeasonSource::Substituted);
    let correction = res.correction.as_ref().expect("correction");
    assert_eq!(correction.requested, 2019);
    assert_eq!(correction.substituted, year(2025));
    assert_eq!(
        res.notices(),
        vec![
            "note: season 2019 is not listed for league bl1; using 2025. Available seasons: 2025, 2024"
                .to_string()
        ]
    );
}

#[test]
fn candidates_come_from_fixture_without_duplicates() {
    let source = FakeSource::new()
        .with("getavailableleagues", read_fixture("openligadb_available_leagues.json"))
        .with("getmatchdata/bl1/2025", json!([real_match("A", "B")]));

    let res = resolve_season(&source, "BL1", SeasonRequest::default()).expect("resolves");
    assert_eq!(res.candidates, vec![year(2025), year(2024), year(2023)]);
}

#[test]
fn no_usable_seasons_is_an_error() {
    let source = FakeSource::new().with("getavailableleagues", leagues(&["N/A", ""]));
    let err = resolve_season(&source, "bl1", SeasonRequest::default()).unwrap_err();
    assert!(matches!(err, ResolveError::NoSeasonsFound { ref league } if league == "bl1"));
}

#[test]
fn match_endpoint_failure_is_fatal() {
    let source = FakeSource::new()
        .with("getavailableleagues", leagues(&["2025", "2024"]))
        .failing("getmatchdata/bl1/2025", 503);

    let err = resolve_season(&source, "bl1", SeasonRequest::default()).unwrap_err();
    assert!(matches!(err, ResolveError::Transport(_)));
}

#[test]
fn non_array_match_payload_is_rejected() {
    let source = FakeSource::new()
        .with("getavailableleagues", leagues(&["2025"]))
        .with("getmatchdata/bl1/2025", json!({ "error": "nope" }));

    let err = resolve_season(&source, "bl1", SeasonRequest::default()).unwrap_err();
    assert!(matches!(err, ResolveError::Transport(_)));
}

#[test]
fn repeated_resolution_yields_same_outcome() {
    let source = FakeSource::new()
        .with("getavailableleagues", leagues(&["2025", "2024"]))
        .with("getmatchdata/bl1/2025", json!([placeholder_match(1)]))
        .with("getmatchdata/bl1/2024", json!([placeholder_match(1)]));

    let first = resolve_season(&source, "bl1", SeasonRequest::default()).expect("resolves");
    let second = resolve_season(&source, "bl1", SeasonRequest::default()).expect("resolves");
    assert_eq!(first.outcome(), second.outcome());
    assert_eq!(first, second);
}

#[test]
fn choose_season_for_table_override() {
    let candidates = vec![year(2025), year(2024)];
    assert_eq!(choose_season(&candidates, Some(2024)), Some((year(2024), None)));
    let (season, correction) = choose_season(&candidates, Some(1999)).expect("non-empty");
    assert_eq!(season, year(2025));
    assert!(correction.is_some());
    assert_eq!(choose_season(&[], Some(2024)), None);
}
