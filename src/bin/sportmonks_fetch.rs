use anyhow::{Context, Result};
use clap::Parser;

use fixture_probe::config::{
    self, DEFAULT_LEAGUE_NAME, GERMANY_COUNTRY_ID, SPORTMONKS_TOKEN_VAR, SportmonksConfig,
    country_filter,
};
use fixture_probe::fetch::HttpJsonSource;
use fixture_probe::league_matcher::LeagueQuery;
use fixture_probe::league_resolver::resolve_league;
use fixture_probe::sportmonks::{
    fetch_league, fetch_season_details, fetch_season_fixtures, format_search_match,
    search_league_records,
};

/// Sportmonks smoke test: resolve a league, then show its current season and
/// a few fixtures. Needs SPORTMONKS_API_TOKEN.
#[derive(Debug, Parser)]
#[command(name = "sportmonks_fetch")]
struct Args {
    /// League id to fetch directly (skips name lookup)
    #[arg(long)]
    league_id: Option<u64>,

    /// League name substring to search for
    #[arg(long, default_value = DEFAULT_LEAGUE_NAME)]
    league_name: String,

    /// Country id filter (11 = Germany); use -1 to disable
    #[arg(long, default_value_t = GERMANY_COUNTRY_ID, allow_negative_numbers = true)]
    country_id: i64,

    /// Number of fixtures to fetch for the current season
    #[arg(long, default_value_t = 5)]
    fixtures: u32,

    /// Print the raw league search matches before fetching details
    #[arg(long)]
    show_search: bool,
}

fn main() -> Result<()> {
    config::load_dotenv();
    config::init_tracing();
    let args = Args::parse();

    let cfg = SportmonksConfig::from_env();
    let token = cfg
        .require_token()
        .with_context(|| format!("{SPORTMONKS_TOKEN_VAR} is required"))?;
    let source = HttpJsonSource::new(&cfg.base_url, cfg.timeout)?.with_query_param("api_token", token);

    let league_id = match args.league_id {
        Some(id) => id,
        None => {
            let query = LeagueQuery::new(&args.league_name, country_filter(args.country_id));
            let resolution = resolve_league(&source, &query)?;
            for notice in resolution.notices() {
                eprintln!("{notice}");
            }
            resolution.league_id
        }
    };

    if args.show_search {
        let matches = search_league_records(&source, &args.league_name)
            .context("league search request failed")?;
        println!("Search matches:");
        for item in &matches {
            println!("{}", format_search_match(item));
        }
    }

    let league = fetch_league(&source, league_id)?;
    let current = league
        .current_season_id
        .map_or_else(|| "-".to_string(), |id| id.to_string());
    println!(
        "League: {} (ID={league_id}, Current Season={current})",
        league.name
    );

    let Some(season_id) = league.current_season_id else {
        eprintln!("League has no current season id in the payload; skipping season details");
        return Ok(());
    };

    let season = fetch_season_details(&source, season_id)
        .with_context(|| format!("fetching season {season_id}"))?;
    println!(
        "Season: {} | Start: {} | End: {}",
        season.name.as_deref().unwrap_or("-"),
        season.start_date.as_deref().unwrap_or("-"),
        season.end_date.as_deref().unwrap_or("-"),
    );

    let fixtures = fetch_season_fixtures(&source, season_id, args.fixtures)
        .with_context(|| format!("fetching fixtures for season {season_id}"))?;
    for fixture in &fixtures {
        println!("{}", fixture.display());
    }

    Ok(())
}
