use anyhow::{Context, Result};
use clap::Parser;

use fixture_probe::config::{self, DEFAULT_LEAGUE_SHORT, OpenLigaDbConfig};
use fixture_probe::fetch::HttpJsonSource;
use fixture_probe::matches::preview_lines;
use fixture_probe::openligadb::fetch_table;
use fixture_probe::season_resolver::{SeasonRequest, choose_season, resolve_season};
use fixture_probe::table::format_table_entry;

/// Fetch fixtures (and optionally the table) of a league from OpenLigaDB.
#[derive(Debug, Parser)]
#[command(name = "openligadb_fetch")]
struct Args {
    /// League short code (bl1 = 1. Bundesliga)
    #[arg(long, default_value = DEFAULT_LEAGUE_SHORT)]
    league_short: String,

    /// Season year, e.g. 2023. Defaults to the newest season with fixtures.
    #[arg(long)]
    season: Option<i32>,

    /// Matchday. Without it all matches of the season are fetched.
    #[arg(long)]
    matchday: Option<u32>,

    /// Number of matches shown in the preview
    #[arg(long, default_value_t = 5)]
    preview: usize,

    /// Also print the league table
    #[arg(long)]
    show_table: bool,

    /// Season for the table, if different from the match season
    #[arg(long)]
    table_season: Option<i32>,
}

fn main() -> Result<()> {
    config::load_dotenv();
    config::init_tracing();
    let args = Args::parse();

    let cfg = OpenLigaDbConfig::from_env();
    let source = HttpJsonSource::new(&cfg.base_url, cfg.timeout)?;

    let resolution = resolve_season(
        &source,
        &args.league_short,
        SeasonRequest {
            season: args.season,
            matchday: args.matchday,
        },
    )
    .with_context(|| format!("resolving season for league {}", args.league_short))?;
    for notice in resolution.notices() {
        eprintln!("{notice}");
    }

    println!(
        "League: {} | Season: {}",
        args.league_short, resolution.season
    );

    if resolution.matches.is_empty() {
        println!("No matches found.");
    } else {
        println!("Showing up to {} matches:", args.preview);
        for line in preview_lines(&resolution.matches, args.preview) {
            println!("  {line}");
        }
    }

    if args.show_table {
        let table_season = match args.table_season {
            Some(requested) => {
                let (season, correction) =
                    choose_season(&resolution.candidates, Some(requested))
                        .context("no seasons available for table")?;
                if let Some(correction) = correction {
                    eprintln!("{}", correction.notice(&args.league_short));
                }
                season
            }
            None => resolution.season,
        };
        let table = fetch_table(&source, &args.league_short, table_season)
            .with_context(|| format!("fetching table for season {table_season}"))?;
        println!("\nTable {table_season}:");
        for entry in &table {
            println!("  {}", format_table_entry(entry));
        }
    }

    Ok(())
}
