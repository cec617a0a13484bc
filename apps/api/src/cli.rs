//! Command-line surface: `serve` runs the HTTP service, `search` runs one search
//! against fixture files and prints the ranked locations.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use crate::catalog::{load_catalog, load_demands};
use crate::config::Config;
use crate::models::SearchResult;
use crate::search::find_locations_with_limits;

#[derive(Debug, Parser)]
#[command(
    name = "vehicle-search",
    version,
    about = "Find storage locations able to hold a set of vehicles"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the HTTP service (default)
    Serve,
    /// Search fixture files and print the matching locations
    Search(SearchArgs),
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Listing catalog (defaults to LISTINGS_PATH)
    #[arg(short, long)]
    pub listings: Option<PathBuf>,

    /// Vehicle demand list
    #[arg(short, long)]
    pub vehicles: PathBuf,

    /// Print the results as a JSON array
    #[arg(long)]
    pub json: bool,
}

pub fn run_search(args: &SearchArgs, config: &Config) -> Result<()> {
    let listings_path = args.listings.as_ref().unwrap_or(&config.listings_path);
    let catalog = load_catalog(listings_path)?;
    let demands = load_demands(&args.vehicles)?;

    let results = find_locations_with_limits(&demands, &catalog, &config.search_limits())
        .context("Vehicle list rejected")?;

    println!("{}", render_results(&results, args.json)?);
    Ok(())
}

fn render_results(results: &[SearchResult], json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(results)?);
    }
    Ok(results
        .iter()
        .map(format_result_line)
        .collect::<Vec<_>>()
        .join("\n"))
}

fn format_result_line(result: &SearchResult) -> String {
    format!(
        "Location: {}, Total Price: {}, Listings: {}",
        result.location_id,
        result.total_price_in_cents,
        result.listing_ids.join(",")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result() -> SearchResult {
        SearchResult {
            location_id: "loc-1".to_string(),
            listing_ids: vec!["a".to_string(), "b".to_string()],
            total_price_in_cents: 1250,
        }
    }

    #[test]
    fn test_format_result_line() {
        assert_eq!(
            format_result_line(&result()),
            "Location: loc-1, Total Price: 1250, Listings: a,b"
        );
    }

    #[test]
    fn test_render_json() {
        let rendered = render_results(&[result()], true).unwrap();
        let parsed: Vec<SearchResult> = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed, vec![result()]);
    }

    #[test]
    fn test_no_subcommand_defaults_to_serve() {
        let cli = Cli::try_parse_from(["vehicle-search"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_search_args() {
        let cli = Cli::try_parse_from([
            "vehicle-search",
            "search",
            "--vehicles",
            "vehicles.json",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Some(Command::Search(args)) => {
                assert_eq!(args.vehicles, PathBuf::from("vehicles.json"));
                assert!(args.listings.is_none());
                assert!(args.json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_search_requires_vehicles() {
        assert!(Cli::try_parse_from(["vehicle-search", "search"]).is_err());
    }
}
