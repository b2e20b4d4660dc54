//! lotlens command line entry point.
//!
//! Runs the listing pipeline over a saved page snapshot and prints the
//! extracted record, research links, or the rendered panel fragment.
//! Logging goes to stderr so stdout stays pipeable.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use lotlens_core::{AppConfig, PrefsStore};
use lotlens_pipeline::{PageSnapshot, Pipeline, RunResult};
use lotlens_scrape::{VehicleRecord, build_research_links};

#[derive(Parser)]
#[command(name = "lotlens", version, about = "Vehicle listing research from marketplace page snapshots")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract a vehicle record from a saved page snapshot.
    Extract {
        /// Path to the saved HTML snapshot.
        file: PathBuf,

        /// Page URL the snapshot was taken from.
        #[arg(long)]
        url: String,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,

        /// Print the rendered panel HTML instead of the record summary.
        #[arg(long)]
        panel: bool,
    },

    /// Print research links for an explicitly described vehicle.
    Links {
        #[arg(long)]
        year: String,

        #[arg(long)]
        make: String,

        #[arg(long, default_value = "")]
        model: String,

        /// Listed price in whole dollars, used for the shopping range.
        #[arg(long)]
        price: Option<u64>,

        /// Zip code for the shopping link; falls back to the configured one.
        #[arg(long)]
        zip: Option<String>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load().context("failed to load configuration")?;

    match cli.command {
        Commands::Extract { file, url, json, panel } => extract(config, &file, &url, json, panel).await,
        Commands::Links { year, make, model, price, zip } => links(config, year, make, model, price, zip),
    }
}

async fn extract(config: AppConfig, file: &PathBuf, url: &str, json: bool, panel: bool) -> Result<()> {
    let html = fs::read_to_string(file).with_context(|| format!("failed to read {}", file.display()))?;
    let snapshot = PageSnapshot { url: url.to_string(), html };

    let mut pipeline = Pipeline::new(config);
    let result = match pipeline.process(&snapshot).await {
        Ok(result) => result,
        Err(err) => {
            let toast = pipeline.notification_for(&err);
            tracing::error!("pipeline failed: {}", err);
            eprintln!("{}", toast.html);
            bail!("{err}");
        }
    };

    match result {
        RunResult::Rendered(outcome) => {
            if panel {
                println!("{}", outcome.panel_html);
            } else if json {
                let document = serde_json::json!({
                    "record": outcome.record,
                    "from_cache": outcome.from_cache,
                    "panel_html": outcome.panel_html,
                });
                println!("{}", serde_json::to_string_pretty(&document)?);
            } else if let Some(record) = outcome.record {
                println!("{}", record.summary());
                match record.mileage {
                    Some(miles) => println!("mileage: {miles}"),
                    None => println!("mileage: not available"),
                }
                match record.price {
                    Some(price) => println!("price: ${price}"),
                    None => println!("price: not available"),
                }
            }
            Ok(())
        }
        RunResult::NotListing => bail!("URL does not look like a listing view: {url}"),
        RunResult::Stale => bail!("run was superseded before rendering"),
    }
}

fn links(
    config: AppConfig, year: String, make: String, model: String, price: Option<u64>, zip: Option<String>,
) -> Result<()> {
    if year.len() != 4 || !year.chars().all(|c| c.is_ascii_digit()) {
        bail!("year must be a 4-digit number, got {year:?}");
    }

    let record = VehicleRecord { year, make, model, trim: String::new(), mileage: None, price };

    // Zip precedence: flag, then saved preference, then configured fallback.
    let saved_zip = PrefsStore::new(&config.prefs_path)
        .load()
        .ok()
        .and_then(|prefs| prefs.get("zip").and_then(|v| v.as_str().map(str::to_string)));
    let zip = zip.or(saved_zip).unwrap_or(config.fallback_zip);

    for link in build_research_links(&record, &zip) {
        println!("{}: {}", link.label, link.href);
    }
    Ok(())
}
