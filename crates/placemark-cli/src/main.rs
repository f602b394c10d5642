//! Placemark — turn survey spreadsheets into styled map places.
//! Entry point for the `placemark` binary.

mod report;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use placemark_config::Settings;
use placemark_ingestion::{build_geocoder, read_csv_files, run_pipeline, DisabledGeocoder, Geocoder};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::report::RunReport;

#[derive(Parser)]
#[command(name = "placemark")]
#[command(about = "Normalise, geocode and style survey records for map rendering")]
#[command(version)]
#[command(after_help = "\
Examples:
  placemark shelters.csv
  placemark north.csv south.csv --config survey.toml -o places.json
  placemark coordinates-only.csv --no-geocode")]
struct Cli {
    /// CSV files to read, in order (header row = column names)
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Settings file (.toml, .json, .yaml); defaults to ./placemark.toml
    #[arg(long, short = 'c', env = "PLACEMARK_CONFIG")]
    config: Option<PathBuf>,

    /// Write the JSON report here instead of stdout
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Skip geocoding; rows with an address are dropped
    #[arg(long)]
    no_geocode: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("placemark=debug,info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    dotenvy::dotenv().ok();

    info!("Placemark {}", env!("CARGO_PKG_VERSION"));

    let settings = match &cli.config {
        Some(path) => Settings::from_path(path),
        None => Settings::load(),
    }
    .context("failed to load settings")?;

    for warning in settings.validate()? {
        warn!("{warning}");
    }

    let geocoder: Arc<dyn Geocoder> = if cli.no_geocode {
        Arc::new(DisabledGeocoder)
    } else {
        build_geocoder(&settings)?
    };

    let records = read_csv_files(&cli.inputs)?;
    let result = run_pipeline(&records, &settings, geocoder.as_ref(), None).await;

    if !result.errors.is_empty() {
        warn!(dropped = result.dropped, "Some records were dropped; see the report's errors");
    }

    let report = RunReport::new(&result, &settings.display);
    match &cli.output {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("cannot create {}", path.display()))?;
            let mut out = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut out, &report)?;
            out.flush()?;
            info!(path = %path.display(), places = report.places.len(), "Report written");
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            serde_json::to_writer_pretty(&mut out, &report)?;
            writeln!(out)?;
        }
    }

    Ok(())
}
