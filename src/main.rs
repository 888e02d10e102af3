//! # alicuotas CLI
//!
//! Scans the data directory for purchase-book exports, derives the tax
//! combinations of every file and prints the sorted union.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use alicuotas::core::{Aggregator, AlicuotaError, ExtractionConfig};
use alicuotas::discovery::{DiscoveryConfig, discover};
use alicuotas::xlsx::read_document;

/// List the distinct tax combinations found in AFIP purchase-book exports.
#[derive(Parser, Debug)]
#[command(name = "alicuotas", version, about)]
struct Cli {
    /// Directory scanned recursively for exports [default: ./data or $ALICUOTAS_DATA_DIR].
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Substring an export's path must contain [default: CM03 or $ALICUOTAS_MARKER].
    #[arg(long)]
    marker: Option<String>,

    /// Print the final report as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut discovery = DiscoveryConfig::from_env();
    if let Some(dir) = cli.data_dir {
        discovery.data_dir = dir;
    }
    if let Some(marker) = cli.marker {
        discovery.marker = marker;
    }

    let files = discover(&discovery).inspect_err(|e| error!("{e}"))?;
    info!(count = files.len(), ?files, "files to read");

    let mut aggregator = Aggregator::new(ExtractionConfig::default());
    for file in &files {
        let path = discovery.data_dir.join(file);
        let document = read_document(&path)?;
        let name = file.display().to_string();

        if let Err(e) = aggregator.add_document(name.as_str(), &document) {
            if matches!(e, AlicuotaError::DataIntegrity { .. }) {
                error!("ERROR: {e}");
            }
            return Err(e).with_context(|| format!("processing {name}"));
        }
    }

    let report = aggregator.finish();
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{report}");
    }
    Ok(())
}
