//! CLI: scan exchange directories for price outliers, or run one detection
//! over JSON records on stdin.
//!
//! Usage:
//!   price-outliers scan data/ reports/ --num-files 2
//!   echo '{"records":[...], "params":{"k":2.5}}' | price-outliers detect
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use outlier_core::{
    init_tracing, run_detect, run_scan, DetectInput, ScanConfig, DEFAULT_NUM_POINTS,
    DEFAULT_STD_THRESHOLD,
};
use tracing::info;

#[derive(Parser)]
#[command(name = "price-outliers")]
#[command(about = "Stock price outlier detection", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log filter, overrides OUTLIER_LOG (e.g. "outlier_core=debug")
    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write one outlier report per CSV file in each exchange directory
    Scan {
        /// Directory containing input CSV files grouped by exchange
        input_dir: PathBuf,

        /// Directory to save output CSV files
        output_dir: PathBuf,

        /// Number of files to process from each exchange directory
        #[arg(long, default_value_t = 1)]
        num_files: usize,

        /// Consecutive data points sampled from each file
        #[arg(long, default_value_t = DEFAULT_NUM_POINTS)]
        num_points: usize,

        /// Deviation threshold in standard deviations
        #[arg(short, long, default_value_t = DEFAULT_STD_THRESHOLD)]
        k: f64,

        /// Seed for reproducible window placement
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Read {"records": [...], "params": {...}} on stdin, write JSON on stdout
    Detect,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    match cli.command {
        Commands::Scan {
            input_dir,
            output_dir,
            num_files,
            num_points,
            k,
            seed,
        } => {
            let config = ScanConfig {
                input_dir,
                output_dir,
                num_files,
                num_points,
                k,
                seed,
            };
            let summary = run_scan(&config).with_context(|| {
                format!("scan of {} failed", config.input_dir.display())
            })?;
            info!(
                written = summary.written(),
                failed = summary.failed(),
                outliers = summary.total_outliers(),
                "scan complete"
            );
        }
        Commands::Detect => {
            let input: DetectInput =
                serde_json::from_reader(io::stdin()).context("invalid detect input")?;
            let output = run_detect(input)?;
            serde_json::to_writer(io::stdout(), &output)?;
        }
    }
    Ok(())
}
