//! Directory driver: one report per CSV file per exchange directory.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::anomaly::OutlierDetector;
use crate::config::ScanConfig;
use crate::error::Result;
use crate::report::write_table_to_path;
use crate::sampler::WindowSampler;

const CSV_SUFFIX: &str = ".csv";

#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome {
    Written { output: PathBuf, outliers: usize },
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FileReport {
    pub exchange: String,
    pub input: PathBuf,
    pub outcome: FileOutcome,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanSummary {
    pub reports: Vec<FileReport>,
}

impl ScanSummary {
    pub fn written(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| matches!(r.outcome, FileOutcome::Written { .. }))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.reports.len() - self.written()
    }

    pub fn total_outliers(&self) -> usize {
        self.reports
            .iter()
            .map(|r| match r.outcome {
                FileOutcome::Written { outliers, .. } => outliers,
                FileOutcome::Failed { .. } => 0,
            })
            .sum()
    }
}

/// Report file name for `file_name` found under `exchange`.
pub fn output_file_name(exchange: &str, file_name: &str) -> String {
    format!("{exchange}_outliers_{file_name}")
}

/// Scan every exchange directory under `config.input_dir` and write one
/// outlier report per processed file.
///
/// Per-file failures are logged and recorded in the summary; only an invalid
/// config or unusable input/output directory aborts the scan.
pub fn run_scan(config: &ScanConfig) -> Result<ScanSummary> {
    config.validate()?;
    let sampler = config.sampler()?;
    let detector = config.detector()?;

    fs::create_dir_all(&config.output_dir)?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut summary = ScanSummary::default();
    for (exchange, exchange_dir) in list_exchanges(&config.input_dir)? {
        let files = match list_csv_files(&exchange_dir, config.num_files) {
            Ok(files) => files,
            Err(e) => {
                warn!(exchange = %exchange, error = %e, "cannot read exchange directory");
                continue;
            }
        };
        if files.is_empty() {
            warn!(dir = %exchange_dir.display(), "no CSV files found");
            continue;
        }

        for input in files {
            let file_name = input
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let output = config
                .output_dir
                .join(output_file_name(&exchange, &file_name));

            let outcome = match process_file(&input, &output, &sampler, &detector, &mut rng) {
                Ok(outliers) => {
                    info!(
                        exchange = %exchange,
                        file = %file_name,
                        outliers,
                        output = %output.display(),
                        "report written"
                    );
                    FileOutcome::Written { output, outliers }
                }
                Err(e) => {
                    warn!(exchange = %exchange, file = %file_name, error = %e, "file skipped");
                    FileOutcome::Failed {
                        reason: e.to_string(),
                    }
                }
            };
            summary.reports.push(FileReport {
                exchange: exchange.clone(),
                input,
                outcome,
            });
        }
    }

    Ok(summary)
}

fn process_file<G: Rng>(
    input: &Path,
    output: &Path,
    sampler: &WindowSampler,
    detector: &OutlierDetector,
    rng: &mut G,
) -> Result<usize> {
    let file = File::open(input)?;
    let window = sampler.sample_with(BufReader::new(file), rng)?;
    let stats = detector.stats(&window);
    debug!(
        file = %input.display(),
        start_index = window.start_index(),
        mean = stats.mean,
        std_dev = stats.std_dev,
        "window stats"
    );

    // computed in full before the report file is created
    let table = detector.detect(&window)?;
    write_table_to_path(&table, output)?;
    Ok(table.len())
}

/// Immediate subdirectories of `input_dir`, following symlinks. Unreadable
/// entries are logged and skipped.
fn list_exchanges(input_dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let mut exchanges = Vec::new();
    for entry in fs::read_dir(input_dir)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(dir = %input_dir.display(), error = %e, "skipping unreadable entry");
                continue;
            }
        };
        let path = entry.path();
        if path.is_dir() {
            let name = entry.file_name().to_string_lossy().into_owned();
            exchanges.push((name, path));
        }
    }
    exchanges.sort();
    Ok(exchanges)
}

fn list_csv_files(dir: &Path, limit: usize) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "skipping unreadable entry");
                continue;
            }
        };
        let path = entry.path();
        let is_csv = entry.file_name().to_string_lossy().ends_with(CSV_SUFFIX);
        if is_csv && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    files.truncate(limit);
    Ok(files)
}
