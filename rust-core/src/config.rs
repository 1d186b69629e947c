//! Run configuration for a directory scan.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::anomaly::{OutlierDetector, DEFAULT_STD_THRESHOLD};
use crate::error::{OutlierError, Result};
use crate::sampler::{WindowSampler, DEFAULT_NUM_POINTS};

fn default_num_files() -> usize {
    1
}

fn default_num_points() -> usize {
    DEFAULT_NUM_POINTS
}

fn default_k() -> f64 {
    DEFAULT_STD_THRESHOLD
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Directory holding one subdirectory of CSV files per exchange.
    pub input_dir: PathBuf,
    /// Destination for `{exchange}_outliers_{file}` reports.
    pub output_dir: PathBuf,
    /// Files processed per exchange directory, in name order.
    #[serde(default = "default_num_files")]
    pub num_files: usize,
    #[serde(default = "default_num_points")]
    pub num_points: usize,
    /// Deviation multiplier in standard deviations.
    #[serde(default = "default_k")]
    pub k: f64,
    /// Fixed seed for reproducible windows; OS entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl ScanConfig {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            num_files: default_num_files(),
            num_points: default_num_points(),
            k: default_k(),
            seed: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_files == 0 {
            return Err(OutlierError::invalid("num_files", "must be at least 1"));
        }
        self.sampler()?;
        self.detector()?;
        Ok(())
    }

    pub fn sampler(&self) -> Result<WindowSampler> {
        WindowSampler::new(self.num_points)
    }

    pub fn detector(&self) -> Result<OutlierDetector> {
        OutlierDetector::new(self.k)
    }
}
