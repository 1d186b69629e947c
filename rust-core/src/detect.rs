//! JSON bridge: one sample + detection over records supplied in a document.
//!
//! Input timestamps are `DD-MM-YYYY` like the CSV files; output
//! `Timestamp` values are ISO `YYYY-MM-DD`, the same as the CSV reports.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::anomaly::{OutlierDetector, WindowStats, DEFAULT_STD_THRESHOLD};
use crate::error::Result;
use crate::models::{OutlierTable, PriceRecord};
use crate::sampler::{WindowSampler, DEFAULT_NUM_POINTS};

#[derive(Debug, Deserialize)]
pub struct DetectInput {
    pub records: Vec<PriceRecord>,
    #[serde(default)]
    pub params: DetectParams,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DetectParams {
    pub num_points: usize,
    pub k: f64,
    pub seed: Option<u64>,
}

impl Default for DetectParams {
    fn default() -> Self {
        Self {
            num_points: DEFAULT_NUM_POINTS,
            k: DEFAULT_STD_THRESHOLD,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectOutput {
    pub start_index: usize,
    pub stats: WindowStats,
    pub outliers: OutlierTable,
}

/// Sample a window from `input.records` and run the outlier test on it.
pub fn run_detect(input: DetectInput) -> Result<DetectOutput> {
    let sampler = WindowSampler::new(input.params.num_points)?;
    let detector = OutlierDetector::new(input.params.k)?;
    let mut rng = match input.params.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let window = sampler.sample_records(input.records, &mut rng)?;
    let stats = detector.stats(&window);
    let outliers = detector.detect(&window)?;
    Ok(DetectOutput {
        start_index: window.start_index(),
        stats,
        outliers,
    })
}
