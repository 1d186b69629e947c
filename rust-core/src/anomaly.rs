//! Standard-deviation threshold outlier detection over a sampled window.

use serde::Serialize;

use crate::error::{OutlierError, Result};
use crate::models::{OutlierRow, OutlierTable, PriceRecord, SampledWindow};

/// Default deviation multiplier, in standard deviations.
pub const DEFAULT_STD_THRESHOLD: f64 = 2.0;

/// Summary statistics of one window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WindowStats {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub threshold: f64,
}

/// Flags prices outside `mean ± k·std` of their window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlierDetector {
    k: f64,
}

impl OutlierDetector {
    /// Create a detector flagging prices more than `k` sample standard
    /// deviations away from the window mean.
    pub fn new(k: f64) -> Result<Self> {
        if !k.is_finite() || k <= 0.0 {
            return Err(OutlierError::invalid("k", "must be a positive finite number"));
        }
        Ok(Self { k })
    }

    pub fn k(&self) -> f64 {
        self.k
    }

    pub fn stats(&self, window: &SampledWindow) -> WindowStats {
        let prices: Vec<f64> = window.prices().collect();
        let (mean, std_dev) = mean_std(&prices);
        WindowStats {
            count: prices.len(),
            mean,
            std_dev,
            threshold: self.k * std_dev,
        }
    }

    /// Build the outlier table for `window`.
    ///
    /// Fails with [`OutlierError::DegenerateStatistics`] when the mean or
    /// standard deviation is not finite, or when outliers exist but the
    /// window mean is zero, since their percent deviation is undefined. A
    /// zero-mean window without outliers gives an empty table.
    pub fn detect(&self, window: &SampledWindow) -> Result<OutlierTable> {
        let stats = self.stats(window);
        if !stats.mean.is_finite() || !stats.threshold.is_finite() {
            return Err(OutlierError::DegenerateStatistics {
                reason: format!(
                    "window statistics are not finite (mean {}, std dev {})",
                    stats.mean, stats.std_dev
                ),
            });
        }

        let flagged: Vec<&PriceRecord> = window
            .records()
            .iter()
            .filter(|r| is_outlier(r.price, stats.mean, stats.threshold))
            .collect();

        if flagged.is_empty() {
            return Ok(OutlierTable::default());
        }
        if stats.mean == 0.0 {
            return Err(OutlierError::DegenerateStatistics {
                reason: format!("window mean is zero with {} outlier(s)", flagged.len()),
            });
        }

        let rows = flagged
            .into_iter()
            .map(|r| derive_row(r, stats.mean))
            .collect();
        Ok(OutlierTable::new(rows))
    }
}

impl Default for OutlierDetector {
    fn default() -> Self {
        Self {
            k: DEFAULT_STD_THRESHOLD,
        }
    }
}

/// Strict on both sides: a price sitting exactly on the band edge is kept.
fn is_outlier(price: f64, mean: f64, threshold: f64) -> bool {
    price > mean + threshold || price < mean - threshold
}

fn derive_row(record: &PriceRecord, mean: f64) -> OutlierRow {
    let deviation = record.price - mean;
    OutlierRow {
        stock_id: record.stock_id.clone(),
        timestamp: record.timestamp,
        price: record.price,
        mean,
        deviation,
        percent_deviation: 100.0 * deviation / mean,
    }
}

/// Mean and sample (n - 1) standard deviation. A single value has zero spread.
fn mean_std(vals: &[f64]) -> (f64, f64) {
    if vals.is_empty() {
        return (0.0, 0.0);
    }
    let n = vals.len() as f64;
    let mean = vals.iter().sum::<f64>() / n;
    if vals.len() < 2 {
        return (mean, 0.0);
    }
    let sq_diff: f64 = vals.iter().map(|v| (v - mean).powi(2)).sum();
    (mean, (sq_diff / (n - 1.0)).sqrt())
}
