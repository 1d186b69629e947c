//! Random fixed-size window extraction from a price record set.

use std::io::Read;

use csv::StringRecord;
use rand::Rng;
use tracing::debug;

use crate::error::{OutlierError, Result};
use crate::models::{parse_date, PriceRecord, SampledWindow};

/// Default number of consecutive records drawn from each file.
pub const DEFAULT_NUM_POINTS: usize = 30;

const FIELDS_PER_ROW: usize = 3;

/// Draws a contiguous window of `num_points` records, uniformly placed within
/// the time-sorted record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSampler {
    num_points: usize,
}

impl WindowSampler {
    /// Create a sampler. `num_points` must be at least 2 so the window has a
    /// sample standard deviation.
    pub fn new(num_points: usize) -> Result<Self> {
        if num_points < 2 {
            return Err(OutlierError::invalid("num_points", "must be at least 2"));
        }
        Ok(Self { num_points })
    }

    pub fn num_points(&self) -> usize {
        self.num_points
    }

    /// Sample a window from `source` using the thread-local generator.
    pub fn sample<R: Read>(&self, source: R) -> Result<SampledWindow> {
        self.sample_with(source, &mut rand::thread_rng())
    }

    /// Sample a window from `source` with an explicit random source.
    pub fn sample_with<R, G>(&self, source: R, rng: &mut G) -> Result<SampledWindow>
    where
        R: Read,
        G: Rng,
    {
        let records = parse_records(source)?;
        self.sample_records(records, rng)
    }

    /// Sort already-parsed records by timestamp and cut a window out of them.
    pub fn sample_records<G>(&self, mut records: Vec<PriceRecord>, rng: &mut G) -> Result<SampledWindow>
    where
        G: Rng,
    {
        if records.len() < self.num_points {
            return Err(OutlierError::InsufficientData {
                required: self.num_points,
                got: records.len(),
            });
        }

        // stable: equal timestamps keep input order
        records.sort_by_key(|r| r.timestamp);

        let last_start = records.len() - self.num_points;
        let start_index = rng.gen_range(0..=last_start);
        debug!(
            start_index,
            total = records.len(),
            num_points = self.num_points,
            "sampled window"
        );

        let window: Vec<PriceRecord> = records
            .drain(start_index..start_index + self.num_points)
            .collect();
        Ok(SampledWindow::new(window, start_index))
    }
}

impl Default for WindowSampler {
    fn default() -> Self {
        Self {
            num_points: DEFAULT_NUM_POINTS,
        }
    }
}

/// Parse a headerless `stock_id,timestamp,price` CSV stream.
///
/// Any malformed row rejects the whole source.
pub fn parse_records<R: Read>(source: R) -> Result<Vec<PriceRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| OutlierError::Parse {
            line: e.position().map(|p| p.line()).unwrap_or(0),
            reason: e.to_string(),
        })?;
        records.push(parse_row(&record)?);
    }
    Ok(records)
}

fn parse_row(record: &StringRecord) -> Result<PriceRecord> {
    let line = record.position().map(|p| p.line()).unwrap_or(0);
    let parse_err = |reason: String| OutlierError::Parse { line, reason };

    if record.len() != FIELDS_PER_ROW {
        return Err(parse_err(format!(
            "expected {} fields, found {}",
            FIELDS_PER_ROW,
            record.len()
        )));
    }

    let stock_id = record[0].to_string();
    let timestamp = parse_date(&record[1])
        .map_err(|e| parse_err(format!("invalid timestamp '{}': {}", &record[1], e)))?;
    let price: f64 = record[2]
        .parse()
        .map_err(|e| parse_err(format!("invalid price '{}': {}", &record[2], e)))?;
    if !price.is_finite() {
        return Err(parse_err(format!("price '{}' is not finite", &record[2])));
    }

    Ok(PriceRecord {
        stock_id,
        timestamp,
        price,
    })
}
