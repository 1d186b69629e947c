use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{OutlierError, Result};

/// Day-month-year format used by the input price files.
pub const DATE_FORMAT: &str = "%d-%m-%Y";

pub(crate) fn parse_date(s: &str) -> std::result::Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
}

fn deserialize_dmy_date<'de, D>(d: D) -> std::result::Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(d)?;
    parse_date(&s).map_err(serde::de::Error::custom)
}

fn serialize_dmy_date<S>(date: &NaiveDate, s: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.collect_str(&date.format(DATE_FORMAT))
}

/// One price observation from an input file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub stock_id: String,
    #[serde(
        deserialize_with = "deserialize_dmy_date",
        serialize_with = "serialize_dmy_date"
    )]
    pub timestamp: NaiveDate,
    pub price: f64,
}

/// Contiguous, time-ascending slice of a record set.
///
/// Never empty: the sampler only produces windows of `num_points >= 2`
/// records and [`SampledWindow::from_records`] rejects an empty list.
#[derive(Debug, Clone, PartialEq)]
pub struct SampledWindow {
    records: Vec<PriceRecord>,
    start_index: usize,
}

impl SampledWindow {
    pub(crate) fn new(records: Vec<PriceRecord>, start_index: usize) -> Self {
        Self {
            records,
            start_index,
        }
    }

    /// Wrap records that are already ordered as a window.
    pub fn from_records(records: Vec<PriceRecord>) -> Result<Self> {
        if records.is_empty() {
            return Err(OutlierError::InsufficientData {
                required: 1,
                got: 0,
            });
        }
        Ok(Self::new(records, 0))
    }

    pub fn records(&self) -> &[PriceRecord] {
        &self.records
    }

    /// Offset of the first record within the sorted record set.
    pub fn start_index(&self) -> usize {
        self.start_index
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn prices(&self) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().map(|r| r.price)
    }
}

/// A flagged record with its derived deviation metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlierRow {
    #[serde(rename = "Stock-ID")]
    pub stock_id: String,
    #[serde(rename = "Timestamp")]
    pub timestamp: NaiveDate,
    #[serde(rename = "Price")]
    pub price: f64,
    #[serde(rename = "Mean")]
    pub mean: f64,
    #[serde(rename = "Deviation")]
    pub deviation: f64,
    #[serde(rename = "Percent_Deviation")]
    pub percent_deviation: f64,
}

/// Outlier rows for one window. The column schema is [`OutlierTable::HEADERS`]
/// whatever the row count.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct OutlierTable {
    rows: Vec<OutlierRow>,
}

impl OutlierTable {
    pub const HEADERS: [&'static str; 6] = [
        "Stock-ID",
        "Timestamp",
        "Price",
        "Mean",
        "Deviation",
        "Percent_Deviation",
    ];

    pub fn new(rows: Vec<OutlierRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[OutlierRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
