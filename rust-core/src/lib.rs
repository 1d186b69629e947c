//! Outlier core: random-window standard deviation outlier detection for
//! stock price files.

mod anomaly;
mod config;
mod detect;
mod error;
mod logging;
mod models;
mod report;
mod sampler;
mod scan;

pub use anomaly::{OutlierDetector, WindowStats, DEFAULT_STD_THRESHOLD};
pub use config::ScanConfig;
pub use detect::{run_detect, DetectInput, DetectOutput, DetectParams};
pub use error::{OutlierError, Result};
pub use logging::{init_tracing, LOG_ENV};
pub use models::{OutlierRow, OutlierTable, PriceRecord, SampledWindow, DATE_FORMAT};
pub use report::{write_table, write_table_to_path};
pub use sampler::{parse_records, WindowSampler, DEFAULT_NUM_POINTS};
pub use scan::{output_file_name, run_scan, FileOutcome, FileReport, ScanSummary};
