//! Error types for sampling, detection and report writing.

use thiserror::Error;

/// Errors raised while turning a price file into an outlier report.
#[derive(Debug, Error)]
pub enum OutlierError {
    #[error("Parse error at line {line}: {reason}")]
    Parse { line: u64, reason: String },

    #[error("Insufficient data: required {required}, got {got}")]
    InsufficientData { required: usize, got: usize },

    /// Window statistics cannot support the outlier test: a zero mean with
    /// outliers present, or a mean/std that overflowed.
    #[error("Degenerate statistics: {reason}")]
    DegenerateStatistics { reason: String },

    #[error("Invalid parameter: {name} - {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl OutlierError {
    pub(crate) fn invalid(name: &str, reason: &str) -> Self {
        OutlierError::InvalidParameter {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Result type for outlier detection operations.
pub type Result<T> = std::result::Result<T, OutlierError>;
