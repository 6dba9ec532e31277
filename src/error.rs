//! Error types for the cleaning pipeline.

use thiserror::Error;

/// Result alias used throughout the cleaning library.
pub type Result<T> = std::result::Result<T, CleanError>;

/// Failures raised while cleaning a single file.
///
/// Every variant is local to one file (or one row, for [`CleanError::Grade`]);
/// the directory walker logs them and moves on unless running in strict mode.
#[derive(Error, Debug)]
pub enum CleanError {
    /// A required header column is absent after whitespace normalization.
    #[error("column not found: {0:?}")]
    MissingColumn(String),

    /// The leading characters of an average-grade cell are not a number.
    #[error("malformed grade value {value:?}")]
    Grade { value: String },

    /// Every weight in an aggregation group summed to zero.
    #[error("zero total weight aggregating {column} for ({instructor}, {term})")]
    ZeroWeight {
        instructor: String,
        term: String,
        column: String,
    },

    /// A group's summed enrollment does not fit in an `i64`.
    #[error("enrollment total overflows for ({instructor}, {term})")]
    EnrollmentOverflow { instructor: String, term: String },

    /// A cleaned row is narrower than the expanded header.
    #[error("row has {found} cells, expected {expected}")]
    RowWidth { expected: usize, found: usize },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
