//! Error types for the ppsampler library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for sampling operations.
///
/// Every variant except the I/O and parsing ones is a user-input validation
/// failure: the pass that raised it produced nothing, and the caller must
/// correct the input and invoke again.
#[derive(Debug, Error)]
pub enum PpsError {
    /// Error reading or writing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Empty file or no data to sample.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Request parameters that do not fit together.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The table has no column that can drive PPS sampling.
    #[error("No numeric columns found")]
    NoNumericColumns,

    /// The selected column does not exist.
    #[error("Column '{0}' not found")]
    ColumnNotFound(String),

    /// The selected column holds non-numeric values.
    #[error("Column '{0}' is not numeric")]
    NonNumericColumn(String),

    /// No rows are left once null (and, in automatic mode, non-positive) values are dropped.
    #[error("No valid data found in column '{column}': {reason}")]
    EmptyPopulation { column: String, reason: String },

    /// Invalid bin count, degenerate range, duplicate quantile cuts or malformed cutoffs.
    #[error("Binning error: {0}")]
    Binning(String),

    /// A cutoff token is not a number.
    #[error("Invalid cutoff '{token}': expected a number")]
    InvalidCutoffFormat { token: String },

    /// Wrong number of bin labels.
    #[error("Expected {expected} labels, got {actual}")]
    LabelCountMismatch { expected: usize, actual: usize },

    /// The same label was given to two bins.
    #[error("Duplicate bin label '{0}'")]
    DuplicateLabel(String),

    /// Wrong number of bin weights.
    #[error("Expected {expected} weights, got {actual}")]
    WeightCountMismatch { expected: usize, actual: usize },

    /// A weight token is not a finite real number.
    #[error("Invalid weight '{token}': expected a finite number")]
    InvalidWeightFormat { token: String },

    /// A weight is below zero.
    #[error("Weight for bin '{label}' is negative ({weight})")]
    NegativeWeight { label: String, weight: f64 },

    /// Total weight over the population is zero, negative or not finite.
    #[error("Total probability is zero or invalid ({total})")]
    ZeroOrInvalidTotal { total: f64 },

    /// Requested sample size is outside `1..=available`.
    #[error("Sample size ({requested}) must be between 1 and {available} (available records)")]
    InvalidSampleSize { requested: usize, available: usize },
}

/// Result type alias for sampling operations.
pub type Result<T> = std::result::Result<T, PpsError>;
