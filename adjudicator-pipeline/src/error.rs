//! Pipeline error types.
//!
//! Every failure mode has a named variant. No stringly-typed errors.
//! Two groups exist: data-load failures (the file cannot produce a table,
//! fatal for the whole process) and format failures (a value cannot be
//! rendered, fatal for the invocation).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// The alert file is missing or unreadable.
    #[error("failed to open alert file '{path}': {source}")]
    FileOpen {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The alert file exists but a row does not match the expected schema
    /// (missing column, non-numeric cell in a numeric column).
    #[error("malformed alert data at line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: csv::Error,
    },

    /// A numeric value cannot be rendered by a display transform.
    #[error("cannot format non-finite value {value} for column '{column}'")]
    NonFinite { column: &'static str, value: f64 },

    /// The CSV export writer failed.
    #[error("failed to serialize display table: {0}")]
    Export(#[from] csv::Error),
}

/// Result type alias for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
