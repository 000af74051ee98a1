//! Report error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while writing or reading a collection report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Failed to read or write a file.
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize the report.
    #[error("Failed to serialize report: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Failed to parse a report file.
    #[error("Failed to parse '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The written report does not have the expected structure.
    #[error("Report validation failed: {0}")]
    Validation(#[from] ValidationError),
}

/// Structural problems found in a report file.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required top-level section is missing.
    #[error("Missing '{0}' section")]
    MissingSection(&'static str),

    /// `repositories` is not an array.
    #[error("'repositories' must be an array")]
    RepositoriesNotArray,

    /// A required metadata key is missing.
    #[error("Missing '{0}' in metadata")]
    MissingMetadataKey(&'static str),

    /// `total_repositories` is not a non-negative integer.
    #[error("'total_repositories' must be a non-negative integer")]
    InvalidTotal,

    /// The number of records disagrees with the metadata count.
    #[error("Repository count mismatch: {actual} != {expected}")]
    CountMismatch { actual: usize, expected: u64 },
}
