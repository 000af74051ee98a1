//! Metadata aggregation error types.

use crate::source::{ContentError, SourceError};
use thiserror::Error;

/// Errors that abort the aggregation of one repository.
#[derive(Debug, Error)]
pub enum AggregateError {
    /// The handle lacks a field every repository must carry.
    #[error("Repository '{repository}' is missing required field '{field}'")]
    MissingField {
        repository: String,
        field: &'static str,
    },
}

/// Failure of a single sub-resource lookup. Always recovered with a default.
#[derive(Debug, Error)]
pub enum LookupError {
    /// Remote call failed.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Returned file could not be decoded.
    #[error(transparent)]
    Content(#[from] ContentError),
}
