//! Collector error types.

use crate::enumerator::EnumerationError;
use crate::report::ReportError;
use crate::source::SourceError;
use thiserror::Error;

/// Errors that end a collection run.
#[derive(Debug, Error)]
pub enum CollectorError {
    /// The API client could not be built.
    #[error("Failed to create GitHub client: {0}")]
    Client(#[source] SourceError),

    /// The credential was rejected or could not be checked.
    #[error("Failed to authenticate with GitHub: {0}")]
    Authentication(#[source] SourceError),

    /// The repository listing failed.
    #[error(transparent)]
    Enumeration(#[from] EnumerationError),

    /// The report could not be written or failed validation.
    #[error(transparent)]
    Report(#[from] ReportError),
}
