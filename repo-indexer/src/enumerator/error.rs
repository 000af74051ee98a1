//! Repository enumeration error types.

use crate::source::SourceError;
use thiserror::Error;

/// Errors that can occur while enumerating an organization's repositories.
#[derive(Debug, Error)]
pub enum EnumerationError {
    /// The organization does not exist or is not visible to the credential.
    #[error("Organization '{org}' not found")]
    OrganizationNotFound { org: String },

    /// The quota was still exhausted after every permitted restart.
    #[error("Rate limit exceeded after {restarts} restarts of the repository listing")]
    RetriesExhausted { restarts: u32 },

    /// Any other remote failure.
    #[error(transparent)]
    Source(#[from] SourceError),
}

impl EnumerationError {
    /// Returns true if the failure is a quota exhaustion that a restart may cure.
    #[must_use]
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, Self::Source(source) if source.is_rate_limit())
    }
}
