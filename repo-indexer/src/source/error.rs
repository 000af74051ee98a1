//! Remote source error types.

use thiserror::Error;

/// Errors returned by a [`RepositorySource`](super::RepositorySource) lookup.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The request quota for the current credential is exhausted.
    #[error("Rate limit exceeded: {message}")]
    RateLimitExceeded { message: String },

    /// The credential was rejected.
    #[error("Authentication failed: {message}")]
    Unauthorized { message: String },

    /// The requested resource does not exist or is not visible.
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    /// The API answered with an error status.
    #[error("GitHub API error ({status}) for {resource}: {message}")]
    Api {
        resource: String,
        status: u16,
        message: String,
    },

    /// Transport, serialization or client configuration failure.
    #[error("GitHub client error: {0}")]
    Client(#[from] octocrab::Error),
}

impl SourceError {
    /// Classifies an octocrab error for the given resource.
    ///
    /// GitHub reports quota exhaustion as a 403 or 429 whose message mentions
    /// the rate limit; plain 403s stay [`SourceError::Api`].
    pub fn from_octocrab(error: octocrab::Error, resource: &str) -> Self {
        match error {
            octocrab::Error::GitHub { source, .. } => {
                let status = source.status_code.as_u16();
                let message = source.message.clone();
                let lowered = message.to_lowercase();
                match status {
                    404 => Self::NotFound {
                        resource: resource.to_string(),
                    },
                    401 => Self::Unauthorized { message },
                    403 | 429 if lowered.contains("rate limit") => {
                        Self::RateLimitExceeded { message }
                    }
                    _ => Self::Api {
                        resource: resource.to_string(),
                        status,
                        message,
                    },
                }
            }
            other => Self::Client(other),
        }
    }

    /// Returns true if the error is a request quota exhaustion.
    #[must_use]
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, Self::RateLimitExceeded { .. })
    }

    /// Returns true if the resource was reported missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
