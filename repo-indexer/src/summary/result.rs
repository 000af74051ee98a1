//! Per-repository processing results.

/// A repository whose record could not be built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedRepository {
    /// Best available name of the repository.
    pub name: String,
    /// Error message.
    pub error: String,
}

/// Result of aggregating a single repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessingResult {
    /// A record was produced.
    Collected,

    /// Aggregation failed; the repository is left out of the report.
    Failed(FailedRepository),
}
