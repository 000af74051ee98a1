//! Run summary.

use super::result::{FailedRepository, ProcessingResult};
use crate::rate_limit::RateLimitInfo;
use std::path::PathBuf;

/// Summary of a complete collection run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Organization that was collected.
    pub organization: String,

    /// Number of repositories admitted by the enumeration filters.
    pub repositories_found: usize,

    /// Number of records written to the report.
    pub processed: usize,

    /// Repositories that failed, in processing order.
    pub failed: Vec<FailedRepository>,

    /// Report location; `None` if no report was written.
    pub output_path: Option<PathBuf>,

    /// Quota status observed at the end of the run.
    pub rate_limit: Option<RateLimitInfo>,
}

impl RunSummary {
    /// Creates an empty summary for `organization`.
    #[must_use]
    pub fn new(organization: &str) -> Self {
        Self {
            organization: organization.to_string(),
            ..Default::default()
        }
    }

    /// Updates the summary with a processing result.
    pub fn record_result(&mut self, result: ProcessingResult) {
        match result {
            ProcessingResult::Collected => self.processed += 1,
            ProcessingResult::Failed(failure) => self.failed.push(failure),
        }
    }

    /// Returns true if enumeration admitted no repositories.
    #[must_use]
    pub fn nothing_found(&self) -> bool {
        self.repositories_found == 0
    }

    /// Returns true if any repository failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }

    /// Returns true if every found repository was collected.
    #[must_use]
    pub fn all_success(&self) -> bool {
        self.failed.is_empty()
    }
}
