//! The collection report document.

use crate::record::RepositoryRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Version of the GitHub REST API the collector targets.
pub const GITHUB_API_VERSION: &str = "2022-11-28";

/// Run metadata written alongside the records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub organization: String,
    pub total_repositories: usize,
    pub tool_version: String,
    pub github_api_version: String,
}

/// Root of the output file: `metadata` followed by `repositories`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionReport {
    pub metadata: ReportMetadata,
    pub repositories: Vec<RepositoryRecord>,
}

impl CollectionReport {
    /// Wraps `repositories` with metadata stamped at `generated_at`.
    pub fn new(
        organization: &str,
        tool_version: &str,
        generated_at: DateTime<Utc>,
        repositories: Vec<RepositoryRecord>,
    ) -> Self {
        Self {
            metadata: ReportMetadata {
                generated_at,
                organization: organization.to_string(),
                total_repositories: repositories.len(),
                tool_version: tool_version.to_string(),
                github_api_version: GITHUB_API_VERSION.to_string(),
            },
            repositories,
        }
    }
}
