//! Collector configuration.

use crate::aggregator::{DEFAULT_MAX_CONTRIBUTORS, DEFAULT_README_MAX_CHARS};
use crate::enumerator::RepositoryFilter;
use std::path::{Path, PathBuf};
use url::Url;

/// Default report location.
pub const DEFAULT_OUTPUT_FILE: &str = "repositories.json";

/// Configuration for a collection run.
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// Organization to collect.
    organization: String,
    /// GitHub token used for API calls.
    token: String,
    /// API base for GitHub Enterprise Server; `None` for github.com.
    base_url: Option<Url>,
    /// Report location.
    output_path: PathBuf,
    /// Number of top contributors kept per repository.
    max_contributors: usize,
    /// README preview length in characters.
    readme_max_chars: usize,
    /// Whether forks are collected.
    include_forks: bool,
    /// Whether archived repositories are collected.
    include_archived: bool,
    /// Whether a previous report is moved aside before writing.
    backup: bool,
}

impl CollectorConfig {
    /// Creates a configuration with defaults for everything but the
    /// organization and token.
    pub fn new(organization: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            organization: organization.into(),
            token: token.into(),
            base_url: None,
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILE),
            max_contributors: DEFAULT_MAX_CONTRIBUTORS,
            readme_max_chars: DEFAULT_README_MAX_CHARS,
            include_forks: true,
            include_archived: true,
            backup: true,
        }
    }

    /// Sets the API base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Sets the report location.
    #[must_use]
    pub fn with_output_path(mut self, output_path: impl Into<PathBuf>) -> Self {
        self.output_path = output_path.into();
        self
    }

    /// Sets the number of top contributors kept per repository.
    #[must_use]
    pub fn with_max_contributors(mut self, max_contributors: usize) -> Self {
        self.max_contributors = max_contributors;
        self
    }

    /// Sets the README preview length.
    #[must_use]
    pub fn with_readme_max_chars(mut self, readme_max_chars: usize) -> Self {
        self.readme_max_chars = readme_max_chars;
        self
    }

    /// Sets whether forks are collected.
    #[must_use]
    pub fn with_include_forks(mut self, include_forks: bool) -> Self {
        self.include_forks = include_forks;
        self
    }

    /// Sets whether archived repositories are collected.
    #[must_use]
    pub fn with_include_archived(mut self, include_archived: bool) -> Self {
        self.include_archived = include_archived;
        self
    }

    /// Sets whether a previous report is backed up.
    #[must_use]
    pub fn with_backup(mut self, backup: bool) -> Self {
        self.backup = backup;
        self
    }

    /// Returns the organization.
    pub fn organization(&self) -> &str {
        &self.organization
    }

    /// Returns the configured GitHub token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the API base URL, if any.
    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    /// Returns the report location.
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Returns the number of top contributors kept per repository.
    pub fn max_contributors(&self) -> usize {
        self.max_contributors
    }

    /// Returns the README preview length.
    pub fn readme_max_chars(&self) -> usize {
        self.readme_max_chars
    }

    /// Returns whether a previous report is backed up.
    pub fn backup(&self) -> bool {
        self.backup
    }

    /// Returns the enumeration filter.
    pub fn filter(&self) -> RepositoryFilter {
        RepositoryFilter::new(self.include_forks, self.include_archived)
    }
}
