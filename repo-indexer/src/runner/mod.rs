//! Orchestrates a collection run.

mod config;
mod error;

pub use config::{CollectorConfig, DEFAULT_OUTPUT_FILE};
pub use error::CollectorError;

use crate::aggregator::MetadataAggregator;
use crate::enumerator::RepositoryEnumerator;
use crate::rate_limit::RateLimitInfo;
use crate::report::ReportBuilder;
use crate::reporter::{SharedReporter, TracingReporter};
use crate::source::{GitHubSource, RepositorySource};
use crate::summary::{FailedRepository, ProcessingResult, RunSummary};
use tracing::{info_span, Instrument};

/// Component name used in reported events.
const COMPONENT: &str = "collector";

/// Runs authentication, enumeration, aggregation and report generation
/// for one organization.
pub struct Collector<S = GitHubSource> {
    config: CollectorConfig,
    source: S,
    reporter: SharedReporter,
}

impl Collector<GitHubSource> {
    /// Builds a collector talking to GitHub and logging through `tracing`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectorError::Client`] if the API client cannot be built.
    pub fn new(config: CollectorConfig) -> Result<Self, CollectorError> {
        let source = GitHubSource::new(config.token(), config.base_url())
            .map_err(CollectorError::Client)?;
        Ok(Self::with_source(config, source, TracingReporter::shared()))
    }
}

impl<S: RepositorySource> Collector<S> {
    /// Builds a collector over an arbitrary source.
    pub fn with_source(config: CollectorConfig, source: S, reporter: SharedReporter) -> Self {
        Self {
            config,
            source,
            reporter,
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &CollectorConfig {
        &self.config
    }

    /// Executes the full collection flow.
    ///
    /// Repositories that fail to aggregate are left out of the report and
    /// listed in the returned summary. No report is written when the
    /// enumeration admits no repositories.
    ///
    /// # Errors
    ///
    /// Returns [`CollectorError`] on authentication, enumeration or report
    /// failures.
    pub async fn run(&self) -> Result<RunSummary, CollectorError> {
        let org = self.config.organization();
        let span = info_span!("collect", org = %org);

        async {
            let mut summary = RunSummary::new(org);
            self.authenticate().await?;

            let handles = RepositoryEnumerator::new(&self.source, self.reporter.clone())
                .enumerate(org, self.config.filter())
                .await?;
            summary.repositories_found = handles.len();

            if handles.is_empty() {
                self.reporter.warn(COMPONENT, None, "No repositories found");
                summary.rate_limit = self.check_rate_limit().await;
                return Ok(summary);
            }

            let aggregator = MetadataAggregator::new(&self.source, self.reporter.clone())
                .with_max_contributors(self.config.max_contributors())
                .with_readme_max_chars(self.config.readme_max_chars());

            let total = handles.len();
            let mut records = Vec::with_capacity(total);
            for (index, handle) in handles.iter().enumerate() {
                let name = handle.display_name();
                self.reporter.info(
                    COMPONENT,
                    Some(name),
                    &format!("Processing repository {}/{total}", index + 1),
                );

                match aggregator.aggregate(handle).await {
                    Ok(record) => {
                        summary.record_result(ProcessingResult::Collected);
                        records.push(record);
                    }
                    Err(e) => {
                        self.reporter.error(
                            COMPONENT,
                            Some(name),
                            &format!("Failed to process {name}: {e}"),
                        );
                        summary.record_result(ProcessingResult::Failed(FailedRepository {
                            name: name.to_string(),
                            error: e.to_string(),
                        }));
                    }
                }
            }

            let output_path = self.config.output_path();
            ReportBuilder::new(self.reporter.clone()).generate(
                org,
                records,
                output_path,
                self.config.backup(),
            )?;
            summary.output_path = Some(output_path.to_path_buf());

            summary.rate_limit = self.check_rate_limit().await;
            Ok(summary)
        }
        .instrument(span)
        .await
    }

    /// Verifies the credential and logs the starting quota.
    async fn authenticate(&self) -> Result<(), CollectorError> {
        let login = self
            .source
            .authenticated_login()
            .await
            .map_err(CollectorError::Authentication)?;
        self.reporter
            .info(COMPONENT, None, &format!("Authenticated as: {login}"));

        match self.source.rate_limit().await {
            Ok(info) => self.reporter.info(
                COMPONENT,
                None,
                &format!(
                    "Rate limit: {}/{} (resets at {})",
                    info.remaining,
                    info.limit,
                    info.reset_at().to_rfc3339()
                ),
            ),
            Err(e) => self
                .reporter
                .warn(COMPONENT, None, &format!("Could not check rate limit: {e}")),
        }
        Ok(())
    }

    /// Logs the remaining quota, warning when it runs low.
    async fn check_rate_limit(&self) -> Option<RateLimitInfo> {
        match self.source.rate_limit().await {
            Ok(info) => {
                let message = format!("Rate limit remaining: {}/{}", info.remaining, info.limit);
                if info.is_low() {
                    self.reporter
                        .warn(COMPONENT, None, &format!("{message} (running low)"));
                } else {
                    self.reporter.info(COMPONENT, None, &message);
                }
                Some(info)
            }
            Err(e) => {
                self.reporter
                    .warn(COMPONENT, None, &format!("Could not check rate limit: {e}"));
                None
            }
        }
    }
}
