//! Repository enumeration.
//!
//! Walks an organization's repository listing page by page, applies the
//! inclusion filters and recovers from quota exhaustion by waiting for the
//! reset and restarting the listing from the first page.

mod error;
mod filter;

pub use error::EnumerationError;
pub use filter::RepositoryFilter;

use crate::rate_limit::{wait_duration, wait_for_reset};
use crate::reporter::SharedReporter;
use crate::source::{RepositoryHandle, RepositorySource};
use chrono::Utc;
use tracing::{info_span, Instrument};

/// Component name used in reported events.
const COMPONENT: &str = "enumerator";

/// Default number of times a listing is restarted after quota exhaustion.
pub const DEFAULT_MAX_RESTARTS: u32 = 3;

/// Enumerates the repositories of an organization.
pub struct RepositoryEnumerator<'a, S> {
    source: &'a S,
    reporter: SharedReporter,
    max_restarts: u32,
}

impl<'a, S: RepositorySource> RepositoryEnumerator<'a, S> {
    /// Creates an enumerator reading from `source`.
    pub fn new(source: &'a S, reporter: SharedReporter) -> Self {
        Self {
            source,
            reporter,
            max_restarts: DEFAULT_MAX_RESTARTS,
        }
    }

    /// Sets how many times the listing may restart after quota exhaustion.
    #[must_use]
    pub fn with_max_restarts(mut self, max_restarts: u32) -> Self {
        self.max_restarts = max_restarts;
        self
    }

    /// Lists every repository of `org` admitted by `filter`, in listing order.
    ///
    /// When a call fails because the quota is exhausted, waits until the
    /// reported reset (plus a safety margin) and restarts from scratch;
    /// handles gathered by the failed attempt are discarded.
    ///
    /// # Errors
    ///
    /// Returns [`EnumerationError::OrganizationNotFound`] for an unknown
    /// organization, [`EnumerationError::RetriesExhausted`] if the quota stays
    /// exhausted, and [`EnumerationError::Source`] for any other failure.
    pub async fn enumerate(
        &self,
        org: &str,
        filter: RepositoryFilter,
    ) -> Result<Vec<RepositoryHandle>, EnumerationError> {
        let span = info_span!(
            "enumerate",
            org = %org,
            include_forks = filter.include_forks,
            include_archived = filter.include_archived
        );

        async {
            let mut restarts = 0;
            loop {
                match self.enumerate_once(org, filter).await {
                    Ok(handles) => return Ok(handles),
                    Err(e) if e.is_rate_limit() => {
                        if restarts >= self.max_restarts {
                            self.reporter.error(
                                COMPONENT,
                                None,
                                &format!("Rate limit still exceeded after {restarts} restarts"),
                            );
                            return Err(EnumerationError::RetriesExhausted { restarts });
                        }
                        restarts += 1;
                        self.wait_for_quota_reset().await?;
                    }
                    Err(e) => {
                        self.reporter.error(
                            COMPONENT,
                            None,
                            &format!("Failed to fetch repositories: {e}"),
                        );
                        return Err(e);
                    }
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Performs one complete pass over the listing.
    async fn enumerate_once(
        &self,
        org: &str,
        filter: RepositoryFilter,
    ) -> Result<Vec<RepositoryHandle>, EnumerationError> {
        let organization = self.source.organization(org).await.map_err(|e| {
            if e.is_not_found() {
                EnumerationError::OrganizationNotFound {
                    org: org.to_string(),
                }
            } else {
                EnumerationError::Source(e)
            }
        })?;
        self.reporter.info(
            COMPONENT,
            None,
            &format!(
                "Found organization: {} ({})",
                organization.login,
                organization.name.as_deref().unwrap_or("no display name")
            ),
        );

        let mut handles = Vec::new();
        let mut page = Some(1);

        while let Some(number) = page {
            let listing = self.source.repositories_page(org, number).await?;
            self.reporter.debug(
                COMPONENT,
                None,
                &format!("Fetched page {number} ({} repositories)", listing.items.len()),
            );

            for handle in listing.items {
                if let Some(reason) = filter.exclusion_reason(&handle) {
                    self.reporter.debug(
                        COMPONENT,
                        Some(handle.display_name()),
                        &format!("Skipping {reason} repository"),
                    );
                    continue;
                }
                self.reporter
                    .debug(COMPONENT, Some(handle.display_name()), "Added repository");
                handles.push(handle);
            }

            page = listing.next_page;
        }

        self.reporter.info(
            COMPONENT,
            None,
            &format!("Found {} repositories", handles.len()),
        );
        Ok(handles)
    }

    /// Waits until the quota reset reported by the source.
    async fn wait_for_quota_reset(&self) -> Result<(), EnumerationError> {
        let info = self.source.rate_limit().await?;

        match wait_duration(info.reset_at(), Utc::now()) {
            Some(duration) => {
                self.reporter.warn(
                    COMPONENT,
                    None,
                    &format!(
                        "Rate limit exceeded. Waiting {} seconds before restarting the listing",
                        duration.as_secs()
                    ),
                );
                wait_for_reset(duration).await;
            }
            None => {
                self.reporter.warn(
                    COMPONENT,
                    None,
                    "Rate limit exceeded but the reset has passed, restarting the listing",
                );
            }
        }

        Ok(())
    }
}
