//! Remote repository source.
//!
//! [`RepositorySource`] is the boundary to the hosting platform: organization
//! listings, per-repository sub-resources and rate limit status. The
//! production implementation is [`GitHubSource`].

mod error;
mod github;
mod types;

pub use error::SourceError;
pub use github::GitHubSource;
pub use types::{
    ContentError, ContentFile, ContributorHandle, LicenseDetails, Listing, Organization,
    OwnerHandle, RepositoryHandle, TeamHandle,
};

use crate::rate_limit::RateLimitInfo;
use chrono::{DateTime, Utc};

/// Read-only access to a code hosting platform.
///
/// Calls are made one at a time; implementations need not be `Send`.
#[allow(async_fn_in_trait)]
pub trait RepositorySource {
    /// Returns the login of the authenticated credential.
    async fn authenticated_login(&self) -> Result<String, SourceError>;

    /// Returns the core API rate limit status.
    async fn rate_limit(&self) -> Result<RateLimitInfo, SourceError>;

    /// Resolves an organization by login.
    async fn organization(&self, org: &str) -> Result<Organization, SourceError>;

    /// Lists one page (1-based) of the organization's repositories, all visibilities.
    async fn repositories_page(
        &self,
        org: &str,
        page: u32,
    ) -> Result<Listing<RepositoryHandle>, SourceError>;

    /// Returns language byte counts in source order.
    async fn languages(&self, owner: &str, repo: &str) -> Result<Vec<(String, u64)>, SourceError>;

    /// Returns the detected license, if the response names one.
    async fn license(&self, owner: &str, repo: &str)
        -> Result<Option<LicenseDetails>, SourceError>;

    /// Returns topic tags in source order.
    async fn topics(&self, owner: &str, repo: &str) -> Result<Vec<String>, SourceError>;

    /// Returns the repository README.
    async fn readme(&self, owner: &str, repo: &str) -> Result<ContentFile, SourceError>;

    /// Returns a file from the default branch.
    async fn file_contents(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> Result<ContentFile, SourceError>;

    /// Lists one page (1-based) of contributors in the source's ranking order.
    async fn contributors_page(
        &self,
        owner: &str,
        repo: &str,
        page: u32,
        per_page: u8,
    ) -> Result<Listing<ContributorHandle>, SourceError>;

    /// Returns the total number of contributors.
    async fn contributor_count(&self, owner: &str, repo: &str) -> Result<u64, SourceError>;

    /// Returns the number of commits on the default branch since `since`.
    async fn commit_count_since(
        &self,
        owner: &str,
        repo: &str,
        since: DateTime<Utc>,
    ) -> Result<u64, SourceError>;

    /// Returns the number of open pull requests.
    async fn open_pull_request_count(&self, owner: &str, repo: &str) -> Result<u64, SourceError>;

    /// Returns the teams with access to the repository.
    async fn teams(&self, owner: &str, repo: &str) -> Result<Vec<TeamHandle>, SourceError>;
}
