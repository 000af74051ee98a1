//! In-memory repository source shared by the integration tests.

#![allow(dead_code)]

use chrono::{DateTime, Utc};
use repo_indexer::rate_limit::RateLimitInfo;
use repo_indexer::source::{
    ContentFile, ContributorHandle, LicenseDetails, Listing, Organization, OwnerHandle,
    RepositoryHandle, RepositorySource, SourceError, TeamHandle,
};
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use tokio::time::Instant;

pub const ORG: &str = "acme";

/// Builds a handle owned by [`ORG`].
pub fn repository(name: &str) -> RepositoryHandle {
    RepositoryHandle {
        name: Some(name.to_string()),
        full_name: Some(format!("{ORG}/{name}")),
        html_url: Some(format!("https://github.com/{ORG}/{name}")),
        stargazers_count: Some(0),
        fork: Some(false),
        archived: Some(false),
        private: Some(false),
        owner: Some(OwnerHandle {
            login: Some(ORG.to_string()),
            kind: Some("Organization".to_string()),
            html_url: Some(format!("https://github.com/{ORG}")),
        }),
        ..Default::default()
    }
}

pub fn fork(name: &str) -> RepositoryHandle {
    RepositoryHandle {
        fork: Some(true),
        ..repository(name)
    }
}

pub fn archived(name: &str) -> RepositoryHandle {
    RepositoryHandle {
        archived: Some(true),
        ..repository(name)
    }
}

pub fn contributor(login: &str, contributions: u64) -> ContributorHandle {
    ContributorHandle {
        login: Some(login.to_string()),
        contributions: Some(contributions),
        html_url: Some(format!("https://github.com/{login}")),
    }
}

fn failure(resource: &str) -> SourceError {
    SourceError::Api {
        resource: resource.to_string(),
        status: 500,
        message: "Internal Server Error".to_string(),
    }
}

fn not_found(resource: &str) -> SourceError {
    SourceError::NotFound {
        resource: resource.to_string(),
    }
}

/// Scripted [`RepositorySource`] that records the calls it receives.
pub struct FakeSource {
    pub login: Option<String>,
    pub organization: Option<Organization>,
    pub pages: Vec<Vec<RepositoryHandle>>,

    /// Page whose request reports quota exhaustion.
    pub rate_limited_page: u32,
    /// Remaining quota exhaustion answers for that page.
    pub rate_limit_failures: Cell<u32>,
    pub remaining: u32,
    /// Unix timestamp reported as the quota reset.
    pub reset: u64,

    /// Names of lookups that fail, e.g. `"topics"`.
    pub failing: HashSet<&'static str>,

    pub languages: Vec<(String, u64)>,
    pub license: Option<LicenseDetails>,
    pub topics: Vec<String>,
    pub readme: Option<ContentFile>,
    pub files: HashMap<String, ContentFile>,
    pub contributors: Vec<ContributorHandle>,
    pub contributors_per_page: usize,
    pub teams: Vec<TeamHandle>,
    pub commit_count: u64,
    pub open_pull_requests: u64,

    pub repository_pages_requested: RefCell<Vec<u32>>,
    /// Runtime clock reading at each repository page request.
    pub repository_page_times: RefCell<Vec<Instant>>,
    pub contributor_pages_requested: RefCell<Vec<u32>>,
    pub files_requested: RefCell<Vec<String>>,
    pub commits_since: RefCell<Option<DateTime<Utc>>>,
}

impl Default for FakeSource {
    fn default() -> Self {
        Self {
            login: Some("octocat".to_string()),
            organization: Some(Organization {
                login: ORG.to_string(),
                name: Some("Acme Corp".to_string()),
            }),
            pages: Vec::new(),
            rate_limited_page: 0,
            rate_limit_failures: Cell::new(0),
            remaining: 4999,
            reset: 0,
            failing: HashSet::new(),
            languages: Vec::new(),
            license: None,
            topics: Vec::new(),
            readme: None,
            files: HashMap::new(),
            contributors: Vec::new(),
            contributors_per_page: 100,
            teams: Vec::new(),
            commit_count: 0,
            open_pull_requests: 0,
            repository_pages_requested: RefCell::new(Vec::new()),
            repository_page_times: RefCell::new(Vec::new()),
            contributor_pages_requested: RefCell::new(Vec::new()),
            files_requested: RefCell::new(Vec::new()),
            commits_since: RefCell::new(None),
        }
    }
}

impl FakeSource {
    pub fn with_pages(pages: Vec<Vec<RepositoryHandle>>) -> Self {
        Self {
            pages,
            ..Self::default()
        }
    }

    /// Makes page `page` report quota exhaustion `times` times.
    pub fn rate_limited(mut self, page: u32, times: u32) -> Self {
        self.rate_limited_page = page;
        self.rate_limit_failures = Cell::new(times);
        self
    }

    pub fn failing(mut self, lookups: &[&'static str]) -> Self {
        self.failing.extend(lookups.iter().copied());
        self
    }

    fn check(&self, lookup: &'static str) -> Result<(), SourceError> {
        if self.failing.contains(lookup) {
            Err(failure(lookup))
        } else {
            Ok(())
        }
    }
}

impl RepositorySource for FakeSource {
    async fn authenticated_login(&self) -> Result<String, SourceError> {
        self.login.clone().ok_or(SourceError::Unauthorized {
            message: "Bad credentials".to_string(),
        })
    }

    async fn rate_limit(&self) -> Result<RateLimitInfo, SourceError> {
        self.check("rate_limit")?;
        Ok(RateLimitInfo {
            remaining: self.remaining,
            reset: self.reset,
            limit: 5000,
        })
    }

    async fn organization(&self, org: &str) -> Result<Organization, SourceError> {
        self.organization
            .clone()
            .ok_or_else(|| not_found(&format!("organization '{org}'")))
    }

    async fn repositories_page(
        &self,
        _org: &str,
        page: u32,
    ) -> Result<Listing<RepositoryHandle>, SourceError> {
        self.repository_pages_requested.borrow_mut().push(page);
        self.repository_page_times.borrow_mut().push(Instant::now());
        self.check("repositories")?;

        if page == self.rate_limited_page && self.rate_limit_failures.get() > 0 {
            self.rate_limit_failures
                .set(self.rate_limit_failures.get() - 1);
            return Err(SourceError::RateLimitExceeded {
                message: "API rate limit exceeded".to_string(),
            });
        }

        let index = page as usize - 1;
        let items = self.pages.get(index).cloned().unwrap_or_default();
        let next_page = (index + 1 < self.pages.len()).then_some(page + 1);
        Ok(Listing { items, next_page })
    }

    async fn languages(&self, _owner: &str, _repo: &str) -> Result<Vec<(String, u64)>, SourceError> {
        self.check("languages")?;
        Ok(self.languages.clone())
    }

    async fn license(
        &self,
        _owner: &str,
        _repo: &str,
    ) -> Result<Option<LicenseDetails>, SourceError> {
        self.check("license")?;
        self.license
            .clone()
            .map(Some)
            .ok_or_else(|| not_found("license"))
    }

    async fn topics(&self, _owner: &str, _repo: &str) -> Result<Vec<String>, SourceError> {
        self.check("topics")?;
        Ok(self.topics.clone())
    }

    async fn readme(&self, _owner: &str, _repo: &str) -> Result<ContentFile, SourceError> {
        self.check("readme")?;
        self.readme.clone().ok_or_else(|| not_found("README"))
    }

    async fn file_contents(
        &self,
        _owner: &str,
        _repo: &str,
        path: &str,
    ) -> Result<ContentFile, SourceError> {
        self.files_requested.borrow_mut().push(path.to_string());
        self.check("codeowners")?;
        self.files.get(path).cloned().ok_or_else(|| not_found(path))
    }

    async fn contributors_page(
        &self,
        _owner: &str,
        _repo: &str,
        page: u32,
        _per_page: u8,
    ) -> Result<Listing<ContributorHandle>, SourceError> {
        self.contributor_pages_requested.borrow_mut().push(page);
        self.check("contributors")?;

        let chunks: Vec<_> = self.contributors.chunks(self.contributors_per_page).collect();
        let index = page as usize - 1;
        let items = chunks.get(index).map(|c| c.to_vec()).unwrap_or_default();
        let next_page = (index + 1 < chunks.len()).then_some(page + 1);
        Ok(Listing { items, next_page })
    }

    async fn contributor_count(&self, _owner: &str, _repo: &str) -> Result<u64, SourceError> {
        self.check("contributor_count")?;
        Ok(self.contributors.len() as u64)
    }

    async fn commit_count_since(
        &self,
        _owner: &str,
        _repo: &str,
        since: DateTime<Utc>,
    ) -> Result<u64, SourceError> {
        *self.commits_since.borrow_mut() = Some(since);
        self.check("commits")?;
        Ok(self.commit_count)
    }

    async fn open_pull_request_count(&self, _owner: &str, _repo: &str) -> Result<u64, SourceError> {
        self.check("pulls")?;
        Ok(self.open_pull_requests)
    }

    async fn teams(&self, _owner: &str, _repo: &str) -> Result<Vec<TeamHandle>, SourceError> {
        self.check("teams")?;
        Ok(self.teams.clone())
    }
}
