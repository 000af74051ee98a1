//! GitHub implementation of [`RepositorySource`] on top of octocrab.

use super::{
    ContentFile, ContributorHandle, LicenseDetails, Listing, Organization, RepositoryHandle,
    RepositorySource, SourceError, TeamHandle,
};
use crate::rate_limit::RateLimitInfo;
use chrono::{DateTime, SecondsFormat, Utc};
use octocrab::{Octocrab, Page};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};
use url::Url;

/// Results per page for repository listings.
const REPOSITORIES_PER_PAGE: u8 = 100;

/// Results per page for team listings.
const TEAMS_PER_PAGE: u8 = 100;

/// Query parameters for `GET /orgs/{org}/repos`.
#[derive(Serialize)]
struct RepositoryListParams {
    #[serde(rename = "type")]
    kind: &'static str,
    per_page: u8,
    page: u32,
}

/// Query parameters for plain paginated listings.
#[derive(Serialize)]
struct PageParams {
    per_page: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    page: Option<u32>,
}

/// Query parameters for counting commits.
#[derive(Serialize)]
struct CommitCountParams {
    since: String,
    per_page: u8,
}

/// Query parameters for counting pull requests.
#[derive(Serialize)]
struct PullCountParams {
    state: &'static str,
    per_page: u8,
}

#[derive(Deserialize)]
struct LicenseResponse {
    license: Option<LicenseDetails>,
}

#[derive(Deserialize)]
struct TopicsResponse {
    #[serde(default)]
    names: Vec<String>,
}

/// Reads from the GitHub REST API (github.com or GitHub Enterprise Server).
#[derive(Clone)]
pub struct GitHubSource {
    octocrab: Octocrab,
}

impl GitHubSource {
    /// Builds an authenticated source.
    ///
    /// # Arguments
    ///
    /// * `token` - GitHub personal access token
    /// * `base_url` - API base for GitHub Enterprise Server
    ///   (e.g. `https://github.example.com/api/v3`); `None` for github.com
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Client`] if the client cannot be built.
    pub fn new(token: &str, base_url: Option<&Url>) -> Result<Self, SourceError> {
        let mut builder = Octocrab::builder().personal_token(token.to_string());
        if let Some(base_url) = base_url {
            builder = builder.base_uri(base_url.as_str())?;
        }

        Ok(Self {
            octocrab: builder.build()?,
        })
    }

    async fn get_json<R, P>(
        &self,
        route: String,
        params: Option<&P>,
        resource: &str,
    ) -> Result<R, SourceError>
    where
        R: DeserializeOwned + Send,
        P: Serialize + ?Sized,
    {
        self.octocrab
            .get(route, params)
            .await
            .map_err(|e| SourceError::from_octocrab(e, resource))
    }

    async fn get_page<R, P>(
        &self,
        route: String,
        params: &P,
        resource: &str,
    ) -> Result<Page<R>, SourceError>
    where
        R: DeserializeOwned + Send,
        P: Serialize + ?Sized,
    {
        self.octocrab
            .get(route, Some(params))
            .await
            .map_err(|e| SourceError::from_octocrab(e, resource))
    }

    /// Counts a listing by requesting one item per page and reading the
    /// last page number from the Link header.
    async fn count_items<P>(
        &self,
        route: String,
        params: &P,
        resource: &str,
    ) -> Result<u64, SourceError>
    where
        P: Serialize + ?Sized,
    {
        let page: Page<IgnoredAny> = self.get_page(route, params, resource).await?;
        Ok(page
            .number_of_pages()
            .map(u64::from)
            .unwrap_or(page.items.len() as u64))
    }
}

/// Converts an octocrab page into a [`Listing`], given its page number.
fn into_listing<T>(page: Page<T>, number: u32) -> Listing<T> {
    let next_page = page.next.is_some().then(|| number + 1);
    Listing {
        items: page.items,
        next_page,
    }
}

impl RepositorySource for GitHubSource {
    async fn authenticated_login(&self) -> Result<String, SourceError> {
        let user = self
            .octocrab
            .current()
            .user()
            .await
            .map_err(|e| SourceError::from_octocrab(e, "authenticated user"))?;
        Ok(user.login)
    }

    async fn rate_limit(&self) -> Result<RateLimitInfo, SourceError> {
        let rate_limit = self
            .octocrab
            .ratelimit()
            .get()
            .await
            .map_err(|e| SourceError::from_octocrab(e, "rate limit"))?;
        let core = &rate_limit.resources.core;

        Ok(RateLimitInfo {
            remaining: core.remaining as u32,
            reset: core.reset,
            limit: core.limit as u32,
        })
    }

    async fn organization(&self, org: &str) -> Result<Organization, SourceError> {
        self.get_json(format!("/orgs/{org}"), None::<&()>, &format!("organization '{org}'"))
            .await
    }

    async fn repositories_page(
        &self,
        org: &str,
        page: u32,
    ) -> Result<Listing<RepositoryHandle>, SourceError> {
        let params = RepositoryListParams {
            kind: "all",
            per_page: REPOSITORIES_PER_PAGE,
            page,
        };
        let result = self
            .get_page(
                format!("/orgs/{org}/repos"),
                &params,
                &format!("repositories of '{org}'"),
            )
            .await?;
        Ok(into_listing(result, page))
    }

    async fn languages(&self, owner: &str, repo: &str) -> Result<Vec<(String, u64)>, SourceError> {
        let map: serde_json::Map<String, serde_json::Value> = self
            .get_json(
                format!("/repos/{owner}/{repo}/languages"),
                None::<&()>,
                "languages",
            )
            .await?;

        Ok(map
            .into_iter()
            .filter_map(|(language, bytes)| bytes.as_u64().map(|bytes| (language, bytes)))
            .collect())
    }

    async fn license(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<Option<LicenseDetails>, SourceError> {
        let response: LicenseResponse = self
            .get_json(
                format!("/repos/{owner}/{repo}/license"),
                None::<&()>,
                "license",
            )
            .await?;
        Ok(response.license)
    }

    async fn topics(&self, owner: &str, repo: &str) -> Result<Vec<String>, SourceError> {
        let response: TopicsResponse = self
            .get_json(
                format!("/repos/{owner}/{repo}/topics"),
                None::<&()>,
                "topics",
            )
            .await?;
        Ok(response.names)
    }

    async fn readme(&self, owner: &str, repo: &str) -> Result<ContentFile, SourceError> {
        self.get_json(
            format!("/repos/{owner}/{repo}/readme"),
            None::<&()>,
            "README",
        )
        .await
    }

    async fn file_contents(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> Result<ContentFile, SourceError> {
        self.get_json(
            format!("/repos/{owner}/{repo}/contents/{path}"),
            None::<&()>,
            path,
        )
        .await
    }

    async fn contributors_page(
        &self,
        owner: &str,
        repo: &str,
        page: u32,
        per_page: u8,
    ) -> Result<Listing<ContributorHandle>, SourceError> {
        let params = PageParams {
            per_page,
            page: Some(page),
        };
        let result = self
            .get_page(
                format!("/repos/{owner}/{repo}/contributors"),
                &params,
                "contributors",
            )
            .await?;
        Ok(into_listing(result, page))
    }

    async fn contributor_count(&self, owner: &str, repo: &str) -> Result<u64, SourceError> {
        let params = PageParams {
            per_page: 1,
            page: None,
        };
        self.count_items(
            format!("/repos/{owner}/{repo}/contributors"),
            &params,
            "contributors",
        )
        .await
    }

    async fn commit_count_since(
        &self,
        owner: &str,
        repo: &str,
        since: DateTime<Utc>,
    ) -> Result<u64, SourceError> {
        let params = CommitCountParams {
            since: since.to_rfc3339_opts(SecondsFormat::Secs, true),
            per_page: 1,
        };
        self.count_items(format!("/repos/{owner}/{repo}/commits"), &params, "commits")
            .await
    }

    async fn open_pull_request_count(&self, owner: &str, repo: &str) -> Result<u64, SourceError> {
        let params = PullCountParams {
            state: "open",
            per_page: 1,
        };
        self.count_items(
            format!("/repos/{owner}/{repo}/pulls"),
            &params,
            "pull requests",
        )
        .await
    }

    async fn teams(&self, owner: &str, repo: &str) -> Result<Vec<TeamHandle>, SourceError> {
        let params = PageParams {
            per_page: TEAMS_PER_PAGE,
            page: None,
        };
        let first: Page<TeamHandle> = self
            .get_page(format!("/repos/{owner}/{repo}/teams"), &params, "teams")
            .await?;
        self.octocrab
            .all_pages(first)
            .await
            .map_err(|e| SourceError::from_octocrab(e, "teams"))
    }
}
