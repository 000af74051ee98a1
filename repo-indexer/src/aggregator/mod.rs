//! Per-repository metadata aggregation.
//!
//! [`MetadataAggregator::aggregate`] turns one [`RepositoryHandle`] into a
//! complete [`RepositoryRecord`]. Every optional sub-resource goes through
//! one fetch-with-default helper, so a failing lookup is reported and
//! replaced by its default instead of aborting the record.

mod activity;
mod codeowners;
mod error;
mod fallback;
mod languages;
mod readme;

pub use activity::month_start;
pub use codeowners::{parse_owners, CODEOWNERS_PATHS};
pub use error::{AggregateError, LookupError};
pub use fallback::Lookup;
pub use languages::language_breakdown;
pub use readme::{truncate_preview, DEFAULT_README_MAX_CHARS, ELLIPSIS};

use crate::record::{
    Activity, BasicInfo, Codeowners, Contributor, Languages, License, Owner, Ownership,
    RepositoryRecord, StatusFlags, Team, Visibility,
};
use crate::reporter::SharedReporter;
use crate::source::{RepositoryHandle, RepositorySource, SourceError};
use chrono::Utc;
use fallback::fetch_or_default;
use tracing::{info_span, Instrument};

/// Component name used in reported events.
const COMPONENT: &str = "aggregator";

/// Default number of top contributors kept per repository.
pub const DEFAULT_MAX_CONTRIBUTORS: usize = 5;

/// Largest page size the contributors endpoint accepts.
const MAX_CONTRIBUTORS_PER_PAGE: usize = 100;

/// Identity fields every handle must carry.
struct Identity<'h> {
    name: &'h str,
    full_name: &'h str,
    owner_login: &'h str,
}

impl<'h> Identity<'h> {
    fn from_handle(handle: &'h RepositoryHandle) -> Result<Self, AggregateError> {
        let missing = |field| AggregateError::MissingField {
            repository: handle.display_name().to_string(),
            field,
        };

        Ok(Self {
            name: handle.name.as_deref().ok_or_else(|| missing("name"))?,
            full_name: handle
                .full_name
                .as_deref()
                .ok_or_else(|| missing("full_name"))?,
            owner_login: handle
                .owner
                .as_ref()
                .and_then(|owner| owner.login.as_deref())
                .ok_or_else(|| missing("owner.login"))?,
        })
    }
}

/// Builds [`RepositoryRecord`]s from repository handles.
pub struct MetadataAggregator<'a, S> {
    source: &'a S,
    reporter: SharedReporter,
    max_contributors: usize,
    readme_max_chars: usize,
}

impl<'a, S: RepositorySource> MetadataAggregator<'a, S> {
    /// Creates an aggregator with default limits.
    pub fn new(source: &'a S, reporter: SharedReporter) -> Self {
        Self {
            source,
            reporter,
            max_contributors: DEFAULT_MAX_CONTRIBUTORS,
            readme_max_chars: DEFAULT_README_MAX_CHARS,
        }
    }

    /// Sets how many top contributors are kept.
    #[must_use]
    pub fn with_max_contributors(mut self, max_contributors: usize) -> Self {
        self.max_contributors = max_contributors;
        self
    }

    /// Sets the README preview length in characters.
    #[must_use]
    pub fn with_readme_max_chars(mut self, readme_max_chars: usize) -> Self {
        self.readme_max_chars = readme_max_chars;
        self
    }

    /// Collects all metadata for one repository.
    ///
    /// # Errors
    ///
    /// Returns [`AggregateError::MissingField`] if the handle lacks its name,
    /// full name or owner login. Sub-resource failures never fail the call.
    pub async fn aggregate(
        &self,
        handle: &RepositoryHandle,
    ) -> Result<RepositoryRecord, AggregateError> {
        let identity = Identity::from_handle(handle)?;
        let span = info_span!("aggregate", repo = %identity.full_name);

        async {
            self.reporter.info(
                COMPONENT,
                Some(identity.full_name),
                "Collecting metadata",
            );

            let record = RepositoryRecord {
                basic_info: basic_info(handle, &identity),
                status: status_flags(handle),
                activity: self.activity(handle, &identity).await,
                languages: self.languages(&identity).await,
                license: self.license(&identity).await,
                topics: self.topics(&identity).await,
                readme_preview: self.readme_preview(&identity).await,
                ownership: self.ownership(handle, &identity).await,
            };

            self.reporter.debug(
                COMPONENT,
                Some(identity.full_name),
                "Successfully collected metadata",
            );
            Ok(record)
        }
        .instrument(span)
        .await
    }

    async fn activity(&self, handle: &RepositoryHandle, identity: &Identity<'_>) -> Activity {
        let (owner, repo) = (identity.owner_login, identity.name);
        let since = month_start(Utc::now());

        let commit_count_30d = self
            .or_default(
                identity,
                Lookup::Commits,
                self.source.commit_count_since(owner, repo, since),
                0,
            )
            .await;
        let contributor_count = self
            .or_default(
                identity,
                Lookup::ContributorCount,
                self.source.contributor_count(owner, repo),
                0,
            )
            .await;
        let open_pull_requests = self
            .or_default(
                identity,
                Lookup::OpenPullRequests,
                self.source.open_pull_request_count(owner, repo),
                0,
            )
            .await;

        Activity {
            stars: handle.stargazers_count.unwrap_or(0),
            watchers: handle.watchers_count.unwrap_or(0),
            forks: handle.forks_count.unwrap_or(0),
            open_issues: handle.open_issues_count.unwrap_or(0),
            open_pull_requests,
            last_commit_date: handle.pushed_at,
            commit_count_30d,
            contributor_count,
        }
    }

    async fn languages(&self, identity: &Identity<'_>) -> Languages {
        let bytes = self
            .or_default(
                identity,
                Lookup::Languages,
                self.source.languages(identity.owner_login, identity.name),
                Vec::new(),
            )
            .await;
        language_breakdown(&bytes)
    }

    async fn license(&self, identity: &Identity<'_>) -> License {
        let details = self
            .or_default(
                identity,
                Lookup::License,
                self.source.license(identity.owner_login, identity.name),
                None,
            )
            .await
            .unwrap_or_default();

        License {
            key: details.key,
            name: details.name,
            spdx_id: details.spdx_id,
            url: details.url,
        }
    }

    async fn topics(&self, identity: &Identity<'_>) -> Vec<String> {
        self.or_default(
            identity,
            Lookup::Topics,
            self.source.topics(identity.owner_login, identity.name),
            Vec::new(),
        )
        .await
    }

    async fn readme_preview(&self, identity: &Identity<'_>) -> Option<String> {
        let fetch = async {
            let file = self
                .source
                .readme(identity.owner_login, identity.name)
                .await?;
            let text = file.decode_text()?;
            Ok::<_, LookupError>(Some(truncate_preview(&text, self.readme_max_chars)))
        };
        self.or_default(identity, Lookup::Readme, fetch, None).await
    }

    async fn ownership(&self, handle: &RepositoryHandle, identity: &Identity<'_>) -> Ownership {
        let owner_handle = handle.owner.clone().unwrap_or_default();
        let owner = Owner {
            login: identity.owner_login.to_string(),
            kind: owner_handle.kind,
            url: owner_handle.html_url,
        };

        let top_contributors = self
            .or_default(
                identity,
                Lookup::Contributors,
                self.top_contributors(identity),
                Vec::new(),
            )
            .await;

        let teams = self
            .or_default(
                identity,
                Lookup::Teams,
                self.source.teams(identity.owner_login, identity.name),
                Vec::new(),
            )
            .await
            .into_iter()
            .map(|team| Team {
                name: team.name,
                permission: team.permission,
            })
            .collect();

        let codeowners = self
            .or_default(
                identity,
                Lookup::Codeowners,
                self.codeowners(identity),
                Codeowners::default(),
            )
            .await;

        Ownership {
            owner,
            top_contributors,
            teams,
            codeowners,
        }
    }

    /// Walks the contributor ranking in order, stopping after `max_contributors`.
    async fn top_contributors(
        &self,
        identity: &Identity<'_>,
    ) -> Result<Vec<Contributor>, SourceError> {
        let mut contributors = Vec::new();
        if self.max_contributors == 0 {
            return Ok(contributors);
        }

        let per_page = u8::try_from(self.max_contributors.min(MAX_CONTRIBUTORS_PER_PAGE))
            .unwrap_or(u8::MAX);
        let mut page = Some(1);

        while let Some(number) = page {
            let listing = self
                .source
                .contributors_page(identity.owner_login, identity.name, number, per_page)
                .await?;

            for contributor in listing.items {
                if contributors.len() >= self.max_contributors {
                    return Ok(contributors);
                }
                contributors.push(Contributor {
                    login: contributor.login,
                    contributions: contributor.contributions.unwrap_or(0),
                    profile_url: contributor.html_url,
                });
            }

            if contributors.len() >= self.max_contributors {
                break;
            }
            page = listing.next_page;
        }

        Ok(contributors)
    }

    /// Uses the first CODEOWNERS candidate path that resolves.
    async fn codeowners(&self, identity: &Identity<'_>) -> Result<Codeowners, LookupError> {
        for path in CODEOWNERS_PATHS {
            match self
                .source
                .file_contents(identity.owner_login, identity.name, path)
                .await
            {
                Ok(file) => {
                    let text = file.decode_text()?;
                    return Ok(Codeowners {
                        exists: true,
                        owners: parse_owners(&text),
                    });
                }
                Err(e) => {
                    self.reporter.debug(
                        COMPONENT,
                        Some(identity.full_name),
                        &format!("No CODEOWNERS at {path}: {e}"),
                    );
                }
            }
        }

        Ok(Codeowners::default())
    }

    async fn or_default<T, E, F>(
        &self,
        identity: &Identity<'_>,
        lookup: Lookup,
        fetch: F,
        default: T,
    ) -> T
    where
        F: std::future::Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        fetch_or_default(
            self.reporter.as_ref(),
            COMPONENT,
            identity.full_name,
            lookup,
            fetch,
            default,
        )
        .await
    }
}

fn basic_info(handle: &RepositoryHandle, identity: &Identity<'_>) -> BasicInfo {
    BasicInfo {
        name: identity.name.to_string(),
        full_name: identity.full_name.to_string(),
        description: handle.description.clone(),
        url: handle.url.clone(),
        html_url: handle.html_url.clone(),
        homepage: handle.homepage.clone(),
        created_at: handle.created_at,
        updated_at: handle.updated_at,
        pushed_at: handle.pushed_at,
        size: handle.size.unwrap_or(0),
        default_branch: handle.default_branch.clone(),
        visibility: if handle.private.unwrap_or(false) {
            Visibility::Private
        } else {
            Visibility::Public
        },
    }
}

fn status_flags(handle: &RepositoryHandle) -> StatusFlags {
    let flag = |value: Option<bool>| value.unwrap_or(false);
    StatusFlags {
        is_archived: flag(handle.archived),
        is_fork: flag(handle.fork),
        is_template: flag(handle.is_template),
        is_disabled: flag(handle.disabled),
        has_issues: flag(handle.has_issues),
        has_projects: flag(handle.has_projects),
        has_wiki: flag(handle.has_wiki),
        has_pages: flag(handle.has_pages),
        has_downloads: flag(handle.has_downloads),
        has_discussions: flag(handle.has_discussions),
    }
}
