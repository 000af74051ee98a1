//! Repository metadata records.
//!
//! A [`RepositoryRecord`] is the unit of output: one per repository, always
//! carrying all eight groups. Field names are part of the output contract
//! consumed by downstream documentation generators.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Complete metadata for one repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryRecord {
    pub basic_info: BasicInfo,
    pub status: StatusFlags,
    pub activity: Activity,
    pub languages: Languages,
    pub license: License,
    pub topics: Vec<String>,
    pub readme_preview: Option<String>,
    pub ownership: Ownership,
}

/// Repository visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Public,
    Private,
}

/// Identity and timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicInfo {
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,

    /// API URL of the repository.
    pub url: Option<String>,

    /// Web URL of the repository.
    pub html_url: Option<String>,

    pub homepage: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub pushed_at: Option<DateTime<Utc>>,

    /// Size in kilobytes, as reported by GitHub.
    pub size: u64,

    pub default_branch: Option<String>,
    pub visibility: Visibility,
}

/// Status flags and feature toggles. Unreported flags are `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusFlags {
    pub is_archived: bool,
    pub is_fork: bool,
    pub is_template: bool,
    pub is_disabled: bool,
    pub has_issues: bool,
    pub has_projects: bool,
    pub has_wiki: bool,
    pub has_pages: bool,
    pub has_downloads: bool,
    pub has_discussions: bool,
}

/// Activity metrics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub stars: u64,
    pub watchers: u64,
    pub forks: u64,
    pub open_issues: u64,
    pub open_pull_requests: u64,

    /// Same instant as `basic_info.pushed_at`.
    pub last_commit_date: Option<DateTime<Utc>>,

    /// Commits since the first instant of the current calendar month (UTC).
    pub commit_count_30d: u64,

    pub contributor_count: u64,
}

/// Language usage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Languages {
    /// Language with the most bytes.
    pub primary: Option<String>,

    /// Percentage of the codebase per language, one decimal place, in the
    /// order GitHub reports languages (largest first).
    pub breakdown: Map<String, Value>,
}

/// Detected license. All fields are null when no license was detected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    pub key: Option<String>,
    pub name: Option<String>,
    pub spdx_id: Option<String>,
    pub url: Option<String>,
}

/// Repository owner identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub login: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub url: Option<String>,
}

/// One of the top contributors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    pub login: Option<String>,
    pub contributions: u64,
    pub profile_url: Option<String>,
}

/// A team with access to the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub name: Option<String>,
    pub permission: Option<String>,
}

/// CODEOWNERS detection result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Codeowners {
    pub exists: bool,

    /// Distinct `@`-prefixed owner handles.
    pub owners: BTreeSet<String>,
}

/// Ownership and contributor information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ownership {
    pub owner: Owner,
    pub top_contributors: Vec<Contributor>,
    pub teams: Vec<Team>,
    pub codeowners: Codeowners,
}
