//! Typed wire structures returned by the remote source.
//!
//! Every field GitHub may omit is an explicit [`Option`]; callers decide the
//! default at the point of use.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

/// One page of a paginated listing.
#[derive(Debug, Clone)]
pub struct Listing<T> {
    /// Items on this page, in source order.
    pub items: Vec<T>,

    /// Number of the following page, if any.
    pub next_page: Option<u32>,
}

impl<T> Listing<T> {
    /// Creates a final page holding `items`.
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            next_page: None,
        }
    }
}

/// An organization as returned by `GET /orgs/{org}`.
#[derive(Debug, Clone, Deserialize)]
pub struct Organization {
    /// Organization login.
    pub login: String,

    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
}

/// Owner of a repository.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OwnerHandle {
    pub login: Option<String>,

    /// `User` or `Organization`.
    #[serde(rename = "type")]
    pub kind: Option<String>,

    pub html_url: Option<String>,
}

/// A repository as returned by the organization listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RepositoryHandle {
    pub name: Option<String>,
    pub full_name: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub html_url: Option<String>,
    pub homepage: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub pushed_at: Option<DateTime<Utc>>,
    pub size: Option<u64>,
    pub default_branch: Option<String>,
    pub private: Option<bool>,
    pub archived: Option<bool>,
    pub fork: Option<bool>,
    pub is_template: Option<bool>,
    pub disabled: Option<bool>,
    pub has_issues: Option<bool>,
    pub has_projects: Option<bool>,
    pub has_wiki: Option<bool>,
    pub has_pages: Option<bool>,
    pub has_downloads: Option<bool>,
    pub has_discussions: Option<bool>,
    pub stargazers_count: Option<u64>,
    pub watchers_count: Option<u64>,
    pub forks_count: Option<u64>,
    pub open_issues_count: Option<u64>,
    pub owner: Option<OwnerHandle>,
}

impl RepositoryHandle {
    /// Returns true if the repository is a fork.
    #[must_use]
    pub fn is_fork(&self) -> bool {
        self.fork.unwrap_or(false)
    }

    /// Returns true if the repository is archived.
    #[must_use]
    pub fn is_archived(&self) -> bool {
        self.archived.unwrap_or(false)
    }

    /// Best available name for logs and failure reports.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("<unnamed repository>")
    }
}

/// License details from `GET /repos/{owner}/{repo}/license`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LicenseDetails {
    pub key: Option<String>,
    pub name: Option<String>,
    pub spdx_id: Option<String>,
    pub url: Option<String>,
}

/// A contributor entry, in the source's ranking order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContributorHandle {
    pub login: Option<String>,
    pub contributions: Option<u64>,
    pub html_url: Option<String>,
}

/// A team with access to a repository.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeamHandle {
    pub name: Option<String>,
    pub permission: Option<String>,
}

/// Errors decoding a [`ContentFile`] payload.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The payload carried no content.
    #[error("file has no content")]
    Empty,

    /// The payload used an encoding other than base64.
    #[error("unsupported content encoding '{0}'")]
    UnsupportedEncoding(String),

    /// The base64 payload was malformed.
    #[error("invalid base64 content: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The decoded bytes were not UTF-8.
    #[error("content is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// A file fetched through the contents or README endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentFile {
    pub content: Option<String>,
    pub encoding: Option<String>,
}

impl ContentFile {
    /// Wraps plain text as a base64 payload, as GitHub would return it.
    pub fn from_text(text: &str) -> Self {
        Self {
            content: Some(STANDARD.encode(text)),
            encoding: Some("base64".to_string()),
        }
    }

    /// Decodes the payload into UTF-8 text.
    ///
    /// GitHub wraps base64 content at 60 columns, so whitespace is stripped
    /// before decoding.
    pub fn decode_text(&self) -> Result<String, ContentError> {
        let content = self.content.as_deref().ok_or(ContentError::Empty)?;
        match self.encoding.as_deref() {
            None | Some("base64") => {}
            Some(other) => return Err(ContentError::UnsupportedEncoding(other.to_string())),
        }

        let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
        let bytes = STANDARD.decode(compact)?;
        Ok(String::from_utf8(bytes)?)
    }
}
