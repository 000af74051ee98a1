//! Summary statistics over a written report.
//!
//! Parsing goes through a reduced view of the document so that only the
//! fields the summary needs have to be present.

use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

/// Number of languages listed in [`ReportSummary::top_languages`].
pub const TOP_LANGUAGES: usize = 10;

/// Number of repositories listed in [`ReportSummary::top_starred`].
pub const TOP_STARRED: usize = 5;

/// License bucket for repositories without a detected license.
pub const UNLICENSED: &str = "unlicensed";

/// Repository counts by status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusBreakdown {
    pub active: usize,
    pub archived: usize,
    pub forks: usize,
    pub templates: usize,
}

/// A repository in the star ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StarredRepository {
    pub name: String,
    pub stars: u64,
    pub url: Option<String>,
}

/// Aggregate statistics over a report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportSummary {
    pub total_repositories: usize,
    pub status_breakdown: StatusBreakdown,

    /// Primary languages by repository count, descending.
    pub top_languages: Vec<(String, usize)>,

    /// Repository count per license key.
    pub license_breakdown: BTreeMap<String, usize>,

    pub top_starred: Vec<StarredRepository>,
}

#[derive(Deserialize)]
pub(super) struct SummaryView {
    repositories: Vec<RepositoryView>,
}

#[derive(Deserialize)]
struct RepositoryView {
    basic_info: BasicInfoView,
    status: StatusView,
    activity: ActivityView,
    languages: LanguagesView,
    license: LicenseView,
}

#[derive(Deserialize)]
struct BasicInfoView {
    full_name: String,
    #[serde(default)]
    html_url: Option<String>,
}

#[derive(Deserialize)]
struct StatusView {
    is_archived: bool,
    is_fork: bool,
    is_template: bool,
}

#[derive(Deserialize)]
struct ActivityView {
    stars: u64,
}

#[derive(Deserialize)]
struct LanguagesView {
    #[serde(default)]
    primary: Option<String>,
}

#[derive(Deserialize)]
struct LicenseView {
    #[serde(default)]
    key: Option<String>,
}

impl SummaryView {
    pub(super) fn summarize(self) -> ReportSummary {
        let repositories = self.repositories;
        let mut status_breakdown = StatusBreakdown::default();
        let mut language_counts: Vec<(String, usize)> = Vec::new();
        let mut language_index: HashMap<String, usize> = HashMap::new();
        let mut license_breakdown = BTreeMap::new();

        for repository in &repositories {
            let status = &repository.status;
            if status.is_archived {
                status_breakdown.archived += 1;
            } else {
                status_breakdown.active += 1;
            }
            if status.is_fork {
                status_breakdown.forks += 1;
            }
            if status.is_template {
                status_breakdown.templates += 1;
            }

            if let Some(language) = repository.languages.primary.as_deref() {
                match language_index.get(language) {
                    Some(&index) => language_counts[index].1 += 1,
                    None => {
                        language_index.insert(language.to_string(), language_counts.len());
                        language_counts.push((language.to_string(), 1));
                    }
                }
            }

            let license = repository
                .license
                .key
                .as_deref()
                .filter(|key| !key.is_empty())
                .unwrap_or(UNLICENSED);
            *license_breakdown.entry(license.to_string()).or_insert(0) += 1;
        }

        // Stable sorts keep first-seen order among ties.
        language_counts.sort_by(|a, b| b.1.cmp(&a.1));
        language_counts.truncate(TOP_LANGUAGES);

        let mut by_stars: Vec<&RepositoryView> = repositories.iter().collect();
        by_stars.sort_by(|a, b| b.activity.stars.cmp(&a.activity.stars));
        let top_starred = by_stars
            .into_iter()
            .take(TOP_STARRED)
            .map(|repository| StarredRepository {
                name: repository.basic_info.full_name.clone(),
                stars: repository.activity.stars,
                url: repository.basic_info.html_url.clone(),
            })
            .collect();

        ReportSummary {
            total_repositories: repositories.len(),
            status_breakdown,
            top_languages: language_counts,
            license_breakdown,
            top_starred,
        }
    }
}
