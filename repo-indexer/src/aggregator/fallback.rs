//! Fetch-with-default for optional sub-resources.

use crate::reporter::Reporter;
use std::fmt::Display;
use std::future::Future;
use tracing::Level;

/// Optional sub-resources looked up per repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    Commits,
    ContributorCount,
    OpenPullRequests,
    Languages,
    License,
    Topics,
    Readme,
    Contributors,
    Teams,
    Codeowners,
}

impl Lookup {
    /// Name used in log messages.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Commits => "commits",
            Self::ContributorCount => "contributor count",
            Self::OpenPullRequests => "open pull requests",
            Self::Languages => "languages",
            Self::License => "license",
            Self::Topics => "topics",
            Self::Readme => "README",
            Self::Contributors => "contributors",
            Self::Teams => "teams",
            Self::Codeowners => "CODEOWNERS",
        }
    }

    /// Level at which a failure is reported.
    ///
    /// Resources that are commonly absent (license, README, teams,
    /// CODEOWNERS) fail quietly.
    #[must_use]
    pub fn failure_level(self) -> Level {
        match self {
            Self::License | Self::Readme | Self::Teams | Self::Codeowners => Level::DEBUG,
            _ => Level::WARN,
        }
    }
}

/// Awaits `fetch`, returning `default` if it fails.
///
/// The failure is reported with the repository and the sub-resource name.
pub(crate) async fn fetch_or_default<T, E, F>(
    reporter: &dyn Reporter,
    component: &str,
    repository: &str,
    lookup: Lookup,
    fetch: F,
    default: T,
) -> T
where
    F: Future<Output = Result<T, E>>,
    E: Display,
{
    match fetch.await {
        Ok(value) => value,
        Err(e) => {
            reporter.log(
                lookup.failure_level(),
                component,
                Some(repository),
                &format!("Could not get {} for {repository}: {e}", lookup.label()),
            );
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::RecordingReporter;

    #[tokio::test]
    async fn returns_value_on_success() {
        let reporter = RecordingReporter::new();
        let value = fetch_or_default(
            &reporter,
            "aggregator",
            "acme/tool",
            Lookup::Topics,
            async { Ok::<_, String>(vec!["rust".to_string()]) },
            Vec::new(),
        )
        .await;

        assert_eq!(value, vec!["rust".to_string()]);
        assert!(reporter.entries().is_empty());
    }

    #[tokio::test]
    async fn returns_default_and_reports_failure() {
        let reporter = RecordingReporter::new();
        let value = fetch_or_default(
            &reporter,
            "aggregator",
            "acme/tool",
            Lookup::Readme,
            async { Err::<Option<String>, _>("404 Not Found") },
            None,
        )
        .await;

        assert_eq!(value, None);
        let entries = reporter.find("acme/tool", "README");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].level, Level::DEBUG);
        assert_eq!(entries[0].component, "aggregator");
    }

    #[test]
    fn commonly_absent_resources_fail_quietly() {
        assert_eq!(Lookup::License.failure_level(), Level::DEBUG);
        assert_eq!(Lookup::Codeowners.failure_level(), Level::DEBUG);
        assert_eq!(Lookup::Languages.failure_level(), Level::WARN);
        assert_eq!(Lookup::Commits.failure_level(), Level::WARN);
    }
}
