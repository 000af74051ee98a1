mod common;

use common::{fork, repository, FakeSource, ORG};
use repo_indexer::report::{validate_output, ReportError};
use repo_indexer::reporter::{RecordingReporter, SharedReporter};
use repo_indexer::source::RepositoryHandle;
use repo_indexer::{Collector, CollectorConfig, CollectorError, EnumerationError};
use std::path::Path;
use std::sync::Arc;
use tracing::Level;

fn collector(
    source: FakeSource,
    output: &Path,
) -> (Collector<FakeSource>, Arc<RecordingReporter>) {
    let recorder = Arc::new(RecordingReporter::new());
    let reporter: SharedReporter = recorder.clone();
    let config = CollectorConfig::new(ORG, "token").with_output_path(output);
    (Collector::with_source(config, source, reporter), recorder)
}

fn read_report(path: &Path) -> serde_json::Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[tokio::test]
async fn writes_report_for_all_repositories() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("repositories.json");
    let source = FakeSource::with_pages(vec![vec![repository("one"), repository("two")]]);
    let (collector, _) = collector(source, &output);

    let summary = collector.run().await.unwrap();

    assert_eq!(summary.repositories_found, 2);
    assert_eq!(summary.processed, 2);
    assert!(summary.all_success());
    assert_eq!(summary.output_path.as_deref(), Some(output.as_path()));
    assert_eq!(summary.rate_limit.map(|info| info.remaining), Some(4999));

    let report = read_report(&output);
    assert_eq!(report["metadata"]["organization"], ORG);
    assert_eq!(report["metadata"]["total_repositories"], 2);
    assert_eq!(report["metadata"]["github_api_version"], "2022-11-28");
    assert_eq!(report["repositories"][0]["basic_info"]["full_name"], "acme/one");
    assert_eq!(report["repositories"][1]["basic_info"]["full_name"], "acme/two");
    assert!(validate_output(&output).is_ok());
}

#[tokio::test]
async fn isolates_repository_failures() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("repositories.json");
    let broken = RepositoryHandle {
        owner: None,
        ..repository("broken")
    };
    let source = FakeSource::with_pages(vec![vec![repository("first"), broken, repository("last")]]);
    let (collector, recorder) = collector(source, &output);

    let summary = collector.run().await.unwrap();

    assert_eq!(summary.processed, 2);
    assert_eq!(summary.failed.len(), 1);
    assert_eq!(summary.failed[0].name, "acme/broken");
    assert!(summary.failed[0].error.contains("owner.login"));
    assert!(recorder
        .find("acme/broken", "Failed to process")
        .iter()
        .any(|entry| entry.level == Level::ERROR));

    let report = read_report(&output);
    assert_eq!(report["metadata"]["total_repositories"], 2);
    assert_eq!(report["repositories"][1]["basic_info"]["name"], "last");
}

#[tokio::test]
async fn applies_configured_filters() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("repositories.json");
    let source = FakeSource::with_pages(vec![vec![repository("own"), fork("copy")]]);
    let recorder = Arc::new(RecordingReporter::new());
    let config = CollectorConfig::new(ORG, "token")
        .with_output_path(&output)
        .with_include_forks(false);
    let collector = Collector::with_source(config, source, recorder.clone());

    let summary = collector.run().await.unwrap();

    assert_eq!(summary.repositories_found, 1);
    assert_eq!(read_report(&output)["repositories"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn writes_nothing_when_no_repositories() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("repositories.json");
    let (collector, _) = collector(FakeSource::default(), &output);

    let summary = collector.run().await.unwrap();

    assert!(summary.nothing_found());
    assert!(summary.output_path.is_none());
    assert!(!output.exists());
}

#[tokio::test]
async fn rejected_credentials_are_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("repositories.json");
    let source = FakeSource {
        login: None,
        ..FakeSource::with_pages(vec![vec![repository("one")]])
    };
    let (collector, _) = collector(source, &output);

    let err = collector.run().await.unwrap_err();

    assert!(matches!(err, CollectorError::Authentication(_)));
    assert!(!output.exists());
}

#[tokio::test]
async fn unknown_organization_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("repositories.json");
    let source = FakeSource {
        organization: None,
        ..FakeSource::default()
    };
    let (collector, _) = collector(source, &output);

    let err = collector.run().await.unwrap_err();

    assert!(matches!(
        err,
        CollectorError::Enumeration(EnumerationError::OrganizationNotFound { .. })
    ));
}

#[tokio::test]
async fn unwritable_output_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("missing-dir").join("repositories.json");
    let source = FakeSource::with_pages(vec![vec![repository("one")]]);
    let (collector, _) = collector(source, &output);

    let err = collector.run().await.unwrap_err();

    assert!(matches!(err, CollectorError::Report(ReportError::Io { .. })));
}

#[tokio::test]
async fn warns_when_quota_runs_low() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("repositories.json");
    let source = FakeSource {
        remaining: 42,
        ..FakeSource::with_pages(vec![vec![repository("one")]])
    };
    let (collector, recorder) = collector(source, &output);

    let summary = collector.run().await.unwrap();

    assert!(summary.rate_limit.unwrap().is_low());
    assert!(recorder
        .entries()
        .iter()
        .any(|entry| entry.level == Level::WARN && entry.message.contains("42/5000")));
}

#[tokio::test]
async fn second_run_backs_up_previous_report() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("repositories.json");

    for _ in 0..2 {
        let source = FakeSource::with_pages(vec![vec![repository("one")]]);
        let (collector, _) = collector(source, &output);
        collector.run().await.unwrap();
    }

    let count = std::fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(count, 2);
}
