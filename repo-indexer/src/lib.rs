#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod aggregator;
pub mod enumerator;
pub mod rate_limit;
pub mod record;
pub mod report;
pub mod reporter;
pub mod runner;
pub mod source;
pub mod summary;

pub use aggregator::{AggregateError, MetadataAggregator, DEFAULT_MAX_CONTRIBUTORS};
pub use enumerator::{EnumerationError, RepositoryEnumerator, RepositoryFilter};
pub use rate_limit::RateLimitInfo;
pub use record::RepositoryRecord;
pub use report::{
    summarize, validate_output, CollectionReport, ReportBuilder, ReportError, ReportSummary,
};
pub use reporter::{RecordingReporter, Reporter, SharedReporter, TracingReporter};
pub use runner::{Collector, CollectorConfig, CollectorError, DEFAULT_OUTPUT_FILE};
pub use source::{GitHubSource, RepositoryHandle, RepositorySource, SourceError};
pub use summary::{FailedRepository, ProcessingResult, RunSummary};
