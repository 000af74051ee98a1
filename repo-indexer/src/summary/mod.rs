//! Run summary types.

mod result;
mod run_summary;

pub use result::{FailedRepository, ProcessingResult};
pub use run_summary::RunSummary;
