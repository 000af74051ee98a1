//! Rate limiting utilities for GitHub API.
//!
//! This module computes how long to wait for a rate limit reset and performs
//! the wait. Callers decide when a wait is needed and what to do afterwards.

mod info;

pub use info::{RateLimitInfo, LOW_REMAINING_THRESHOLD};

use chrono::{DateTime, Utc};
use std::time::Duration;

/// Seconds added to the reported reset instant before retrying.
pub const RESET_SAFETY_MARGIN_SECS: i64 = 10;

/// Maximum time to wait for rate limit reset (1 hour plus margin).
const MAX_WAIT_SECS: u64 = 3600 + RESET_SAFETY_MARGIN_SECS as u64;

/// Computes the wait until `reset_at`, plus [`RESET_SAFETY_MARGIN_SECS`].
///
/// # Returns
///
/// `None` if the reset instant (with margin) is not in the future; otherwise
/// the wait, capped at one hour plus margin.
#[must_use]
pub fn wait_duration(reset_at: DateTime<Utc>, now: DateTime<Utc>) -> Option<Duration> {
    let wait_secs = (reset_at - now).num_seconds() + RESET_SAFETY_MARGIN_SECS;
    if wait_secs <= 0 {
        return None;
    }

    let wait_secs = u64::try_from(wait_secs).unwrap_or(MAX_WAIT_SECS);
    Some(Duration::from_secs(wait_secs.min(MAX_WAIT_SECS)))
}

/// Sleeps for the given duration.
///
/// Execution is strictly sequential, so this pauses the whole run.
pub async fn wait_for_reset(duration: Duration) {
    tokio::time::sleep(duration).await;
}
