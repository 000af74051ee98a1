//! Rate limit information.

use chrono::{DateTime, Utc};

/// Remaining requests below which a warning is logged.
pub const LOW_REMAINING_THRESHOLD: u32 = 100;

/// Rate limit information for the core API resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitInfo {
    /// Requests remaining in the current window.
    pub remaining: u32,

    /// Unix timestamp when the rate limit resets.
    pub reset: u64,

    /// Total requests allowed per window.
    pub limit: u32,
}

impl RateLimitInfo {
    /// Returns the reset instant, or the Unix epoch if out of range.
    #[must_use]
    pub fn reset_at(&self) -> DateTime<Utc> {
        i64::try_from(self.reset)
            .ok()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .unwrap_or(DateTime::UNIX_EPOCH)
    }

    /// Returns true if remaining requests are below [`LOW_REMAINING_THRESHOLD`].
    #[must_use]
    pub fn is_low(&self) -> bool {
        self.remaining < LOW_REMAINING_THRESHOLD
    }
}
