//! Activity window.

use chrono::{DateTime, Datelike, TimeZone, Utc};

/// Returns the first instant of the calendar month containing `now` (UTC).
///
/// Commit activity is counted from here; it is not a rolling 30-day window.
#[must_use]
pub fn month_start(now: DateTime<Utc>) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
        .single()
        .unwrap_or(now)
}
