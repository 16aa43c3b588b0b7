//! Timestamp utilities

use chrono::{DateTime, Local, NaiveDate, Utc};

/// Get current UTC timestamp (used for `booked_at`)
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Today's calendar date in the local timezone
///
/// Event dates are compared against this, matching what the user sees on
/// their own calendar.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Format a booking timestamp the way listings display it
pub fn format_booked_at(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}
