//! # Time Utilities
//!
//! Timestamps on the wire are ISO-8601 UTC with millisecond precision,
//! e.g. `2026-03-01T09:15:02.417Z`.

use chrono::{DateTime, SecondsFormat, Utc};

/// Current UTC instant formatted with millisecond precision.
pub fn now_iso_millis() -> String {
    format_millis(Utc::now())
}

/// Milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Format time as RFC3339 with exactly three fractional digits.
pub fn format_millis(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse RFC3339 string to UTC DateTime.
pub fn parse_utc(moment: &str) -> Result<DateTime<Utc>, Error> {
    DateTime::parse_from_rfc3339(moment)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| Error::FailToDateParse(moment.to_string()))
}

// region:    --- Error
#[derive(Debug)]
pub enum Error {
    FailToDateParse(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fmt, "{self:?}")
    }
}

impl std::error::Error for Error {}
// endregion: --- Error
