//! Timestamp utilities

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Format a timestamp the way it is stored and serialized (RFC 3339, millisecond precision)
pub fn to_storage(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Current time in storage format
pub fn now_string() -> String {
    to_storage(now())
}

/// Parse a workout date as sent by a client form
///
/// Accepts a full RFC 3339 timestamp or a bare `YYYY-MM-DD` date (taken as midnight UTC).
/// Returns `None` for empty or unparseable input.
pub fn parse_workout_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
