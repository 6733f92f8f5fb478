use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer};

use crate::constants::{DISPLAY_DATETIME_FORMAT, MILLIS_PER_HOUR};

/// Whole hours between two instants.
///
/// The millisecond difference is divided by one hour and rounded down, so
/// 10:00 -> 10:59 is 0 hours and 10:00 -> 11:00 is 1 hour.
pub fn hours_between(begin: NaiveDateTime, end: NaiveDateTime) -> i64 {
    (end - begin).num_milliseconds().div_euclid(MILLIS_PER_HOUR)
}

/// Formats an instant as `dd/MM/yy HH:mm`.
pub fn format_datetime(value: NaiveDateTime) -> String {
    value.format(DISPLAY_DATETIME_FORMAT).to_string()
}

/// Parses either an RFC 3339 timestamp (converted to UTC) or a naive
/// `YYYY-MM-DDTHH:MM:SS` timestamp.
pub fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

/// Serde helper accepting the timestamp shapes browsers send.
pub fn deserialize_datetime<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_datetime(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid date/time '{}'", raw)))
}
