//! Lenient parsing of stored timestamps.
//!
//! Records are written as `YYYY-MM-DDTHH:MM:SS` local time, but collections
//! saved by the web front-end carry UTC instants (`...T08:30:00.000Z`),
//! `datetime-local` values without seconds, or bare dates.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Deserializer};

const NAIVE_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// Parse any accepted timestamp shape into local time, whole seconds.
///
/// Instants with an offset are converted to local time; bare dates map to
/// midnight.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    let parsed = DateTime::parse_from_rfc3339(raw)
        .map(|instant| instant.with_timezone(&Local).naive_local())
        .ok()
        .or_else(|| {
            NAIVE_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })?;
    Some(parsed.with_nanosecond(0).unwrap_or(parsed))
}

/// `deserialize_with` target for persisted timestamp fields.
pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("unrecognized timestamp: {}", raw)))
}
