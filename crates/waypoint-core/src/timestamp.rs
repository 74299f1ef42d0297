//! Lenient timestamp parsing for waypoint files.
//!
//! Files written by earlier versions of the manager carry naive local
//! timestamps (`2024-05-01T12:00:00.123456`, no offset). Those are read as
//! local time; anything with an offset is read as RFC 3339. Output is always
//! RFC 3339 UTC.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use serde::{de::Error as _, Deserialize, Deserializer};

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse an RFC 3339 or naive ISO-8601 timestamp.
pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())?;
    let utc = Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        // Skipped by a DST jump: no local reading exists, keep the wall clock.
        .unwrap_or_else(|| naive.and_utc());
    Some(utc)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).ok_or_else(|| D::Error::custom(format!("invalid timestamp: {raw}")))
}

pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) => parse(&raw)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid timestamp: {raw}"))),
        None => Ok(None),
    }
}
