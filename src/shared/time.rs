use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt;
use std::str::FromStr;

use crate::engine::errors::IndexError;

const SECOND_MS: i64 = 1_000;
const MINUTE_MS: i64 = 60 * SECOND_MS;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;

/// Renders epoch milliseconds as an ISO-8601 UTC instant with millisecond precision,
/// e.g. `2018-08-04T01:47:54.588Z`.
pub fn format_millis_utc(millis: i64) -> String {
    match DateTime::<Utc>::from_timestamp_millis(millis) {
        Some(dt) => dt.to_rfc3339_opts(SecondsFormat::Millis, true),
        // chrono covers roughly +/- 262,000 years; fall back to the raw value beyond that.
        None => millis.to_string(),
    }
}

/// Truncation granularity applied to ingested timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Granularity {
    /// Millisecond precision is preserved.
    #[default]
    None,
    Second,
    Minute,
    FifteenMinute,
    Hour,
    Day,
    /// Every timestamp collapses onto `i64::MIN`.
    All,
}

impl Granularity {
    fn period_millis(&self) -> Option<i64> {
        match self {
            Granularity::None => Some(1),
            Granularity::Second => Some(SECOND_MS),
            Granularity::Minute => Some(MINUTE_MS),
            Granularity::FifteenMinute => Some(15 * MINUTE_MS),
            Granularity::Hour => Some(HOUR_MS),
            Granularity::Day => Some(DAY_MS),
            Granularity::All => None,
        }
    }

    /// Start of the bucket containing `millis`, saturating at `i64::MIN`.
    pub fn bucket_start(&self, millis: i64) -> i64 {
        match self.period_millis() {
            Some(period) => millis.saturating_sub(millis.rem_euclid(period)),
            None => i64::MIN,
        }
    }

    /// Exclusive end of the bucket containing `millis`, saturating at `i64::MAX`.
    pub fn bucket_end(&self, millis: i64) -> i64 {
        match self.period_millis() {
            Some(period) => self.bucket_start(millis).saturating_add(period),
            None => i64::MAX,
        }
    }
}

impl FromStr for Granularity {
    type Err = IndexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Granularity::None),
            "second" => Ok(Granularity::Second),
            "minute" => Ok(Granularity::Minute),
            "fifteen_minute" => Ok(Granularity::FifteenMinute),
            "hour" => Ok(Granularity::Hour),
            "day" => Ok(Granularity::Day),
            "all" => Ok(Granularity::All),
            _ => Err(IndexError::InvalidGranularity(s.to_string())),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Granularity::None => "none",
            Granularity::Second => "second",
            Granularity::Minute => "minute",
            Granularity::FifteenMinute => "fifteen_minute",
            Granularity::Hour => "hour",
            Granularity::Day => "day",
            Granularity::All => "all",
        };
        f.write_str(name)
    }
}
