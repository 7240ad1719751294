//! Timestamps and lenient parsing of host-supplied date strings.
//!
//! Performance detail payloads arrive with `startDate`/`endDate` fields that
//! may be missing, empty, or in one of several ISO-8601 shapes. Parsing never
//! fails loudly: anything unrecognised becomes [`ParsedTimestamp::Invalid`]
//! and the phase clock treats it as "not yet determined".

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::constants::MS_PER_DAY;

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M%:z", "%Y-%m-%d %H:%M:%S%.f%:z"];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Milliseconds since the Unix epoch.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    #[must_use]
    pub const fn as_millis(self) -> i64 {
        self.0
    }

    #[must_use]
    pub fn from_datetime<Tz: TimeZone>(value: &DateTime<Tz>) -> Self {
        Self(value.timestamp_millis())
    }

    #[must_use]
    pub const fn saturating_add_ms(self, delta: i64) -> Self {
        Self(self.0.saturating_add(delta))
    }

    /// Milliseconds from `self` until `later`, clamped at zero.
    #[must_use]
    pub const fn millis_until(self, later: Self) -> i64 {
        let diff = later.0.saturating_sub(self.0);
        if diff < 0 { 0 } else { diff }
    }

    /// Ordinal of the local calendar day this instant falls on.
    ///
    /// Two timestamps share a calendar date in `offset` exactly when their
    /// ordinals are equal.
    #[must_use]
    pub fn local_day(self, offset: FixedOffset) -> i64 {
        let shift = i64::from(offset.local_minus_utc()) * 1_000;
        self.0.saturating_add(shift).div_euclid(MS_PER_DAY)
    }

    /// Converts to a zoned date-time, or `None` when outside chrono's range.
    #[must_use]
    pub fn to_local(self, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
        DateTime::from_timestamp_millis(self.0).map(|utc| utc.with_timezone(&offset))
    }
}

/// Outcome of interpreting a raw timestamp value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParsedTimestamp {
    Valid(Timestamp),
    Invalid,
}

impl ParsedTimestamp {
    #[must_use]
    pub const fn valid(self) -> Option<Timestamp> {
        match self {
            Self::Valid(ts) => Some(ts),
            Self::Invalid => None,
        }
    }

    #[must_use]
    pub const fn is_valid(self) -> bool {
        matches!(self, Self::Valid(_))
    }
}

impl From<Timestamp> for ParsedTimestamp {
    fn from(value: Timestamp) -> Self {
        Self::Valid(value)
    }
}

impl From<Option<Timestamp>> for ParsedTimestamp {
    fn from(value: Option<Timestamp>) -> Self {
        value.map_or(Self::Invalid, Self::Valid)
    }
}

/// Builds a chrono offset from whole minutes east of UTC.
#[must_use]
pub fn offset_from_minutes(minutes: i32) -> Option<FixedOffset> {
    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
}

/// Parses a timestamp string, reading offset-less values in `offset`.
///
/// Accepted shapes, tried in order:
/// - RFC 3339 (`2025-03-01T20:00:00+09:00`, `...Z`) and minute-precision offsets
/// - naive date-times with `T` or space separators, optional seconds and fraction
/// - bare dates (`2025-03-01`), read as local midnight
/// - integers, read as epoch milliseconds
#[must_use]
pub fn parse_timestamp(raw: &str, offset: FixedOffset) -> ParsedTimestamp {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return ParsedTimestamp::Invalid;
    }

    if let Ok(zoned) = DateTime::parse_from_rfc3339(trimmed) {
        return Timestamp::from_datetime(&zoned).into();
    }
    for format in OFFSET_FORMATS {
        if let Ok(zoned) = DateTime::parse_from_str(trimmed, format) {
            return Timestamp::from_datetime(&zoned).into();
        }
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return from_naive(&naive, offset);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map_or(ParsedTimestamp::Invalid, |naive| from_naive(&naive, offset));
    }
    trimmed
        .parse::<i64>()
        .map_or(ParsedTimestamp::Invalid, |millis| {
            Timestamp::from_millis(millis).into()
        })
}

/// Parses an optional value; `None` is treated like an empty string.
#[must_use]
pub fn parse_optional(raw: Option<&str>, offset: FixedOffset) -> ParsedTimestamp {
    raw.map_or(ParsedTimestamp::Invalid, |value| {
        parse_timestamp(value, offset)
    })
}

fn from_naive(naive: &NaiveDateTime, offset: FixedOffset) -> ParsedTimestamp {
    offset
        .from_local_datetime(naive)
        .single()
        .map(|zoned| Timestamp::from_datetime(&zoned))
        .into()
}

/// Offset expressed in whole minutes east of UTC, for logs and reports.
#[must_use]
pub fn offset_minutes(offset: FixedOffset) -> i32 {
    offset.local_minus_utc() / 60
}
