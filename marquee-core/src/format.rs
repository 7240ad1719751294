//! Countdown arithmetic and display formatting.

use chrono::FixedOffset;

use crate::constants::{MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE, MS_PER_SECOND};
use crate::timestamp::Timestamp;

/// A remaining duration split into calendar components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CountdownParts {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl CountdownParts {
    /// Floor-divides `remaining_ms`; negative input is treated as zero.
    #[must_use]
    pub const fn from_millis(remaining_ms: i64) -> Self {
        let mut rest = if remaining_ms < 0 { 0 } else { remaining_ms };
        let days = rest / MS_PER_DAY;
        rest -= days * MS_PER_DAY;
        let hours = rest / MS_PER_HOUR;
        rest -= hours * MS_PER_HOUR;
        let minutes = rest / MS_PER_MINUTE;
        rest -= minutes * MS_PER_MINUTE;
        let seconds = rest / MS_PER_SECOND;
        Self {
            days,
            hours,
            minutes,
            seconds,
        }
    }

    #[must_use]
    pub const fn total_hours(&self) -> i64 {
        self.days * 24 + self.hours
    }
}

/// `HH:MM:SS`, with hours counted in total rather than modulo a day.
#[must_use]
pub fn format_hms(remaining_ms: i64) -> String {
    let parts = CountdownParts::from_millis(remaining_ms);
    format!(
        "{:02}:{:02}:{:02}",
        parts.total_hours(),
        parts.minutes,
        parts.seconds
    )
}

/// Local wall-clock time of `at` as `HH:MM`.
#[must_use]
pub fn format_clock_time(at: Timestamp, offset: FixedOffset) -> String {
    format_local(at, offset, "%H:%M")
}

/// Formats `at` in `offset` with a chrono strftime pattern.
///
/// Instants outside chrono's range format as an empty string.
#[must_use]
pub fn format_local(at: Timestamp, offset: FixedOffset, pattern: &str) -> String {
    at.to_local(offset)
        .map(|local| local.format(pattern).to_string())
        .unwrap_or_default()
}
