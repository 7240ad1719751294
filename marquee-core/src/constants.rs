//! Time arithmetic and scheduling constants for the reservation phase clock.

pub const MS_PER_SECOND: i64 = 1_000;
pub const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
pub const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
pub const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Refresh cadence of the live countdown.
pub const DEFAULT_TICK_MS: u32 = 1_000;

/// Korea Standard Time, the ticketing market the labels are written for.
pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = 9 * 60;

/// Real-world offsets stay within UTC-12:00..=UTC+14:00.
pub const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;

pub const DEFAULT_LOCALE: &str = "ko";
