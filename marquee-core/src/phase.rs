//! Sale lifecycle phases and their derivation from a reservation window.

use std::fmt;

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use crate::constants::MS_PER_DAY;
use crate::timestamp::{ParsedTimestamp, Timestamp, parse_optional, parse_timestamp};

/// Discrete lifecycle state of a reservation window relative to now.
///
/// Variants are declared in the order a window moves through them, so the
/// derived `Ord` matches forward progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    Before,
    #[serde(rename = "D_MINUS_1")]
    DMinus1,
    Today,
    Open,
    Ended,
}

impl Phase {
    /// Phases whose label carries a running countdown and needs a 1 Hz refresh.
    #[must_use]
    pub const fn is_live(self) -> bool {
        matches!(self, Self::DMinus1 | Self::Today)
    }

    /// Whether the reserve action is permitted.
    #[must_use]
    pub const fn allows_reservation(self) -> bool {
        matches!(self, Self::Open)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Before => "BEFORE",
            Self::DMinus1 => "D_MINUS_1",
            Self::Today => "TODAY",
            Self::Open => "OPEN",
            Self::Ended => "ENDED",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The sale period for one performance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReservationWindow {
    pub start_at: ParsedTimestamp,
    pub end_at: ParsedTimestamp,
}

impl ReservationWindow {
    #[must_use]
    pub const fn new(start_at: ParsedTimestamp, end_at: ParsedTimestamp) -> Self {
        Self { start_at, end_at }
    }

    #[must_use]
    pub const fn from_timestamps(start_at: Timestamp, end_at: Timestamp) -> Self {
        Self::new(
            ParsedTimestamp::Valid(start_at),
            ParsedTimestamp::Valid(end_at),
        )
    }

    /// Window whose bounds are not yet known.
    #[must_use]
    pub const fn unknown() -> Self {
        Self::new(ParsedTimestamp::Invalid, ParsedTimestamp::Invalid)
    }

    #[must_use]
    pub fn parse(start_raw: &str, end_raw: &str, offset: FixedOffset) -> Self {
        Self::new(
            parse_timestamp(start_raw, offset),
            parse_timestamp(end_raw, offset),
        )
    }

    #[must_use]
    pub fn parse_optional(
        start_raw: Option<&str>,
        end_raw: Option<&str>,
        offset: FixedOffset,
    ) -> Self {
        Self::new(
            parse_optional(start_raw, offset),
            parse_optional(end_raw, offset),
        )
    }

    /// Both bounds, when both parsed.
    #[must_use]
    pub const fn bounds(&self) -> Option<(Timestamp, Timestamp)> {
        match (self.start_at, self.end_at) {
            (ParsedTimestamp::Valid(start), ParsedTimestamp::Valid(end)) => Some((start, end)),
            _ => None,
        }
    }
}

/// Phase plus the countdown target it was derived against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseReading {
    pub phase: Phase,
    pub remaining_ms: i64,
    /// Sale start, present whenever the window bounds are known.
    pub start_at: Option<Timestamp>,
}

impl PhaseReading {
    const fn unknown() -> Self {
        Self {
            phase: Phase::Before,
            remaining_ms: 0,
            start_at: None,
        }
    }
}

/// Derives the phase of `window` at `now`; first matching rule wins.
///
/// `TODAY` is decided by local calendar date before the 24 hour `D_MINUS_1`
/// threshold is considered.
#[must_use]
pub fn derive_phase(now: Timestamp, window: &ReservationWindow, offset: FixedOffset) -> PhaseReading {
    let Some((start_at, end_at)) = window.bounds() else {
        return PhaseReading::unknown();
    };

    let (phase, remaining_ms) = if now > end_at {
        (Phase::Ended, 0)
    } else if now >= start_at {
        (Phase::Open, 0)
    } else {
        let diff = now.millis_until(start_at);
        let phase = if now.local_day(offset) == start_at.local_day(offset) {
            Phase::Today
        } else if diff <= MS_PER_DAY {
            Phase::DMinus1
        } else {
            Phase::Before
        };
        (phase, diff)
    };

    PhaseReading {
        phase,
        remaining_ms,
        start_at: Some(start_at),
    }
}

/// Whole days left before `remaining_ms` elapses, rounded up.
#[must_use]
pub const fn days_remaining(remaining_ms: i64) -> i64 {
    if remaining_ms <= 0 {
        return 0;
    }
    let whole = remaining_ms / MS_PER_DAY;
    if remaining_ms % MS_PER_DAY == 0 {
        whole
    } else {
        whole + 1
    }
}
