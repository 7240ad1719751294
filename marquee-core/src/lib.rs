//! Marquee reservation clock
//!
//! Platform-agnostic core for the ticket-sale countdown: parses a
//! performance's reservation window, derives the sale phase at a given
//! instant, renders button copy, and manages the single 1 Hz timer that keeps
//! a live countdown fresh. This crate has no UI or browser dependencies.

pub mod clock;
pub mod config;
pub mod constants;
pub mod countdown;
pub mod driver;
pub mod format;
pub mod labels;
pub mod phase;
pub mod timestamp;

// Re-export commonly used types
#[cfg(any(test, feature = "test-seams"))]
pub use clock::ManualClock;
pub use clock::{Clock, SystemClock};
pub use config::{ConfigError, CountdownConfig};
pub use countdown::{CountdownResult, PhaseClock, evaluate};
pub use driver::{CountdownDriver, SchedulerError, TickScheduler, TimerSlot, TimerTransition};
pub use format::{CountdownParts, format_hms};
pub use labels::LabelSet;
pub use phase::{Phase, PhaseReading, ReservationWindow, derive_phase};
pub use timestamp::{ParsedTimestamp, Timestamp, offset_from_minutes, parse_timestamp};
