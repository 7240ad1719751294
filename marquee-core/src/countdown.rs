//! The reservation phase clock: a pure evaluator from `(now, window)` to the
//! button state a host page renders.
//!
//! Evaluation is total. Unknown window bounds produce a disabled `BEFORE`
//! result instead of an error so a page can render before the performance
//! detail payload is complete.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use crate::config::CountdownConfig;
use crate::constants::DEFAULT_LOCALE;
use crate::format::{format_clock_time, format_hms, format_local};
use crate::labels::{LabelSet, render_template};
use crate::phase::{Phase, PhaseReading, ReservationWindow, days_remaining, derive_phase};
use crate::timestamp::{ParsedTimestamp, Timestamp};

/// Everything a host needs to render the reserve button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountdownResult {
    pub phase: Phase,
    pub disabled: bool,
    pub remaining_ms: i64,
    pub button_label: String,
    pub helper_text: Option<String>,
}

/// Evaluator bound to a local offset and a locale's copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseClock {
    offset: FixedOffset,
    labels: LabelSet,
    tick_ms: u32,
}

impl PhaseClock {
    #[must_use]
    pub const fn new(offset: FixedOffset, labels: LabelSet, tick_ms: u32) -> Self {
        Self {
            offset,
            labels,
            tick_ms,
        }
    }

    #[must_use]
    pub fn from_config(config: &CountdownConfig, locale: &str) -> Self {
        Self::new(config.offset(), config.labels_for(locale), config.tick_ms)
    }

    /// Same copy and cadence, evaluated in a different local offset.
    #[must_use]
    pub fn with_offset(mut self, offset: FixedOffset) -> Self {
        self.offset = offset;
        self
    }

    #[must_use]
    pub const fn offset(&self) -> FixedOffset {
        self.offset
    }

    #[must_use]
    pub const fn tick_ms(&self) -> u32 {
        self.tick_ms
    }

    #[must_use]
    pub const fn labels(&self) -> &LabelSet {
        &self.labels
    }

    /// Parses raw bounds in this clock's local offset.
    #[must_use]
    pub fn parse_window(&self, start_raw: &str, end_raw: &str) -> ReservationWindow {
        ReservationWindow::parse(start_raw, end_raw, self.offset)
    }

    #[must_use]
    pub fn evaluate(&self, now: Timestamp, window: &ReservationWindow) -> CountdownResult {
        let reading = derive_phase(now, window, self.offset);
        let (button_label, helper_text) = self.copy_for(&reading);
        CountdownResult {
            phase: reading.phase,
            disabled: !reading.phase.allows_reservation(),
            remaining_ms: reading.remaining_ms,
            button_label,
            helper_text,
        }
    }

    #[must_use]
    pub fn evaluate_raw(&self, now: Timestamp, start_raw: &str, end_raw: &str) -> CountdownResult {
        self.evaluate(now, &self.parse_window(start_raw, end_raw))
    }

    fn copy_for(&self, reading: &PhaseReading) -> (String, Option<String>) {
        let labels = &self.labels;
        let countdown = format_hms(reading.remaining_ms);
        match (reading.phase, reading.start_at) {
            (Phase::Ended, _) => (labels.closed.clone(), Some(labels.closed_helper.clone())),
            (Phase::Open, _) => (labels.reserve.clone(), None),
            (Phase::Today, _) => (
                render_template(&labels.today, &BTreeMap::from([("countdown", countdown)])),
                Some(labels.today_helper.clone()),
            ),
            (Phase::DMinus1, start_at) => {
                let time = start_at
                    .map(|at| format_clock_time(at, self.offset))
                    .unwrap_or_default();
                let args = BTreeMap::from([("time", time), ("countdown", countdown)]);
                (
                    render_template(&labels.tomorrow, &args),
                    Some(labels.d_minus_one_helper.clone()),
                )
            }
            (Phase::Before, Some(start_at)) => {
                let days = days_remaining(reading.remaining_ms);
                let date = format_local(start_at, self.offset, &labels.date_format);
                let helper =
                    render_template(&labels.scheduled_helper, &BTreeMap::from([("date", date)]));
                if days > 1 {
                    let label =
                        render_template(&labels.d_day, &BTreeMap::from([("days", days.to_string())]));
                    (label, Some(helper))
                } else {
                    (labels.scheduled.clone(), Some(helper))
                }
            }
            (Phase::Before, None) => (labels.scheduled.clone(), None),
        }
    }
}

impl Default for PhaseClock {
    fn default() -> Self {
        Self::from_config(&CountdownConfig::default_config(), DEFAULT_LOCALE)
    }
}

fn default_clock() -> &'static PhaseClock {
    static CLOCK: OnceLock<PhaseClock> = OnceLock::new();
    CLOCK.get_or_init(PhaseClock::default)
}

/// Evaluates with the embedded configuration and default locale.
#[must_use]
pub fn evaluate(now: Timestamp, start_at: ParsedTimestamp, end_at: ParsedTimestamp) -> CountdownResult {
    default_clock().evaluate(now, &ReservationWindow::new(start_at, end_at))
}
