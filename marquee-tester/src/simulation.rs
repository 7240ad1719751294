//! Virtual-clock replay of a mounted countdown.

use marquee_core::{
    Clock, CountdownDriver, ManualClock, Phase, PhaseClock, ReservationWindow, SchedulerError,
    TickScheduler, Timestamp,
};
use serde::Serialize;

/// Counts timer traffic instead of running real timers.
#[derive(Debug, Default)]
pub struct RecordingScheduler {
    pub starts: u32,
    pub cancels: u32,
    pub max_active: u32,
    active: u32,
    next_id: u32,
}

impl RecordingScheduler {
    pub const fn active(&self) -> u32 {
        self.active
    }
}

impl TickScheduler for RecordingScheduler {
    type Handle = u32;

    fn start(&mut self, _period_ms: u32) -> Result<u32, SchedulerError> {
        self.next_id += 1;
        self.starts += 1;
        self.active += 1;
        self.max_active = self.max_active.max(self.active);
        Ok(self.next_id)
    }

    fn cancel(&mut self, _handle: u32) {
        self.cancels += 1;
        self.active = self.active.saturating_sub(1);
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TimelineEntry {
    pub at: String,
    pub at_ms: i64,
    pub phase: Phase,
    pub button_label: String,
    pub ticking: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Timeline {
    pub entries: Vec<TimelineEntry>,
    pub steps: u64,
    pub timer_starts: u32,
    pub timer_cancels: u32,
    pub max_concurrent_timers: u32,
    pub timers_left_running: u32,
    pub moved_backwards: bool,
}

/// Mount a driver at `from`, step the clock by `step_ms` for `duration_ms`,
/// then unmount. Records the first and last observation and every change of
/// phase or timer state in between.
pub fn simulate(
    clock: PhaseClock,
    window: ReservationWindow,
    from: Timestamp,
    duration_ms: i64,
    step_ms: i64,
) -> Timeline {
    let step_ms = step_ms.max(1);
    let offset = clock.offset();
    let manual = ManualClock::new(from);
    let mut driver = CountdownDriver::new(clock, RecordingScheduler::default(), window);
    let entry = |at: Timestamp, phase: Phase, label: &str, ticking: bool| TimelineEntry {
        at: at
            .to_local(offset)
            .map(|local| local.to_rfc3339())
            .unwrap_or_default(),
        at_ms: at.as_millis(),
        phase,
        button_label: label.to_string(),
        ticking,
    };

    let first = driver.mount(manual.now());
    let mut entries = vec![entry(manual.now(), first.phase, &first.button_label, driver.is_ticking())];
    let mut last_phase = first.phase;
    let mut last_ticking = driver.is_ticking();
    let mut moved_backwards = false;
    let mut steps = 0_u64;
    let end = from.saturating_add_ms(duration_ms.max(0));

    while manual.now() < end {
        manual.advance_ms(step_ms);
        steps += 1;
        let result = driver.observe(manual.now());
        let ticking = driver.is_ticking();
        moved_backwards |= result.phase < last_phase;
        if result.phase != last_phase || ticking != last_ticking {
            entries.push(entry(manual.now(), result.phase, &result.button_label, ticking));
            last_phase = result.phase;
            last_ticking = ticking;
        }
    }

    if let Some(result) = driver.last_result().cloned()
        && entries.last().map(|e| e.at_ms) != Some(manual.now().as_millis())
    {
        entries.push(entry(manual.now(), result.phase, &result.button_label, driver.is_ticking()));
    }
    driver.unmount();
    log::debug!("simulated {steps} steps, {} timeline entries", entries.len());

    let scheduler = driver.scheduler();
    Timeline {
        entries,
        steps,
        timer_starts: scheduler.starts,
        timer_cancels: scheduler.cancels,
        max_concurrent_timers: scheduler.max_active,
        timers_left_running: scheduler.active(),
        moved_backwards,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_core::constants::{MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE};
    use marquee_core::{LabelSet, offset_from_minutes};

    fn clock() -> PhaseClock {
        PhaseClock::new(offset_from_minutes(540).unwrap(), LabelSet::english(), 1_000)
    }

    #[test]
    fn full_sale_produces_each_phase_once() {
        // 2025-06-10T12:00:00+09:00
        let from = Timestamp::from_millis(1_749_524_400_000);
        let start = from.saturating_add_ms(2 * MS_PER_DAY);
        let window =
            ReservationWindow::from_timestamps(start, start.saturating_add_ms(6 * MS_PER_HOUR));
        let timeline = simulate(clock(), window, from, 3 * MS_PER_DAY, 5 * MS_PER_MINUTE);

        let phases: Vec<Phase> = timeline.entries.iter().map(|e| e.phase).collect();
        let mut distinct = phases.clone();
        distinct.dedup();
        assert_eq!(
            distinct,
            vec![Phase::Before, Phase::DMinus1, Phase::Today, Phase::Open, Phase::Ended]
        );
        assert_eq!(timeline.timer_starts, 1);
        assert_eq!(timeline.timer_cancels, 1);
        assert_eq!(timeline.max_concurrent_timers, 1);
        assert_eq!(timeline.timers_left_running, 0);
        assert!(!timeline.moved_backwards);
    }

    #[test]
    fn unmount_cancels_a_running_timer() {
        let from = Timestamp::from_millis(1_749_524_400_000);
        let start = from.saturating_add_ms(3 * MS_PER_HOUR);
        let window = ReservationWindow::from_timestamps(start, start.saturating_add_ms(MS_PER_DAY));
        let timeline = simulate(clock(), window, from, 10_000, 1_000);
        assert_eq!(timeline.entries.first().map(|e| e.phase), Some(Phase::Today));
        assert!(timeline.entries.iter().all(|e| e.ticking));
        assert_eq!(timeline.timer_starts, 1);
        assert_eq!(timeline.timers_left_running, 0);
        assert_eq!(timeline.steps, 10);
    }
}
