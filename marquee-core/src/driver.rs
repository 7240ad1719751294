//! Timer lifecycle for the live countdown.
//!
//! [`TimerSlot`] owns at most one periodic timer and only ever replaces or
//! clears it. [`CountdownDriver`] pairs a slot with a [`PhaseClock`] and
//! keeps the timer running exactly while the derived phase is live.

use thiserror::Error;

use crate::countdown::{CountdownResult, PhaseClock};
use crate::phase::{Phase, ReservationWindow};
use crate::timestamp::Timestamp;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("no timer host is available")]
    Unavailable,
    #[error("timer host rejected the interval: {0}")]
    Rejected(String),
}

/// Host facility that runs a periodic callback until cancelled.
///
/// The callback itself is wired up by the implementation; the slot only
/// decides when a timer should exist.
pub trait TickScheduler {
    type Handle;

    /// Start a timer firing every `period_ms`.
    ///
    /// # Errors
    ///
    /// Returns an error if the host cannot create the timer.
    fn start(&mut self, period_ms: u32) -> Result<Self::Handle, SchedulerError>;

    fn cancel(&mut self, handle: Self::Handle);
}

/// What a sync did to the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTransition {
    Started,
    Stopped,
    Unchanged,
    Failed,
}

/// Single owned timer handle: replace-or-clear, never two at once.
pub struct TimerSlot<S: TickScheduler> {
    scheduler: S,
    handle: Option<S::Handle>,
    period_ms: u32,
}

impl<S: TickScheduler> TimerSlot<S> {
    pub const fn new(scheduler: S, period_ms: u32) -> Self {
        Self {
            scheduler,
            handle: None,
            period_ms,
        }
    }

    pub const fn is_active(&self) -> bool {
        self.handle.is_some()
    }

    pub const fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Start when `live` and idle, stop when not `live` and running.
    pub fn sync(&mut self, live: bool) -> TimerTransition {
        match (live, self.handle.is_some()) {
            (true, false) => match self.scheduler.start(self.period_ms) {
                Ok(handle) => {
                    self.handle = Some(handle);
                    log::debug!("countdown timer started ({} ms)", self.period_ms);
                    TimerTransition::Started
                }
                Err(err) => {
                    log::warn!("countdown timer could not start: {err}");
                    TimerTransition::Failed
                }
            },
            (false, true) => self.clear(),
            _ => TimerTransition::Unchanged,
        }
    }

    /// Cancel the timer if one is running; a no-op otherwise.
    pub fn clear(&mut self) -> TimerTransition {
        match self.handle.take() {
            Some(handle) => {
                self.scheduler.cancel(handle);
                log::debug!("countdown timer stopped");
                TimerTransition::Stopped
            }
            None => TimerTransition::Unchanged,
        }
    }
}

impl<S: TickScheduler> Drop for TimerSlot<S> {
    fn drop(&mut self) {
        self.clear();
    }
}

/// Mounted instance of the phase clock for one reservation window.
pub struct CountdownDriver<S: TickScheduler> {
    clock: PhaseClock,
    window: ReservationWindow,
    slot: TimerSlot<S>,
    mounted: bool,
    last: Option<CountdownResult>,
}

impl<S: TickScheduler> CountdownDriver<S> {
    pub fn new(clock: PhaseClock, scheduler: S, window: ReservationWindow) -> Self {
        let period_ms = clock.tick_ms();
        Self {
            clock,
            window,
            slot: TimerSlot::new(scheduler, period_ms),
            mounted: false,
            last: None,
        }
    }

    pub fn mount(&mut self, now: Timestamp) -> CountdownResult {
        self.mounted = true;
        self.observe(now)
    }

    /// Re-evaluate at `now` and bring the timer in line with the phase.
    ///
    /// Called on mount, on every tick, and whenever inputs change.
    pub fn observe(&mut self, now: Timestamp) -> CountdownResult {
        let result = self.clock.evaluate(now, &self.window);
        if let Some(previous) = self.last.as_ref() {
            if result.phase < previous.phase {
                log::warn!(
                    "reservation phase moved backwards {} -> {}; clock regressed?",
                    previous.phase,
                    result.phase
                );
            } else if result.phase != previous.phase {
                log::debug!("reservation phase {} -> {}", previous.phase, result.phase);
            }
        }
        if self.mounted {
            self.slot.sync(result.phase.is_live());
        }
        self.last = Some(result.clone());
        result
    }

    /// Swap in new window bounds and re-evaluate.
    pub fn set_window(&mut self, window: ReservationWindow, now: Timestamp) -> CountdownResult {
        if window != self.window {
            self.window = window;
            self.last = None;
        }
        self.observe(now)
    }

    /// Tear down: the timer is always cleared and no tick restarts it.
    pub fn unmount(&mut self) -> TimerTransition {
        self.mounted = false;
        self.slot.clear()
    }

    pub const fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub const fn is_ticking(&self) -> bool {
        self.slot.is_active()
    }

    pub fn phase(&self) -> Option<Phase> {
        self.last.as_ref().map(|result| result.phase)
    }

    pub const fn last_result(&self) -> Option<&CountdownResult> {
        self.last.as_ref()
    }

    pub const fn window(&self) -> &ReservationWindow {
        &self.window
    }

    pub const fn scheduler(&self) -> &S {
        self.slot.scheduler()
    }
}
