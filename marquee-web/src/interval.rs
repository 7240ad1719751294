//! `window.setInterval` as a [`TickScheduler`].

use std::cell::Cell;

use marquee_core::{SchedulerError, TickScheduler};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::Closure;
use yew::Callback;

#[cfg(target_arch = "wasm32")]
use crate::dom;

thread_local! {
    static ACTIVE_INTERVALS: Cell<usize> = const { Cell::new(0) };
}

/// Number of intervals started by [`BrowserScheduler`] and not yet cleared.
#[must_use]
pub fn active_intervals() -> usize {
    ACTIVE_INTERVALS.with(Cell::get)
}

/// Fires `on_tick` from a browser interval.
#[derive(Clone)]
pub struct BrowserScheduler {
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    on_tick: Callback<()>,
}

impl BrowserScheduler {
    #[must_use]
    pub const fn new(on_tick: Callback<()>) -> Self {
        Self { on_tick }
    }
}

/// A running interval; dropping it clears the interval and frees the closure.
pub struct IntervalHandle {
    #[cfg(target_arch = "wasm32")]
    id: i32,
    #[cfg(target_arch = "wasm32")]
    _closure: Closure<dyn FnMut()>,
}

#[cfg(target_arch = "wasm32")]
impl Drop for IntervalHandle {
    fn drop(&mut self) {
        if let Some(win) = dom::window() {
            win.clear_interval_with_handle(self.id);
        }
        ACTIVE_INTERVALS.with(|count| count.set(count.get().saturating_sub(1)));
    }
}

impl TickScheduler for BrowserScheduler {
    type Handle = IntervalHandle;

    #[cfg(target_arch = "wasm32")]
    fn start(&mut self, period_ms: u32) -> Result<IntervalHandle, SchedulerError> {
        let win = dom::window().ok_or(SchedulerError::Unavailable)?;
        let timeout = i32::try_from(period_ms)
            .map_err(|_| SchedulerError::Rejected(format!("period {period_ms} ms is too long")))?;
        let on_tick = self.on_tick.clone();
        let closure = Closure::wrap(Box::new(move || on_tick.emit(())) as Box<dyn FnMut()>);
        let id = win
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                timeout,
            )
            .map_err(|err| SchedulerError::Rejected(dom::js_error_message(&err)))?;
        ACTIVE_INTERVALS.with(|count| count.set(count.get() + 1));
        Ok(IntervalHandle {
            id,
            _closure: closure,
        })
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn start(&mut self, _period_ms: u32) -> Result<IntervalHandle, SchedulerError> {
        Err(SchedulerError::Unavailable)
    }

    fn cancel(&mut self, handle: IntervalHandle) {
        drop(handle);
    }
}
