use marquee_core::{CountdownDriver, CountdownResult};
use yew::prelude::*;

use crate::dom;
use crate::interval::BrowserScheduler;
use crate::settings;

/// Live reservation state for a performance's sale window.
///
/// The result is recomputed on every render. A [`CountdownDriver`] owns the
/// 1 s interval: it is mounted with the component, observes every tick and
/// window change, and is unmounted on teardown, so the interval runs only
/// while the phase is `TODAY` or `D_MINUS_1`.
#[hook]
pub fn use_reservation_countdown(
    start_at: AttrValue,
    end_at: AttrValue,
    locale: AttrValue,
) -> CountdownResult {
    let clock = use_memo(locale, |locale| settings::phase_clock(locale));
    let window = {
        let clock = clock.clone();
        use_memo((start_at, end_at), move |(start, end)| {
            clock.parse_window(start, end)
        })
    };
    let now = use_state(dom::now);
    let result = clock.evaluate(*now, &window);

    let driver = {
        let now = now.setter();
        let clock = (*clock).clone();
        let window = *window;
        use_mut_ref(move || {
            let on_tick = Callback::from(move |()| now.set(dom::now()));
            CountdownDriver::new(clock, BrowserScheduler::new(on_tick), window)
        })
    };

    {
        let driver = driver.clone();
        let now = *now;
        use_effect_with((), move |()| {
            driver.borrow_mut().mount(now);
            move || {
                driver.borrow_mut().unmount();
            }
        });
    }

    {
        let now = now.setter();
        use_effect_with(window.clone(), move |_| {
            now.set(dom::now());
            || ()
        });
    }

    use_effect_with((window, *now), move |(window, now)| {
        driver.borrow_mut().set_window(**window, *now);
        || ()
    });

    result
}
