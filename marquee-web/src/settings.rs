//! Embedded countdown configuration, resolved for the current browser.

use marquee_core::{CountdownConfig, PhaseClock};
use once_cell::sync::Lazy;

use crate::dom;

static CONFIG: Lazy<CountdownConfig> = Lazy::new(CountdownConfig::default_config);

#[must_use]
pub fn config() -> &'static CountdownConfig {
    &CONFIG
}

/// Phase clock for `locale`, evaluated in the browser's own offset.
///
/// An empty locale falls back to the browser language, then the config default.
#[must_use]
pub fn phase_clock(locale: &str) -> PhaseClock {
    let config = config();
    let locale = if locale.is_empty() {
        dom::browser_locale().unwrap_or_else(|| config.default_locale.clone())
    } else {
        locale.to_string()
    };
    PhaseClock::from_config(config, &locale).with_offset(dom::local_offset(config.offset()))
}
