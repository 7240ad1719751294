//! Entry points for plain JavaScript host pages.

use marquee_core::Timestamp;
use thiserror::Error;
use wasm_bindgen::prelude::*;
use yew::Callback;

use crate::components::reserve_button::{ReserveButton, ReserveButtonProps};
use crate::{dom, settings};

#[derive(Debug, Error)]
pub enum HostError {
    #[error("no browser document is available")]
    NoDocument,
    #[error("mount root #{0} was not found")]
    RootNotFound(String),
    #[error("could not serialise countdown result: {0}")]
    Serialize(String),
}

impl From<HostError> for JsValue {
    fn from(err: HostError) -> Self {
        Self::from(js_sys::Error::new(&err.to_string()))
    }
}

/// Mount a live reserve button into the element with id `root_id`.
///
/// `on_reserve` is invoked with no arguments when the enabled button is
/// clicked.
///
/// # Errors
///
/// Returns an error if the document or the root element is missing.
#[wasm_bindgen(js_name = mountReserveButton)]
pub fn mount_reserve_button(
    root_id: &str,
    start_at: String,
    end_at: String,
    locale: Option<String>,
    on_reserve: Option<js_sys::Function>,
) -> Result<(), JsValue> {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    let document = dom::document().ok_or(HostError::NoDocument)?;
    let root = document
        .get_element_by_id(root_id)
        .ok_or_else(|| HostError::RootNotFound(root_id.to_string()))?;

    let on_reserve = Callback::from(move |()| {
        if let Some(callback) = on_reserve.as_ref()
            && let Err(err) = callback.call0(&JsValue::NULL)
        {
            log::error!("reserve callback failed: {}", dom::js_error_message(&err));
        }
    });
    let props = ReserveButtonProps {
        start_at: start_at.into(),
        end_at: end_at.into(),
        locale: locale.unwrap_or_default().into(),
        on_reserve,
        class: yew::Classes::new(),
    };
    yew::Renderer::<ReserveButton>::with_root_and_props(root, props).render();
    Ok(())
}

/// One-shot evaluation for hosts that render their own button.
///
/// Returns `{ phase, disabled, remainingMs, buttonLabel, helperText }`.
///
/// # Errors
///
/// Returns an error if the result cannot be converted to a JS object.
#[wasm_bindgen(js_name = evaluateReservation)]
pub fn evaluate_reservation(
    start_at: &str,
    end_at: &str,
    locale: Option<String>,
    now_ms: Option<f64>,
) -> Result<JsValue, JsValue> {
    let clock = settings::phase_clock(locale.as_deref().unwrap_or_default());
    #[allow(clippy::cast_possible_truncation)]
    let now = now_ms.map_or_else(dom::now, |ms| Timestamp::from_millis(ms as i64));
    let result = clock.evaluate_raw(now, start_at, end_at);
    serde_wasm_bindgen::to_value(&result)
        .map_err(|err| HostError::Serialize(err.to_string()).into())
}
