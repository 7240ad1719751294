use chrono::FixedOffset;
use marquee_core::Timestamp;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::{Document, Window};

/// Retrieve the global `window` object, if running in a browser.
#[must_use]
pub fn window() -> Option<Window> {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}

/// Retrieve the document object for DOM interactions.
#[must_use]
pub fn document() -> Option<Document> {
    window().and_then(|win| win.document())
}

/// Current wall-clock time.
#[must_use]
pub fn now() -> Timestamp {
    #[cfg(target_arch = "wasm32")]
    {
        #[allow(clippy::cast_possible_truncation)]
        let millis = js_sys::Date::now() as i64;
        Timestamp::from_millis(millis)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        use marquee_core::{Clock, SystemClock};
        SystemClock.now()
    }
}

/// The browser's current UTC offset, or `fallback` outside a browser.
#[must_use]
pub fn local_offset(fallback: FixedOffset) -> FixedOffset {
    #[cfg(target_arch = "wasm32")]
    {
        // getTimezoneOffset is minutes *behind* UTC, so KST reports -540.
        #[allow(clippy::cast_possible_truncation)]
        let behind = js_sys::Date::new_0().get_timezone_offset() as i32;
        marquee_core::offset_from_minutes(-behind).unwrap_or(fallback)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        fallback
    }
}

/// Primary language tag of the browser, e.g. `ko-KR`.
#[must_use]
pub fn browser_locale() -> Option<String> {
    window().and_then(|win| win.navigator().language())
}

/// Convert a JavaScript value into a readable string for error reporting.
#[must_use]
pub fn js_error_message(value: &JsValue) -> String {
    #[cfg(target_arch = "wasm32")]
    let from_error = value
        .dyn_ref::<js_sys::Error>()
        .map(|err| String::from(err.message()));
    #[cfg(not(target_arch = "wasm32"))]
    let from_error: Option<String> = None;
    value
        .as_string()
        .or(from_error)
        .unwrap_or_else(|| format!("{value:?}"))
}
