#![cfg(target_arch = "wasm32")]

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use marquee_core::{TimerSlot, TimerTransition};
use marquee_web::ReserveButton;
use marquee_web::components::reserve_button::ReserveButtonProps;
use marquee_web::interval::{BrowserScheduler, active_intervals};
use wasm_bindgen_test::*;
use yew::{AttrValue, Callback, Classes, Renderer};

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn browser_slot_starts_once_and_clears() {
    let ticks = Rc::new(Cell::new(0_u32));
    let on_tick = {
        let ticks = ticks.clone();
        Callback::from(move |()| ticks.set(ticks.get() + 1))
    };
    let mut slot = TimerSlot::new(BrowserScheduler::new(on_tick), 1_000);
    assert_eq!(slot.sync(true), TimerTransition::Started);
    assert_eq!(slot.sync(true), TimerTransition::Unchanged);
    assert_eq!(slot.sync(false), TimerTransition::Stopped);
    assert!(!slot.is_active());
}

#[wasm_bindgen_test]
fn browser_offset_matches_date() {
    let fallback = chrono::FixedOffset::east_opt(0).unwrap();
    let offset = marquee_web::dom::local_offset(fallback);
    let behind = js_sys::Date::new_0().get_timezone_offset() as i32;
    assert_eq!(offset.local_minus_utc(), -behind * 60);
}

fn mount_root(id: &str) -> web_sys::Element {
    let doc = marquee_web::dom::document().expect("document");
    if let Some(root) = doc.get_element_by_id(id) {
        root.set_inner_html("");
        return root;
    }
    let root = doc.create_element("div").expect("create root");
    root.set_id(id);
    doc.body()
        .expect("document body")
        .append_child(&root)
        .expect("append root");
    root
}

fn button_props(start_ms: i64, end_ms: i64) -> ReserveButtonProps {
    ReserveButtonProps {
        start_at: AttrValue::from(start_ms.to_string()),
        end_at: AttrValue::from(end_ms.to_string()),
        locale: AttrValue::from("en"),
        on_reserve: Callback::noop(),
        class: Classes::new(),
    }
}

async fn settle() {
    yew::platform::time::sleep(Duration::from_millis(50)).await;
}

#[wasm_bindgen_test]
async fn reserve_button_interval_follows_the_phase() {
    let baseline = active_intervals();
    let now = marquee_web::dom::now().as_millis();
    let root = mount_root("reserve-button-interval");

    // Opens in a minute: a live countdown.
    let mut handle = Renderer::<ReserveButton>::with_root_and_props(
        root.clone(),
        button_props(now + 60_000, now + 86_400_000),
    )
    .render();
    settle().await;
    assert_eq!(active_intervals(), baseline + 1);
    let phase = root
        .query_selector("[data-phase]")
        .expect("query phase")
        .and_then(|el| el.get_attribute("data-phase"))
        .unwrap_or_default();
    assert!(phase == "TODAY" || phase == "D_MINUS_1", "{phase}");

    // Window moved so the sale is already running.
    handle.update(button_props(now - 3_600_000, now + 86_400_000));
    settle().await;
    assert_eq!(active_intervals(), baseline);

    // Back to a countdown, then torn down while ticking.
    handle.update(button_props(now + 60_000, now + 86_400_000));
    settle().await;
    assert_eq!(active_intervals(), baseline + 1);

    handle.destroy();
    settle().await;
    assert_eq!(active_intervals(), baseline);
}
