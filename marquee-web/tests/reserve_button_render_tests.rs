use futures::executor::block_on;
use marquee_core::{CountdownResult, Phase};
use marquee_web::components::reserve_button::{ReservationStatusProps, ReserveButtonProps};
use marquee_web::{ReservationStatus, ReserveButton};
use yew::{AttrValue, Callback, Classes, LocalServerRenderer};

fn render_status(result: CountdownResult) -> String {
    let props = ReservationStatusProps {
        result,
        on_reserve: Callback::noop(),
        class: Classes::new(),
    };
    block_on(LocalServerRenderer::<ReservationStatus>::with_props(props).render())
}

fn render_button(start_at: &str, end_at: &str, locale: &str) -> String {
    let props = ReserveButtonProps {
        start_at: AttrValue::from(start_at.to_string()),
        end_at: AttrValue::from(end_at.to_string()),
        locale: AttrValue::from(locale.to_string()),
        on_reserve: Callback::noop(),
        class: Classes::new(),
    };
    block_on(LocalServerRenderer::<ReserveButton>::with_props(props).render())
}

#[test]
fn open_status_renders_an_enabled_button() {
    let html = render_status(CountdownResult {
        phase: Phase::Open,
        disabled: false,
        remaining_ms: 0,
        button_label: "예매하기".to_string(),
        helper_text: None,
    });
    assert!(html.contains("data-phase=\"OPEN\""));
    assert!(html.contains("aria-disabled=\"false\""));
    assert!(html.contains("예매하기"));
    assert!(!html.contains("reservation-status__helper"));
}

#[test]
fn live_status_renders_a_timer_with_helper_label() {
    let html = render_status(CountdownResult {
        phase: Phase::Today,
        disabled: true,
        remaining_ms: 5_025_000,
        button_label: "01:23:45".to_string(),
        helper_text: Some("Opens today".to_string()),
    });
    assert!(html.contains("data-phase=\"TODAY\""));
    assert!(html.contains("aria-disabled=\"true\""));
    assert!(html.contains("role=\"timer\""));
    assert!(html.contains("Opens today"));
}

#[test]
fn ended_status_shows_the_closed_helper() {
    let html = render_status(CountdownResult {
        phase: Phase::Ended,
        disabled: true,
        remaining_ms: 0,
        button_label: "Reservation closed".to_string(),
        helper_text: Some("The reservation period has ended".to_string()),
    });
    assert!(html.contains("reservation-status__helper"));
    assert!(html.contains("The reservation period has ended"));
    assert!(!html.contains("role=\"timer\""));
}

#[test]
fn button_for_a_past_window_is_closed() {
    let html = render_button("2000-01-01T00:00:00Z", "2000-02-01T00:00:00Z", "ko");
    assert!(html.contains("data-phase=\"ENDED\""));
    assert!(html.contains("예매종료"));
}

#[test]
fn button_for_a_running_window_is_open() {
    let html = render_button("2000-01-01T00:00:00Z", "2999-01-01T00:00:00Z", "en");
    assert!(html.contains("data-phase=\"OPEN\""));
    assert!(html.contains("Reserve"));
    assert!(html.contains("aria-disabled=\"false\""));
}

#[test]
fn button_for_a_far_future_window_counts_days() {
    let html = render_button("2999-01-01T00:00:00Z", "2999-02-01T00:00:00Z", "en");
    assert!(html.contains("data-phase=\"BEFORE\""));
    assert!(html.contains("D-"));
    assert!(html.contains("Opens 2999-01-01"));
}

#[test]
fn button_without_dates_fails_safe() {
    let html = render_button("", "", "");
    assert!(html.contains("data-phase=\"BEFORE\""));
    assert!(html.contains("오픈 예정"));
    assert!(html.contains("aria-disabled=\"true\""));
}
