use marquee_core::CountdownResult;
use yew::prelude::*;

use crate::components::countdown::Countdown;
use crate::hooks::use_reservation_countdown;

#[derive(Properties, PartialEq, Clone)]
pub struct ReservationStatusProps {
    pub result: CountdownResult,
    #[prop_or_default]
    pub on_reserve: Callback<()>,
    #[prop_or_default]
    pub class: Classes,
}

/// Renders an already evaluated [`CountdownResult`].
#[function_component(ReservationStatus)]
pub fn reservation_status(props: &ReservationStatusProps) -> Html {
    let result = &props.result;
    let onclick = {
        let disabled = result.disabled;
        let on_reserve = props.on_reserve.clone();
        Callback::from(move |_: MouseEvent| {
            if !disabled {
                on_reserve.emit(());
            }
        })
    };
    let class = classes!("reservation-status", props.class.clone());
    let button_class = classes!(
        "btn",
        "btn-block",
        if result.disabled { "btn-neutral" } else { "btn-primary" }
    );
    let helper = if result.phase.is_live() {
        html! {
            <Countdown
                class="reservation-status__countdown"
                millis={result.remaining_ms}
                label={result.helper_text.clone().map(AttrValue::from)}
            />
        }
    } else {
        result
            .helper_text
            .as_ref()
            .map(|text| html! { <p class="reservation-status__helper">{ text.clone() }</p> })
            .unwrap_or_default()
    };
    html! {
        <div class={class} data-phase={result.phase.as_str()}>
            <button
                type="button"
                class={button_class}
                disabled={result.disabled}
                aria-disabled={if result.disabled { "true" } else { "false" }}
                {onclick}
            >
                { result.button_label.clone() }
            </button>
            { helper }
        </div>
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct ReserveButtonProps {
    pub start_at: AttrValue,
    pub end_at: AttrValue,
    /// Copy locale; empty means "browser language".
    #[prop_or_default]
    pub locale: AttrValue,
    #[prop_or_default]
    pub on_reserve: Callback<()>,
    #[prop_or_default]
    pub class: Classes,
}

/// Reserve button bound to a performance's sale window.
#[function_component(ReserveButton)]
pub fn reserve_button(props: &ReserveButtonProps) -> Html {
    let result = use_reservation_countdown(
        props.start_at.clone(),
        props.end_at.clone(),
        props.locale.clone(),
    );
    html! {
        <ReservationStatus
            {result}
            on_reserve={props.on_reserve.clone()}
            class={props.class.clone()}
        />
    }
}
