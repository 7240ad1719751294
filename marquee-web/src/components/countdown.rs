use marquee_core::format_hms;
use yew::prelude::*;

#[derive(Properties, PartialEq, Eq, Clone)]
pub struct CountdownProps {
    pub millis: i64,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub label: Option<AttrValue>,
}

#[function_component(Countdown)]
pub fn countdown(props: &CountdownProps) -> Html {
    let class = classes!("countdown", "font-mono", props.class.clone());
    let formatted = format_hms(props.millis);
    html! {
        <div class={class} role="timer" aria-live="polite">
            { props.label.as_ref().map(|label| html! { <span class="me-2">{ label.clone() }</span> }).unwrap_or_default() }
            <span aria-label={format!("{formatted} remaining")}>{ formatted }</span>
        </div>
    }
}
