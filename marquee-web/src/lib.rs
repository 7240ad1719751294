#![forbid(unsafe_code)]

pub mod components;
pub mod dom;
pub mod hooks;
pub mod interval;
#[cfg(target_arch = "wasm32")]
pub mod host;
pub mod settings;

pub use components::countdown::Countdown;
pub use components::reserve_button::{ReservationStatus, ReserveButton};
pub use hooks::use_reservation_countdown;
