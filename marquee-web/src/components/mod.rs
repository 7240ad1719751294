pub mod countdown;
pub mod reserve_button;
