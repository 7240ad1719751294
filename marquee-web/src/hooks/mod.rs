mod reservation_countdown;

pub use reservation_countdown::use_reservation_countdown;
