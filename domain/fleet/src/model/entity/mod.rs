pub mod reservation;

#[rustfmt::skip]
pub use reservation::{
    ReservationOwner,
    ReservationStatus,
    ReservationWindow,
    VehicleReservation,
};
