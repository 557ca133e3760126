mod reservation;

pub use reservation::ReservationRepo;
