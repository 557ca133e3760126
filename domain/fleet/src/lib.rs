//! Vehicle reservations booked for maintenance work.
pub mod exception;
pub mod model;
pub mod repository;
