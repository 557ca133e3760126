use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::model::entity::ReservationStatus;

pub type FleetResult<T> = Result<T, FleetException>;

#[derive(Error, Debug)]
pub enum FleetException {
    #[error("Reservation window must end after it starts, got {starts_at} .. {ends_at}.")]
    InvalidWindow {
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
    },

    #[error("Odometer reading must be a non-negative number, got {value}.")]
    InvalidOdometer { value: f64 },

    #[error("Odometer end: {end} is lower than odometer start: {start}.")]
    OdometerRegression { start: f64, end: f64 },

    #[error("Reservation: {id} is {status}, only active reservations can be {action}.")]
    ReservationNotActive {
        id: Uuid,
        status: ReservationStatus,
        action: &'static str,
    },

    #[error("There is no reservation with id: {id}.")]
    ReservationNotFound { id: Uuid },
}

impl FleetException {
    /// Stable numeric code reported to callers.
    pub fn status(&self) -> u16 {
        match self {
            FleetException::InvalidWindow { .. } => 300,
            FleetException::InvalidOdometer { .. } => 301,
            FleetException::OdometerRegression { .. } => 302,
            FleetException::ReservationNotActive { .. } => 303,
            FleetException::ReservationNotFound { .. } => 304,
        }
    }
}
