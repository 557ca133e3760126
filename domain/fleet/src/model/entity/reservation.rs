use std::fmt;

use architecture::AggregateRoot;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::exception::{FleetException, FleetResult};
use crate::model::vo::{validate_odometer, VehicleRequest};

/// # Reserva de veículo
/// A vehicle booked for the maintenance window of exactly one requester.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VehicleReservation {
    /// id
    pub id: Uuid,
    /// Booked vehicle.
    pub vehicle_id: Uuid,
    /// Programming or order holding the booking.
    pub owner: ReservationOwner,
    pub window: ReservationWindow,
    pub purpose: Option<String>,
    pub status: ReservationStatus,
    pub odometer_start: Option<f64>,
    pub odometer_end: Option<f64>,
    pub cancel_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AggregateRoot for VehicleReservation {}

/// Requester of a reservation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "tipo_solicitante", content = "id_solicitante")]
pub enum ReservationOwner {
    #[serde(rename = "programacao_os")]
    Programming(Uuid),
    #[serde(rename = "ordem_servico")]
    Order(Uuid),
}

impl ReservationOwner {
    pub fn id(&self) -> Uuid {
        match self {
            ReservationOwner::Programming(id) | ReservationOwner::Order(id) => *id,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReservationWindow {
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

impl ReservationWindow {
    pub fn new(starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> FleetResult<Self> {
        if ends_at <= starts_at {
            return Err(FleetException::InvalidWindow { starts_at, ends_at });
        }
        Ok(Self { starts_at, ends_at })
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ReservationStatus {
    /// # Ativa
    #[default]
    #[serde(rename = "ativa")]
    Active,
    /// # Finalizada
    /// The vehicle came back after the work was done.
    #[serde(rename = "finalizada")]
    Finished,
    /// # Cancelada
    #[serde(rename = "cancelada")]
    Cancelled,
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReservationStatus::Active => "ativa",
            ReservationStatus::Finished => "finalizada",
            ReservationStatus::Cancelled => "cancelada",
        })
    }
}

impl VehicleReservation {
    /// Books the requested vehicle for `owner`. No overlap detection is done.
    pub fn open(
        owner: ReservationOwner,
        request: &VehicleRequest,
        now: DateTime<Utc>,
    ) -> FleetResult<Self> {
        request.validate()?;
        Ok(Self {
            id: Uuid::new_v4(),
            vehicle_id: request.vehicle_id,
            owner,
            window: request.window()?,
            purpose: request.purpose.clone(),
            status: ReservationStatus::Active,
            odometer_start: request.odometer_start,
            odometer_end: None,
            cancel_reason: None,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn is_active(&self) -> bool {
        self.status == ReservationStatus::Active
    }

    /// Replaces vehicle, window and purpose of an active booking.
    pub fn reschedule(&mut self, request: &VehicleRequest, now: DateTime<Utc>) -> FleetResult<()> {
        self.ensure_active("rescheduled")?;
        request.validate()?;
        self.vehicle_id = request.vehicle_id;
        self.window = request.window()?;
        self.purpose = request.purpose.clone();
        if request.odometer_start.is_some() {
            self.odometer_start = request.odometer_start;
        }
        self.updated_at = now;
        Ok(())
    }

    pub fn cancel(&mut self, reason: Option<String>, now: DateTime<Utc>) -> FleetResult<()> {
        self.ensure_active("cancelled")?;
        self.status = ReservationStatus::Cancelled;
        self.cancel_reason = reason;
        self.updated_at = now;
        Ok(())
    }

    /// Closes the booking once the vehicle is returned.
    pub fn finalize(&mut self, odometer_end: Option<f64>, now: DateTime<Utc>) -> FleetResult<()> {
        self.ensure_active("finalized")?;
        self.check_return(odometer_end)?;
        self.status = ReservationStatus::Finished;
        self.odometer_end = odometer_end;
        self.updated_at = now;
        Ok(())
    }

    /// Rejects a return reading that is invalid or below the start reading.
    pub fn check_return(&self, odometer_end: Option<f64>) -> FleetResult<()> {
        let Some(end) = odometer_end else {
            return Ok(());
        };
        validate_odometer(end)?;
        match self.odometer_start {
            Some(start) if end < start => Err(FleetException::OdometerRegression { start, end }),
            _ => Ok(()),
        }
    }

    /// Re-points the booking to a new requester in place.
    pub fn transfer_to(&mut self, owner: ReservationOwner, now: DateTime<Utc>) {
        self.owner = owner;
        self.updated_at = now;
    }

    fn ensure_active(&self, action: &'static str) -> FleetResult<()> {
        if !self.is_active() {
            return Err(FleetException::ReservationNotActive {
                id: self.id,
                status: self.status,
                action,
            });
        }
        Ok(())
    }
}
