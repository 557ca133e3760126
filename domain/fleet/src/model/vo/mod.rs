use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::exception::{FleetException, FleetResult};
use crate::model::entity::ReservationWindow;

/// Vehicle booking parameters carried by a programming or an order plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRequest {
    pub vehicle_id: Uuid,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    #[serde(default)]
    pub purpose: Option<String>,
    #[serde(default)]
    pub odometer_start: Option<f64>,
}

impl VehicleRequest {
    pub fn window(&self) -> FleetResult<ReservationWindow> {
        ReservationWindow::new(self.starts_at, self.ends_at)
    }

    pub fn validate(&self) -> FleetResult<()> {
        self.window()?;
        if let Some(value) = self.odometer_start {
            validate_odometer(value)?;
        }
        Ok(())
    }
}

pub(crate) fn validate_odometer(value: f64) -> FleetResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(FleetException::InvalidOdometer { value });
    }
    Ok(())
}
