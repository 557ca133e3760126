use chrono::{DateTime, Utc};
use domain_fleet::model::vo::VehicleRequest;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::exception::{ensure_text, MaintenanceException, MaintenanceResult};

/// Free-text justification for pause, resume and cancel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Reason {
    pub reason: String,
}

/// `programar` payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleOrder {
    pub scheduled_at: DateTime<Utc>,
    #[serde(default)]
    pub responsible: Option<String>,
    #[serde(default)]
    pub team: Vec<String>,
    /// Lines to confirm, by id.
    #[serde(default)]
    pub confirm_materials: Vec<Uuid>,
    #[serde(default)]
    pub confirm_tools: Vec<Uuid>,
    #[serde(default)]
    pub confirm_technicians: Vec<Uuid>,
    #[serde(default)]
    pub vehicle_request: Option<VehicleRequest>,
}

/// `iniciar` payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct StartOrder {
    /// Crew on site.
    #[serde(default)]
    pub team_present: Vec<String>,
    /// Defaults to now.
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistUpdate {
    pub items: Vec<ChecklistMark>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistMark {
    pub item_id: Uuid,
    pub completed: bool,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MaterialUpdate {
    pub items: Vec<MaterialMark>,
}

/// Absent fields are left untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MaterialMark {
    pub line_id: Uuid,
    #[serde(default)]
    pub confirmed: Option<bool>,
    #[serde(default)]
    pub available: Option<bool>,
    #[serde(default)]
    pub consumed_quantity: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ToolUpdate {
    pub items: Vec<ToolMark>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ToolMark {
    pub line_id: Uuid,
    #[serde(default)]
    pub confirmed: Option<bool>,
    #[serde(default)]
    pub available: Option<bool>,
    #[serde(default)]
    pub used: Option<bool>,
    #[serde(default)]
    pub returned_condition: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TaskResolution {
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MaterialConsumption {
    pub line_id: Uuid,
    pub consumed_quantity: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TechnicianHours {
    pub line_id: Uuid,
    pub hours_worked: f64,
}

/// `finalizar` payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct FinishOrder {
    pub closure: Closure,
    /// Defaults to now.
    #[serde(default)]
    pub finished_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub materials: Vec<MaterialConsumption>,
    #[serde(default)]
    pub technicians: Vec<TechnicianHours>,
    /// Reading when the vehicle is returned.
    #[serde(default)]
    pub odometer_end: Option<f64>,
}

/// Closure narrative of a finished order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Closure {
    pub summary: String,
    #[serde(default)]
    pub problems_found: Option<String>,
    #[serde(default)]
    pub actions_taken: Option<String>,
    #[serde(default)]
    pub recommendations: Option<String>,
    #[serde(default)]
    pub observations: Option<String>,
    /// 1 to 5.
    #[serde(default)]
    pub quality_rating: Option<u8>,
}

impl Closure {
    pub fn validate(&self) -> MaintenanceResult<()> {
        ensure_text("closure.summary", &self.summary)?;
        match self.quality_rating {
            Some(rating) if !(1..=5).contains(&rating) => Err(MaintenanceException::validation(
                "closure.qualityRating",
                format!("expected 1 to 5, got {rating}"),
            )),
            _ => Ok(()),
        }
    }
}
