use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::exception::{ensure_non_negative, ensure_text, MaintenanceResult};

/// Materials, tools and technician time planned for a piece of work.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ResourcePlan {
    #[serde(default)]
    pub materials: Vec<MaterialLine>,
    #[serde(default)]
    pub tools: Vec<ToolLine>,
    #[serde(default)]
    pub technicians: Vec<TechnicianLine>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MaterialLine {
    pub id: Uuid,
    /// Catalogue item, when the material is registered.
    pub catalogue_id: Option<Uuid>,
    pub description: String,
    pub unit: Option<String>,
    pub planned_quantity: f64,
    pub unit_cost: f64,
    pub confirmed: bool,
    pub available: bool,
    /// Only set on order lines during execution or finalization.
    pub consumed_quantity: Option<f64>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ToolLine {
    pub id: Uuid,
    pub catalogue_id: Option<Uuid>,
    pub description: String,
    pub quantity: f64,
    pub unit_cost: f64,
    pub confirmed: bool,
    pub available: bool,
    pub used: bool,
    pub returned_condition: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TechnicianLine {
    pub id: Uuid,
    pub technician_id: Option<Uuid>,
    pub name: String,
    pub role: Option<String>,
    pub estimated_hours: f64,
    pub hour_cost: f64,
    pub confirmed: bool,
    pub present: bool,
    pub hours_worked: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Material,
    Tool,
    Technician,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ResourceKind::Material => "material",
            ResourceKind::Tool => "tool",
            ResourceKind::Technician => "technician",
        })
    }
}

/// Link between a piece of work and an externally tracked task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskLink {
    pub id: Uuid,
    pub task_id: Uuid,
    pub description: Option<String>,
    pub status: TaskLinkStatus,
    pub resolution_note: Option<String>,
    pub resolved_by: Option<Uuid>,
    pub resolved_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum TaskLinkStatus {
    #[default]
    #[serde(rename = "PENDENTE")]
    Pending,
    #[serde(rename = "CONCLUIDA")]
    Completed,
    #[serde(rename = "CANCELADA")]
    Cancelled,
}

impl fmt::Display for TaskLinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TaskLinkStatus::Pending => "PENDENTE",
            TaskLinkStatus::Completed => "CONCLUIDA",
            TaskLinkStatus::Cancelled => "CANCELADA",
        })
    }
}

impl MaterialLine {
    pub fn planned(
        catalogue_id: Option<Uuid>,
        description: impl Into<String>,
        unit: Option<String>,
        planned_quantity: f64,
        unit_cost: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            catalogue_id,
            description: description.into(),
            unit,
            planned_quantity,
            unit_cost,
            confirmed: false,
            available: false,
            consumed_quantity: None,
            notes: None,
        }
    }

    fn validate(&self) -> MaintenanceResult<()> {
        ensure_text("materials.description", &self.description)?;
        ensure_non_negative("materials.plannedQuantity", self.planned_quantity)?;
        ensure_non_negative("materials.unitCost", self.unit_cost)?;
        if let Some(consumed) = self.consumed_quantity {
            ensure_non_negative("materials.consumedQuantity", consumed)?;
        }
        Ok(())
    }
}

impl ToolLine {
    pub fn planned(
        catalogue_id: Option<Uuid>,
        description: impl Into<String>,
        quantity: f64,
        unit_cost: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            catalogue_id,
            description: description.into(),
            quantity,
            unit_cost,
            confirmed: false,
            available: false,
            used: false,
            returned_condition: None,
        }
    }

    fn validate(&self) -> MaintenanceResult<()> {
        ensure_text("tools.description", &self.description)?;
        ensure_non_negative("tools.quantity", self.quantity)?;
        ensure_non_negative("tools.unitCost", self.unit_cost)
    }
}

impl TechnicianLine {
    pub fn planned(
        technician_id: Option<Uuid>,
        name: impl Into<String>,
        role: Option<String>,
        estimated_hours: f64,
        hour_cost: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            technician_id,
            name: name.into(),
            role,
            estimated_hours,
            hour_cost,
            confirmed: false,
            present: false,
            hours_worked: None,
        }
    }

    /// Billable hours: never less than the estimate.
    pub fn billable_hours(&self) -> f64 {
        self.hours_worked.unwrap_or(0.0).max(self.estimated_hours)
    }

    fn validate(&self) -> MaintenanceResult<()> {
        ensure_text("technicians.name", &self.name)?;
        ensure_non_negative("technicians.estimatedHours", self.estimated_hours)?;
        ensure_non_negative("technicians.hourCost", self.hour_cost)?;
        if let Some(hours) = self.hours_worked {
            ensure_non_negative("technicians.hoursWorked", hours)?;
        }
        Ok(())
    }
}

impl TaskLink {
    pub fn pending(task_id: Uuid, description: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            task_id,
            description,
            status: TaskLinkStatus::Pending,
            resolution_note: None,
            resolved_by: None,
            resolved_at: None,
        }
    }

    pub(crate) fn cloned_for_order(&self) -> Self {
        Self {
            id: Uuid::new_v4(),
            ..self.clone()
        }
    }

    pub(crate) fn resolve(
        &mut self,
        status: TaskLinkStatus,
        note: Option<String>,
        actor: Option<Uuid>,
        now: DateTime<Utc>,
    ) {
        self.status = status;
        self.resolution_note = note;
        self.resolved_by = actor;
        self.resolved_at = Some(now);
    }
}

impl ResourcePlan {
    /// Estimate used as default budget: planned quantities and hours at their
    /// unit costs.
    pub fn planned_cost(&self) -> f64 {
        let materials: f64 = self.materials.iter().map(|m| m.planned_quantity * m.unit_cost).sum();
        let tools: f64 = self.tools.iter().map(|t| t.quantity * t.unit_cost).sum();
        let technicians: f64 =
            self.technicians.iter().map(|t| t.estimated_hours * t.hour_cost).sum();
        materials + tools + technicians
    }

    /// Cost of executed work. Tools are not billed.
    pub fn real_cost(&self) -> f64 {
        let materials: f64 = self
            .materials
            .iter()
            .map(|m| m.unit_cost * m.consumed_quantity.unwrap_or(0.0))
            .sum();
        let technicians: f64 =
            self.technicians.iter().map(|t| t.hour_cost * t.billable_hours()).sum();
        materials + technicians
    }

    pub fn validate(&self) -> MaintenanceResult<()> {
        self.materials.iter().try_for_each(MaterialLine::validate)?;
        self.tools.iter().try_for_each(ToolLine::validate)?;
        self.technicians.iter().try_for_each(TechnicianLine::validate)
    }

    pub fn material_mut(&mut self, id: Uuid) -> Option<&mut MaterialLine> {
        self.materials.iter_mut().find(|m| m.id == id)
    }

    pub fn tool_mut(&mut self, id: Uuid) -> Option<&mut ToolLine> {
        self.tools.iter_mut().find(|t| t.id == id)
    }

    pub fn technician_mut(&mut self, id: Uuid) -> Option<&mut TechnicianLine> {
        self.technicians.iter_mut().find(|t| t.id == id)
    }

    pub(crate) fn cloned_for_order(&self) -> Self {
        Self {
            materials: self
                .materials
                .iter()
                .map(|m| MaterialLine {
                    id: Uuid::new_v4(),
                    ..m.clone()
                })
                .collect(),
            tools: self
                .tools
                .iter()
                .map(|t| ToolLine {
                    id: Uuid::new_v4(),
                    ..t.clone()
                })
                .collect(),
            technicians: self
                .technicians
                .iter()
                .map(|t| TechnicianLine {
                    id: Uuid::new_v4(),
                    ..t.clone()
                })
                .collect(),
        }
    }
}
