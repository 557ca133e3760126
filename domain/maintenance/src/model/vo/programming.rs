use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use domain_fleet::model::vo::VehicleRequest;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::exception::{MaintenanceException, MaintenanceResult};
use crate::model::entity::planning::{
    MaintenanceKind, Planning, PlanningLinks, Priority, ProgrammingOrigin,
};
use crate::model::entity::resource::{
    MaterialLine, ResourcePlan, TaskLink, TechnicianLine, ToolLine,
};
use crate::model::entity::{Order, Programming};

/// Payload for creating a programming.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewProgramming {
    pub description: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub asset: Option<String>,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub kind: MaintenanceKind,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub origin: ProgrammingOrigin,
    #[serde(default)]
    pub links: PlanningLinks,
    #[serde(default)]
    pub planned_duration_hours: Option<f64>,
    #[serde(default)]
    pub estimated_minutes: Option<u32>,
    #[serde(default)]
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub responsible: Option<String>,
    #[serde(default)]
    pub needs_vehicle: bool,
    #[serde(default)]
    pub vehicle_request: Option<VehicleRequest>,
    /// Defaults to the planned cost of the resources.
    #[serde(default)]
    pub budget_estimate: Option<f64>,
    #[serde(default)]
    pub materials: Vec<NewMaterial>,
    #[serde(default)]
    pub tools: Vec<NewTool>,
    #[serde(default)]
    pub technicians: Vec<NewTechnician>,
    #[serde(default)]
    pub task_links: Vec<NewTaskLink>,
    /// Save as `RASCUNHO` instead of `PENDENTE`.
    #[serde(default)]
    pub draft: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewMaterial {
    #[serde(default)]
    pub catalogue_id: Option<Uuid>,
    pub description: String,
    #[serde(default)]
    pub unit: Option<String>,
    pub quantity: f64,
    #[serde(default)]
    pub unit_cost: f64,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewTool {
    #[serde(default)]
    pub catalogue_id: Option<Uuid>,
    pub description: String,
    pub quantity: f64,
    #[serde(default)]
    pub unit_cost: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewTechnician {
    #[serde(default)]
    pub technician_id: Option<Uuid>,
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
    pub estimated_hours: f64,
    #[serde(default)]
    pub hour_cost: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewTaskLink {
    pub task_id: Uuid,
    #[serde(default)]
    pub description: Option<String>,
}

fn materials(input: Vec<NewMaterial>) -> Vec<MaterialLine> {
    input
        .into_iter()
        .map(|m| MaterialLine {
            notes: m.notes,
            ..MaterialLine::planned(m.catalogue_id, m.description, m.unit, m.quantity, m.unit_cost)
        })
        .collect()
}

fn tools(input: Vec<NewTool>) -> Vec<ToolLine> {
    input
        .into_iter()
        .map(|t| ToolLine::planned(t.catalogue_id, t.description, t.quantity, t.unit_cost))
        .collect()
}

fn technicians(input: Vec<NewTechnician>) -> Vec<TechnicianLine> {
    input
        .into_iter()
        .map(|t| TechnicianLine::planned(t.technician_id, t.name, t.role, t.estimated_hours, t.hour_cost))
        .collect()
}

fn task_links(input: Vec<NewTaskLink>) -> Vec<TaskLink> {
    input.into_iter().map(|t| TaskLink::pending(t.task_id, t.description)).collect()
}

impl NewProgramming {
    /// Builds the planning block and validates it.
    pub fn into_planning(self) -> MaintenanceResult<(Planning, bool)> {
        let resources = ResourcePlan {
            materials: materials(self.materials),
            tools: tools(self.tools),
            technicians: technicians(self.technicians),
        };
        let budget_estimate = self.budget_estimate.unwrap_or_else(|| resources.planned_cost());
        let planning = Planning {
            description: self.description,
            location: self.location,
            asset: self.asset,
            condition: self.condition,
            kind: self.kind,
            priority: self.priority,
            origin: self.origin,
            links: self.links,
            planned_duration_hours: self.planned_duration_hours,
            estimated_minutes: self.estimated_minutes,
            scheduled_at: self.scheduled_at,
            responsible: self.responsible,
            needs_vehicle: self.needs_vehicle,
            vehicle_request: self.vehicle_request,
            budget_estimate,
            resources,
            task_links: task_links(self.task_links),
        };
        planning.validate()?;
        Ok((planning, self.draft))
    }
}

/// Partial update of a draft or pending programming. Absent fields are kept.
/// A present resource list replaces the current one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProgrammingPatch {
    pub description: Option<String>,
    pub location: Option<String>,
    pub asset: Option<String>,
    pub condition: Option<String>,
    pub kind: Option<MaintenanceKind>,
    pub priority: Option<Priority>,
    pub origin: Option<ProgrammingOrigin>,
    pub links: Option<PlanningLinks>,
    pub planned_duration_hours: Option<f64>,
    pub estimated_minutes: Option<u32>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub responsible: Option<String>,
    pub needs_vehicle: Option<bool>,
    pub vehicle_request: Option<VehicleRequest>,
    pub budget_estimate: Option<f64>,
    pub materials: Option<Vec<NewMaterial>>,
    pub tools: Option<Vec<NewTool>>,
    pub technicians: Option<Vec<NewTechnician>>,
    pub task_links: Option<Vec<NewTaskLink>>,
}

impl ProgrammingPatch {
    /// Applies the patch to a copy of `current` and validates the result.
    pub fn applied_to(self, current: &Planning) -> MaintenanceResult<Planning> {
        let mut planning = current.clone();
        if let Some(description) = self.description {
            planning.description = description;
        }
        if let Some(kind) = self.kind {
            planning.kind = kind;
        }
        if let Some(priority) = self.priority {
            planning.priority = priority;
        }
        if let Some(origin) = self.origin {
            planning.origin = origin;
        }
        if let Some(links) = self.links {
            planning.links = links;
        }
        if let Some(needs_vehicle) = self.needs_vehicle {
            planning.needs_vehicle = needs_vehicle;
        }
        planning.location = self.location.or(planning.location);
        planning.asset = self.asset.or(planning.asset);
        planning.condition = self.condition.or(planning.condition);
        planning.planned_duration_hours =
            self.planned_duration_hours.or(planning.planned_duration_hours);
        planning.estimated_minutes = self.estimated_minutes.or(planning.estimated_minutes);
        planning.scheduled_at = self.scheduled_at.or(planning.scheduled_at);
        planning.responsible = self.responsible.or(planning.responsible);
        planning.vehicle_request = self.vehicle_request.or(planning.vehicle_request);

        let resources_changed =
            self.materials.is_some() || self.tools.is_some() || self.technicians.is_some();
        if let Some(input) = self.materials {
            planning.resources.materials = materials(input);
        }
        if let Some(input) = self.tools {
            planning.resources.tools = tools(input);
        }
        if let Some(input) = self.technicians {
            planning.resources.technicians = technicians(input);
        }
        if let Some(input) = self.task_links {
            planning.task_links = task_links(input);
        }
        planning.budget_estimate = match self.budget_estimate {
            Some(budget) => budget,
            None if resources_changed => planning.resources.planned_cost(),
            None => planning.budget_estimate,
        };
        planning.validate()?;
        Ok(planning)
    }
}

/// Reviewer decision accepting a programming.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Approval {
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub budget_override: Option<f64>,
    #[serde(default)]
    pub suggested_date: Option<NaiveDate>,
    #[serde(default)]
    pub suggested_time: Option<NaiveTime>,
}

impl Approval {
    /// Suggested date and time combined as UTC; both or neither must be set.
    pub fn suggested_schedule(&self) -> MaintenanceResult<Option<DateTime<Utc>>> {
        match (self.suggested_date, self.suggested_time) {
            (Some(date), Some(time)) => Ok(Some(date.and_time(time).and_utc())),
            (None, None) => Ok(None),
            _ => Err(MaintenanceException::PartialSuggestedSchedule),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Rejection {
    pub reason: String,
    #[serde(default)]
    pub improvement_suggestion: Option<String>,
}

/// Approved programming together with the order generated from it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalOutcome {
    pub programming: Programming,
    pub order: Order,
}
