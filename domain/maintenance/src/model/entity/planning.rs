use std::fmt;

use chrono::{DateTime, Utc};
use domain_fleet::model::vo::VehicleRequest;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::resource::{ResourcePlan, TaskLink};
use crate::exception::{ensure_non_negative, ensure_text, MaintenanceException, MaintenanceResult};
use crate::model::vo::AssetRef;

/// # planejamento
/// Planning block owned by a programming and cloned 1:1 into the order
/// generated from it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Planning {
    pub description: String,
    pub location: Option<String>,
    /// Free text identifying the asset.
    pub asset: Option<String>,
    pub condition: Option<String>,
    pub kind: MaintenanceKind,
    pub priority: Priority,
    pub origin: ProgrammingOrigin,
    pub links: PlanningLinks,
    pub planned_duration_hours: Option<f64>,
    pub estimated_minutes: Option<u32>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub responsible: Option<String>,
    /// necessita_veiculo
    pub needs_vehicle: bool,
    pub vehicle_request: Option<VehicleRequest>,
    pub budget_estimate: f64,
    pub resources: ResourcePlan,
    pub task_links: Vec<TaskLink>,
}

/// Optional links to externally owned records.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PlanningLinks {
    #[serde(default)]
    pub plant_id: Option<Uuid>,
    #[serde(default)]
    pub equipment_id: Option<Uuid>,
    #[serde(default)]
    pub anomaly_id: Option<Uuid>,
    #[serde(default)]
    pub maintenance_plan_id: Option<Uuid>,
}

impl PlanningLinks {
    pub fn references(&self) -> Vec<AssetRef> {
        let mut refs = Vec::new();
        if let Some(id) = self.plant_id {
            refs.push(AssetRef::Plant(id));
        }
        if let Some(id) = self.equipment_id {
            refs.push(AssetRef::Equipment(id));
        }
        if let Some(id) = self.anomaly_id {
            refs.push(AssetRef::Anomaly(id));
        }
        if let Some(id) = self.maintenance_plan_id {
            refs.push(AssetRef::MaintenancePlan(id));
        }
        refs
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum MaintenanceKind {
    #[default]
    #[serde(rename = "PREVENTIVA")]
    Preventive,
    #[serde(rename = "CORRETIVA")]
    Corrective,
    #[serde(rename = "PREDITIVA")]
    Predictive,
    #[serde(rename = "INSPECAO")]
    Inspection,
    #[serde(rename = "MELHORIA")]
    Improvement,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Priority {
    #[serde(rename = "BAIXA")]
    Low,
    #[default]
    #[serde(rename = "MEDIA")]
    Medium,
    #[serde(rename = "ALTA")]
    High,
    #[serde(rename = "CRITICA")]
    Critical,
}

/// Where the request came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum ProgrammingOrigin {
    #[serde(rename = "ANOMALIA")]
    Anomaly,
    #[serde(rename = "TAREFA")]
    Task,
    #[serde(rename = "PLANO")]
    Plan,
    #[default]
    #[serde(rename = "MANUAL")]
    Manual,
}

impl fmt::Display for ProgrammingOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ProgrammingOrigin::Anomaly => "ANOMALIA",
            ProgrammingOrigin::Task => "TAREFA",
            ProgrammingOrigin::Plan => "PLANO",
            ProgrammingOrigin::Manual => "MANUAL",
        })
    }
}

impl Planning {
    /// Every external record the planning points at, vehicle included.
    pub fn references(&self) -> Vec<AssetRef> {
        let mut refs = self.links.references();
        if let Some(request) = &self.vehicle_request {
            refs.push(AssetRef::Vehicle(request.vehicle_id));
        }
        refs
    }

    pub fn validate(&self) -> MaintenanceResult<()> {
        ensure_text("description", &self.description)?;
        if let Some(hours) = self.planned_duration_hours {
            ensure_non_negative("plannedDurationHours", hours)?;
        }
        ensure_non_negative("budgetEstimate", self.budget_estimate)?;
        match self.origin {
            ProgrammingOrigin::Anomaly if self.links.anomaly_id.is_none() => {
                return Err(MaintenanceException::validation(
                    "links.anomalyId",
                    "an anomaly origin requires the anomaly link",
                ));
            }
            ProgrammingOrigin::Plan if self.links.maintenance_plan_id.is_none() => {
                return Err(MaintenanceException::validation(
                    "links.maintenancePlanId",
                    "a plan origin requires the maintenance plan link",
                ));
            }
            _ => {}
        }
        if self.needs_vehicle && self.vehicle_request.is_none() {
            return Err(MaintenanceException::validation(
                "vehicleRequest",
                "required when a vehicle is needed",
            ));
        }
        if let Some(request) = &self.vehicle_request {
            request.validate()?;
        }
        self.resources.validate()
    }

    /// The active vehicle request, if the planning needs one.
    pub fn wanted_vehicle(&self) -> Option<&VehicleRequest> {
        if self.needs_vehicle {
            self.vehicle_request.as_ref()
        } else {
            None
        }
    }

    /// Copy for a new order: same content, fresh line identities, no
    /// execution data.
    pub fn cloned_for_order(&self) -> Planning {
        Planning {
            resources: self.resources.cloned_for_order(),
            task_links: self.task_links.iter().map(TaskLink::cloned_for_order).collect(),
            ..self.clone()
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model::entity::resource::MaterialLine;

    pub(crate) fn planning() -> Planning {
        Planning {
            description: "Limpeza de módulos fotovoltaicos".to_string(),
            location: Some("Usina Sol Nascente".to_string()),
            asset: Some("String 12".to_string()),
            condition: None,
            kind: MaintenanceKind::Preventive,
            priority: Priority::High,
            origin: ProgrammingOrigin::Manual,
            links: PlanningLinks::default(),
            planned_duration_hours: Some(4.0),
            estimated_minutes: Some(240),
            scheduled_at: None,
            responsible: Some("Equipe A".to_string()),
            needs_vehicle: false,
            vehicle_request: None,
            budget_estimate: 50.0,
            resources: ResourcePlan {
                materials: vec![MaterialLine::planned(None, "Detergente neutro", None, 5.0, 10.0)],
                tools: vec![],
                technicians: vec![],
            },
            task_links: vec![],
        }
    }

    #[test]
    fn anomaly_origin_needs_anomaly_link() {
        let mut p = planning();
        p.origin = ProgrammingOrigin::Anomaly;
        assert!(matches!(
            p.validate(),
            Err(MaintenanceException::Validation { field: "links.anomalyId", .. })
        ));
        p.links.anomaly_id = Some(Uuid::new_v4());
        assert!(p.validate().is_ok());
    }

    #[test]
    fn needing_a_vehicle_requires_a_request() {
        let mut p = planning();
        p.needs_vehicle = true;
        assert!(p.validate().is_err());
        assert!(p.wanted_vehicle().is_none());
    }

    #[test]
    fn cloned_for_order_renews_line_ids() {
        let p = planning();
        let copy = p.cloned_for_order();
        assert_eq!(copy.description, p.description);
        assert_ne!(copy.resources.materials[0].id, p.resources.materials[0].id);
        assert_eq!(
            copy.resources.materials[0].planned_quantity,
            p.resources.materials[0].planned_quantity
        );
    }
}
