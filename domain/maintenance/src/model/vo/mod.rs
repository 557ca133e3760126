pub mod filter;
pub mod order;
pub mod programming;

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[rustfmt::skip]
pub use {
    filter::{OrderFilter, ProgrammingFilter},
    order::{
        ChecklistMark, ChecklistUpdate, Closure, FinishOrder, MaterialConsumption, MaterialMark,
        MaterialUpdate, Reason, ScheduleOrder, StartOrder, TaskResolution, TechnicianHours,
        ToolMark, ToolUpdate,
    },
    programming::{
        Approval, ApprovalOutcome, NewMaterial, NewProgramming, NewTaskLink, NewTechnician,
        NewTool, ProgrammingPatch, Rejection,
    },
};

/// External record referenced by a programming.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "type", content = "id", rename_all = "camelCase")]
pub enum AssetRef {
    Plant(Uuid),
    Equipment(Uuid),
    Anomaly(Uuid),
    MaintenancePlan(Uuid),
    Vehicle(Uuid),
}

impl AssetRef {
    pub fn id(&self) -> Uuid {
        match self {
            AssetRef::Plant(id)
            | AssetRef::Equipment(id)
            | AssetRef::Anomaly(id)
            | AssetRef::MaintenancePlan(id)
            | AssetRef::Vehicle(id) => *id,
        }
    }

    /// Collection name used by the asset registry.
    pub fn collection(&self) -> &'static str {
        match self {
            AssetRef::Plant(_) => "plants",
            AssetRef::Equipment(_) => "equipments",
            AssetRef::Anomaly(_) => "anomalies",
            AssetRef::MaintenancePlan(_) => "maintenance-plans",
            AssetRef::Vehicle(_) => "vehicles",
        }
    }
}

impl fmt::Display for AssetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            AssetRef::Plant(_) => "plant",
            AssetRef::Equipment(_) => "equipment",
            AssetRef::Anomaly(_) => "anomaly",
            AssetRef::MaintenancePlan(_) => "maintenance plan",
            AssetRef::Vehicle(_) => "vehicle",
        };
        write!(f, "{kind} with id: {}", self.id())
    }
}

/// Status mirrored onto an externally owned anomaly.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AnomalyStatus {
    #[serde(rename = "AGUARDANDO")]
    Awaiting,
    #[serde(rename = "EM_ANALISE")]
    InAnalysis,
    #[serde(rename = "OS_GERADA")]
    OrderGenerated,
    #[serde(rename = "RESOLVIDA")]
    Resolved,
}

impl fmt::Display for AnomalyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AnomalyStatus::Awaiting => "AGUARDANDO",
            AnomalyStatus::InAnalysis => "EM_ANALISE",
            AnomalyStatus::OrderGenerated => "OS_GERADA",
            AnomalyStatus::Resolved => "RESOLVIDA",
        })
    }
}
