use domain_fleet::exception::FleetException;
use thiserror::Error;
use uuid::Uuid;

use crate::model::entity::{
    order::OrderStatus, programming::ProgrammingStatus, resource::ResourceKind,
    resource::TaskLinkStatus,
};
use crate::model::vo::AssetRef;

pub type MaintenanceResult<T> = Result<T, MaintenanceException>;

/// How a caller should treat a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    Validation,
    Timeout,
    Internal,
}

#[derive(Error, Debug)]
pub enum MaintenanceException {
    #[error("There is no programming with id: {id}.")]
    ProgrammingNotFound { id: Uuid },

    #[error("There is no order with id: {id}.")]
    OrderNotFound { id: Uuid },

    #[error("There is no {reference}.")]
    ReferenceNotFound { reference: AssetRef },

    #[error("There is no {kind} line with id: {line_id} in order: {order_id}.")]
    ResourceLineNotFound {
        kind: ResourceKind,
        order_id: Uuid,
        line_id: Uuid,
    },

    #[error("There is no checklist item with id: {item_id} in order: {order_id}.")]
    ChecklistItemNotFound { order_id: Uuid, item_id: Uuid },

    #[error("There is no task link with id: {task_id} in order: {order_id}.")]
    TaskLinkNotFound { order_id: Uuid, task_id: Uuid },

    #[error("Programming: {id} is {status}, it can not be {action}.")]
    ProgrammingTransition {
        id: Uuid,
        status: ProgrammingStatus,
        action: &'static str,
    },

    #[error("Order: {id} is {status}, it can not be {action}.")]
    OrderTransition {
        id: Uuid,
        status: OrderStatus,
        action: &'static str,
    },

    #[error("Order: {id} is {status}, consumed quantities can only be registered during execution.")]
    ConsumptionOutsideExecution { id: Uuid, status: OrderStatus },

    #[error("Task link: {task_id} in order: {order_id} is already {status}.")]
    TaskLinkNotPending {
        order_id: Uuid,
        task_id: Uuid,
        status: TaskLinkStatus,
    },

    #[error("Programming: {id} changed while it was being updated, retry the update.")]
    ConcurrentUpdate { id: Uuid },

    #[error("Invalid {field}: {reason}.")]
    Validation { field: &'static str, reason: String },

    #[error("Suggested date and suggested time must be provided together.")]
    PartialSuggestedSchedule,

    #[error(transparent)]
    Fleet(#[from] FleetException),

    #[error("Operation exceeded its transaction budget of {budget_secs}s and was rolled back.")]
    TransactionTimeout { budget_secs: u64 },

    #[error("Maintenance internal error: {source}")]
    InternalError {
        #[source]
        source: anyhow::Error,
    },
}

impl MaintenanceException {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        MaintenanceException::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Stable numeric code reported to callers.
    pub fn status(&self) -> u16 {
        use MaintenanceException::*;
        match self {
            ProgrammingNotFound { .. } => 400,
            OrderNotFound { .. } => 401,
            ReferenceNotFound { .. } => 402,
            ResourceLineNotFound { .. } => 403,
            ChecklistItemNotFound { .. } => 404,
            TaskLinkNotFound { .. } => 405,
            ProgrammingTransition { .. } => 410,
            OrderTransition { .. } => 411,
            ConsumptionOutsideExecution { .. } => 412,
            TaskLinkNotPending { .. } => 413,
            ConcurrentUpdate { .. } => 414,
            Validation { .. } => 420,
            PartialSuggestedSchedule => 421,
            Fleet(e) => e.status(),
            TransactionTimeout { .. } => 430,
            InternalError { .. } => 500,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        use MaintenanceException::*;
        match self {
            ProgrammingNotFound { .. }
            | OrderNotFound { .. }
            | ReferenceNotFound { .. }
            | ResourceLineNotFound { .. }
            | ChecklistItemNotFound { .. }
            | TaskLinkNotFound { .. } => ErrorKind::NotFound,
            ProgrammingTransition { .. }
            | OrderTransition { .. }
            | ConsumptionOutsideExecution { .. }
            | TaskLinkNotPending { .. }
            | ConcurrentUpdate { .. } => ErrorKind::Conflict,
            Validation { .. } | PartialSuggestedSchedule => ErrorKind::Validation,
            Fleet(e) => match e {
                FleetException::InvalidWindow { .. }
                | FleetException::InvalidOdometer { .. }
                | FleetException::OdometerRegression { .. } => ErrorKind::Validation,
                FleetException::ReservationNotActive { .. } => ErrorKind::Conflict,
                FleetException::ReservationNotFound { .. } => ErrorKind::NotFound,
            },
            TransactionTimeout { .. } => ErrorKind::Timeout,
            InternalError { .. } => ErrorKind::Internal,
        }
    }
}

impl From<anyhow::Error> for MaintenanceException {
    fn from(e: anyhow::Error) -> Self {
        MaintenanceException::InternalError { source: e }
    }
}

/// Rejects negative, NaN and infinite amounts.
pub(crate) fn ensure_non_negative(field: &'static str, value: f64) -> MaintenanceResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(MaintenanceException::validation(
            field,
            format!("expected a non-negative number, got {value}"),
        ));
    }
    Ok(())
}

pub(crate) fn ensure_text(field: &'static str, value: &str) -> MaintenanceResult<()> {
    if value.trim().is_empty() {
        return Err(MaintenanceException::validation(field, "must not be blank"));
    }
    Ok(())
}
