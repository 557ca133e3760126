use architecture::PaginationResult;
use async_trait::async_trait;
use uuid::Uuid;

use crate::exception::MaintenanceResult;
use crate::model::entity::{HistoryEntry, Order};
use crate::model::vo::{
    ChecklistUpdate, FinishOrder, MaterialUpdate, OrderFilter, ScheduleOrder, StartOrder,
    ToolUpdate,
};

/// Execution state machine of orders.
#[async_trait]
pub trait OrderService: Send + Sync {
    async fn list(&self, filter: OrderFilter) -> MaintenanceResult<PaginationResult<Order>>;

    async fn get(&self, id: Uuid) -> MaintenanceResult<Order>;

    /// `PLANEJADA -> PROGRAMADA`
    async fn schedule(
        &self,
        id: Uuid,
        plan: ScheduleOrder,
        actor: Option<Uuid>,
    ) -> MaintenanceResult<Order>;

    /// `PROGRAMADA -> EM_EXECUCAO`
    async fn start(&self, id: Uuid, crew: StartOrder, actor: Option<Uuid>)
        -> MaintenanceResult<Order>;

    /// Generates the order of an approved programming if needed and starts it.
    async fn start_from_programming(
        &self,
        programming_id: Uuid,
        crew: StartOrder,
        actor: Option<Uuid>,
    ) -> MaintenanceResult<Order>;

    async fn pause(&self, id: Uuid, reason: String, actor: Option<Uuid>)
        -> MaintenanceResult<Order>;

    async fn resume(
        &self,
        id: Uuid,
        reason: String,
        actor: Option<Uuid>,
    ) -> MaintenanceResult<Order>;

    async fn update_checklist(
        &self,
        id: Uuid,
        update: ChecklistUpdate,
        actor: Option<Uuid>,
    ) -> MaintenanceResult<Order>;

    async fn register_materials(
        &self,
        id: Uuid,
        update: MaterialUpdate,
        actor: Option<Uuid>,
    ) -> MaintenanceResult<Order>;

    async fn register_tools(
        &self,
        id: Uuid,
        update: ToolUpdate,
        actor: Option<Uuid>,
    ) -> MaintenanceResult<Order>;

    async fn complete_task(
        &self,
        id: Uuid,
        task_id: Uuid,
        note: Option<String>,
        actor: Option<Uuid>,
    ) -> MaintenanceResult<Order>;

    async fn cancel_task(
        &self,
        id: Uuid,
        task_id: Uuid,
        note: Option<String>,
        actor: Option<Uuid>,
    ) -> MaintenanceResult<Order>;

    /// `EM_EXECUCAO | PAUSADA -> FINALIZADA`, computing elapsed time and real cost.
    async fn finish(
        &self,
        id: Uuid,
        result: FinishOrder,
        actor: Option<Uuid>,
    ) -> MaintenanceResult<Order>;

    async fn cancel(&self, id: Uuid, reason: String, actor: Option<Uuid>)
        -> MaintenanceResult<Order>;

    async fn history(&self, id: Uuid) -> MaintenanceResult<Vec<HistoryEntry>>;
}
