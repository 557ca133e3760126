use architecture::PaginationResult;
use async_trait::async_trait;
use mockall::mock;
use uuid::Uuid;

use crate::{
    exception::MaintenanceResult,
    model::{
        entity::{HistoryEntry, Order, Programming},
        vo::{
            AnomalyStatus, Approval, ApprovalOutcome, AssetRef, ChecklistUpdate, FinishOrder,
            MaterialUpdate, NewProgramming, OrderFilter, ProgrammingFilter, ProgrammingPatch,
            Rejection, ScheduleOrder, StartOrder, ToolUpdate,
        },
    },
    service::{AnomalyService, AssetLookupService, OrderService, ProgrammingService},
};

mock! {
    pub AnomalyService {}
    #[async_trait]
    impl AnomalyService for AnomalyService {
        async fn update_status(&self, anomaly_id: Uuid, status: AnomalyStatus) -> anyhow::Result<()>;
        async fn resolve(&self, anomaly_id: Uuid, note: Option<String>) -> anyhow::Result<()>;
    }
}

mock! {
    pub AssetLookupService {}
    #[async_trait]
    impl AssetLookupService for AssetLookupService {
        async fn exists(&self, reference: AssetRef) -> anyhow::Result<bool>;
    }
}

mock! {
    pub ProgrammingService {}
    #[async_trait]
    impl ProgrammingService for ProgrammingService {
        async fn create(&self, input: NewProgramming, actor: Option<Uuid>) -> MaintenanceResult<Programming>;
        async fn list(&self, filter: ProgrammingFilter) -> MaintenanceResult<PaginationResult<Programming>>;
        async fn get(&self, id: Uuid) -> MaintenanceResult<Programming>;
        async fn update(&self, id: Uuid, patch: ProgrammingPatch, actor: Option<Uuid>) -> MaintenanceResult<Programming>;
        async fn submit(&self, id: Uuid, actor: Option<Uuid>) -> MaintenanceResult<Programming>;
        async fn analyze(&self, id: Uuid, actor: Option<Uuid>) -> MaintenanceResult<Programming>;
        async fn approve(&self, id: Uuid, approval: Approval, actor: Option<Uuid>) -> MaintenanceResult<ApprovalOutcome>;
        async fn reject(&self, id: Uuid, rejection: Rejection, actor: Option<Uuid>) -> MaintenanceResult<Programming>;
        async fn cancel(&self, id: Uuid, reason: String, actor: Option<Uuid>) -> MaintenanceResult<Programming>;
        async fn delete(&self, id: Uuid, actor: Option<Uuid>) -> MaintenanceResult<()>;
        async fn history(&self, id: Uuid) -> MaintenanceResult<Vec<HistoryEntry>>;
    }
}

mock! {
    pub OrderService {}
    #[async_trait]
    impl OrderService for OrderService {
        async fn list(&self, filter: OrderFilter) -> MaintenanceResult<PaginationResult<Order>>;
        async fn get(&self, id: Uuid) -> MaintenanceResult<Order>;
        async fn schedule(&self, id: Uuid, plan: ScheduleOrder, actor: Option<Uuid>) -> MaintenanceResult<Order>;
        async fn start(&self, id: Uuid, crew: StartOrder, actor: Option<Uuid>) -> MaintenanceResult<Order>;
        async fn start_from_programming(&self, programming_id: Uuid, crew: StartOrder, actor: Option<Uuid>) -> MaintenanceResult<Order>;
        async fn pause(&self, id: Uuid, reason: String, actor: Option<Uuid>) -> MaintenanceResult<Order>;
        async fn resume(&self, id: Uuid, reason: String, actor: Option<Uuid>) -> MaintenanceResult<Order>;
        async fn update_checklist(&self, id: Uuid, update: ChecklistUpdate, actor: Option<Uuid>) -> MaintenanceResult<Order>;
        async fn register_materials(&self, id: Uuid, update: MaterialUpdate, actor: Option<Uuid>) -> MaintenanceResult<Order>;
        async fn register_tools(&self, id: Uuid, update: ToolUpdate, actor: Option<Uuid>) -> MaintenanceResult<Order>;
        async fn complete_task(&self, id: Uuid, task_id: Uuid, note: Option<String>, actor: Option<Uuid>) -> MaintenanceResult<Order>;
        async fn cancel_task(&self, id: Uuid, task_id: Uuid, note: Option<String>, actor: Option<Uuid>) -> MaintenanceResult<Order>;
        async fn finish(&self, id: Uuid, result: FinishOrder, actor: Option<Uuid>) -> MaintenanceResult<Order>;
        async fn cancel(&self, id: Uuid, reason: String, actor: Option<Uuid>) -> MaintenanceResult<Order>;
        async fn history(&self, id: Uuid) -> MaintenanceResult<Vec<HistoryEntry>>;
    }
}
