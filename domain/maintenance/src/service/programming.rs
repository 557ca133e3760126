use architecture::PaginationResult;
use async_trait::async_trait;
use uuid::Uuid;

use crate::exception::MaintenanceResult;
use crate::model::entity::{HistoryEntry, Programming};
use crate::model::vo::{
    Approval, ApprovalOutcome, NewProgramming, ProgrammingFilter, ProgrammingPatch, Rejection,
};

/// Programming state machine. `actor` is the optional id of the user acting.
#[async_trait]
pub trait ProgrammingService: Send + Sync {
    /// Validates references, allocates the code and persists the programming
    /// with its resources and vehicle reservation.
    async fn create(
        &self,
        input: NewProgramming,
        actor: Option<Uuid>,
    ) -> MaintenanceResult<Programming>;

    async fn list(&self, filter: ProgrammingFilter)
        -> MaintenanceResult<PaginationResult<Programming>>;

    async fn get(&self, id: Uuid) -> MaintenanceResult<Programming>;

    /// Only while `RASCUNHO` or `PENDENTE`.
    async fn update(
        &self,
        id: Uuid,
        patch: ProgrammingPatch,
        actor: Option<Uuid>,
    ) -> MaintenanceResult<Programming>;

    /// `RASCUNHO -> PENDENTE`
    async fn submit(&self, id: Uuid, actor: Option<Uuid>) -> MaintenanceResult<Programming>;

    /// `PENDENTE -> EM_ANALISE`
    async fn analyze(&self, id: Uuid, actor: Option<Uuid>) -> MaintenanceResult<Programming>;

    /// `EM_ANALISE -> APROVADA`, generating the order in the same transaction.
    async fn approve(
        &self,
        id: Uuid,
        approval: Approval,
        actor: Option<Uuid>,
    ) -> MaintenanceResult<ApprovalOutcome>;

    /// `EM_ANALISE -> REJEITADA`
    async fn reject(
        &self,
        id: Uuid,
        rejection: Rejection,
        actor: Option<Uuid>,
    ) -> MaintenanceResult<Programming>;

    async fn cancel(
        &self,
        id: Uuid,
        reason: String,
        actor: Option<Uuid>,
    ) -> MaintenanceResult<Programming>;

    /// Soft delete.
    async fn delete(&self, id: Uuid, actor: Option<Uuid>) -> MaintenanceResult<()>;

    async fn history(&self, id: Uuid) -> MaintenanceResult<Vec<HistoryEntry>>;
}
