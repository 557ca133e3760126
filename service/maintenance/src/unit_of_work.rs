use std::future::Future;
use std::time::Duration;

use architecture::ReadOnlyRepository;
use domain_maintenance::{
    exception::{MaintenanceException, MaintenanceResult},
    model::entity::{Order, Programming},
    repository::MaintenanceTransaction,
};
use uuid::Uuid;

/// Time budgets of the workflow services.
#[derive(Debug, Clone, Copy)]
pub struct WorkflowSettings {
    /// Upper bound for one transactional operation, reads included.
    pub transaction_timeout: Duration,
    /// Upper bound for one anomaly status call.
    pub anomaly_sync_timeout: Duration,
}

impl Default for WorkflowSettings {
    fn default() -> Self {
        Self {
            transaction_timeout: Duration::from_secs(30),
            anomaly_sync_timeout: Duration::from_secs(5),
        }
    }
}

/// Runs `operation` under the transaction budget. On expiry the future is
/// dropped together with its uncommitted transaction.
pub(crate) async fn within<T, F>(budget: Duration, operation: F) -> MaintenanceResult<T>
where
    F: Future<Output = MaintenanceResult<T>>,
{
    match tokio::time::timeout(budget, operation).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!("Transaction exceeded {budget:?}, rolled back");
            Err(MaintenanceException::TransactionTimeout {
                budget_secs: budget.as_secs(),
            })
        }
    }
}

/// Loads a programming that is not soft deleted.
pub(crate) async fn load_programming(
    tx: &dyn MaintenanceTransaction,
    id: Uuid,
) -> MaintenanceResult<Programming> {
    tx.programmings()
        .get_by_id(id)
        .await?
        .filter(|p| !p.is_deleted())
        .ok_or(MaintenanceException::ProgrammingNotFound { id })
}

pub(crate) async fn load_order(
    tx: &dyn MaintenanceTransaction,
    id: Uuid,
) -> MaintenanceResult<Order> {
    tx.orders()
        .get_by_id(id)
        .await?
        .ok_or(MaintenanceException::OrderNotFound { id })
}
