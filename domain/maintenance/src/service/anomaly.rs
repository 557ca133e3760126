use async_trait::async_trait;
use uuid::Uuid;

use crate::model::vo::AnomalyStatus;

/// Anomaly registry owned by another system.
#[async_trait]
pub trait AnomalyService: Send + Sync {
    async fn update_status(&self, anomaly_id: Uuid, status: AnomalyStatus) -> anyhow::Result<()>;

    /// Marks the anomaly resolved with an optional note.
    async fn resolve(&self, anomaly_id: Uuid, note: Option<String>) -> anyhow::Result<()>;
}
