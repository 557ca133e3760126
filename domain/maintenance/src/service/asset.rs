use async_trait::async_trait;

use crate::model::vo::AssetRef;

/// Existence checks against the plant, equipment, anomaly, maintenance plan
/// and vehicle registries.
#[async_trait]
pub trait AssetLookupService: Send + Sync {
    async fn exists(&self, reference: AssetRef) -> anyhow::Result<bool>;
}
