use std::sync::Arc;

use anyhow::bail;
use async_trait::async_trait;
use domain_maintenance::{model::vo::AssetRef, service::AssetLookupService};
use reqwest::{Client, StatusCode};
use typed_builder::TypedBuilder;

use super::endpoint;

/// Plant, equipment, anomaly, maintenance plan and vehicle registries behind
/// one base url.
#[derive(TypedBuilder)]
pub struct HttpAssetLookupService {
    client: Arc<Client>,
    #[builder(setter(into))]
    base_url: String,
}

#[async_trait]
impl AssetLookupService for HttpAssetLookupService {
    async fn exists(&self, reference: AssetRef) -> anyhow::Result<bool> {
        let path = format!("{}/{}", reference.collection(), reference.id());
        let response = self.client.get(endpoint(&self.base_url, &path)).send().await?;
        match response.status() {
            status if status.is_success() => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => bail!("Asset registry answered {status} when looking up {reference}"),
        }
    }
}

/// Accepts every reference. Used when no registry is configured.
pub struct PermissiveAssetLookupService;

#[async_trait]
impl AssetLookupService for PermissiveAssetLookupService {
    async fn exists(&self, reference: AssetRef) -> anyhow::Result<bool> {
        tracing::debug!("No asset registry configured, assuming {reference} exists");
        Ok(true)
    }
}
