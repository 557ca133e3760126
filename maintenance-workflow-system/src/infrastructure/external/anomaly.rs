use std::sync::Arc;

use async_trait::async_trait;
use domain_maintenance::{model::vo::AnomalyStatus, service::AnomalyService};
use reqwest::Client;
use serde_json::json;
use typed_builder::TypedBuilder;
use uuid::Uuid;

use super::endpoint;

/// Anomaly registry reached over HTTP.
#[derive(TypedBuilder)]
pub struct HttpAnomalyService {
    client: Arc<Client>,
    #[builder(setter(into))]
    base_url: String,
}

#[async_trait]
impl AnomalyService for HttpAnomalyService {
    async fn update_status(&self, anomaly_id: Uuid, status: AnomalyStatus) -> anyhow::Result<()> {
        self.client
            .put(endpoint(&self.base_url, &format!("anomalies/{anomaly_id}/status")))
            .json(&json!({ "status": status }))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn resolve(&self, anomaly_id: Uuid, note: Option<String>) -> anyhow::Result<()> {
        self.client
            .post(endpoint(&self.base_url, &format!("anomalies/{anomaly_id}/resolve")))
            .json(&json!({ "note": note }))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

/// Stands in for the registry when none is configured.
pub struct LoggingAnomalyService;

#[async_trait]
impl AnomalyService for LoggingAnomalyService {
    async fn update_status(&self, anomaly_id: Uuid, status: AnomalyStatus) -> anyhow::Result<()> {
        tracing::info!("No anomaly registry configured, anomaly {anomaly_id} would be {status}");
        Ok(())
    }

    async fn resolve(&self, anomaly_id: Uuid, _note: Option<String>) -> anyhow::Result<()> {
        tracing::info!("No anomaly registry configured, anomaly {anomaly_id} would be resolved");
        Ok(())
    }
}
