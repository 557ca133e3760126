use std::sync::Arc;
use std::time::Duration;

use domain_maintenance::{model::vo::AnomalyStatus, service::AnomalyService};
use typed_builder::TypedBuilder;
use uuid::Uuid;

/// Mirrors workflow transitions onto the linked anomaly. Calls run after the
/// primary commit; failures are logged and never reach the caller.
#[derive(TypedBuilder, Clone)]
pub struct AnomalySynchronizer {
    anomaly_service: Arc<dyn AnomalyService>,
    #[builder(default = Duration::from_secs(5))]
    timeout: Duration,
}

impl AnomalySynchronizer {
    pub async fn mark(&self, anomaly_id: Option<Uuid>, status: AnomalyStatus) {
        let Some(anomaly_id) = anomaly_id else {
            return;
        };
        match tokio::time::timeout(
            self.timeout,
            self.anomaly_service.update_status(anomaly_id, status),
        )
        .await
        {
            Ok(Ok(())) => tracing::debug!("Anomaly {anomaly_id} marked {status}"),
            Ok(Err(e)) => tracing::warn!("Failed to mark anomaly {anomaly_id} {status}: {e}"),
            Err(_) => tracing::warn!("Marking anomaly {anomaly_id} {status} timed out"),
        }
    }

    pub async fn resolve(&self, anomaly_id: Option<Uuid>, note: Option<String>) {
        let Some(anomaly_id) = anomaly_id else {
            return;
        };
        match tokio::time::timeout(self.timeout, self.anomaly_service.resolve(anomaly_id, note))
            .await
        {
            Ok(Ok(())) => tracing::debug!("Anomaly {anomaly_id} resolved"),
            Ok(Err(e)) => tracing::warn!("Failed to resolve anomaly {anomaly_id}: {e}"),
            Err(_) => tracing::warn!("Resolving anomaly {anomaly_id} timed out"),
        }
    }
}

#[cfg(test)]
mod tests {
    use domain_maintenance::mock::MockAnomalyService;
    use mockall::predicate::eq;

    use super::*;

    #[tokio::test]
    async fn failures_are_swallowed() {
        let id = Uuid::new_v4();
        let mut service = MockAnomalyService::new();
        service
            .expect_update_status()
            .with(eq(id), eq(AnomalyStatus::InAnalysis))
            .times(1)
            .returning(|_, _| Err(anyhow::anyhow!("connection refused")));
        let sync = AnomalySynchronizer::builder().anomaly_service(Arc::new(service)).build();
        sync.mark(Some(id), AnomalyStatus::InAnalysis).await;
    }

    #[tokio::test]
    async fn nothing_is_sent_without_anomaly() {
        let mut service = MockAnomalyService::new();
        service.expect_update_status().never();
        service.expect_resolve().never();
        let sync = AnomalySynchronizer::builder().anomaly_service(Arc::new(service)).build();
        sync.mark(None, AnomalyStatus::Awaiting).await;
        sync.resolve(None, None).await;
    }
}
