use std::sync::Arc;

use domain_maintenance::{
    repository::MaintenanceStore,
    service::{AnomalyService, AssetLookupService, OrderService, ProgrammingService},
};
use infrastructure_store::OrmStore;
use service_maintenance::{AnomalySynchronizer, OrderServiceImpl, ProgrammingServiceImpl};

use super::config::MaintenanceConfig;
use super::external::{
    build_http_client, HttpAnomalyService, HttpAssetLookupService, LoggingAnomalyService,
    PermissiveAssetLookupService,
};

/// Every long-lived service of the process, wired once at startup.
#[derive(Clone)]
pub struct ServiceProvider {
    pub config: MaintenanceConfig,
    pub programming_service: Arc<dyn ProgrammingService>,
    pub order_service: Arc<dyn OrderService>,
}

impl ServiceProvider {
    pub async fn build(config: MaintenanceConfig) -> anyhow::Result<Self> {
        let http_client = build_http_client(&config.external)?;

        let anomaly_service: Arc<dyn AnomalyService> = match &config.external.anomaly_base_url {
            Some(base_url) => Arc::new(
                HttpAnomalyService::builder()
                    .client(http_client.clone())
                    .base_url(base_url)
                    .build(),
            ),
            None => {
                tracing::warn!("No anomaly registry configured, anomaly updates are only logged.");
                Arc::new(LoggingAnomalyService)
            }
        };
        let asset_lookup: Arc<dyn AssetLookupService> = match &config.external.asset_base_url {
            Some(base_url) => Arc::new(
                HttpAssetLookupService::builder()
                    .client(http_client.clone())
                    .base_url(base_url)
                    .build(),
            ),
            None => {
                tracing::warn!(
                    "No asset registry configured, every referenced plant, equipment, plan \
                     and vehicle is accepted without checking."
                );
                Arc::new(PermissiveAssetLookupService)
            }
        };

        let settings = config.workflow.settings();
        let store: Arc<dyn MaintenanceStore> =
            Arc::new(OrmStore::connect(&config.database.url).await?);
        let anomaly_sync = AnomalySynchronizer::builder()
            .anomaly_service(anomaly_service)
            .timeout(settings.anomaly_sync_timeout)
            .build();

        let programming_service = Arc::new(
            ProgrammingServiceImpl::builder()
                .store(store.clone())
                .asset_lookup(asset_lookup)
                .anomaly_sync(anomaly_sync.clone())
                .settings(settings)
                .build(),
        );
        let order_service = Arc::new(
            OrderServiceImpl::builder()
                .store(store)
                .anomaly_sync(anomaly_sync)
                .settings(settings)
                .build(),
        );

        Ok(Self {
            config,
            programming_service,
            order_service,
        })
    }
}
