use std::sync::Arc;

use chrono::{Duration, Utc};
use domain_fleet::model::vo::VehicleRequest;
use domain_maintenance::{
    mock::{MockAnomalyService, MockAssetLookupService},
    model::vo::{NewMaterial, NewProgramming},
    service::AssetLookupService,
};
use infrastructure_store::OrmStore;
use service_maintenance::{AnomalySynchronizer, OrderServiceImpl, ProgrammingServiceImpl};
use uuid::Uuid;

pub struct Workflow {
    pub store: OrmStore,
    pub programmings: ProgrammingServiceImpl,
    pub orders: OrderServiceImpl,
}

/// Services over a fresh in-memory database.
pub async fn workflow(
    lookup: impl AssetLookupService + 'static,
    anomaly: MockAnomalyService,
) -> Workflow {
    let store = OrmStore::in_memory().await.unwrap();
    let anomaly_sync = AnomalySynchronizer::builder()
        .anomaly_service(Arc::new(anomaly))
        .build();
    Workflow {
        programmings: ProgrammingServiceImpl::builder()
            .store(Arc::new(store.clone()))
            .asset_lookup(Arc::new(lookup))
            .anomaly_sync(anomaly_sync.clone())
            .build(),
        orders: OrderServiceImpl::builder()
            .store(Arc::new(store.clone()))
            .anomaly_sync(anomaly_sync)
            .build(),
        store,
    }
}

/// Every reference exists and every anomaly call succeeds.
pub async fn permissive() -> Workflow {
    workflow(known_assets(), quiet_anomalies()).await
}

pub fn known_assets() -> MockAssetLookupService {
    let mut lookup = MockAssetLookupService::new();
    lookup.expect_exists().returning(|_| Ok(true));
    lookup
}

pub fn quiet_anomalies() -> MockAnomalyService {
    let mut anomaly = MockAnomalyService::new();
    anomaly.expect_update_status().returning(|_, _| Ok(()));
    anomaly.expect_resolve().returning(|_, _| Ok(()));
    anomaly
}

/// Panel cleaning with 5 L of detergent at 10 per litre.
pub fn panel_cleaning() -> NewProgramming {
    NewProgramming {
        description: "Limpeza dos módulos da string 3".to_string(),
        materials: vec![NewMaterial {
            description: "Detergente neutro".to_string(),
            unit: Some("L".to_string()),
            quantity: 5.0,
            unit_cost: 10.0,
            ..Default::default()
        }],
        ..Default::default()
    }
}

/// Pickup for a day of work, leaving with 12 000 km.
pub fn pickup() -> VehicleRequest {
    let start = Utc::now() + Duration::days(2);
    VehicleRequest {
        vehicle_id: Uuid::new_v4(),
        starts_at: start,
        ends_at: start + Duration::hours(8),
        purpose: Some("Deslocamento até a usina".to_string()),
        odometer_start: Some(12_000.0),
    }
}

/// Panel cleaning that needs [`pickup`].
pub fn panel_cleaning_with_vehicle() -> NewProgramming {
    NewProgramming {
        needs_vehicle: true,
        vehicle_request: Some(pickup()),
        ..panel_cleaning()
    }
}
