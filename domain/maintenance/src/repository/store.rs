use async_trait::async_trait;
use domain_fleet::repository::ReservationRepo;

use super::{HistoryRepo, OrderRepo, ProgrammingRepo};

/// Opens units of work over the maintenance tables.
#[async_trait]
pub trait MaintenanceStore: Send + Sync {
    async fn begin(&self) -> anyhow::Result<Box<dyn MaintenanceTransaction>>;
}

/// One unit of work. Reads see the writes staged so far; nothing is visible
/// to other transactions until `commit`. Dropping it rolls back.
#[async_trait]
pub trait MaintenanceTransaction: Send + Sync {
    fn programmings(&self) -> &dyn ProgrammingRepo;

    fn orders(&self) -> &dyn OrderRepo;

    fn reservations(&self) -> &dyn ReservationRepo;

    fn histories(&self) -> &dyn HistoryRepo;

    async fn commit(self: Box<Self>) -> anyhow::Result<()>;
}
