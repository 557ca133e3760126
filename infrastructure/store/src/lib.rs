//! SQL store of the maintenance workflow on sea-orm.
mod model;
mod repository;
mod schema;

use std::sync::Arc;

use async_trait::async_trait;
use domain_fleet::repository::ReservationRepo;
use domain_maintenance::repository::{
    HistoryRepo, MaintenanceStore, MaintenanceTransaction, OrderRepo, ProgrammingRepo,
};
use sea_orm::{ConnectOptions, DatabaseConnection, TransactionTrait};
use tokio::sync::{Mutex, OwnedMutexGuard};

use repository::OrmRepo;

/// Database holding programmings, orders, reservations and history.
///
/// Transactions take turns: `begin` waits until the previous transaction
/// has committed or been dropped, so a status read and the write depending
/// on it never interleave with another operation.
#[derive(Clone)]
pub struct OrmStore {
    db: DatabaseConnection,
    turn: Arc<Mutex<()>>,
}

impl OrmStore {
    /// Connects to `url` and creates missing tables.
    pub async fn connect(url: &str) -> anyhow::Result<Self> {
        let mut options = ConnectOptions::new(url.to_owned());
        options.max_connections(1).min_connections(1).sqlx_logging(false);
        let db = sea_orm::Database::connect(options).await?;
        schema::create_tables(&db).await?;
        tracing::debug!("Connected maintenance store");
        Ok(Self {
            db,
            turn: Arc::new(Mutex::new(())),
        })
    }

    /// Private SQLite database that lives as long as the store.
    pub async fn in_memory() -> anyhow::Result<Self> {
        Self::connect("sqlite::memory:").await
    }
}

#[async_trait]
impl MaintenanceStore for OrmStore {
    async fn begin(&self) -> anyhow::Result<Box<dyn MaintenanceTransaction>> {
        let turn = self.turn.clone().lock_owned().await;
        let txn = self.db.begin().await?;
        Ok(Box::new(OrmTransaction {
            repo: OrmRepo::new(txn),
            _turn: turn,
        }))
    }
}

/// Dropping it without `commit` rolls the database transaction back.
pub struct OrmTransaction {
    repo: OrmRepo,
    _turn: OwnedMutexGuard<()>,
}

#[async_trait]
impl MaintenanceTransaction for OrmTransaction {
    fn programmings(&self) -> &dyn ProgrammingRepo {
        &self.repo
    }

    fn orders(&self) -> &dyn OrderRepo {
        &self.repo
    }

    fn reservations(&self) -> &dyn ReservationRepo {
        &self.repo
    }

    fn histories(&self) -> &dyn HistoryRepo {
        &self.repo
    }

    async fn commit(self: Box<Self>) -> anyhow::Result<()> {
        let OrmTransaction { repo, _turn } = *self;
        repo.txn.commit().await?;
        tracing::debug!("Store transaction committed");
        Ok(())
    }
}

#[cfg(test)]
mod tests;
