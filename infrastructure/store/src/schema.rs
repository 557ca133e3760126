use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait, Schema};

use crate::model::prelude::*;

async fn create_table<E: EntityTrait>(db: &DatabaseConnection, entity: E) -> anyhow::Result<()> {
    let backend = db.get_database_backend();
    let stmt = Schema::new(backend).create_table_from_entity(entity).if_not_exists().to_owned();
    db.execute(backend.build(&stmt)).await?;
    Ok(())
}

/// Creates the tables that do not exist yet.
pub(crate) async fn create_tables(db: &DatabaseConnection) -> anyhow::Result<()> {
    create_table(db, ProgrammingEntity).await?;
    create_table(db, OrderEntity).await?;
    create_table(db, ReservationEntity).await?;
    create_table(db, HistoryEntryEntity).await?;
    create_table(db, NumberSequenceEntity).await?;
    Ok(())
}
