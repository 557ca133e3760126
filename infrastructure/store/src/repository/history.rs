use async_trait::async_trait;
use domain_maintenance::{
    model::entity::{HistoryEntry, HistoryOwner},
    repository::HistoryRepo,
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};

use super::OrmRepo;
use crate::model::prelude::*;

#[async_trait]
impl HistoryRepo for OrmRepo {
    async fn append(&self, entry: &HistoryEntry) -> anyhow::Result<()> {
        HistoryEntryEntity::insert(HistoryEntryActiveModel::try_from(entry)?)
            .exec_without_returning(&self.txn)
            .await?;
        Ok(())
    }

    async fn list_by_owner(&self, owner: HistoryOwner) -> anyhow::Result<Vec<HistoryEntry>> {
        let (owner_kind, owner_id) = HistoryEntryModel::owner_key(owner);
        HistoryEntryEntity::find()
            .filter(HistoryEntryColumn::OwnerKind.eq(owner_kind))
            .filter(HistoryEntryColumn::OwnerId.eq(owner_id))
            .order_by_asc(HistoryEntryColumn::Seq)
            .all(&self.txn)
            .await?
            .into_iter()
            .map(HistoryEntry::try_from)
            .collect()
    }
}
