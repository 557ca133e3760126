use anyhow::{bail, Context};
use architecture::{DBRepository, MutableRepository, PaginationResult, ReadOnlyRepository};
use async_trait::async_trait;
use domain_maintenance::{
    model::{entity::Programming, vo::ProgrammingFilter},
    repository::ProgrammingRepo,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use super::OrmRepo;
use crate::model::prelude::*;

#[async_trait]
impl ReadOnlyRepository<Programming> for OrmRepo {
    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Programming>> {
        ProgrammingEntity::find_by_id(id)
            .one(&self.txn)
            .await?
            .map(Programming::try_from)
            .transpose()
    }

    async fn get_all(&self) -> anyhow::Result<Vec<Programming>> {
        ProgrammingEntity::find()
            .order_by_asc(ProgrammingColumn::CreatedAt)
            .all(&self.txn)
            .await?
            .into_iter()
            .map(Programming::try_from)
            .collect()
    }
}

#[async_trait]
impl MutableRepository<Programming> for OrmRepo {
    async fn update(&self, entity: &Programming) -> anyhow::Result<()> {
        let active_model = ProgrammingActiveModel::from(ProgrammingModel::try_from(entity)?);
        let result = ProgrammingEntity::update_many()
            .set(active_model.reset_all())
            .filter(ProgrammingColumn::Id.eq(entity.id))
            .exec(&self.txn)
            .await
            .with_context(|| format!("Programming code {} is already taken", entity.code))?;
        if result.rows_affected == 0 {
            bail!("No programming with id: {}", entity.id);
        }
        Ok(())
    }

    async fn insert(&self, entity: &Programming) -> anyhow::Result<Uuid> {
        let active_model = ProgrammingActiveModel::from(ProgrammingModel::try_from(entity)?);
        ProgrammingEntity::insert(active_model.reset_all())
            .exec_without_returning(&self.txn)
            .await
            .with_context(|| {
                format!("Programming {} ({}) clashes with a stored one", entity.code, entity.id)
            })?;
        Ok(entity.id)
    }
}

impl DBRepository<Programming> for OrmRepo {}

#[async_trait]
impl ProgrammingRepo for OrmRepo {
    async fn next_code_sequence(&self, year: i32) -> anyhow::Result<u32> {
        self.next_sequence(Sequence::ProgrammingCode, year).await
    }

    async fn query(
        &self,
        filter: &ProgrammingFilter,
    ) -> anyhow::Result<PaginationResult<Programming>> {
        let mut select = ProgrammingEntity::find().filter(ProgrammingColumn::Deleted.eq(false));
        if let Some(status) = filter.status {
            select = select.filter(ProgrammingColumn::Status.eq(status.to_string()));
        }
        if let Some(anomaly_id) = filter.anomaly_id {
            select = select.filter(ProgrammingColumn::AnomalyId.eq(anomaly_id));
        }
        let mut matches = Vec::new();
        for model in select.order_by_desc(ProgrammingColumn::CreatedAt).all(&self.txn).await? {
            let programming = Programming::try_from(model)?;
            if filter.matches(&programming) {
                matches.push(programming);
            }
        }
        Ok(filter.pagination().apply(matches))
    }
}
