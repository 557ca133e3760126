use anyhow::{bail, Context};
use architecture::{DBRepository, MutableRepository, ReadOnlyRepository};
use async_trait::async_trait;
use domain_fleet::{
    model::entity::{ReservationOwner, VehicleReservation},
    repository::ReservationRepo,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use super::OrmRepo;
use crate::model::prelude::*;

#[async_trait]
impl ReadOnlyRepository<VehicleReservation> for OrmRepo {
    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<VehicleReservation>> {
        ReservationEntity::find_by_id(id)
            .one(&self.txn)
            .await?
            .map(VehicleReservation::try_from)
            .transpose()
    }

    async fn get_all(&self) -> anyhow::Result<Vec<VehicleReservation>> {
        ReservationEntity::find()
            .order_by_asc(ReservationColumn::CreatedAt)
            .all(&self.txn)
            .await?
            .into_iter()
            .map(VehicleReservation::try_from)
            .collect()
    }
}

#[async_trait]
impl MutableRepository<VehicleReservation> for OrmRepo {
    async fn update(&self, entity: &VehicleReservation) -> anyhow::Result<()> {
        let active_model = ReservationActiveModel::from(ReservationModel::try_from(entity)?);
        let result = ReservationEntity::update_many()
            .set(active_model.reset_all())
            .filter(ReservationColumn::Id.eq(entity.id))
            .exec(&self.txn)
            .await?;
        if result.rows_affected == 0 {
            bail!("No reservation with id: {}", entity.id);
        }
        Ok(())
    }

    async fn insert(&self, entity: &VehicleReservation) -> anyhow::Result<Uuid> {
        let active_model = ReservationActiveModel::from(ReservationModel::try_from(entity)?);
        ReservationEntity::insert(active_model.reset_all())
            .exec_without_returning(&self.txn)
            .await
            .with_context(|| format!("Reservation {} already exists", entity.id))?;
        Ok(entity.id)
    }
}

impl DBRepository<VehicleReservation> for OrmRepo {}

#[async_trait]
impl ReservationRepo for OrmRepo {
    async fn get_by_owner(
        &self,
        owner: ReservationOwner,
    ) -> anyhow::Result<Vec<VehicleReservation>> {
        let (owner_kind, owner_id) = ReservationModel::owner_key(owner);
        ReservationEntity::find()
            .filter(ReservationColumn::OwnerKind.eq(owner_kind))
            .filter(ReservationColumn::OwnerId.eq(owner_id))
            .order_by_asc(ReservationColumn::CreatedAt)
            .all(&self.txn)
            .await?
            .into_iter()
            .map(VehicleReservation::try_from)
            .collect()
    }
}
