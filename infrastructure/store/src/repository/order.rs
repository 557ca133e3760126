use anyhow::{bail, Context};
use architecture::{DBRepository, MutableRepository, PaginationResult, ReadOnlyRepository};
use async_trait::async_trait;
use domain_maintenance::{
    model::{entity::Order, vo::OrderFilter},
    repository::OrderRepo,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use super::OrmRepo;
use crate::model::prelude::*;

#[async_trait]
impl ReadOnlyRepository<Order> for OrmRepo {
    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Order>> {
        OrderEntity::find_by_id(id).one(&self.txn).await?.map(Order::try_from).transpose()
    }

    async fn get_all(&self) -> anyhow::Result<Vec<Order>> {
        OrderEntity::find()
            .order_by_asc(OrderColumn::CreatedAt)
            .all(&self.txn)
            .await?
            .into_iter()
            .map(Order::try_from)
            .collect()
    }
}

#[async_trait]
impl MutableRepository<Order> for OrmRepo {
    /// Number and programming are fixed once the order exists.
    async fn update(&self, entity: &Order) -> anyhow::Result<()> {
        let active_model = OrderActiveModel::from(OrderModel::try_from(entity)?);
        let result = OrderEntity::update_many()
            .set(active_model.reset_all())
            .filter(OrderColumn::Id.eq(entity.id))
            .filter(OrderColumn::Number.eq(entity.number.as_str()))
            .filter(OrderColumn::ProgrammingId.eq(entity.programming_id))
            .exec(&self.txn)
            .await?;
        if result.rows_affected == 0 {
            bail!(
                "No order with id: {} numbered {} for programming {}",
                entity.id,
                entity.number,
                entity.programming_id
            );
        }
        Ok(())
    }

    /// Rejects a duplicate number and a second order for the same programming.
    async fn insert(&self, entity: &Order) -> anyhow::Result<Uuid> {
        let active_model = OrderActiveModel::from(OrderModel::try_from(entity)?);
        OrderEntity::insert(active_model.reset_all())
            .exec_without_returning(&self.txn)
            .await
            .with_context(|| {
                format!(
                    "Order {} for programming {} clashes with a stored order",
                    entity.number, entity.programming_id
                )
            })?;
        Ok(entity.id)
    }
}

impl DBRepository<Order> for OrmRepo {}

#[async_trait]
impl OrderRepo for OrmRepo {
    async fn get_by_programming_id(&self, programming_id: Uuid) -> anyhow::Result<Option<Order>> {
        OrderEntity::find()
            .filter(OrderColumn::ProgrammingId.eq(programming_id))
            .one(&self.txn)
            .await?
            .map(Order::try_from)
            .transpose()
    }

    async fn next_number_sequence(&self, year: i32) -> anyhow::Result<u32> {
        self.next_sequence(Sequence::OrderNumber, year).await
    }

    async fn query(&self, filter: &OrderFilter) -> anyhow::Result<PaginationResult<Order>> {
        let mut select = OrderEntity::find();
        if let Some(status) = filter.status {
            select = select.filter(OrderColumn::Status.eq(status.to_string()));
        }
        if let Some(programming_id) = filter.programming_id {
            select = select.filter(OrderColumn::ProgrammingId.eq(programming_id));
        }
        let mut matches = Vec::new();
        for model in select.order_by_desc(OrderColumn::CreatedAt).all(&self.txn).await? {
            let order = Order::try_from(model)?;
            if filter.matches(&order) {
                matches.push(order);
            }
        }
        Ok(filter.pagination().apply(matches))
    }
}
