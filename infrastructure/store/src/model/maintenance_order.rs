//! Ordem de serviço
use domain_maintenance::model::entity::Order;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "maintenance_order")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub number: String,
    /// One order per programming.
    #[sea_orm(unique)]
    pub programming_id: Uuid,
    pub status: String,
    pub created_at: DateTimeUtc,
    pub content: Json,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<&Order> for Model {
    type Error = anyhow::Error;

    fn try_from(o: &Order) -> Result<Self, Self::Error> {
        Ok(Self {
            id: o.id,
            number: o.number.clone(),
            programming_id: o.programming_id,
            status: o.status.to_string(),
            created_at: o.audit.created_at,
            content: serde_json::to_value(o)?,
        })
    }
}

impl TryFrom<Model> for Order {
    type Error = anyhow::Error;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(serde_json::from_value(model.content)?)
    }
}
