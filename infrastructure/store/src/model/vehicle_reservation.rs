//! Reserva de veículo
use domain_fleet::model::entity::{ReservationOwner, VehicleReservation};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "vehicle_reservation")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub owner_kind: String,
    pub owner_id: Uuid,
    pub status: String,
    pub created_at: DateTimeUtc,
    pub content: Json,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Column values identifying a requester.
    pub fn owner_key(owner: ReservationOwner) -> (&'static str, Uuid) {
        match owner {
            ReservationOwner::Programming(id) => ("programacao_os", id),
            ReservationOwner::Order(id) => ("ordem_servico", id),
        }
    }
}

impl TryFrom<&VehicleReservation> for Model {
    type Error = anyhow::Error;

    fn try_from(r: &VehicleReservation) -> Result<Self, Self::Error> {
        let (owner_kind, owner_id) = Self::owner_key(r.owner);
        Ok(Self {
            id: r.id,
            owner_kind: owner_kind.to_string(),
            owner_id,
            status: r.status.to_string(),
            created_at: r.created_at,
            content: serde_json::to_value(r)?,
        })
    }
}

impl TryFrom<Model> for VehicleReservation {
    type Error = anyhow::Error;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(serde_json::from_value(model.content)?)
    }
}
