//! Histórico
use domain_maintenance::model::entity::{HistoryEntry, HistoryOwner};
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::{NotSet, Set};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "history_entry")]
pub struct Model {
    /// Insertion order.
    #[sea_orm(primary_key)]
    pub seq: i32,
    #[sea_orm(unique)]
    pub id: Uuid,
    pub owner_kind: String,
    pub owner_id: Uuid,
    pub content: Json,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Column values identifying an owner.
    pub fn owner_key(owner: HistoryOwner) -> (&'static str, Uuid) {
        match owner {
            HistoryOwner::Programming(id) => ("PROGRAMACAO", id),
            HistoryOwner::Order(id) => ("ORDEM", id),
        }
    }
}

impl TryFrom<&HistoryEntry> for ActiveModel {
    type Error = anyhow::Error;

    fn try_from(entry: &HistoryEntry) -> Result<Self, Self::Error> {
        let (owner_kind, owner_id) = Model::owner_key(entry.owner);
        Ok(Self {
            seq: NotSet,
            id: Set(entry.id),
            owner_kind: Set(owner_kind.to_string()),
            owner_id: Set(owner_id),
            content: Set(serde_json::to_value(entry)?),
        })
    }
}

impl TryFrom<Model> for HistoryEntry {
    type Error = anyhow::Error;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(serde_json::from_value(model.content)?)
    }
}
