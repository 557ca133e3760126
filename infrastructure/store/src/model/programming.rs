//! Programação OS
use domain_maintenance::model::entity::Programming;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "programming")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub code: String,
    pub status: String,
    pub anomaly_id: Option<Uuid>,
    pub deleted: bool,
    pub created_at: DateTimeUtc,
    pub content: Json,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<&Programming> for Model {
    type Error = anyhow::Error;

    fn try_from(p: &Programming) -> Result<Self, Self::Error> {
        Ok(Self {
            id: p.id,
            code: p.code.clone(),
            status: p.status.to_string(),
            anomaly_id: p.planning.links.anomaly_id,
            deleted: p.is_deleted(),
            created_at: p.audit.created_at,
            content: serde_json::to_value(p)?,
        })
    }
}

impl TryFrom<Model> for Programming {
    type Error = anyhow::Error;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(serde_json::from_value(model.content)?)
    }
}
