mod history;
mod order;
mod programming;
mod reservation;

use sea_orm::{ActiveValue::Set, ActiveModelTrait, DatabaseTransaction, EntityTrait};

use crate::model::prelude::*;

/// Repositories of one open database transaction.
pub struct OrmRepo {
    pub(crate) txn: DatabaseTransaction,
}

impl OrmRepo {
    pub(crate) fn new(txn: DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Next value of `sequence` for `year`, starting at 1.
    pub(crate) async fn next_sequence(&self, sequence: Sequence, year: i32) -> anyhow::Result<u32> {
        let name = sequence.name().to_string();
        let value = match NumberSequenceEntity::find_by_id((name.clone(), year))
            .one(&self.txn)
            .await?
        {
            Some(row) => {
                let value = row.value + 1;
                let mut active_model: NumberSequenceActiveModel = row.into();
                active_model.value = Set(value);
                active_model.update(&self.txn).await?;
                value
            }
            None => {
                let active_model = NumberSequenceActiveModel {
                    name: Set(name),
                    year: Set(year),
                    value: Set(1),
                };
                NumberSequenceEntity::insert(active_model)
                    .exec_without_returning(&self.txn)
                    .await?;
                1
            }
        };
        Ok(u32::try_from(value)?)
    }
}
