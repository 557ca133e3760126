//! Yearly counters behind programming codes and order numbers.
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "number_sequence")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub name: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub year: i32,
    /// Last value handed out.
    pub value: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sequence {
    ProgrammingCode,
    OrderNumber,
}

impl Sequence {
    pub fn name(&self) -> &'static str {
        match self {
            Sequence::ProgrammingCode => "programming_code",
            Sequence::OrderNumber => "order_number",
        }
    }
}
