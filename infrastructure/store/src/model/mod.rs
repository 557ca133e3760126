//! Table models. Each aggregate is kept whole in a json `content` column next
//! to the columns used for lookups, ordering and uniqueness.
mod history_entry;
mod maintenance_order;
mod number_sequence;
mod programming;
mod vehicle_reservation;

pub mod prelude {
    #[rustfmt::skip]
    pub use super::{
        history_entry::{
            ActiveModel as HistoryEntryActiveModel, Column as HistoryEntryColumn,
            Entity as HistoryEntryEntity, Model as HistoryEntryModel,
        },
        maintenance_order::{
            ActiveModel as OrderActiveModel, Column as OrderColumn, Entity as OrderEntity,
            Model as OrderModel,
        },
        number_sequence::{
            ActiveModel as NumberSequenceActiveModel, Entity as NumberSequenceEntity,
            Sequence,
        },
        programming::{
            ActiveModel as ProgrammingActiveModel, Column as ProgrammingColumn,
            Entity as ProgrammingEntity, Model as ProgrammingModel,
        },
        vehicle_reservation::{
            ActiveModel as ReservationActiveModel, Column as ReservationColumn,
            Entity as ReservationEntity, Model as ReservationModel,
        },
    };
}
