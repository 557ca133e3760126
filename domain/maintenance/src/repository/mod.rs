mod history;
mod order;
mod programming;
mod store;

#[rustfmt::skip]
pub use {
    history::HistoryRepo,
    order::OrderRepo,
    programming::ProgrammingRepo,
    store::{MaintenanceStore, MaintenanceTransaction},
};
