pub mod checklist;
pub mod history;
pub mod order;
pub mod planning;
pub mod programming;
pub mod resource;

#[rustfmt::skip]
pub use {
    checklist::ChecklistItem,
    history::{HistoryAction, HistoryEntry, HistoryOwner, StatusChange},
    order::{Order, OrderStatus},
    planning::Planning,
    programming::{Programming, ProgrammingStatus},
    resource::ResourcePlan,
};
