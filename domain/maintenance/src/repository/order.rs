use architecture::{DBRepository, PaginationResult};
use async_trait::async_trait;
use uuid::Uuid;

use crate::model::{entity::Order, vo::OrderFilter};

#[async_trait]
pub trait OrderRepo: DBRepository<Order> + Send + Sync {
    /// The order generated from a programming, if any.
    async fn get_by_programming_id(&self, programming_id: Uuid) -> anyhow::Result<Option<Order>>;

    /// Next value of the order number sequence of `year`, starting at 1.
    async fn next_number_sequence(&self, year: i32) -> anyhow::Result<u32>;

    async fn query(&self, filter: &OrderFilter) -> anyhow::Result<PaginationResult<Order>>;
}
