use architecture::{DBRepository, PaginationResult};
use async_trait::async_trait;

use crate::model::{entity::Programming, vo::ProgrammingFilter};

#[async_trait]
pub trait ProgrammingRepo: DBRepository<Programming> + Send + Sync {
    /// Next value of the programming code sequence of `year`, starting at 1.
    async fn next_code_sequence(&self, year: i32) -> anyhow::Result<u32>;

    /// Programmings matching the filter, newest first. Deleted ones are left out.
    async fn query(
        &self,
        filter: &ProgrammingFilter,
    ) -> anyhow::Result<PaginationResult<Programming>>;
}
