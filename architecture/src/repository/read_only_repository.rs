use uuid::Uuid;

/// Read side of a repository.
#[async_trait::async_trait]
pub trait ReadOnlyRepository<T>: Send + Sync
where
    T: Send + crate::model::AggregateRoot,
{
    /// Gets one aggregate by id, `None` when absent.
    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<T>>;
    /// Gets every aggregate.
    async fn get_all(&self) -> anyhow::Result<Vec<T>>;
}
