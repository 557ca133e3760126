use uuid::Uuid;

/// Write side of a repository. Writes are staged in the surrounding unit of
/// work and only become visible once it commits.
#[async_trait::async_trait]
pub trait MutableRepository<T>: Send + Sync
where
    T: Send + Sync + crate::model::AggregateRoot,
{
    /// Replaces an existing aggregate.
    async fn update(&self, entity: &T) -> anyhow::Result<()>;
    /// Inserts a new aggregate and returns its id.
    async fn insert(&self, entity: &T) -> anyhow::Result<Uuid>;
    /// Inserts several aggregates.
    async fn insert_list(&self, entities: &[T]) -> anyhow::Result<Vec<Uuid>> {
        let mut ids = Vec::with_capacity(entities.len());
        for entity in entities {
            ids.push(self.insert(entity).await?);
        }
        Ok(ids)
    }
}
