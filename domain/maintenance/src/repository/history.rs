use async_trait::async_trait;

use crate::model::entity::{HistoryEntry, HistoryOwner};

/// Append-only audit log.
#[async_trait]
pub trait HistoryRepo: Send + Sync {
    async fn append(&self, entry: &HistoryEntry) -> anyhow::Result<()>;

    async fn append_list(&self, entries: &[HistoryEntry]) -> anyhow::Result<()> {
        for entry in entries {
            self.append(entry).await?;
        }
        Ok(())
    }

    /// Entries of one owner in insertion order.
    async fn list_by_owner(&self, owner: HistoryOwner) -> anyhow::Result<Vec<HistoryEntry>>;
}
