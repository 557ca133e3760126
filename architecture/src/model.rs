use serde::{Deserialize, Serialize};

/// Marker for entities that are loaded and persisted as a whole.
pub trait AggregateRoot {}

/// Page request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Page size, at least 1.
    pub page_size: usize,
    /// Zero based page index.
    pub page_index: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page_size: 20,
            page_index: 0,
        }
    }
}

impl Pagination {
    /// Slices an already filtered and ordered list.
    pub fn apply<T>(&self, items: Vec<T>) -> PaginationResult<T> {
        let total = items.len();
        let size = self.page_size.max(1);
        let skip = self.page_index.saturating_mul(size);
        let items = items.into_iter().skip(skip).take(size).collect();
        PaginationResult { items, total }
    }
}

/// Page of results.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationResult<T> {
    pub items: Vec<T>,
    /// Number of matches before paging.
    pub total: usize,
}
