use architecture::Pagination;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::entity::planning::{MaintenanceKind, Priority, ProgrammingOrigin};
use crate::model::entity::{Order, OrderStatus, Programming, ProgrammingStatus};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProgrammingFilter {
    pub status: Option<ProgrammingStatus>,
    pub priority: Option<Priority>,
    pub kind: Option<MaintenanceKind>,
    pub origin: Option<ProgrammingOrigin>,
    pub anomaly_id: Option<Uuid>,
    /// Case-insensitive match over code and description.
    pub text: Option<String>,
    pub page_size: Option<usize>,
    pub page_index: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub programming_id: Option<Uuid>,
    /// Case-insensitive match over number, programming code and description.
    pub text: Option<String>,
    pub page_size: Option<usize>,
    pub page_index: Option<usize>,
}

fn pagination(page_size: Option<usize>, page_index: Option<usize>) -> Pagination {
    let default = Pagination::default();
    Pagination {
        page_size: page_size.unwrap_or(default.page_size),
        page_index: page_index.unwrap_or(default.page_index),
    }
}

fn contains_text(needle: &Option<String>, haystacks: &[&str]) -> bool {
    match needle.as_deref().map(str::trim) {
        None | Some("") => true,
        Some(needle) => {
            let needle = needle.to_lowercase();
            haystacks.iter().any(|h| h.to_lowercase().contains(&needle))
        }
    }
}

impl ProgrammingFilter {
    pub fn pagination(&self) -> Pagination {
        pagination(self.page_size, self.page_index)
    }

    /// Deleted programmings never match.
    pub fn matches(&self, programming: &Programming) -> bool {
        let planning = &programming.planning;
        !programming.is_deleted()
            && self.status.map_or(true, |s| s == programming.status)
            && self.priority.map_or(true, |p| p == planning.priority)
            && self.kind.map_or(true, |k| k == planning.kind)
            && self.origin.map_or(true, |o| o == planning.origin)
            && self.anomaly_id.map_or(true, |a| Some(a) == planning.links.anomaly_id)
            && contains_text(&self.text, &[&programming.code, &planning.description])
    }
}

impl OrderFilter {
    pub fn pagination(&self) -> Pagination {
        pagination(self.page_size, self.page_index)
    }

    pub fn matches(&self, order: &Order) -> bool {
        self.status.map_or(true, |s| s == order.status)
            && self.programming_id.map_or(true, |p| p == order.programming_id)
            && contains_text(
                &self.text,
                &[&order.number, &order.programming_code, &order.planning.description],
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_matches_everything() {
        assert!(contains_text(&None, &["PRG-2026-0001"]));
        assert!(contains_text(&Some("  ".to_string()), &["PRG-2026-0001"]));
        assert!(contains_text(&Some("prg-2026".to_string()), &["PRG-2026-0001"]));
        assert!(!contains_text(&Some("OS-".to_string()), &["PRG-2026-0001"]));
    }

    #[test]
    fn pagination_falls_back_to_defaults() {
        let filter = ProgrammingFilter {
            page_index: Some(3),
            ..Default::default()
        };
        assert_eq!(
            filter.pagination(),
            Pagination {
                page_size: 20,
                page_index: 3
            }
        );
    }
}
