//! Display ordering and header counts for todo lists.
//!
//! Both policies are pure: they take a snapshot slice and return a new
//! vector, leaving the input untouched. Orderings are total (ties end on
//! `id`), so sorting an already sorted list is the identity.

use std::cmp::Ordering;

use serde::Serialize;

use crate::presentation::is_overdue;
use crate::todo::{Todo, TodoStatus};
use crate::types::Date;

/// Rank given to statuses the client does not recognise.
pub const UNKNOWN_STATUS_RANK: u8 = 99;

/// Ordering applied to a todo list before rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TodoSortPolicy {
    /// Status tier, then due date (dated first, ascending), then newest first.
    #[default]
    StatusTiered,
    /// Newest first only.
    Recency,
}

impl TodoSortPolicy {
    /// Sorted copy of `items`.
    pub fn sort(&self, items: &[Todo]) -> Vec<Todo> {
        let mut sorted = items.to_vec();
        sorted.sort_by(|a, b| self.compare(a, b));
        sorted
    }

    /// Comparator backing [`sort`](Self::sort).
    pub fn compare(&self, a: &Todo, b: &Todo) -> Ordering {
        match self {
            Self::StatusTiered => status_rank(&a.status)
                .cmp(&status_rank(&b.status))
                .then_with(|| compare_due_dates(a.due_date, b.due_date))
                .then_with(|| b.created_at.cmp(&a.created_at))
                .then_with(|| a.id.cmp(&b.id)),
            Self::Recency => b
                .created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.cmp(&b.id)),
        }
    }
}

/// Primary sort key: `Open=0, Started=1, Completed=2, Cancelled=3`.
pub fn status_rank(status: &TodoStatus) -> u8 {
    match status {
        TodoStatus::Open => 0,
        TodoStatus::Started => 1,
        TodoStatus::Completed => 2,
        TodoStatus::Cancelled => 3,
        TodoStatus::Unknown(_) => UNKNOWN_STATUS_RANK,
    }
}

/// Dated items come first (ascending); undated items compare equal.
fn compare_due_dates(a: Option<Date>, b: Option<Date>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

// ---------------------------------------------------------------------------
// Counts
// ---------------------------------------------------------------------------

/// Header statistics for a list. Cancelled is the remainder of
/// `total - open - started - completed` and is not tracked separately.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub open: usize,
    pub started: usize,
    pub completed: usize,
    pub overdue: usize,
}

impl StatusCounts {
    pub fn from_items(items: &[Todo], today: Date) -> Self {
        items.iter().fold(Self::default(), |mut counts, todo| {
            match todo.status {
                TodoStatus::Open => counts.open += 1,
                TodoStatus::Started => counts.started += 1,
                TodoStatus::Completed => counts.completed += 1,
                _ => {}
            }
            if is_overdue(todo, today) {
                counts.overdue += 1;
            }
            counts
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
