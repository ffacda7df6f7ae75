//! Listing scopes: the filter context a todo list is bound to.

use serde::{Deserialize, Serialize};

use crate::sort_policy::TodoSortPolicy;
use crate::types::DbId;

/// Filter context for listing todos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Scope {
    /// Todos belonging to one project.
    Project(DbId),
    /// Todos belonging to one organization.
    Organization(DbId),
    /// Todos with neither urgency nor importance set.
    Unclassified,
}

impl Scope {
    /// Ordering used when rendering this scope.
    ///
    /// The unclassified list is already filtered and favours recency; every
    /// entity-bound list uses the status-tiered ordering.
    pub fn sort_policy(&self) -> TodoSortPolicy {
        match self {
            Self::Unclassified => TodoSortPolicy::Recency,
            Self::Project(_) | Self::Organization(_) => TodoSortPolicy::StatusTiered,
        }
    }

    pub fn project_id(&self) -> Option<DbId> {
        match self {
            Self::Project(id) => Some(*id),
            _ => None,
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Project(id) => write!(f, "project:{id}"),
            Self::Organization(id) => write!(f, "organization:{id}"),
            Self::Unclassified => f.write_str("unclassified"),
        }
    }
}
