//! Typed intents forwarded from the presentation layer to the controller.

use todoview_core::todo::{PlanInput, Todo, TodoInput};
use todoview_core::types::DbId;

/// Whether the user confirmed a destructive action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

impl From<bool> for Confirmation {
    fn from(confirmed: bool) -> Self {
        if confirmed {
            Self::Confirmed
        } else {
            Self::Declined
        }
    }
}

/// A user intent dispatched into [`TodoListController`](crate::controller::TodoListController).
#[derive(Debug, Clone, PartialEq)]
pub enum TodoCommand {
    Load,
    LoadMore,
    Retry,
    Create(TodoInput),
    Update { id: DbId, input: TodoInput },
    Delete { id: DbId, confirmation: Confirmation },
    Plan { id: DbId, plan: PlanInput },
}

/// Result of a successfully handled [`TodoCommand`].
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    /// The list was (re)loaded from offset 0.
    Loaded,
    /// "Load more" appended this many items (zero when nothing was fetched).
    Appended(usize),
    /// A todo was created or updated and the list resynced.
    Saved(Todo),
    /// A todo was deleted and the list resynced.
    Deleted,
    /// Deletion was not confirmed; nothing happened.
    DeleteDeclined,
}
