//! Per-view list controller: loading, pagination, and mutations.
//!
//! A [`TodoListController`] is owned by exactly one view. Every command
//! takes `&mut self`, so a mutation's resync load always starts after the
//! mutation's own request has completed and two "load more" requests can
//! never overlap. Hosts render from [`ViewSnapshot`]s, which are owned
//! copies.
//!
//! State machine: `Idle -> Loading -> {Ready, Errored}`; any reload moves
//! back to `Loading`. "Load more" is layered on `Ready` and never changes
//! the top-level state.

use std::sync::Arc;

use serde::Serialize;
use todoview_core::error::CoreError;
use todoview_core::pagination::{clamp_limit, ListPage, PageRequest, TodoPage};
use todoview_core::presentation::TodoRow;
use todoview_core::scope::Scope;
use todoview_core::sort_policy::{StatusCounts, TodoSortPolicy};
use todoview_core::todo::{Organization, PlanInput, Project, Todo, TodoInput};
use todoview_core::types::{Date, DbId};

use crate::command::{CommandOutcome, Confirmation, TodoCommand};
use crate::data_access::TodoDataAccess;
use crate::error::{ClientError, FailureKind, LOAD_FAILED_MESSAGE, MUTATION_FAILED_MESSAGE};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Top-level loading state of a list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewState {
    #[default]
    Idle,
    Loading,
    Ready,
    Errored,
}

/// Header lookups shown above a scoped list.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScopeHeader {
    pub project: Option<Project>,
    pub organization: Option<Organization>,
}

/// Immutable render-time copy of a controller's state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewSnapshot {
    pub scope: Scope,
    pub state: ViewState,
    /// Items in display order.
    pub items: Vec<Todo>,
    pub counts: StatusCounts,
    pub total_count: usize,
    pub has_more: bool,
    /// User-facing message of the last failed load.
    pub error: Option<String>,
    pub header: Option<ScopeHeader>,
    /// Date used for overdue calculations.
    pub today: Date,
}

impl ViewSnapshot {
    /// Display rows in the same order as [`items`](Self::items).
    pub fn rows(&self) -> Vec<TodoRow> {
        self.items
            .iter()
            .map(|todo| TodoRow::from_todo(todo, self.today))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

pub struct TodoListController<D: TodoDataAccess + ?Sized> {
    data: Arc<D>,
    scope: Scope,
    page_size: usize,
    sort_policy: TodoSortPolicy,
    state: ViewState,
    list: ListPage,
    error: Option<String>,
    header: Option<ScopeHeader>,
}

impl<D: TodoDataAccess + ?Sized> TodoListController<D> {
    /// Create a controller in the `Idle` state. Nothing is fetched until
    /// [`load`](Self::load) is called.
    pub fn new(data: Arc<D>, scope: Scope, page_size: usize) -> Self {
        Self {
            data,
            scope,
            page_size: clamp_limit(Some(page_size)),
            sort_policy: scope.sort_policy(),
            state: ViewState::Idle,
            list: ListPage::new(),
            error: None,
            header: None,
        }
    }

    /// Override the ordering chosen from the scope.
    pub fn with_sort_policy(mut self, policy: TodoSortPolicy) -> Self {
        self.sort_policy = policy;
        self
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn has_more(&self) -> bool {
        self.list.has_more()
    }

    /// Raw items in fetch order.
    pub fn items(&self) -> &[Todo] {
        self.list.items()
    }

    pub fn total_count(&self) -> usize {
        self.list.total_count()
    }

    pub fn offset(&self) -> usize {
        self.list.offset()
    }

    /// Snapshot using today's UTC date for overdue flags.
    pub fn snapshot(&self) -> ViewSnapshot {
        self.snapshot_at(chrono::Utc::now().date_naive())
    }

    pub fn snapshot_at(&self, today: Date) -> ViewSnapshot {
        let items = self.sort_policy.sort(self.list.items());
        ViewSnapshot {
            scope: self.scope,
            state: self.state,
            counts: StatusCounts::from_items(&items, today),
            items,
            total_count: self.list.total_count(),
            has_more: self.list.has_more(),
            error: self.error.clone(),
            header: self.header.clone(),
            today,
        }
    }

    // ---- loading ----

    /// Fetch the first page, replacing the list on success.
    ///
    /// On failure the previous items are kept, the state becomes `Errored`
    /// and a user-facing message is recorded.
    pub async fn load(&mut self) -> Result<(), ClientError> {
        self.state = ViewState::Loading;
        let request = PageRequest::first(self.page_size);

        match self.fetch(request).await {
            Ok(page) => {
                self.list.replace(page);
                self.error = None;
                self.state = ViewState::Ready;
                tracing::info!(
                    scope = %self.scope,
                    items = self.list.items().len(),
                    total = self.list.total_count(),
                    "Todo list loaded",
                );
                Ok(())
            }
            Err(err) => {
                tracing::error!(
                    scope = %self.scope,
                    failure = %FailureKind::Load,
                    error = %err,
                    "Failed to load todo list",
                );
                self.error = Some(err.user_message(LOAD_FAILED_MESSAGE));
                self.state = ViewState::Errored;
                Err(err)
            }
        }
    }

    /// Reload after a failure. Equivalent to [`load`](Self::load).
    pub async fn retry(&mut self) -> Result<(), ClientError> {
        self.load().await
    }

    /// Fetch the next page and append it.
    ///
    /// Returns the number of appended items. Does nothing unless the view is
    /// `Ready` with more items available. Failures are logged and leave the
    /// list exactly as it was.
    pub async fn load_more(&mut self) -> usize {
        if self.state != ViewState::Ready || !self.list.has_more() {
            return 0;
        }
        let request = self.list.next_request(self.page_size);

        match self.fetch(request).await {
            Ok(page) => {
                let appended = page.items.len();
                self.list.append(page);
                tracing::debug!(
                    scope = %self.scope,
                    offset = request.offset,
                    appended,
                    "Loaded more todos",
                );
                appended
            }
            Err(err) => {
                tracing::warn!(
                    scope = %self.scope,
                    failure = %FailureKind::Pagination,
                    offset = request.offset,
                    error = %err,
                    "Failed to load more todos",
                );
                0
            }
        }
    }

    /// Fetch project/organization details for the header.
    ///
    /// Lookup failures are logged and leave the corresponding field empty.
    pub async fn load_header(&mut self) {
        let mut header = ScopeHeader::default();
        let organization_id = match self.scope {
            Scope::Project(id) => match self.data.fetch_project(id).await {
                Ok(project) => {
                    let org = project.organization_id;
                    header.project = Some(project);
                    org
                }
                Err(err) => {
                    tracing::warn!(project_id = id, error = %err, "Failed to load project");
                    None
                }
            },
            Scope::Organization(id) => Some(id),
            Scope::Unclassified => {
                self.header = None;
                return;
            }
        };

        if let Some(org_id) = organization_id {
            match self.data.fetch_organization(org_id).await {
                Ok(org) => header.organization = Some(org),
                Err(err) => {
                    tracing::warn!(organization_id = org_id, error = %err, "Failed to load organization");
                }
            }
        }
        self.header = Some(header);
    }

    // ---- mutations ----

    /// Create a todo, then resync the list.
    ///
    /// A project or organization scope fills in the matching foreign key
    /// when the input leaves it empty.
    pub async fn create(&mut self, mut input: TodoInput) -> Result<Todo, ClientError> {
        match self.scope {
            Scope::Project(id) if input.project_id.is_none() => input.project_id = Some(id),
            Scope::Organization(id) if input.organization_id.is_none() => {
                input.organization_id = Some(id)
            }
            _ => {}
        }

        let result = match input.validate() {
            Ok(()) => self.data.create_todo(&input).await,
            Err(err) => Err(err.into()),
        };
        let todo = self.after_mutation("create", None, result)?;
        tracing::info!(scope = %self.scope, todo_id = todo.id, "Todo created");
        self.resync().await;
        Ok(todo)
    }

    /// Replace a todo's editable fields, then resync the list.
    pub async fn update(&mut self, id: DbId, input: TodoInput) -> Result<Todo, ClientError> {
        let result = match input.validate() {
            Ok(()) => self.data.update_todo(id, &input).await,
            Err(err) => Err(err.into()),
        };
        let todo = self.after_mutation("update", Some(id), result)?;
        tracing::info!(scope = %self.scope, todo_id = id, "Todo updated");
        self.resync().await;
        Ok(todo)
    }

    /// Delete a todo after explicit confirmation, then resync the list.
    ///
    /// Returns `Ok(false)` without any request when the user declined.
    pub async fn delete(
        &mut self,
        id: DbId,
        confirmation: Confirmation,
    ) -> Result<bool, ClientError> {
        if confirmation != Confirmation::Confirmed {
            tracing::debug!(todo_id = id, "Delete not confirmed");
            return Ok(false);
        }
        let result = self.data.delete_todo(id).await;
        self.after_mutation("delete", Some(id), result)?;
        tracing::info!(scope = %self.scope, todo_id = id, "Todo deleted");
        self.resync().await;
        Ok(true)
    }

    /// Assign urgency/importance (and optionally a due date) to a listed
    /// todo, then resync the list.
    pub async fn plan(&mut self, id: DbId, plan: PlanInput) -> Result<Todo, ClientError> {
        let input = match self.list.items().iter().find(|t| t.id == id) {
            Some(todo) => plan.apply_to(todo),
            None => {
                let err = ClientError::from(CoreError::NotFound { entity: "Todo", id });
                return Err(self.log_mutation_failure("plan", Some(id), err));
            }
        };
        self.update(id, input).await
    }

    /// Route a typed command to the matching operation.
    pub async fn dispatch(&mut self, command: TodoCommand) -> Result<CommandOutcome, ClientError> {
        match command {
            TodoCommand::Load => self.load().await.map(|_| CommandOutcome::Loaded),
            TodoCommand::Retry => self.retry().await.map(|_| CommandOutcome::Loaded),
            TodoCommand::LoadMore => Ok(CommandOutcome::Appended(self.load_more().await)),
            TodoCommand::Create(input) => self.create(input).await.map(CommandOutcome::Saved),
            TodoCommand::Update { id, input } => {
                self.update(id, input).await.map(CommandOutcome::Saved)
            }
            TodoCommand::Plan { id, plan } => self.plan(id, plan).await.map(CommandOutcome::Saved),
            TodoCommand::Delete { id, confirmation } => {
                let deleted = self.delete(id, confirmation).await?;
                Ok(if deleted {
                    CommandOutcome::Deleted
                } else {
                    CommandOutcome::DeleteDeclined
                })
            }
        }
    }

    // ---- private helpers ----

    async fn fetch(&self, request: PageRequest) -> Result<TodoPage, ClientError> {
        match self.scope {
            Scope::Unclassified => self.data.fetch_unclassified_todos(request).await,
            scope => self.data.fetch_todos_by_scope(scope, request).await,
        }
    }

    /// Full reload from offset 0 after a successful write. A failed resync
    /// is already reflected in the view state, so the write still counts
    /// as successful.
    async fn resync(&mut self) {
        let _ = self.load().await;
    }

    fn after_mutation<T>(
        &self,
        action: &'static str,
        id: Option<DbId>,
        result: Result<T, ClientError>,
    ) -> Result<T, ClientError> {
        result.map_err(|err| self.log_mutation_failure(action, id, err))
    }

    fn log_mutation_failure(
        &self,
        action: &'static str,
        id: Option<DbId>,
        err: ClientError,
    ) -> ClientError {
        tracing::error!(
            scope = %self.scope,
            failure = %FailureKind::Mutation,
            action,
            todo_id = ?id,
            error = %err,
            user_message = %err.user_message(MUTATION_FAILED_MESSAGE),
            "Todo mutation failed",
        );
        err
    }
}
