//! Abstract data-access collaborator used by the list controller.
//!
//! The REST implementation lives in [`crate::api`]; tests substitute an
//! in-memory fake. Implementations return already-decoded domain types.

use async_trait::async_trait;
use todoview_core::pagination::{PageRequest, TodoPage};
use todoview_core::scope::Scope;
use todoview_core::todo::{Organization, Project, Todo, TodoInput};
use todoview_core::types::DbId;

use crate::error::ClientError;

#[async_trait]
pub trait TodoDataAccess: Send + Sync {
    /// One page of todos for a project or organization scope.
    async fn fetch_todos_by_scope(
        &self,
        scope: Scope,
        page: PageRequest,
    ) -> Result<TodoPage, ClientError>;

    /// One page of todos that have neither urgency nor importance set.
    async fn fetch_unclassified_todos(&self, page: PageRequest) -> Result<TodoPage, ClientError>;

    async fn create_todo(&self, input: &TodoInput) -> Result<Todo, ClientError>;

    async fn update_todo(&self, id: DbId, input: &TodoInput) -> Result<Todo, ClientError>;

    async fn delete_todo(&self, id: DbId) -> Result<(), ClientError>;

    async fn fetch_project(&self, id: DbId) -> Result<Project, ClientError>;

    async fn fetch_organization(&self, id: DbId) -> Result<Organization, ClientError>;
}
