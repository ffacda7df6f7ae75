//! Shared fixtures for controller integration tests.
//!
//! [`InMemoryBackend`] implements `TodoDataAccess` over a vector of todos,
//! records every call, and can be told to fail upcoming requests.

#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use todoview_client::data_access::TodoDataAccess;
use todoview_client::error::ClientError;
use todoview_core::pagination::{PageRequest, TodoPage};
use todoview_core::scope::Scope;
use todoview_core::todo::{Organization, Project, Todo, TodoInput, TodoStatus};
use todoview_core::types::{DbId, Timestamp};

/// A request observed by the fake backend.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    FetchScope(Scope, PageRequest),
    FetchUnclassified(PageRequest),
    Create(TodoInput),
    Update(DbId, TodoInput),
    Delete(DbId),
    FetchProject(DbId),
    FetchOrganization(DbId),
}

#[derive(Default)]
struct Inner {
    todos: Vec<Todo>,
    projects: Vec<Project>,
    organizations: Vec<Organization>,
    calls: Vec<Call>,
    next_id: DbId,
    failing_fetches: usize,
    failing_mutations: usize,
    fetch_error_body: Option<String>,
}

pub struct InMemoryBackend {
    inner: Mutex<Inner>,
}

/// Fixed base so `created_at` ordering follows ids.
pub fn base_time() -> Timestamp {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
}

/// Todo with `created_at` advancing one minute per id.
pub fn todo(id: DbId, project_id: Option<DbId>, status: TodoStatus) -> Todo {
    Todo {
        id,
        title: format!("Todo {id}"),
        description: None,
        status,
        category: None,
        urgency: None,
        importance: None,
        due_date: None,
        created_at: base_time() + Duration::minutes(id),
        project_id,
        organization_id: None,
    }
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                next_id: 1,
                ..Default::default()
            }),
        }
    }

    /// Backend holding `count` open todos in `project_id`.
    pub fn with_project_todos(project_id: DbId, count: usize) -> Self {
        let backend = Self::new();
        for _ in 0..count {
            backend.insert_with(|id| todo(id, Some(project_id), TodoStatus::Open));
        }
        backend
    }

    /// Insert a todo built from the next free id.
    pub fn insert_with(&self, build: impl FnOnce(DbId) -> Todo) -> DbId {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.todos.push(build(id));
        id
    }

    pub fn add_project(&self, project: Project) {
        self.inner.lock().unwrap().projects.push(project);
    }

    pub fn add_organization(&self, organization: Organization) {
        self.inner.lock().unwrap().organizations.push(organization);
    }

    /// Make the next `n` list fetches fail with a 500.
    pub fn fail_next_fetches(&self, n: usize) {
        self.inner.lock().unwrap().failing_fetches = n;
    }

    /// Body returned by failing fetches (defaults to a JSON error payload).
    pub fn set_fetch_error_body(&self, body: &str) {
        self.inner.lock().unwrap().fetch_error_body = Some(body.to_string());
    }

    /// Make the next `n` create/update/delete calls fail with a 500.
    pub fn fail_next_mutations(&self, n: usize) {
        self.inner.lock().unwrap().failing_mutations = n;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.inner.lock().unwrap().calls.clear();
    }

    pub fn todo_count(&self) -> usize {
        self.inner.lock().unwrap().todos.len()
    }

    fn page(
        inner: &mut Inner,
        page: PageRequest,
        keep: impl Fn(&Todo) -> bool,
    ) -> Result<TodoPage, ClientError> {
        if inner.failing_fetches > 0 {
            inner.failing_fetches -= 1;
            let body = inner.fetch_error_body.clone().unwrap_or_else(|| {
                r#"{"error": "Database unavailable", "code": "INTERNAL_ERROR"}"#.to_string()
            });
            return Err(ClientError::from_api_response(500, body));
        }
        let matching: Vec<Todo> = inner.todos.iter().filter(|t| keep(t)).cloned().collect();
        let total_count = matching.len();
        let items = matching
            .into_iter()
            .skip(page.offset)
            .take(page.limit)
            .collect();
        Ok(TodoPage { items, total_count })
    }

    fn check_mutation(inner: &mut Inner) -> Result<(), ClientError> {
        if inner.failing_mutations > 0 {
            inner.failing_mutations -= 1;
            return Err(ClientError::from_api_response(
                500,
                r#"{"error": "Write rejected", "code": "INTERNAL_ERROR"}"#.to_string(),
            ));
        }
        Ok(())
    }

    fn not_found(entity: &str, id: DbId) -> ClientError {
        ClientError::from_api_response(
            404,
            format!(r#"{{"error": "{entity} with id {id} not found", "code": "NOT_FOUND"}}"#),
        )
    }
}

#[async_trait]
impl TodoDataAccess for InMemoryBackend {
    async fn fetch_todos_by_scope(
        &self,
        scope: Scope,
        page: PageRequest,
    ) -> Result<TodoPage, ClientError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::FetchScope(scope, page));
        Self::page(&mut inner, page, |t| match scope {
            Scope::Project(id) => t.project_id == Some(id),
            Scope::Organization(id) => t.organization_id == Some(id),
            Scope::Unclassified => t.is_unclassified(),
        })
    }

    async fn fetch_unclassified_todos(&self, page: PageRequest) -> Result<TodoPage, ClientError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::FetchUnclassified(page));
        Self::page(&mut inner, page, Todo::is_unclassified)
    }

    async fn create_todo(&self, input: &TodoInput) -> Result<Todo, ClientError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::Create(input.clone()));
        Self::check_mutation(&mut inner)?;

        let id = inner.next_id;
        inner.next_id += 1;
        let created = Todo {
            id,
            title: input.title.clone(),
            description: input.description.clone(),
            status: input.status.clone(),
            category: input.category.clone(),
            urgency: input.urgency,
            importance: input.importance,
            due_date: input.due_date,
            created_at: base_time() + Duration::minutes(id),
            project_id: input.project_id,
            organization_id: input.organization_id,
        };
        inner.todos.push(created.clone());
        Ok(created)
    }

    async fn update_todo(&self, id: DbId, input: &TodoInput) -> Result<Todo, ClientError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::Update(id, input.clone()));
        Self::check_mutation(&mut inner)?;

        let todo = inner
            .todos
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| Self::not_found("Todo", id))?;
        todo.title = input.title.clone();
        todo.description = input.description.clone();
        todo.status = input.status.clone();
        todo.category = input.category.clone();
        todo.urgency = input.urgency;
        todo.importance = input.importance;
        todo.due_date = input.due_date;
        todo.project_id = input.project_id;
        todo.organization_id = input.organization_id;
        Ok(todo.clone())
    }

    async fn delete_todo(&self, id: DbId) -> Result<(), ClientError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::Delete(id));
        Self::check_mutation(&mut inner)?;

        let before = inner.todos.len();
        inner.todos.retain(|t| t.id != id);
        if inner.todos.len() == before {
            return Err(Self::not_found("Todo", id));
        }
        Ok(())
    }

    async fn fetch_project(&self, id: DbId) -> Result<Project, ClientError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::FetchProject(id));
        inner
            .projects
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| Self::not_found("Project", id))
    }

    async fn fetch_organization(&self, id: DbId) -> Result<Organization, ClientError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::FetchOrganization(id));
        inner
            .organizations
            .iter()
            .find(|o| o.id == id)
            .cloned()
            .ok_or_else(|| Self::not_found("Organization", id))
    }
}
