//! REST implementation of [`TodoDataAccess`].
//!
//! Wraps the backend's HTTP API using [`reqwest`]. Every successful body is
//! a `{"data": ...}` envelope; failures carry `{"error": ..., "code": ...}`.

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use todoview_core::pagination::{PageRequest, TodoPage};
use todoview_core::scope::Scope;
use todoview_core::todo::{Organization, Project, Todo, TodoInput};
use todoview_core::types::DbId;

use crate::config::ClientConfig;
use crate::data_access::TodoDataAccess;
use crate::error::ClientError;

/// Header carrying a per-request correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// HTTP client for the todo backend.
pub struct TodoApi {
    client: reqwest::Client,
    api_url: String,
    api_token: Option<String>,
}

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Deserialize)]
struct DataResponse<T> {
    data: T,
}

impl TodoApi {
    /// Create an API client with a default [`reqwest::Client`].
    ///
    /// * `api_url` - Base URL, e.g. `http://localhost:3000/api/v1`.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_url)
    }

    /// Create an API client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            api_token: None,
        }
    }

    /// Build a client from configuration (timeout, token, base URL).
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        let mut api = Self::with_client(client, config.api_url.clone());
        api.api_token = config.api_token.clone();
        Ok(api)
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    // ---- private helpers ----

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request_id = uuid::Uuid::new_v4().to_string();
        tracing::debug!(%method, path, request_id = %request_id, "Sending request");

        let builder = self
            .client
            .request(method, format!("{}{}", self.api_url, path))
            .header(REQUEST_ID_HEADER, request_id);
        match &self.api_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn fetch_page(&self, path: &str, page: PageRequest) -> Result<TodoPage, ClientError> {
        let response = self
            .request(Method::GET, path)
            .query(&[("offset", page.offset), ("limit", page.limit)])
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Ensure the response has a success status code, otherwise turn the
    /// status and body into a [`ClientError::Api`].
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::debug!(status = status.as_u16(), body = %body, "Request failed");
            return Err(ClientError::from_api_response(status.as_u16(), body));
        }
        Ok(response)
    }

    /// Check status and decode the `data` field of the envelope.
    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let response = Self::ensure_success(response).await?;
        let bytes = response.bytes().await?;
        let envelope: DataResponse<T> = serde_json::from_slice(&bytes)?;
        Ok(envelope.data)
    }

    /// Check status only, discarding any body.
    async fn check_status(response: reqwest::Response) -> Result<(), ClientError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}

/// Collection path for a scope's todos.
fn scope_path(scope: Scope) -> String {
    match scope {
        Scope::Project(id) => format!("/projects/{id}/todos"),
        Scope::Organization(id) => format!("/organizations/{id}/todos"),
        Scope::Unclassified => "/todos/unclassified".to_string(),
    }
}

#[async_trait]
impl TodoDataAccess for TodoApi {
    async fn fetch_todos_by_scope(
        &self,
        scope: Scope,
        page: PageRequest,
    ) -> Result<TodoPage, ClientError> {
        self.fetch_page(&scope_path(scope), page).await
    }

    async fn fetch_unclassified_todos(&self, page: PageRequest) -> Result<TodoPage, ClientError> {
        self.fetch_page(&scope_path(Scope::Unclassified), page).await
    }

    async fn create_todo(&self, input: &TodoInput) -> Result<Todo, ClientError> {
        let response = self
            .request(Method::POST, "/todos")
            .json(input)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn update_todo(&self, id: DbId, input: &TodoInput) -> Result<Todo, ClientError> {
        let response = self
            .request(Method::PUT, &format!("/todos/{id}"))
            .json(input)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn delete_todo(&self, id: DbId) -> Result<(), ClientError> {
        let response = self
            .request(Method::DELETE, &format!("/todos/{id}"))
            .send()
            .await?;
        Self::check_status(response).await
    }

    async fn fetch_project(&self, id: DbId) -> Result<Project, ClientError> {
        let response = self
            .request(Method::GET, &format!("/projects/{id}"))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn fetch_organization(&self, id: DbId) -> Result<Organization, ClientError> {
        let response = self
            .request(Method::GET, &format!("/organizations/{id}"))
            .send()
            .await?;
        Self::parse_response(response).await
    }
}
