use serde::Deserialize;
use todoview_core::error::CoreError;

/// Shown when a list fails to load and the backend gave no usable message.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load todos. Please try again.";

/// Shown when a create/update/delete fails without a backend message.
pub const MUTATION_FAILED_MESSAGE: &str = "Failed to save changes. Please try again.";

/// Errors raised by the data-access layer and the list controller.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// A domain-level error (validation, missing entity).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend returned a non-2xx status code.
    #[error("API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Machine-readable code from the error payload, if any.
        code: Option<String>,
        /// Human-readable message from the error payload, if any.
        message: Option<String>,
        /// Raw response body for debugging.
        body: String,
    },

    /// A 2xx response whose body did not match the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    /// Build an [`ClientError::Api`] from a status and raw body, pulling the
    /// message and code out of a `{"error": ..., "code": ...}` payload.
    pub fn from_api_response(status: u16, body: String) -> Self {
        let payload = serde_json::from_str::<ApiErrorBody>(&body).ok();
        let (code, message) = match payload {
            Some(p) => {
                let message = [p.message, p.error]
                    .into_iter()
                    .flatten()
                    .find(|m| !m.trim().is_empty());
                (p.code, message)
            }
            None => (None, None),
        };
        Self::Api {
            status,
            code,
            message,
            body,
        }
    }

    /// Text suitable for showing to the user.
    ///
    /// Prefers the backend's own message and validation text; everything
    /// else collapses to `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Api {
                message: Some(message),
                ..
            } => message.clone(),
            Self::Core(CoreError::Validation(message)) => message.clone(),
            Self::Core(err @ CoreError::NotFound { .. }) => err.to_string(),
            _ => fallback.to_string(),
        }
    }
}

/// Error envelope produced by the backend.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

/// Failure classes of the list controller, used as a structured log field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Initial fetch failed; surfaced with a retry affordance.
    Load,
    /// "Load more" failed; logged only.
    Pagination,
    /// Create/update/delete failed; logged and returned to the caller.
    Mutation,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Pagination => "pagination",
            Self::Mutation => "mutation",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
