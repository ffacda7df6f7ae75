use std::time::Duration;

use todoview_core::pagination::{clamp_limit, DEFAULT_PAGE_SIZE};

/// Client configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development against a
/// backend on `localhost:3000`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the REST API, without a trailing slash.
    pub api_url: String,
    /// Optional bearer token attached to every request.
    pub api_token: Option<String>,
    /// Number of todos requested per page.
    pub page_size: usize,
    /// HTTP request timeout in seconds.
    pub request_timeout_secs: u64,
}

/// An environment variable held a value that could not be used.
#[derive(Debug, thiserror::Error)]
#[error("Invalid value for {var}: '{value}' ({reason})")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
    pub reason: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3000/api/v1".to_string(),
            api_token: None,
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout_secs: 30,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                         | Default                         |
    /// |---------------------------------|---------------------------------|
    /// | `TODOVIEW_API_URL`              | `http://localhost:3000/api/v1`  |
    /// | `TODOVIEW_API_TOKEN`            | unset                           |
    /// | `TODOVIEW_PAGE_SIZE`            | `50`                            |
    /// | `TODOVIEW_REQUEST_TIMEOUT_SECS` | `30`                            |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reading through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let api_url = lookup("TODOVIEW_API_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or(defaults.api_url);

        let api_token = lookup("TODOVIEW_API_TOKEN")
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        let page_size = match lookup("TODOVIEW_PAGE_SIZE") {
            Some(raw) => clamp_limit(Some(parse_number("TODOVIEW_PAGE_SIZE", &raw)?)),
            None => defaults.page_size,
        };

        let request_timeout_secs = match lookup("TODOVIEW_REQUEST_TIMEOUT_SECS") {
            Some(raw) => parse_number("TODOVIEW_REQUEST_TIMEOUT_SECS", &raw)?,
            None => defaults.request_timeout_secs,
        };

        Ok(Self {
            api_url,
            api_token,
            page_size,
            request_timeout_secs,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn parse_number<T>(var: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError {
        var,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}
