//! Client configuration

use crate::error::{ClientError, ClientResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Environment variable holding the base URI
pub const ENV_BASE_URI: &str = "MIXTURE_API_BASE_URI";
/// Environment variable overriding the GraphQL endpoint path
pub const ENV_GRAPHQL_ENDPOINT: &str = "MIXTURE_API_GRAPHQL_ENDPOINT";
/// Environment variable overriding the request timeout, in seconds
pub const ENV_TIMEOUT_SECS: &str = "MIXTURE_API_TIMEOUT_SECS";

/// Default GraphQL endpoint path
pub const DEFAULT_GRAPHQL_ENDPOINT: &str = "/graphql";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// API client settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URI every endpoint path resolves against
    pub base_uri: String,
    /// Endpoint used by `query` unless a request overrides it
    pub graphql_endpoint: String,
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
    /// `User-Agent` header value
    pub user_agent: Option<String>,
    /// Headers sent with every request
    pub default_headers: BTreeMap<String, String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_uri: "http://localhost".to_string(),
            graphql_endpoint: DEFAULT_GRAPHQL_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: Some(concat!("mixture-client/", env!("CARGO_PKG_VERSION")).to_string()),
            default_headers: BTreeMap::new(),
        }
    }
}

impl ClientConfig {
    /// Default settings for `base_uri`
    #[must_use]
    pub fn new(base_uri: impl Into<String>) -> Self {
        Self {
            base_uri: base_uri.into(),
            ..Self::default()
        }
    }

    /// Request timeout
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Load settings from `MIXTURE_API_*` environment variables
    ///
    /// # Errors
    /// Returns `ClientError::Config` if the base URI is missing or the timeout
    /// is not a number of seconds.
    pub fn from_env() -> ClientResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> ClientResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_uri = lookup(ENV_BASE_URI)
            .ok_or_else(|| ClientError::Config(format!("{ENV_BASE_URI} is not set")))?;
        let mut config = Self::new(base_uri);

        if let Some(endpoint) = lookup(ENV_GRAPHQL_ENDPOINT) {
            config.graphql_endpoint = endpoint;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            config.timeout_secs = raw.trim().parse().map_err(|_| {
                ClientError::Config(format!("{ENV_TIMEOUT_SECS} must be whole seconds, got {raw:?}"))
            })?;
        }

        Ok(config)
    }
}
