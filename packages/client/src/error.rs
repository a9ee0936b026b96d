//! Error types for the API client

use thiserror::Error;

/// API client result type
pub type ClientResult<T> = Result<T, ClientError>;

const MAX_BODY_IN_ERROR: usize = 512;

/// Error type for API client operations
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure or non-success HTTP status
    #[error("Network Error. {message}")]
    Network {
        /// Human-readable summary
        message: String,
        /// HTTP status, when a response was received
        status: Option<u16>,
        /// Underlying transport error
        #[source]
        source: reqwest::Error,
    },

    /// Response body is not JSON with a `data` key or a non-empty `errors` array
    #[error("Invalid JSON response. Response body: {body}")]
    InvalidResponseFormat {
        /// Response body (truncated if needed)
        body: String,
    },

    /// Base URI or endpoint path cannot be turned into a URL
    #[error("Invalid endpoint {endpoint}: {reason}")]
    InvalidEndpoint {
        /// Offending endpoint
        endpoint: String,
        /// Parser message
        reason: String,
    },

    /// Header name or value rejected
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// Request options cannot be turned into a request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Client configuration missing or unusable
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::network(err)
    }
}

impl ClientError {
    /// Wrap a transport error
    #[must_use]
    pub fn network(source: reqwest::Error) -> Self {
        Self::Network {
            message: source.to_string(),
            status: source.status().map(|status| status.as_u16()),
            source,
        }
    }

    /// Create a response format error, truncating long bodies
    #[must_use]
    pub fn invalid_response(body: &str) -> Self {
        let body = match body.char_indices().nth(MAX_BODY_IN_ERROR) {
            Some((cut, _)) => format!("{}...", &body[..cut]),
            None => body.to_string(),
        };
        Self::InvalidResponseFormat { body }
    }

    /// Create an invalid endpoint error
    #[must_use]
    pub fn invalid_endpoint(endpoint: &str, reason: impl std::fmt::Display) -> Self {
        Self::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: reason.to_string(),
        }
    }

    /// HTTP status carried by a network error
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Network { status, .. } => *status,
            _ => None,
        }
    }

    /// Returns `true` for transport-level failures
    #[must_use]
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. })
    }
}
