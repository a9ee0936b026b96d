//! Client builder.

use crate::client::Client;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::options::authorization_value;
use mixture_jwt::Token;
use reqwest::Url;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use std::time::Duration;

/// API client builder
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    config: ClientConfig,
    headers: HeaderMap,
    timeout: Option<Duration>,
}

impl ClientBuilder {
    /// Builder with default settings for `endpoint`
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::from_config(ClientConfig::new(endpoint))
    }

    /// Builder starting from loaded settings
    #[must_use]
    pub fn from_config(config: ClientConfig) -> Self {
        Self {
            config,
            headers: HeaderMap::new(),
            timeout: None,
        }
    }

    /// Build a client for `endpoint` with default settings
    ///
    /// # Errors
    /// See [`build`](Self::build).
    pub fn build_default(endpoint: impl Into<String>) -> ClientResult<Client> {
        Self::new(endpoint).build()
    }

    /// Replace the endpoint used for GraphQL queries
    #[must_use]
    pub fn with_graphql_endpoint(mut self, end_point: impl Into<String>) -> Self {
        self.config.graphql_endpoint = end_point.into();
        self
    }

    /// Add a header sent with every request
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Send `token` as the `Authorization` header on every request
    ///
    /// # Errors
    /// Returns `ClientError::InvalidHeader` if the token is not a valid header value.
    pub fn with_authorization(self, token: &Token) -> ClientResult<Self> {
        Ok(self.with_header(AUTHORIZATION, authorization_value(token)?))
    }

    /// Override the configured request timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client
    ///
    /// # Errors
    /// `InvalidEndpoint` for an unparseable base URI, `InvalidHeader` for a bad
    /// configured header, `Config` if the HTTP client cannot be created.
    pub fn build(self) -> ClientResult<Client> {
        let base_uri = Url::parse(&self.config.base_uri)
            .map_err(|e| ClientError::invalid_endpoint(&self.config.base_uri, e))?;

        let mut headers = HeaderMap::new();
        for (name, value) in &self.config.default_headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ClientError::InvalidHeader(format!("{name}: {e}")))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|e| ClientError::InvalidHeader(format!("{name}: {e}")))?;
            headers.insert(header_name, header_value);
        }
        headers.extend(self.headers);

        let mut http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(self.timeout.unwrap_or_else(|| self.config.timeout()));
        if let Some(user_agent) = &self.config.user_agent {
            http = http.user_agent(user_agent.as_str());
        }
        let http = http
            .build()
            .map_err(|e| ClientError::Config(format!("failed to create HTTP client: {e}")))?;

        tracing::debug!(base_uri = %base_uri, "API client built");
        Ok(Client::from_parts(
            base_uri,
            self.config.graphql_endpoint,
            http,
        ))
    }
}
