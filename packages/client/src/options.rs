//! Per-request options

use crate::error::{ClientError, ClientResult};
use mixture_jwt::Token;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use serde_json::{Map, Value};
use std::time::Duration;

/// Options applied to a single request
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub(crate) headers: HeaderMap,
    pub(crate) json: Option<Value>,
    pub(crate) body: Option<String>,
    pub(crate) query: Vec<(String, String)>,
    pub(crate) end_point: Option<String>,
    pub(crate) timeout: Option<Duration>,
}

impl RequestOptions {
    /// Empty options
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a header
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Add a header from strings
    ///
    /// # Errors
    /// Returns `ClientError::InvalidHeader` if the name or value is not a valid header.
    pub fn try_header(self, name: &str, value: &str) -> ClientResult<Self> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| ClientError::InvalidHeader(format!("{name}: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| ClientError::InvalidHeader(format!("{name}: {e}")))?;
        Ok(self.with_header(name, value))
    }

    /// Send `token` as the `Authorization` header
    ///
    /// # Errors
    /// Returns `ClientError::InvalidHeader` if the token is not a valid header value.
    pub fn with_authorization(self, token: &Token) -> ClientResult<Self> {
        Ok(self.with_header(AUTHORIZATION, authorization_value(token)?))
    }

    /// JSON request body
    #[must_use]
    pub fn with_json(mut self, json: Value) -> Self {
        self.json = Some(json);
        self
    }

    /// Raw request body, ignored when a JSON body is set
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Append a query string parameter
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Endpoint path used by `query` instead of the configured GraphQL endpoint
    #[must_use]
    pub fn with_end_point(mut self, end_point: impl Into<String>) -> Self {
        self.end_point = Some(end_point.into());
        self
    }

    /// Timeout for this request only
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Headers set so far
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Endpoint override, if any
    #[must_use]
    pub fn end_point(&self) -> Option<&str> {
        self.end_point.as_deref()
    }

    /// Fold `query` and `variables` into the JSON body
    ///
    /// Keys already present in an object body are kept; `variables` is left
    /// out entirely when `None`.
    pub(crate) fn set_graphql_body(&mut self, query: &str, variables: Option<Value>) -> ClientResult<()> {
        let mut body = match self.json.take() {
            None => Map::new(),
            Some(Value::Object(map)) => map,
            Some(_) => {
                return Err(ClientError::InvalidRequest(
                    "GraphQL request body must be a JSON object".to_string(),
                ));
            }
        };
        body.insert("query".to_string(), Value::String(query.to_string()));
        if let Some(variables) = variables {
            body.insert("variables".to_string(), variables);
        }
        self.json = Some(Value::Object(body));
        Ok(())
    }
}

pub(crate) fn authorization_value(token: &Token) -> ClientResult<HeaderValue> {
    let mut value = HeaderValue::from_str(token.as_str())
        .map_err(|e| ClientError::InvalidHeader(format!("authorization: {e}")))?;
    value.set_sensitive(true);
    Ok(value)
}
