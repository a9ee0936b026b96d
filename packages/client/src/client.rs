//! API client implementation.

use crate::error::{ClientError, ClientResult};
use crate::options::RequestOptions;
use crate::response::{Response, ResponseBuilder};
use mixture_common::LoggingTransformer;
use reqwest::{Method, Url};
use serde_json::Value;

/// GraphQL / REST API client
///
/// Cheap to clone; clones share the underlying connection pool. Each call is
/// an independent request and failures are never retried.
#[derive(Debug, Clone)]
pub struct Client {
    base_uri: Url,
    graphql_endpoint: String,
    http: reqwest::Client,
    response_builder: ResponseBuilder,
}

impl Client {
    pub(crate) fn from_parts(base_uri: Url, graphql_endpoint: String, http: reqwest::Client) -> Self {
        Self {
            base_uri,
            graphql_endpoint,
            http,
            response_builder: ResponseBuilder::new(),
        }
    }

    /// Base URI endpoint paths resolve against
    #[must_use]
    pub fn base_uri(&self) -> &Url {
        &self.base_uri
    }

    /// Endpoint used by [`query`](Self::query) when the options set none
    #[must_use]
    pub fn graphql_endpoint(&self) -> &str {
        &self.graphql_endpoint
    }

    /// POST a GraphQL query
    ///
    /// # Errors
    /// `Network` on transport failure or non-success status,
    /// `InvalidResponseFormat` when the body is not a GraphQL-shaped response.
    pub async fn query(
        &self,
        query: &str,
        variables: Option<Value>,
        mut options: RequestOptions,
    ) -> ClientResult<Response> {
        options.set_graphql_body(query, variables)?;
        let end_point = options
            .end_point
            .take()
            .unwrap_or_else(|| self.graphql_endpoint.clone());
        self.request(Method::POST, &end_point, options).await
    }

    /// GET `end_point`
    ///
    /// # Errors
    /// Same as [`query`](Self::query).
    pub async fn get(&self, end_point: &str, options: RequestOptions) -> ClientResult<Response> {
        self.request(Method::GET, end_point, options).await
    }

    /// POST to `end_point`
    ///
    /// # Errors
    /// Same as [`query`](Self::query).
    pub async fn post(&self, end_point: &str, options: RequestOptions) -> ClientResult<Response> {
        self.request(Method::POST, end_point, options).await
    }

    /// PUT to `end_point`
    ///
    /// # Errors
    /// Same as [`query`](Self::query).
    pub async fn put(&self, end_point: &str, options: RequestOptions) -> ClientResult<Response> {
        self.request(Method::PUT, end_point, options).await
    }

    /// DELETE `end_point`
    ///
    /// # Errors
    /// Same as [`query`](Self::query).
    pub async fn delete(&self, end_point: &str, options: RequestOptions) -> ClientResult<Response> {
        self.request(Method::DELETE, end_point, options).await
    }

    fn resolve(&self, end_point: &str) -> ClientResult<Url> {
        self.base_uri
            .join(end_point)
            .map_err(|e| ClientError::invalid_endpoint(end_point, e))
    }

    async fn request(
        &self,
        method: Method,
        end_point: &str,
        options: RequestOptions,
    ) -> ClientResult<Response> {
        let url = self.resolve(end_point)?;
        LoggingTransformer::log_request(method.as_str(), url.as_str(), options.timeout);

        let mut request = self
            .http
            .request(method.clone(), url.clone())
            .headers(options.headers);
        if !options.query.is_empty() {
            request = request.query(&options.query);
        }
        if let Some(json) = &options.json {
            request = request.json(json);
        } else if let Some(body) = options.body {
            request = request.body(body);
        }
        if let Some(timeout) = options.timeout {
            request = request.timeout(timeout);
        }

        let body = async {
            let response = request.send().await?.error_for_status()?;
            response.text().await
        }
        .await
        .map_err(|e| {
            LoggingTransformer::log_network_failure(
                method.as_str(),
                url.as_str(),
                e.status().map(|status| status.as_u16()),
            );
            ClientError::network(e)
        })?;

        tracing::debug!(%method, %url, bytes = body.len(), "response received");
        self.response_builder.build(&body)
    }
}
