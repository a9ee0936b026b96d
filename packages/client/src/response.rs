//! Response normalization
//!
//! Every body is reduced to `{data, errors}`. A body qualifies when it is a
//! JSON object with a `data` key or a non-empty `errors` array.

use crate::error::{ClientError, ClientResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Normalized API response
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Response {
    data: Map<String, Value>,
    errors: Vec<Value>,
}

impl Response {
    /// Build a response from its parts
    #[must_use]
    pub fn new(data: Map<String, Value>, errors: Vec<Value>) -> Self {
        Self { data, errors }
    }

    /// The `data` object, empty when the server sent none
    #[must_use]
    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    /// The `errors` array, empty when the server sent none
    #[must_use]
    pub fn errors(&self) -> &[Value] {
        &self.errors
    }

    /// Returns `true` if the server reported errors
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Deserialize `data` into a typed value
    ///
    /// # Errors
    /// Returns `ClientError::InvalidResponseFormat` if `data` does not match `T`.
    pub fn data_as<T: DeserializeOwned>(&self) -> ClientResult<T> {
        let data = Value::Object(self.data.clone());
        T::deserialize(&data).map_err(|_| ClientError::invalid_response(&data.to_string()))
    }

    /// Split into `data` and `errors`
    #[must_use]
    pub fn into_parts(self) -> (Map<String, Value>, Vec<Value>) {
        (self.data, self.errors)
    }
}

/// Turns raw response bodies into [`Response`] values
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseBuilder;

impl ResponseBuilder {
    /// Create a new builder
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Normalize a raw body
    ///
    /// # Errors
    /// Returns `ClientError::InvalidResponseFormat` for malformed JSON, a
    /// non-object body, a body with neither `data` nor non-empty `errors`, a
    /// non-object `data` or a non-array `errors`.
    pub fn build(&self, body: &str) -> ClientResult<Response> {
        let decoded: Value =
            serde_json::from_str(body).map_err(|_| ClientError::invalid_response(body))?;
        let Value::Object(mut object) = decoded else {
            return Err(ClientError::invalid_response(body));
        };

        let errors = match object.remove("errors") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(errors)) => errors,
            Some(_) => return Err(ClientError::invalid_response(body)),
        };

        let data = match object.remove("data") {
            None if errors.is_empty() => return Err(ClientError::invalid_response(body)),
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(data)) => data,
            Some(_) => return Err(ClientError::invalid_response(body)),
        };

        Ok(Response::new(data, errors))
    }
}
