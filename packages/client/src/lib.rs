//! GraphQL / REST API client
//!
//! Thin wrapper around `reqwest` that:
//! - attaches bearer tokens issued by `mixture_jwt`
//! - sends GraphQL `{query, variables}` bodies
//! - normalizes every JSON response into `{data, errors}`
//!
//! Transport failures surface as [`ClientError::Network`] and unexpected
//! bodies as [`ClientError::InvalidResponseFormat`]. Nothing is retried.

pub mod builder;
pub mod client;
pub mod config;
pub mod error;
pub mod options;
pub mod response;

pub use builder::ClientBuilder;
pub use client::Client;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use options::RequestOptions;
pub use response::{Response, ResponseBuilder};

pub use mixture_jwt::Token;
