//! Common infrastructure shared by the mixture crates
//!
//! This crate provides:
//! - Logging bootstrap on top of `env_logger`
//! - Log-safe fingerprints for secrets and bearer tokens

pub mod logging;

pub use logging::{LoggingTransformer, fingerprint};
