//! Structured logging infrastructure
//!
//! Provides env_logger-based logging with secure handling of sensitive data.
//! Library crates emit their events through `tracing` (with its `log`
//! feature), so installing the logger here is enough to see them.

use log::{debug, info, warn};
use sha2::{Digest, Sha256};
use std::sync::Once;
use std::time::Duration;

static INIT_LOGGER: Once = Once::new();

/// Logging bootstrap and event helpers
pub struct LoggingTransformer;

impl LoggingTransformer {
    /// Initialize logging system (should be called once at application startup)
    ///
    /// Configure logging levels via `RUST_LOG` environment variable:
    /// - `RUST_LOG=debug` - Enable all debug logs
    /// - `RUST_LOG=info` - Enable info and above
    /// - `RUST_LOG=mixture_jwt=debug,mixture_client=info` - Module-specific levels
    pub fn init() {
        INIT_LOGGER.call_once(|| {
            env_logger::Builder::from_default_env()
                .format_timestamp_micros()
                .init();

            info!("Structured logging initialized");
        });
    }

    /// Initialize logging for test environments
    ///
    /// Safe to call from every test; only the first call installs the logger.
    pub fn init_test() {
        let _ = env_logger::Builder::from_default_env()
            .is_test(true)
            .try_init();
    }

    /// Log an outgoing HTTP request
    pub fn log_request(method: &str, url: &str, timeout: Option<Duration>) {
        match timeout {
            Some(timeout) => debug!("HTTP {method} {url} (timeout: {timeout:?})"),
            None => debug!("HTTP {method} {url}"),
        }
    }

    /// Log a transport failure with its status, if one was received
    pub fn log_network_failure(method: &str, url: &str, status: Option<u16>) {
        match status {
            Some(status) => warn!("HTTP {method} {url} failed with status {status}"),
            None => warn!("HTTP {method} {url} failed before a response was received"),
        }
    }
}

/// Short SHA-256 fingerprint for logging secrets and tokens
///
/// Returns `#` followed by the first 12 hex characters of the digest.
#[must_use]
pub fn fingerprint(value: &str) -> String {
    let hash = Sha256::digest(value.as_bytes());
    let hex_hash = format!("{hash:x}");
    format!("#{}", &hex_hash[..12])
}
