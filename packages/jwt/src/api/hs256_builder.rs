//! HS256 codec builder
//!
//! Typestate builder: a codec can only be built once a secret is set.

use crate::codec::{DEFAULT_TTL_SECS, TokenCodec};
use crate::error::{JwtError, JwtResult};
use chrono::Duration;
use zeroize::Zeroizing;

/// HS256 builder - initial state
#[derive(Debug, Clone, Default)]
pub struct Hs256Builder;

/// HS256 builder with secret configured
#[derive(Clone)]
pub struct Hs256WithSecret {
    secret: Zeroizing<Vec<u8>>,
    ttl: Duration,
}

impl Hs256Builder {
    /// Create new HS256 builder
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Set HMAC secret
    #[must_use]
    pub fn with_secret(self, secret: impl AsRef<[u8]>) -> Hs256WithSecret {
        Hs256WithSecret {
            secret: Zeroizing::new(secret.as_ref().to_vec()),
            ttl: Duration::seconds(DEFAULT_TTL_SECS),
        }
    }
}

impl Hs256WithSecret {
    /// Override the lifetime of issued and slid tokens
    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Build the codec
    ///
    /// # Errors
    /// Returns `JwtError::InvalidConfig` if the TTL is not at least one second.
    pub fn build(self) -> JwtResult<TokenCodec> {
        if self.ttl.num_seconds() < 1 {
            return Err(JwtError::invalid_config("token TTL must be at least one second"));
        }
        Ok(TokenCodec::with_ttl(self.secret.as_slice(), self.ttl))
    }
}

impl std::fmt::Debug for Hs256WithSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hs256WithSecret")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
