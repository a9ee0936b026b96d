//! Token codec error types

use std::fmt;
use thiserror::Error;

/// Token codec result type
pub type JwtResult<T> = Result<T, JwtError>;

/// Token segment that failed to decode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenPart {
    /// First segment
    Header,
    /// Second segment
    Payload,
}

impl fmt::Display for TokenPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenPart::Header => f.write_str("header"),
            TokenPart::Payload => f.write_str("payload"),
        }
    }
}

/// Token codec error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtError {
    /// Bearer string does not split into exactly three dot-separated segments
    #[error("Malformed token: expected 3 segments, found {segments}")]
    MalformedToken {
        /// Number of segments actually found
        segments: usize,
    },
    /// Header or payload segment is not base64url-encoded JSON of the right shape
    #[error("Failed to decode token {part}: {reason}")]
    Decode {
        /// Segment that failed
        part: TokenPart,
        /// Underlying base64 or JSON failure
        reason: String,
    },
    /// Header or payload could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// HMAC key rejected
    #[error("Invalid key: {0}")]
    InvalidKey(String),
    /// Codec builder received an unusable setting
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl JwtError {
    /// Create a malformed token error
    #[inline]
    #[must_use]
    pub fn malformed(segments: usize) -> Self {
        JwtError::MalformedToken { segments }
    }

    /// Create a decode error for one token segment
    #[inline]
    #[must_use]
    pub fn decode(part: TokenPart, reason: impl fmt::Display) -> Self {
        JwtError::Decode {
            part,
            reason: reason.to_string(),
        }
    }

    /// Create a serialization error
    #[inline]
    #[must_use]
    pub fn serialization(msg: &str) -> Self {
        JwtError::Serialization(msg.to_string())
    }

    /// Create an invalid key error
    #[inline]
    #[must_use]
    pub fn invalid_key(msg: &str) -> Self {
        JwtError::InvalidKey(msg.to_string())
    }

    /// Create an invalid configuration error
    #[inline]
    #[must_use]
    pub fn invalid_config(msg: &str) -> Self {
        JwtError::InvalidConfig(msg.to_string())
    }

    /// Whether this error is the malformed-token sentinel
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(self, JwtError::MalformedToken { .. })
    }
}
