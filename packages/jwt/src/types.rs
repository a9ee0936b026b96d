//! Token type definitions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Literal prefix carried by every issued token
pub const BEARER_PREFIX: &str = "Bearer ";

/// The only signing algorithm
pub const ALGORITHM: &str = "HS256";

/// Header `typ` value
pub const TOKEN_TYPE: &str = "JWT";

/// Caller-supplied claims, serialized in insertion order
pub type Payload = serde_json::Map<String, serde_json::Value>;

/// Token header
///
/// Field order is part of the wire format: `alg`, `typ`, `exp`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    alg: String,
    typ: String,
    exp: i64,
}

impl Header {
    /// HS256 header expiring at `exp` (Unix seconds)
    #[must_use]
    pub fn hs256(exp: i64) -> Self {
        Self {
            alg: ALGORITHM.to_string(),
            typ: TOKEN_TYPE.to_string(),
            exp,
        }
    }

    /// Signing algorithm
    #[must_use]
    pub fn alg(&self) -> &str {
        &self.alg
    }

    /// Token type
    #[must_use]
    pub fn typ(&self) -> &str {
        &self.typ
    }

    /// Expiry as Unix seconds
    #[must_use]
    pub fn exp(&self) -> i64 {
        self.exp
    }
}

/// Strip one leading `"Bearer "` prefix, if present
#[must_use]
pub fn strip_bearer(value: &str) -> &str {
    value.strip_prefix(BEARER_PREFIX).unwrap_or(value)
}

/// Bearer token string: `"Bearer " + header.payload.signature`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    pub(crate) fn from_compact(compact: &str) -> Self {
        Self(format!("{BEARER_PREFIX}{compact}"))
    }

    /// Wrap a presented bearer string, adding the prefix when it is missing
    #[must_use]
    pub fn from_bearer(value: &str) -> Self {
        Self::from_compact(strip_bearer(value))
    }

    /// Full bearer string, suitable for an `Authorization` header
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The three dot-separated segments without the prefix
    #[must_use]
    pub fn compact(&self) -> &str {
        strip_bearer(&self.0)
    }

    /// Consume into the bearer string
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Token> for String {
    fn from(token: Token) -> Self {
        token.0
    }
}

/// Outcome of checking a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckStatus {
    /// Signature matches and the token has not expired
    Ok,
    /// Recomputed token differs from the presented one
    Unmatched,
    /// Signature matches but `exp` is in the past
    Expired,
}

impl CheckStatus {
    /// Legacy integer status code
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            CheckStatus::Ok => 1,
            CheckStatus::Unmatched => 2,
            CheckStatus::Expired => 3,
        }
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckStatus::Ok => f.write_str("OK"),
            CheckStatus::Unmatched => f.write_str("UNMATCHED"),
            CheckStatus::Expired => f.write_str("EXPIRED"),
        }
    }
}

/// Outcome of a refresh request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RefreshStatus {
    /// An expired token was replaced
    RenewSuccess,
    /// Renewal refused
    RenewFailed,
}

impl RefreshStatus {
    /// Legacy integer status code
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            RefreshStatus::RenewSuccess => 4,
            RefreshStatus::RenewFailed => 5,
        }
    }
}

impl fmt::Display for RefreshStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefreshStatus::RenewSuccess => f.write_str("RENEW_SUCCESS"),
            RefreshStatus::RenewFailed => f.write_str("RENEW_FAILED"),
        }
    }
}

/// Result of [`check_token`](crate::check_token)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckResult {
    /// Refreshed token when `status` is OK, otherwise the presented token
    pub token: Token,
    /// Decoded header
    pub header: Header,
    /// Decoded payload
    pub payload: Payload,
    /// Check outcome
    pub status: CheckStatus,
    /// Reserved for diagnostics, currently always empty
    pub trace: String,
}

impl CheckResult {
    /// Whether the token verified and was still valid
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == CheckStatus::Ok
    }
}

/// Result of [`refresh`](crate::refresh)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshResult {
    /// Newly issued token, present only on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<Token>,
    /// Refresh outcome
    pub status: RefreshStatus,
}

impl RefreshResult {
    pub(crate) fn renewed(token: Token) -> Self {
        Self {
            token: Some(token),
            status: RefreshStatus::RenewSuccess,
        }
    }

    pub(crate) fn failed() -> Self {
        Self {
            token: None,
            status: RefreshStatus::RenewFailed,
        }
    }
}
