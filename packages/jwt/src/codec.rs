//! HS256 token codec
//!
//! Tokens are verified by recomputation: the codec rebuilds the token from the
//! decoded payload and the claimed `exp`, then compares it with the presented
//! token in constant time. Validity is a function of the secret, the token and
//! the clock only; nothing is stored.

use crate::crypto::hmac_sha256::{constant_time_eq, hmac_sha256_sign};
use crate::encoding::{base64_url_encode, decode_segment, encode_segment, split_bearer};
use crate::error::{JwtError, JwtResult, TokenPart};
use crate::types::{
    CheckResult, CheckStatus, Header, Payload, RefreshResult, Token,
};
use chrono::{Duration, Utc};
use mixture_common::fingerprint;
use std::fmt;
use zeroize::Zeroizing;

/// Lifetime of a freshly issued or slid token
pub const DEFAULT_TTL_SECS: i64 = 3600;

/// Current Unix time in seconds
#[inline]
pub(crate) fn unix_now() -> i64 {
    Utc::now().timestamp()
}

/// Token codec bound to one HMAC secret
#[derive(Clone)]
pub struct TokenCodec {
    secret: Zeroizing<Vec<u8>>,
    ttl: Duration,
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenCodec {
    /// Codec with the default one-hour TTL
    #[must_use]
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self::with_ttl(secret, Duration::seconds(DEFAULT_TTL_SECS))
    }

    pub(crate) fn with_ttl(secret: impl AsRef<[u8]>, ttl: Duration) -> Self {
        Self {
            secret: Zeroizing::new(secret.as_ref().to_vec()),
            ttl,
        }
    }

    /// Lifetime given to new and slid tokens
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for `payload`
    ///
    /// `None` and `Some(0)` both mean "now + TTL".
    ///
    /// # Errors
    /// Returns `JwtError` if the header or payload cannot be serialized.
    pub fn make_token(&self, payload: &Payload, expires_at: Option<i64>) -> JwtResult<Token> {
        let exp = match expires_at {
            Some(exp) if exp != 0 => exp,
            _ => self.slid_expiry(unix_now())?,
        };
        self.sign(payload, exp)
    }

    fn slid_expiry(&self, now: i64) -> JwtResult<i64> {
        now.checked_add(self.ttl.num_seconds()).ok_or_else(|| {
            JwtError::invalid_config(&format!("expiry overflows i64 at now={now}"))
        })
    }

    fn sign(&self, payload: &Payload, exp: i64) -> JwtResult<Token> {
        let header_b64 = encode_segment(&Header::hs256(exp))?;
        let payload_b64 = encode_segment(payload)?;

        let signing_input = format!("{header_b64}.{payload_b64}");
        let signature = hmac_sha256_sign(signing_input.as_bytes(), &self.secret)?;

        Ok(Token::from_compact(&format!(
            "{signing_input}.{}",
            base64_url_encode(&signature)
        )))
    }

    /// Verify a bearer string against the current clock
    ///
    /// # Errors
    /// `MalformedToken` when the string is not three dot-separated segments,
    /// `Decode` when the header or payload cannot be decoded.
    pub fn check_token(&self, bearer: &str) -> JwtResult<CheckResult> {
        self.check_token_at(bearer, unix_now())
    }

    /// Verify a bearer string against an explicit clock reading
    ///
    /// Status is decided in order: UNMATCHED if the recomputed token differs,
    /// EXPIRED if `exp < now`, otherwise OK with a token slid to `now + TTL`.
    ///
    /// # Errors
    /// Same as [`check_token`](Self::check_token).
    pub fn check_token_at(&self, bearer: &str, now: i64) -> JwtResult<CheckResult> {
        let (header_b64, payload_b64, _) = split_bearer(bearer)?;
        let header: Header = decode_segment(header_b64, TokenPart::Header)?;
        let payload: Payload = decode_segment(payload_b64, TokenPart::Payload)?;

        let expected = self.sign(&payload, header.exp())?;
        let matches = constant_time_eq(bearer.as_bytes(), expected.as_str().as_bytes());

        let (token, status) = if !matches {
            (Token::from_bearer(bearer), CheckStatus::Unmatched)
        } else if header.exp() < now {
            (expected, CheckStatus::Expired)
        } else {
            (
                self.sign(&payload, self.slid_expiry(now)?)?,
                CheckStatus::Ok,
            )
        };

        tracing::debug!(
            token = %fingerprint(bearer),
            exp = header.exp(),
            %status,
            "token checked"
        );

        Ok(CheckResult {
            token,
            header,
            payload,
            status,
            trace: String::new(),
        })
    }

    /// Replace an expired token with a fresh one
    ///
    /// Only a token whose signature verifies and whose `exp` has passed is
    /// renewed. Still-valid, unmatched, malformed and undecodable tokens are
    /// refused with `RENEW_FAILED`.
    ///
    /// # Errors
    /// Returns `JwtError` only if the replacement token cannot be built.
    pub fn refresh(&self, token: &str, payload: &Payload) -> JwtResult<RefreshResult> {
        self.refresh_at(token, payload, unix_now())
    }

    /// [`refresh`](Self::refresh) against an explicit clock reading
    ///
    /// # Errors
    /// Returns `JwtError` only if the replacement token cannot be built.
    pub fn refresh_at(&self, token: &str, payload: &Payload, now: i64) -> JwtResult<RefreshResult> {
        match self.check_token_at(token, now) {
            Ok(checked) if checked.status == CheckStatus::Expired => {
                let renewed = self.sign(payload, self.slid_expiry(now)?)?;
                tracing::debug!(token = %fingerprint(token), "expired token renewed");
                Ok(RefreshResult::renewed(renewed))
            }
            Ok(checked) => {
                tracing::debug!(
                    token = %fingerprint(token),
                    status = %checked.status,
                    "renewal refused"
                );
                Ok(RefreshResult::failed())
            }
            Err(err) => {
                tracing::debug!(token = %fingerprint(token), error = %err, "renewal refused");
                Ok(RefreshResult::failed())
            }
        }
    }
}

/// Read `exp` from a bearer string without verifying it
///
/// # Errors
/// `MalformedToken` or a header `Decode` error.
pub fn get_exp_time(bearer: &str) -> JwtResult<i64> {
    let (header_b64, _, _) = split_bearer(bearer)?;
    let header: Header = decode_segment(header_b64, TokenPart::Header)?;
    Ok(header.exp())
}

/// Issue a token signed with `secret`
///
/// # Errors
/// See [`TokenCodec::make_token`].
pub fn make_token(
    secret: impl AsRef<[u8]>,
    payload: &Payload,
    expires_at: Option<i64>,
) -> JwtResult<Token> {
    TokenCodec::new(secret).make_token(payload, expires_at)
}

/// Verify a bearer string signed with `secret`
///
/// # Errors
/// See [`TokenCodec::check_token`].
pub fn check_token(secret: impl AsRef<[u8]>, bearer: &str) -> JwtResult<CheckResult> {
    TokenCodec::new(secret).check_token(bearer)
}

/// Renew an expired token signed with `secret`
///
/// # Errors
/// See [`TokenCodec::refresh`].
pub fn refresh(
    secret: impl AsRef<[u8]>,
    token: &str,
    payload: &Payload,
) -> JwtResult<RefreshResult> {
    TokenCodec::new(secret).refresh(token, payload)
}
