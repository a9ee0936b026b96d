//! Stateless HS256 bearer tokens
//!
//! This crate provides:
//! - Token construction: `"Bearer " + base64url(header) + "." + base64url(payload) + "." + signature`
//! - Verification by recomputation, with constant-time comparison
//! - Expiry checks with sliding expiration on every successful check
//! - Renewal of expired tokens
//!
//! ```
//! use mixture_jwt::{CheckStatus, Payload, check_token, make_token};
//!
//! let mut payload = Payload::new();
//! payload.insert("user_id".into(), 42.into());
//!
//! let token = make_token("secret", &payload, None).unwrap();
//! let checked = check_token("secret", token.as_str()).unwrap();
//! assert_eq!(checked.status, CheckStatus::Ok);
//! assert_eq!(checked.payload, payload);
//! ```

pub mod api;
mod codec;
pub(crate) mod crypto;
pub(crate) mod encoding;
mod error;
mod types;

pub use api::{Hs256Builder, Hs256WithSecret, Jwt};
pub use codec::{
    DEFAULT_TTL_SECS, TokenCodec, check_token, get_exp_time, make_token, refresh,
};
pub use error::*;
pub use types::*;
