//! Segment encoding: base64url framing around canonical JSON

use crate::error::{JwtError, JwtResult, TokenPart};
use crate::types::strip_bearer;
use base64::{
    Engine as _,
    engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD},
};
use serde::{Serialize, de::DeserializeOwned};

/// Base64 URL-safe encoding with padding stripped
#[inline]
pub(crate) fn base64_url_encode(input: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

/// Base64 URL-safe decoding; the input is re-padded with `=` to a multiple of 4
pub(crate) fn base64_url_decode(input: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let mut padded = String::with_capacity(input.len() + 3);
    padded.push_str(input);
    while padded.len() % 4 != 0 {
        padded.push('=');
    }
    URL_SAFE.decode(padded)
}

/// Compact JSON, then base64url
pub(crate) fn encode_segment<T: Serialize + ?Sized>(value: &T) -> JwtResult<String> {
    let json = serde_json::to_vec(value).map_err(|e| JwtError::serialization(&e.to_string()))?;
    Ok(base64_url_encode(&json))
}

pub(crate) fn decode_segment<T: DeserializeOwned>(segment: &str, part: TokenPart) -> JwtResult<T> {
    let bytes = base64_url_decode(segment).map_err(|e| JwtError::decode(part, e))?;
    serde_json::from_slice(&bytes).map_err(|e| JwtError::decode(part, e))
}

/// Split a bearer string into header, payload and signature segments
pub(crate) fn split_bearer(bearer: &str) -> JwtResult<(&str, &str, &str)> {
    let segments: Vec<&str> = strip_bearer(bearer).split('.').collect();
    match segments.as_slice() {
        [header, payload, signature] => Ok((*header, *payload, *signature)),
        _ => Err(JwtError::malformed(segments.len())),
    }
}
