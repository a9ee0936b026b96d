//! Token cryptographic operations

pub(crate) mod hmac_sha256;
