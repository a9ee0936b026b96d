//! Builder entry points

pub mod hs256_builder;

pub use hs256_builder::{Hs256Builder, Hs256WithSecret};

/// Direct builder entry point
pub struct Jwt;

impl Jwt {
    /// Start building an HS256 codec
    #[must_use]
    pub fn hs256() -> Hs256Builder {
        Hs256Builder::new()
    }
}
