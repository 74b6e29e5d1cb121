//! Request identifier generation.
//!
//! The codec takes the request ID as a plain field on
//! [`GetRequest`](crate::message::GetRequest). Drawing a fresh one is the
//! caller's job; [`random`] is the default source used by the client.

use crate::error::{Error, Result};
use std::sync::Arc;

/// A source of request identifiers.
pub type RequestIdSource = Arc<dyn Fn() -> Result<u32> + Send + Sync>;

/// Draw a request ID from the operating system's random source.
pub fn random() -> Result<u32> {
    let mut bytes = [0u8; 4];
    getrandom::fill(&mut bytes).map_err(|e| Error::Io {
        target: None,
        source: std::io::Error::other(e.to_string()),
    })?;
    Ok(u32::from_be_bytes(bytes))
}

/// A source that always returns `id`.
pub fn fixed(id: u32) -> RequestIdSource {
    Arc::new(move || Ok(id))
}
