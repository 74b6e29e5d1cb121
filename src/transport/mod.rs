//! Transport layer abstraction.
//!
//! The codec itself never touches the network. This module carries the
//! bytes it produces: one request datagram out, one response datagram back.

mod udp;

#[cfg(any(test, feature = "testing"))]
mod mock;

pub use udp::*;

#[cfg(any(test, feature = "testing"))]
pub use mock::*;

use crate::error::Result;
use bytes::Bytes;
use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

/// Largest datagram accepted from an agent.
pub const MAX_DATAGRAM_SIZE: usize = 65535;

/// Client-side transport abstraction.
pub trait Transport: Send + Sync {
    /// Send request data to the target.
    fn send(&self, data: &[u8]) -> impl Future<Output = Result<()>> + Send;

    /// Receive one response, waiting at most `timeout`.
    ///
    /// `request_id` is only used to fill in a timeout error.
    fn recv(&self, request_id: u32, timeout: Duration)
    -> impl Future<Output = Result<Bytes>> + Send;

    /// The peer address for this transport.
    fn peer_addr(&self) -> SocketAddr;

    /// Local bind address.
    fn local_addr(&self) -> SocketAddr;
}
