//! Builder for SNMP clients.
//!
//! # Examples
//!
//! ```rust,no_run
//! # use snmp_codec::{Client, Version, oid};
//! # use std::time::Duration;
//! # async fn example() -> snmp_codec::Result<()> {
//! let client = Client::builder("192.168.1.1")
//!     .version(Version::V1)
//!     .community(b"public")
//!     .timeout(Duration::from_secs(2))
//!     .retries(1)
//!     .connect()
//!     .await?;
//!
//! let response = client.get(&[oid!(1, 3, 6, 1, 2, 1)]).await?;
//! # Ok(())
//! # }
//! ```

use std::net::{IpAddr, SocketAddr, ToSocketAddrs};
use std::time::Duration;

use bytes::Bytes;

use crate::error::{Error, Result};
use crate::message::PduType;
use crate::request_id::{self, RequestIdSource};
use crate::transport::UdpTransport;
use crate::version::Version;

use super::{Client, ClientConfig, DEFAULT_PORT};

/// Builder for [`Client`].
///
/// Created via [`Client::builder()`].
pub struct ClientBuilder {
    target: String,
    config: ClientConfig,
    request_ids: RequestIdSource,
}

impl ClientBuilder {
    pub(crate) fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            config: ClientConfig::default(),
            request_ids: std::sync::Arc::new(request_id::random),
        }
    }

    /// Set the community string (default `public`).
    pub fn community(mut self, community: impl AsRef<[u8]>) -> Self {
        self.config.community = Bytes::copy_from_slice(community.as_ref());
        self
    }

    /// Set the SNMP version (default v2c).
    pub fn version(mut self, version: Version) -> Self {
        self.config.version = version;
        self
    }

    /// Set the per-attempt timeout (default 5 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the number of retries after a timeout (default 0).
    pub fn retries(mut self, retries: u32) -> Self {
        self.config.retries = retries;
        self
    }

    /// Set the PDU type (default GetNext).
    pub fn pdu_type(mut self, pdu_type: PduType) -> Self {
        self.config.pdu_type = pdu_type;
        self
    }

    /// Replace the request ID source (default [`request_id::random`]).
    pub fn request_ids(mut self, source: RequestIdSource) -> Self {
        self.request_ids = source;
        self
    }

    /// Resolve the target and connect a UDP transport.
    pub async fn connect(self) -> Result<Client<UdpTransport>> {
        let addr = resolve_target(&self.target)?;
        let transport = UdpTransport::connect(addr).await?;
        Ok(Client::with_transport(
            transport,
            self.config,
            self.request_ids,
        ))
    }
}

/// Resolve `host`, `ip`, `host:port` or `[v6]:port` to a socket address.
///
/// A missing port defaults to 161.
pub fn resolve_target(target: &str) -> Result<SocketAddr> {
    if let Ok(addr) = target.parse::<SocketAddr>() {
        return Ok(addr);
    }
    if let Ok(ip) = target.parse::<IpAddr>() {
        return Ok(SocketAddr::new(ip, DEFAULT_PORT));
    }

    let resolved = if target.contains(':') {
        target.to_socket_addrs()
    } else {
        (target, DEFAULT_PORT).to_socket_addrs()
    };

    resolved
        .map_err(|e| Error::Io {
            target: None,
            source: e,
        })?
        .next()
        .ok_or_else(|| Error::Io {
            target: None,
            source: std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("could not resolve address '{}'", target),
            ),
        })
}
