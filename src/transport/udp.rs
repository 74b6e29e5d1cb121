//! Connected UDP transport.

use super::{MAX_DATAGRAM_SIZE, Transport};
use crate::error::{Error, Result};
use bytes::Bytes;
use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::{Duration, Instant};
use tokio::net::UdpSocket;

/// UDP socket connected to a single agent.
///
/// Datagrams from any other source are dropped by the kernel.
#[derive(Debug)]
pub struct UdpTransport {
    socket: UdpSocket,
    target: SocketAddr,
    local_addr: SocketAddr,
}

impl UdpTransport {
    /// Bind an ephemeral local port of the target's address family and
    /// connect it to `target`.
    pub async fn connect(target: SocketAddr) -> Result<Self> {
        let io_err = |source| Error::Io {
            target: Some(target),
            source,
        };

        let bind_addr = if target.is_ipv6() {
            SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0))
        } else {
            SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))
        };

        let socket = bind_udp_socket(bind_addr).map_err(io_err)?;
        socket.connect(target).await.map_err(io_err)?;
        let local_addr = socket.local_addr().map_err(io_err)?;

        tracing::event!(
            target: "snmp_codec::transport", tracing::Level::DEBUG,
            snmp.peer = %target,
            snmp.local_addr = %local_addr,
            "UDP transport connected"
        );

        Ok(Self {
            socket,
            target,
            local_addr,
        })
    }
}

impl Transport for UdpTransport {
    async fn send(&self, data: &[u8]) -> Result<()> {
        tracing::event!(
            target: "snmp_codec::transport", tracing::Level::TRACE,
            snmp.peer = %self.target,
            snmp.bytes = data.len(),
            "sending datagram"
        );
        self.socket.send(data).await.map_err(|source| Error::Io {
            target: Some(self.target),
            source,
        })?;
        Ok(())
    }

    async fn recv(&self, request_id: u32, timeout: Duration) -> Result<Bytes> {
        let start = Instant::now();
        let mut buf = vec![0u8; MAX_DATAGRAM_SIZE];

        match tokio::time::timeout(timeout, self.socket.recv(&mut buf)).await {
            Ok(Ok(len)) => {
                buf.truncate(len);
                tracing::event!(
                    target: "snmp_codec::transport", tracing::Level::TRACE,
                    snmp.peer = %self.target,
                    snmp.request_id = request_id,
                    snmp.bytes = len,
                    "received datagram"
                );
                Ok(Bytes::from(buf))
            }
            Ok(Err(source)) => Err(Error::Io {
                target: Some(self.target),
                source,
            }),
            Err(_) => Err(Error::Timeout {
                target: self.target,
                elapsed: start.elapsed(),
                request_id,
                retries: 0,
            }),
        }
    }

    fn peer_addr(&self) -> SocketAddr {
        self.target
    }

    fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }
}

/// Create and bind a non-blocking UDP socket.
///
/// For IPv6 addresses, sets `IPV6_V6ONLY = false` so IPv4-mapped targets work.
fn bind_udp_socket(addr: SocketAddr) -> io::Result<UdpSocket> {
    let domain = if addr.is_ipv6() {
        Domain::IPV6
    } else {
        Domain::IPV4
    };

    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;

    if addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }

    // Set non-blocking before converting to tokio socket
    socket.set_nonblocking(true)?;
    socket.bind(&addr.into())?;

    UdpSocket::from_std(socket.into())
}
