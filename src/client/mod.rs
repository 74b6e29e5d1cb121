//! SNMP GET client.
//!
//! Ties the codec to a [`Transport`]: encode a [`GetRequest`], send it, wait
//! for the reply and decode it as a [`GetResponse`]. Timeouts and retries live
//! here, never in the codec.

mod builder;

pub use builder::*;

use std::time::{Duration, Instant};

use bytes::Bytes;

use crate::error::{Error, Result};
use crate::message::{GetRequest, GetResponse, PduType};
use crate::oid::Oid;
use crate::request_id::RequestIdSource;
use crate::transport::{Transport, UdpTransport};
use crate::version::Version;

/// Default SNMP agent port.
pub const DEFAULT_PORT: u16 = 161;

/// Per-client request settings.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub version: Version,
    pub community: Bytes,
    /// Wait for each attempt
    pub timeout: Duration,
    /// Additional attempts after the first times out
    pub retries: u32,
    pub pdu_type: PduType,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            version: Version::V2c,
            community: Bytes::from_static(b"public"),
            timeout: Duration::from_secs(5),
            retries: 0,
            pdu_type: PduType::default(),
        }
    }
}

/// SNMP v1/v2c client bound to one agent.
pub struct Client<T: Transport = UdpTransport> {
    transport: T,
    config: ClientConfig,
    request_ids: RequestIdSource,
}

impl Client<UdpTransport> {
    /// Start building a client for `target` (`host` or `host:port`).
    pub fn builder(target: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(target)
    }
}

impl<T: Transport> Client<T> {
    /// Create a client over an existing transport.
    pub fn with_transport(transport: T, config: ClientConfig, request_ids: RequestIdSource) -> Self {
        Self {
            transport,
            config,
            request_ids,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn peer_addr(&self) -> std::net::SocketAddr {
        self.transport.peer_addr()
    }

    /// Fetch the values bound to `oids`, sent as NULL varbinds in one request.
    pub async fn get(&self, oids: &[Oid]) -> Result<GetResponse> {
        let request_id = (self.request_ids)()?;
        let request = GetRequest::new(self.config.version, self.config.community.clone(), request_id)
            .pdu_type(self.config.pdu_type)
            .oids(oids);
        self.send_request(&request).await
    }

    /// Send a prepared request and wait for its response.
    ///
    /// The same packet is resent on each retry, so a late reply to an
    /// earlier attempt still matches. Replies carrying another request ID
    /// are skipped while the current attempt has time left; if nothing
    /// matching arrives, the last such ID is reported as a mismatch.
    pub async fn send_request(&self, request: &GetRequest) -> Result<GetResponse> {
        let packet = request.encode()?;
        let start = Instant::now();
        let mut attempt = 0;
        let mut stale: Option<u32> = None;

        loop {
            self.transport.send(&packet).await?;
            let deadline = Instant::now().checked_add(self.config.timeout);

            let timed_out = loop {
                let remaining = deadline.map_or(self.config.timeout, |d| {
                    d.saturating_duration_since(Instant::now())
                });
                let data = match self.transport.recv(request.request_id, remaining).await {
                    Ok(data) => data,
                    Err(Error::Timeout { target, .. }) => break target,
                    Err(e) => return Err(e),
                };

                let response = GetResponse::decode(data)?;
                if response.request_id == request.request_id {
                    tracing::event!(
                        target: "snmp_codec::client", tracing::Level::DEBUG,
                        snmp.peer = %self.peer_addr(),
                        snmp.request_id = response.request_id,
                        snmp.varbinds = response.varbinds.len(),
                        snmp.error_status = %response.error_status,
                        "response received"
                    );
                    return Ok(response);
                }

                tracing::event!(
                    target: "snmp_codec::client", tracing::Level::DEBUG,
                    snmp.peer = %self.peer_addr(),
                    snmp.request_id = request.request_id,
                    snmp.received_request_id = response.request_id,
                    "skipping response for another request_id"
                );
                stale = Some(response.request_id);
            };

            if attempt < self.config.retries {
                attempt += 1;
                tracing::event!(
                    target: "snmp_codec::client", tracing::Level::DEBUG,
                    snmp.peer = %self.peer_addr(),
                    snmp.request_id = request.request_id,
                    snmp.attempt = attempt,
                    "timeout, retrying"
                );
                continue;
            }

            if let Some(actual) = stale {
                tracing::event!(
                    target: "snmp_codec::client", tracing::Level::WARN,
                    snmp.peer = %self.peer_addr(),
                    snmp.request_id = request.request_id,
                    snmp.received_request_id = actual,
                    "no response matched the request ID"
                );
                return Err(Error::RequestIdMismatch {
                    expected: request.request_id,
                    actual,
                });
            }

            return Err(Error::Timeout {
                target: timed_out,
                elapsed: start.elapsed(),
                request_id: request.request_id,
                retries: attempt,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ber::{EncodeBuf, tag};
    use crate::oid;
    use crate::request_id;
    use crate::transport::MockTransport;
    use crate::value::Value;
    use crate::varbind::{VarBind, encode_varbind_list};

    fn response_packet(request_id: u32, varbinds: &[VarBind]) -> Bytes {
        let mut buf = EncodeBuf::new();
        buf.push_sequence(|buf| {
            buf.push_constructed(tag::pdu::RESPONSE, |buf| {
                encode_varbind_list(buf, varbinds)?;
                buf.push_integer_u8(0);
                buf.push_integer_u8(0);
                buf.push_integer_u32(request_id);
                Ok(())
            })?;
            buf.push_octet_string(b"public")?;
            buf.push_integer_u8(Version::V2c.as_u8());
            Ok(())
        })
        .unwrap();
        buf.finish()
    }

    fn client(retries: u32, id: u32) -> Client<MockTransport> {
        let transport = MockTransport::new("192.0.2.1:161".parse().unwrap());
        let config = ClientConfig {
            retries,
            timeout: Duration::from_millis(10),
            ..ClientConfig::default()
        };
        Client::with_transport(transport, config, request_id::fixed(id))
    }

    #[tokio::test]
    async fn test_get_sends_null_bindings() {
        let client = client(0, 0x01020304);
        let sys_descr = oid!(1, 3, 6, 1, 2, 1, 1, 1, 0);
        client.transport.queue_reply(response_packet(
            0x01020304,
            &[VarBind::new(sys_descr.clone(), Value::octet_string("router"))],
        ));

        let response = client.get(&[sys_descr.clone()]).await.unwrap();
        assert_eq!(response.pdu_tag, tag::pdu::RESPONSE);
        assert_eq!(
            response.get(&sys_descr).and_then(Value::as_str),
            Some("router")
        );

        let sent = client.transport.sent();
        assert_eq!(sent.len(), 1);
        let expected = GetRequest::new(Version::V2c, "public", 0x01020304)
            .oids(&[sys_descr])
            .encode()
            .unwrap();
        assert_eq!(sent[0], expected);
    }

    #[tokio::test]
    async fn test_retry_resends_same_packet() {
        let client = client(2, 7);
        client.transport.queue_timeout();
        client.transport.queue_timeout();
        client.transport.queue_reply(response_packet(7, &[]));

        let response = client.get(&[oid!(1, 3, 6, 1, 2, 1)]).await.unwrap();
        assert_eq!(response.request_id, 7);

        let sent = client.transport.sent();
        assert_eq!(sent.len(), 3);
        assert!(sent.windows(2).all(|w| w[0] == w[1]));
    }

    #[tokio::test]
    async fn test_timeout_after_retries() {
        let client = client(1, 9);
        let err = client.get(&[oid!(1, 3, 6, 1, 2, 1)]).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Timeout {
                request_id: 9,
                retries: 1,
                ..
            }
        ));
        assert_eq!(client.transport.sent().len(), 2);
    }

    #[tokio::test]
    async fn test_stale_reply_is_skipped() {
        let client = client(0, 100);
        client.transport.queue_reply(response_packet(99, &[]));
        client.transport.queue_reply(response_packet(100, &[]));

        let response = client.get(&[oid!(1, 3, 6, 1, 2, 1)]).await.unwrap();
        assert_eq!(response.request_id, 100);
        assert_eq!(client.transport.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_stale_reply_is_logged() {
        let (logs, _guard) = crate::log_capture::capture_logs();
        let client = client(0, 100);
        client.transport.queue_reply(response_packet(99, &[]));
        client.transport.queue_reply(response_packet(100, &[]));
        client.get(&[oid!(1, 3, 6, 1, 2, 1)]).await.unwrap();

        let out = logs.contents();
        assert!(out.contains("skipping response for another request_id"), "{}", out);
        assert!(out.contains("snmp.request_id=100"), "{}", out);
        assert!(out.contains("snmp.received_request_id=99"), "{}", out);
        assert!(out.contains("snmp.peer=192.0.2.1:161"), "{}", out);
    }

    #[tokio::test]
    async fn test_stale_reply_then_retry_succeeds() {
        let client = client(1, 100);
        client.transport.queue_reply(response_packet(55, &[]));
        client.transport.queue_timeout();
        client.transport.queue_reply(response_packet(100, &[]));

        let response = client.get(&[oid!(1, 3, 6, 1, 2, 1)]).await.unwrap();
        assert_eq!(response.request_id, 100);
        assert_eq!(client.transport.sent().len(), 2);
    }

    #[tokio::test]
    async fn test_request_id_mismatch() {
        let client = client(0, 100);
        client.transport.queue_reply(response_packet(101, &[]));
        let err = client.get(&[oid!(1, 3, 6, 1, 2, 1)]).await.unwrap_err();
        assert!(matches!(
            err,
            Error::RequestIdMismatch {
                expected: 100,
                actual: 101
            }
        ));
    }

    #[tokio::test]
    async fn test_malformed_reply_is_decode_error() {
        let client = client(0, 1);
        client.transport.queue_reply(Bytes::from_static(&[0x30, 0x10, 0x02]));
        let err = client.get(&[oid!(1, 3, 6, 1, 2, 1)]).await.unwrap_err();
        assert!(err.is_length_error());
    }

    #[tokio::test]
    async fn test_unsupported_oid_fails_before_send() {
        let client = client(0, 1);
        let err = client.get(&[oid!(1, 3, 6, 1, 4, 1, 2021)]).await.unwrap_err();
        assert!(matches!(err, Error::InvalidOid { .. }));
        assert!(client.transport.sent().is_empty());
    }
}
