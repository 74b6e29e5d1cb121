//! # snmp-codec
//!
//! Minimal SNMP v1/v2c GET codec.
//!
//! The core is synchronous and allocation-local: [`build_request`] turns a
//! [`GetRequest`] into wire bytes and [`parse_response`] turns a received
//! datagram back into a [`GetResponse`]. A small tokio UDP [`Client`] is
//! provided for callers who just want to query an agent.
//!
//! ## Supported subset
//!
//! - single-byte lengths only (every payload at most 255 bytes)
//! - OIDs under `1.3` whose remaining arcs are each at most 127
//! - community-based versions only (v1 and v2c)
//!
//! Inputs outside the subset are rejected with a typed [`Error`]; nothing is
//! truncated or clamped.
//!
//! ## Example
//!
//! ```
//! use snmp_codec::{GetRequest, Version, build_request, oid, parse_response};
//!
//! let request = GetRequest::new(Version::V2c, "public", 0x11223344)
//!     .oids(&[oid!(1, 3, 6, 1, 2, 1)]);
//! let packet = build_request(&request)?;
//! assert_eq!(packet[0], 0x30);
//!
//! // An agent echoes the same structure back with a response PDU.
//! let response = parse_response(&packet)?;
//! assert_eq!(response.request_id, 0x11223344);
//! assert_eq!(response.varbinds[0].oid.to_string(), "1.3.6.1.2.1");
//! # Ok::<(), snmp_codec::Error>(())
//! ```

pub mod ber;
pub mod client;
pub mod error;
pub mod message;
pub mod oid;
pub mod prelude;
pub mod request_id;
pub mod transport;
pub mod value;
pub mod varbind;
pub mod version;

#[cfg(feature = "cli")]
pub mod cli;

#[cfg(test)]
mod log_capture;

pub use client::{Client, ClientBuilder, ClientConfig};
pub use error::{Error, ErrorStatus, Result};
pub use message::{GetRequest, GetResponse, PduType, build_request, parse_response};
pub use oid::{Oid, decode_oid, encode_oid};
pub use value::Value;
pub use varbind::VarBind;
pub use version::Version;
