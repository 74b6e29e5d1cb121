//! TLV codec for SNMP.
//!
//! This module provides encoding and decoding of the BER subset used by
//! SNMP v1/v2c GET exchanges: one tag byte, one length byte, then the payload.
//! Long-form lengths and high tag numbers are not supported.

mod decode;
mod encode;
mod length;
pub mod tag;

pub use decode::*;
pub use encode::*;
pub use length::*;
pub use tag::*;
