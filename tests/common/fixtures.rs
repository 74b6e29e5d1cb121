//! Common test fixtures and constants.

use bytes::Bytes;
use snmp_codec::ber::{EncodeBuf, tag};
use snmp_codec::{Oid, Value, VarBind, Version, oid};

// =============================================================================
// System MIB OIDs (1.3.6.1.2.1.1.*)
// =============================================================================

pub fn mib2() -> Oid {
    oid!(1, 3, 6, 1, 2, 1)
}
pub fn sys_descr() -> Oid {
    oid!(1, 3, 6, 1, 2, 1, 1, 1, 0)
}
pub fn sys_uptime() -> Oid {
    oid!(1, 3, 6, 1, 2, 1, 1, 3, 0)
}
pub fn sys_name() -> Oid {
    oid!(1, 3, 6, 1, 2, 1, 1, 5, 0)
}

/// Enterprise OID with a multi-byte arc (2021), outside the encodable subset.
pub fn ucd_snmp() -> Oid {
    oid!(1, 3, 6, 1, 4, 1, 2021)
}

pub const COMMUNITY: &[u8] = b"public";

/// Request ID used where a test needs a predictable one.
pub const REQUEST_ID: u32 = 0x11223344;

// =============================================================================
// Packet builders
// =============================================================================

/// Agent-side response fields.
#[derive(Debug, Clone)]
pub struct AgentReply {
    pub version: Version,
    pub community: Bytes,
    pub pdu_tag: u8,
    pub request_id: u32,
    pub error_status: u8,
    pub error_index: u8,
    pub varbinds: Vec<VarBind>,
}

impl AgentReply {
    pub fn new(request_id: u32) -> Self {
        Self {
            version: Version::V2c,
            community: Bytes::from_static(COMMUNITY),
            pdu_tag: tag::pdu::RESPONSE,
            request_id,
            error_status: 0,
            error_index: 0,
            varbinds: Vec::new(),
        }
    }

    pub fn varbind(mut self, oid: Oid, value: Value) -> Self {
        self.varbinds.push(VarBind::new(oid, value));
        self
    }

    pub fn error(mut self, status: u8, index: u8) -> Self {
        self.error_status = status;
        self.error_index = index;
        self
    }

    pub fn encode(&self) -> Bytes {
        let mut buf = EncodeBuf::new();
        buf.push_sequence(|buf| {
            buf.push_constructed(self.pdu_tag, |buf| {
                snmp_codec::varbind::encode_varbind_list(buf, &self.varbinds)?;
                buf.push_integer_u8(self.error_index);
                buf.push_integer_u8(self.error_status);
                buf.push_integer_u32(self.request_id);
                Ok(())
            })?;
            buf.push_octet_string(&self.community)?;
            buf.push_integer_u8(self.version.as_u8());
            Ok(())
        })
        .expect("fixture response fits in single-byte lengths");
        buf.finish()
    }
}

/// A typical sysDescr/sysUpTime/sysName reply.
pub fn system_response(request_id: u32) -> Bytes {
    AgentReply::new(request_id)
        .varbind(sys_descr(), Value::octet_string("Linux router 5.15"))
        .varbind(
            sys_uptime(),
            Value::new(tag::application::TIMETICKS, vec![0x01, 0xE2, 0x40]),
        )
        .varbind(sys_name(), Value::octet_string("router"))
        .encode()
}
