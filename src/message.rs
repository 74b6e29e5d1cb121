//! Community-based SNMP message format (v1/v2c).
//!
//! V1 and V2c messages share the same structure:
//! `SEQUENCE { version INTEGER, community OCTET STRING, pdu PDU }`
//!
//! where the PDU is
//! `PDU { request-id INTEGER, error-status INTEGER, error-index INTEGER, varbinds SEQUENCE }`.
//!
//! [`GetRequest::encode`] builds that structure; [`GetResponse::decode`]
//! walks it field by field, validating each tag and length before moving on.

use crate::ber::{Decoder, EncodeBuf, decode_error, tag};
use crate::error::{DecodeErrorKind, ErrorStatus, Field, Result};
use crate::oid::Oid;
use crate::value::Value;
use crate::varbind::{VarBind, decode_varbind_list, encode_varbind_list};
use crate::version::Version;
use bytes::Bytes;

/// Request PDU type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PduType {
    /// GetRequest (0xA0): exact-match lookup of each OID.
    Get,
    /// GetNextRequest (0xA1): the agent answers with the next object after
    /// each OID, so a subtree root such as `1.3.6.1.2.1` returns its first leaf.
    #[default]
    GetNext,
}

impl PduType {
    /// The PDU tag byte.
    pub const fn tag(self) -> u8 {
        match self {
            PduType::Get => tag::pdu::GET_REQUEST,
            PduType::GetNext => tag::pdu::GET_NEXT_REQUEST,
        }
    }
}

/// An outgoing GET request.
///
/// The request ID is supplied by the caller; the codec never generates one.
/// Varbinds go on the wire in the order they were added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetRequest {
    /// SNMP version (V1 or V2c)
    pub version: Version,
    /// Community string for authentication
    pub community: Bytes,
    /// Request identifier echoed back by the agent
    pub request_id: u32,
    /// PDU tag to send
    pub pdu_type: PduType,
    /// Variable bindings, in wire order
    pub varbinds: Vec<VarBind>,
}

impl GetRequest {
    /// Create an empty request.
    pub fn new(version: Version, community: impl Into<Bytes>, request_id: u32) -> Self {
        Self {
            version,
            community: community.into(),
            request_id,
            pdu_type: PduType::default(),
            varbinds: Vec::new(),
        }
    }

    /// Set the PDU type.
    pub fn pdu_type(mut self, pdu_type: PduType) -> Self {
        self.pdu_type = pdu_type;
        self
    }

    /// Append a varbind with an explicit value.
    pub fn varbind(mut self, oid: Oid, value: Value) -> Self {
        self.varbinds.push(VarBind::new(oid, value));
        self
    }

    /// Append NULL varbinds for each OID.
    pub fn oids<'a>(mut self, oids: impl IntoIterator<Item = &'a Oid>) -> Self {
        self.varbinds
            .extend(oids.into_iter().cloned().map(VarBind::null));
        self
    }

    /// Encode to wire bytes.
    ///
    /// Fails if the OIDs fall outside the supported subset or any nesting
    /// level exceeds 255 bytes.
    pub fn encode(&self) -> Result<Bytes> {
        let mut buf = EncodeBuf::new();

        buf.push_sequence(|buf| {
            buf.push_constructed(self.pdu_type.tag(), |buf| {
                encode_varbind_list(buf, &self.varbinds)?;
                buf.push_integer_u8(0); // error-index
                buf.push_integer_u8(0); // error-status
                buf.push_integer_u32(self.request_id);
                Ok(())
            })?;
            buf.push_octet_string(&self.community)?;
            buf.push_integer_u8(self.version.as_u8());
            Ok(())
        })?;

        let bytes = buf.finish();
        tracing::event!(
            target: "snmp_codec::message", tracing::Level::TRACE,
            snmp.request_id = self.request_id,
            snmp.varbinds = self.varbinds.len(),
            snmp.bytes = bytes.len(),
            "encoded request"
        );
        Ok(bytes)
    }
}

/// A decoded GET response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetResponse {
    /// SNMP version (V1 or V2c)
    pub version: Version,
    /// Community string echoed by the agent
    pub community: Bytes,
    /// PDU tag as received (normally 0xA2); not validated
    pub pdu_tag: u8,
    pub request_id: u32,
    pub error_status: ErrorStatus,
    /// 1-based index of the failing varbind, 0 if none
    pub error_index: u8,
    /// Variable bindings in the order the agent sent them
    pub varbinds: Vec<VarBind>,
}

impl GetResponse {
    /// Decode a response packet.
    ///
    /// Fields are validated strictly in order: envelope, version, community,
    /// PDU, request ID, error status, error index, varbind list. The first
    /// violation aborts decoding; there is no partial result.
    /// Bytes after the envelope are ignored.
    pub fn decode(data: impl Into<Bytes>) -> Result<Self> {
        let mut decoder = Decoder::new(data.into());
        Self::decode_from(&mut decoder)
    }

    pub(crate) fn decode_from(decoder: &mut Decoder) -> Result<Self> {
        let mut seq = decoder.read_sequence(Field::Envelope)?;

        let version_offset = seq.offset();
        let version_num = seq.read_integer_u8(Field::Version)?;
        let version = Version::from_u8(version_num).ok_or_else(|| {
            decode_error(
                Field::Version,
                version_offset,
                DecodeErrorKind::UnknownVersion(version_num),
            )
        })?;

        let community = seq
            .expect_tlv(tag::universal::OCTET_STRING, Field::Community)?
            .payload;

        let (pdu_tag, mut pdu) = seq.read_constructed(Field::Pdu)?;
        if !tag::is_constructed(pdu_tag) {
            tracing::event!(
                target: "snmp_codec::message", tracing::Level::TRACE,
                snmp.pdu_tag = pdu_tag,
                "PDU tag lacks the constructed bit"
            );
        }
        let request_id = pdu.read_integer_u32(Field::RequestId)?;
        let error_status = ErrorStatus::from_u8(pdu.read_integer_u8(Field::ErrorStatus)?);
        let error_index = pdu.read_integer_u8(Field::ErrorIndex)?;
        let varbinds = decode_varbind_list(&mut pdu)?;

        tracing::event!(
            target: "snmp_codec::message", tracing::Level::TRACE,
            snmp.request_id = request_id,
            snmp.pdu_tag = pdu_tag,
            snmp.varbinds = varbinds.len(),
            "decoded response"
        );

        Ok(GetResponse {
            version,
            community,
            pdu_tag,
            request_id,
            error_status,
            error_index,
            varbinds,
        })
    }

    /// Whether the agent reported an error status.
    pub fn is_error(&self) -> bool {
        self.error_status != ErrorStatus::NoError
    }

    /// Look up the value bound to `oid`.
    pub fn get(&self, oid: &Oid) -> Option<&Value> {
        self.varbinds
            .iter()
            .find(|vb| &vb.oid == oid)
            .map(|vb| &vb.value)
    }

    /// The varbind the error index points at, if any.
    pub fn error_varbind(&self) -> Option<&VarBind> {
        (self.error_index as usize)
            .checked_sub(1)
            .and_then(|i| self.varbinds.get(i))
    }
}

/// Build a GET request packet.
pub fn build_request(request: &GetRequest) -> Result<Bytes> {
    request.encode()
}

/// Parse a GET response packet.
pub fn parse_response(data: &[u8]) -> Result<GetResponse> {
    GetResponse::decode(Bytes::copy_from_slice(data))
}
