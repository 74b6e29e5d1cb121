//! Variable binding (VarBind) type.
//!
//! A VarBind pairs an OID with a value. Lists of varbinds are kept in a
//! `Vec` so wire order is always insertion order.

use crate::ber::{Decoder, EncodeBuf, decode_error, tag};
use crate::error::{DecodeErrorKind, Error, Field, Result};
use crate::oid::Oid;
use crate::value::Value;

/// Variable binding - an OID-value pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarBind {
    /// The object identifier.
    pub oid: Oid,
    /// The value.
    pub value: Value,
}

impl VarBind {
    /// Create a new VarBind.
    pub fn new(oid: Oid, value: Value) -> Self {
        Self { oid, value }
    }

    /// Create a VarBind with a NULL value (for GET requests).
    pub fn null(oid: Oid) -> Self {
        Self {
            oid,
            value: Value::null(),
        }
    }

    /// Encode to BER.
    pub fn encode(&self, buf: &mut EncodeBuf) -> Result<()> {
        buf.push_sequence(|buf| {
            self.value.encode(buf)?;
            buf.push_oid(&self.oid)
        })
    }

    /// Decode from BER.
    ///
    /// Bytes after the value inside the varbind SEQUENCE are ignored.
    pub fn decode(decoder: &mut Decoder) -> Result<Self> {
        let mut seq = decoder.read_sequence(Field::VarBind)?;

        let oid_offset = seq.offset();
        let oid_tlv = seq.expect_tlv(tag::universal::OBJECT_IDENTIFIER, Field::Oid)?;
        let oid = Oid::from_ber(&oid_tlv.payload).map_err(|e| match e {
            Error::InvalidOid { kind, .. } => {
                decode_error(Field::Oid, oid_offset, DecodeErrorKind::InvalidOid(kind))
            }
            other => other,
        })?;

        let value = Value::decode(&mut seq)?;
        if !seq.is_empty() {
            tracing::event!(
                target: "snmp_codec::ber", tracing::Level::TRACE,
                snmp.offset = seq.offset(),
                snmp.trailing = seq.remaining(),
                "ignoring trailing bytes in varbind"
            );
        }

        Ok(VarBind { oid, value })
    }
}

impl std::fmt::Display for VarBind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}", self.oid, self.value)
    }
}

/// Encode a list of VarBinds.
pub fn encode_varbind_list(buf: &mut EncodeBuf, varbinds: &[VarBind]) -> Result<()> {
    buf.push_sequence(|buf| {
        // Encode in reverse order since we're using reverse buffer
        for vb in varbinds.iter().rev() {
            vb.encode(buf)?;
        }
        Ok(())
    })
}

/// Decode a list of VarBinds, reading until the list is exhausted.
pub fn decode_varbind_list(decoder: &mut Decoder) -> Result<Vec<VarBind>> {
    let mut seq = decoder.read_sequence(Field::VarBindList)?;
    let mut varbinds = Vec::new();

    while !seq.is_empty() {
        varbinds.push(VarBind::decode(&mut seq)?);
    }

    Ok(varbinds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oid;
    use bytes::Bytes;

    fn roundtrip_list(varbinds: &[VarBind]) -> Vec<VarBind> {
        let mut buf = EncodeBuf::new();
        encode_varbind_list(&mut buf, varbinds).unwrap();
        let mut decoder = Decoder::new(buf.finish());
        decode_varbind_list(&mut decoder).unwrap()
    }

    #[test]
    fn test_null_varbind_encoding() {
        let vb = VarBind::null(oid!(1, 3, 6, 1, 2, 1));
        let mut buf = EncodeBuf::new();
        vb.encode(&mut buf).unwrap();
        assert_eq!(
            &buf.finish()[..],
            &[0x30, 0x09, 0x06, 0x05, 0x2B, 0x06, 0x01, 0x02, 0x01, 0x05, 0x00]
        );
    }

    #[test]
    fn test_varbind_list_preserves_order() {
        let varbinds = vec![
            VarBind::null(oid!(1, 3, 6, 1, 2, 1, 1, 5, 0)),
            VarBind::null(oid!(1, 3, 6, 1, 2, 1, 1, 1, 0)),
            VarBind::new(oid!(1, 3, 6, 1, 2, 1, 1, 3, 0), Value::integer(7)),
        ];
        assert_eq!(roundtrip_list(&varbinds), varbinds);
    }

    #[test]
    fn test_varbind_list_empty() {
        assert!(roundtrip_list(&[]).is_empty());
    }

    #[test]
    fn test_varbind_list_mixed_value_types() {
        let varbinds = vec![
            VarBind::new(
                oid!(1, 3, 6, 1, 2, 1, 1, 1, 0),
                Value::octet_string(Bytes::from_static(b"Linux router")),
            ),
            VarBind::new(
                oid!(1, 3, 6, 1, 2, 1, 1, 3, 0),
                Value::new(tag::application::TIMETICKS, vec![0x01, 0xE2, 0x40]),
            ),
            VarBind::new(
                oid!(1, 3, 6, 1, 2, 1, 1, 99, 0),
                Value::new(tag::context::NO_SUCH_OBJECT, Bytes::new()),
            ),
        ];
        let decoded = roundtrip_list(&varbinds);
        assert_eq!(decoded, varbinds);
        assert!(decoded[2].value.is_exception());
    }

    #[test]
    fn test_decode_wrong_oid_tag() {
        // SEQUENCE { OCTET STRING "ab", NULL }
        let data = [0x30, 0x06, 0x04, 0x02, b'a', b'b', 0x05, 0x00];
        let mut decoder = Decoder::from_slice(&data);
        let err = VarBind::decode(&mut decoder).unwrap_err();
        assert!(matches!(
            err,
            Error::Decode {
                field: Field::Oid,
                offset: 2,
                kind: DecodeErrorKind::UnexpectedTag {
                    expected: 0x06,
                    actual: 0x04
                }
            }
        ));
    }

    #[test]
    fn test_decode_value_overflows_binding() {
        // Binding SEQUENCE declared longer than the buffer
        let data = [0x30, 0x10, 0x06, 0x02, 0x2B, 0x06];
        let mut decoder = Decoder::from_slice(&data);
        let err = VarBind::decode(&mut decoder).unwrap_err();
        assert_eq!(err.field(), Some(Field::VarBind));
        assert!(err.is_length_error());

        // SEQUENCE { OID 1.3.6, OCTET STRING declared 9 with nothing after }
        let data = [0x30, 0x06, 0x06, 0x02, 0x2B, 0x06, 0x04, 0x09];
        let mut decoder = Decoder::from_slice(&data);
        let err = VarBind::decode(&mut decoder).unwrap_err();
        assert_eq!(err.field(), Some(Field::Value));
        assert!(err.is_length_error());
    }

    #[test]
    fn test_decode_multi_byte_arc() {
        // SEQUENCE { OID 1.3.6.1.4.1.2021.0, NULL }
        let data = [
            0x30, 0x0C, 0x06, 0x08, 0x2B, 0x06, 0x01, 0x04, 0x01, 0x8F, 0x65, 0x00, 0x05, 0x00,
        ];
        let mut decoder = Decoder::from_slice(&data);
        let vb = VarBind::decode(&mut decoder).unwrap();
        assert_eq!(vb.oid, oid!(1, 3, 6, 1, 4, 1, 2021, 0));
        assert_eq!(vb.value, Value::null());
    }

    #[test]
    fn test_decode_truncated_arc() {
        // SEQUENCE { OID 1.3.6.1.4.1 with a dangling continuation byte, NULL }
        let data = [
            0x30, 0x0B, 0x06, 0x07, 0x2B, 0x06, 0x01, 0x04, 0x01, 0x01, 0x8F, 0x05, 0x00,
        ];
        let mut decoder = Decoder::from_slice(&data);
        let err = VarBind::decode(&mut decoder).unwrap_err();
        assert!(matches!(
            err,
            Error::Decode {
                field: Field::Oid,
                offset: 2,
                kind: DecodeErrorKind::InvalidOid(crate::error::OidErrorKind::TruncatedArc),
            }
        ));
    }

    #[test]
    fn test_varbind_display() {
        let vb = VarBind::new(oid!(1, 3, 6, 1, 2, 1, 1, 1, 0), Value::integer(42));
        assert_eq!(vb.to_string(), "1.3.6.1.2.1.1.1.0 = 42");
    }
}
