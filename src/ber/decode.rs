//! TLV decoding.
//!
//! Every read validates the header before touching the payload: a declared
//! length that runs past the end of the buffer is an error, never a clamp.

use super::tag;
use crate::error::{DecodeErrorKind, Error, Field, Result};
use bytes::Bytes;

/// A decoded `(tag, length, payload)` record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tlv {
    pub tag: u8,
    /// Declared length; always equal to `payload.len()`.
    pub length: usize,
    pub payload: Bytes,
}

impl Tlv {
    /// Decode the record at the start of `data`.
    ///
    /// Bytes after the record are ignored.
    pub fn decode(data: &[u8]) -> Result<Self> {
        Decoder::from_slice(data).read_tlv(Field::Record)
    }

    /// Total encoded size including the two header bytes.
    pub fn encoded_len(&self) -> usize {
        self.length + 2
    }
}

/// Sequential TLV reader over a byte buffer.
///
/// Tracks the absolute offset of its cursor so nested decoders report
/// positions relative to the whole message.
#[derive(Debug, Clone)]
pub struct Decoder {
    data: Bytes,
    pos: usize,
    base: usize,
}

impl Decoder {
    /// Create a decoder over `data`.
    pub fn new(data: Bytes) -> Self {
        Self {
            data,
            pos: 0,
            base: 0,
        }
    }

    /// Create a decoder over a copy of `data`.
    pub fn from_slice(data: &[u8]) -> Self {
        Self::new(Bytes::copy_from_slice(data))
    }

    /// Absolute offset of the cursor within the outermost buffer.
    pub fn offset(&self) -> usize {
        self.base + self.pos
    }

    /// Number of unread bytes.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Whether all bytes have been consumed.
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Read the next record, whatever its tag.
    pub fn read_tlv(&mut self, field: Field) -> Result<Tlv> {
        let (tag, len) = self.peek_header(field)?;
        self.take(field, tag, len)
    }

    /// Read the next record and require its tag.
    ///
    /// The tag is checked before the length.
    pub fn expect_tlv(&mut self, expected: u8, field: Field) -> Result<Tlv> {
        let (tag, len) = self.peek_header(field)?;
        self.check_tag(expected, tag, field)?;
        self.take(field, tag, len)
    }

    /// Read the next record and require both its tag and an exact length.
    pub fn expect_fixed(&mut self, expected: u8, expected_len: usize, field: Field) -> Result<Tlv> {
        let (tag, len) = self.peek_header(field)?;
        self.check_tag(expected, tag, field)?;
        if len != expected_len {
            return Err(self.fail(
                field,
                DecodeErrorKind::InvalidLength {
                    expected: expected_len,
                    actual: len,
                },
            ));
        }
        self.take(field, tag, len)
    }

    /// Read a one-byte INTEGER.
    pub fn read_integer_u8(&mut self, field: Field) -> Result<u8> {
        let tlv = self.expect_fixed(tag::universal::INTEGER, 1, field)?;
        Ok(tlv.payload[0])
    }

    /// Read a four-byte big-endian INTEGER.
    pub fn read_integer_u32(&mut self, field: Field) -> Result<u32> {
        let tlv = self.expect_fixed(tag::universal::INTEGER, 4, field)?;
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&tlv.payload);
        Ok(u32::from_be_bytes(bytes))
    }

    /// Read a record of any tag and return a decoder over its payload.
    pub fn read_constructed(&mut self, field: Field) -> Result<(u8, Decoder)> {
        let (tag, len) = self.peek_header(field)?;
        self.nested(field, tag, len).map(|d| (tag, d))
    }

    /// Read a record with the given tag and return a decoder over its payload.
    pub fn expect_constructed(&mut self, expected: u8, field: Field) -> Result<Decoder> {
        let (tag, len) = self.peek_header(field)?;
        self.check_tag(expected, tag, field)?;
        self.nested(field, tag, len)
    }

    /// Read a SEQUENCE and return a decoder over its contents.
    pub fn read_sequence(&mut self, field: Field) -> Result<Decoder> {
        self.expect_constructed(tag::universal::SEQUENCE, field)
    }

    fn nested(&mut self, field: Field, tag: u8, len: usize) -> Result<Decoder> {
        let payload_offset = self.offset() + 2;
        let tlv = self.take(field, tag, len)?;
        Ok(Decoder {
            data: tlv.payload,
            pos: 0,
            base: payload_offset,
        })
    }

    fn peek_header(&self, field: Field) -> Result<(u8, usize)> {
        let available = self.remaining();
        if available < 2 {
            return Err(self.fail(field, DecodeErrorKind::TruncatedHeader { available }));
        }
        Ok((self.data[self.pos], self.data[self.pos + 1] as usize))
    }

    fn check_tag(&self, expected: u8, actual: u8, field: Field) -> Result<()> {
        if expected != actual {
            return Err(self.fail(field, DecodeErrorKind::UnexpectedTag { expected, actual }));
        }
        Ok(())
    }

    fn take(&mut self, field: Field, tag: u8, len: usize) -> Result<Tlv> {
        let available = self.remaining() - 2;
        if len > available {
            return Err(self.fail(
                field,
                DecodeErrorKind::TruncatedRecord {
                    declared: len,
                    available,
                },
            ));
        }

        let start = self.pos + 2;
        let payload = self.data.slice(start..start + len);
        self.pos = start + len;
        Ok(Tlv {
            tag,
            length: len,
            payload,
        })
    }

    fn fail(&self, field: Field, kind: DecodeErrorKind) -> Error {
        decode_error(field, self.offset(), kind)
    }
}

/// Build a decode error and trace it.
pub(crate) fn decode_error(field: Field, offset: usize, kind: DecodeErrorKind) -> Error {
    tracing::event!(
        target: "snmp_codec::ber", tracing::Level::DEBUG,
        snmp.offset = offset,
        snmp.field = %field,
        snmp.kind = %kind,
        "decode error"
    );
    Error::decode(field, offset, kind)
}
