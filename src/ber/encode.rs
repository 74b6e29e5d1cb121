//! TLV encoding.
//!
//! Uses a reverse buffer approach: writes from end backwards to avoid
//! needing to pre-calculate lengths.

use super::length::encode_length;
use super::tag;
use crate::error::Result;
use crate::oid::Oid;
use bytes::Bytes;

/// Buffer for TLV encoding that writes backwards.
///
/// This approach avoids needing to pre-calculate content lengths:
/// we write the content first, then prepend the length and tag.
/// Every length is checked against the single-byte limit as it is written.
pub struct EncodeBuf {
    buf: Vec<u8>,
}

impl EncodeBuf {
    /// Create a new encode buffer with default capacity.
    pub fn new() -> Self {
        Self::with_capacity(512)
    }

    /// Create a new encode buffer with specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Push multiple bytes (prepends to front, reversed).
    pub fn push_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend(bytes.iter().rev());
    }

    /// Push a length byte, rejecting anything above 255.
    pub fn push_length(&mut self, len: usize) -> Result<()> {
        let byte = encode_length(len)?;
        self.buf.push(byte);
        Ok(())
    }

    /// Push a tag.
    pub fn push_tag(&mut self, tag: u8) {
        self.buf.push(tag);
    }

    /// Get the current length of encoded data.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Check if buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Encode a primitive TLV with an arbitrary tag.
    pub fn push_tlv(&mut self, tag: u8, payload: &[u8]) -> Result<()> {
        let len = encode_length(payload.len())?;
        self.push_bytes(payload);
        self.buf.push(len);
        self.push_tag(tag);
        Ok(())
    }

    /// Encode a constructed type (SEQUENCE, PDU, etc).
    ///
    /// Calls the closure to encode contents, then wraps with length and tag.
    /// Contents must be pushed in reverse order.
    pub fn push_constructed<F>(&mut self, tag: u8, f: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        let start_len = self.len();
        f(self)?;
        let content_len = self.len() - start_len;
        self.push_length(content_len)?;
        self.push_tag(tag);
        Ok(())
    }

    /// Encode a SEQUENCE.
    pub fn push_sequence<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        self.push_constructed(tag::universal::SEQUENCE, f)
    }

    /// Encode a one-byte INTEGER (version, error status, error index).
    pub fn push_integer_u8(&mut self, value: u8) {
        self.buf.extend_from_slice(&[value, 1, tag::universal::INTEGER]);
    }

    /// Encode a 32-bit value as a fixed four-byte big-endian INTEGER.
    ///
    /// Request IDs are always written at full width so the response parser
    /// can require exactly four bytes back.
    pub fn push_integer_u32(&mut self, value: u32) {
        self.push_bytes(&value.to_be_bytes());
        self.buf.extend_from_slice(&[4, tag::universal::INTEGER]);
    }

    /// Encode an OCTET STRING.
    pub fn push_octet_string(&mut self, data: &[u8]) -> Result<()> {
        self.push_tlv(tag::universal::OCTET_STRING, data)
    }

    /// Encode a NULL.
    pub fn push_null(&mut self) {
        self.buf.extend_from_slice(&[0, tag::universal::NULL]);
    }

    /// Encode an OBJECT IDENTIFIER.
    pub fn push_oid(&mut self, oid: &Oid) -> Result<()> {
        let ber = oid.to_ber()?;
        self.push_tlv(tag::universal::OBJECT_IDENTIFIER, &ber)
    }

    /// Finalize and return the encoded bytes.
    ///
    /// The buffer is reversed to produce the correct order.
    pub fn finish(mut self) -> Bytes {
        self.buf.reverse();
        Bytes::from(self.buf)
    }

    /// Finalize and return as `Vec<u8>`.
    pub fn finish_vec(mut self) -> Vec<u8> {
        self.buf.reverse();
        self.buf
    }
}

impl Default for EncodeBuf {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode a single `[tag, length, payload...]` record.
///
/// Fails with [`EncodeErrorKind::PayloadTooLarge`](crate::error::EncodeErrorKind)
/// if the payload is longer than 255 bytes.
pub fn encode_tlv(tag: u8, payload: &[u8]) -> Result<Vec<u8>> {
    let mut buf = EncodeBuf::with_capacity(payload.len() + 2);
    buf.push_tlv(tag, payload)?;
    Ok(buf.finish_vec())
}

/// Encode a signed 32-bit integer in minimal BER form.
///
/// Returns a stack-allocated array and the number of valid bytes.
/// The valid bytes are at the END of the array.
#[inline]
pub(crate) fn encode_integer_stack(value: i32) -> ([u8; 4], usize) {
    let bytes = value.to_be_bytes();

    // Find first significant byte
    let mut start = 0;
    if value >= 0 {
        // For positive/zero, skip leading 0x00 bytes (but keep one if needed for sign)
        while start < 3 && bytes[start] == 0 && bytes[start + 1] & 0x80 == 0 {
            start += 1;
        }
    } else {
        // For negative, skip leading 0xFF bytes (but keep one if needed for sign)
        while start < 3 && bytes[start] == 0xFF && bytes[start + 1] & 0x80 != 0 {
            start += 1;
        }
    }

    (bytes, 4 - start)
}
