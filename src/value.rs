//! Varbind values.
//!
//! Values are kept as a raw tag and payload. The codec does not interpret
//! them; the accessors below cover the common INTEGER and string cases.

use crate::ber::{Decoder, EncodeBuf, encode_integer_stack, tag};
use crate::error::{Field, Result};
use crate::oid::Oid;
use bytes::Bytes;
use std::fmt;

/// A single tagged value as carried inside a varbind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Value {
    tag: u8,
    data: Bytes,
}

impl Value {
    /// Create a value with an arbitrary tag.
    pub fn new(tag: u8, data: impl Into<Bytes>) -> Self {
        Self {
            tag,
            data: data.into(),
        }
    }

    /// The NULL placeholder sent with GET requests.
    pub fn null() -> Self {
        Self::new(tag::universal::NULL, Bytes::new())
    }

    /// An INTEGER in minimal two's complement form.
    pub fn integer(value: i32) -> Self {
        let (arr, len) = encode_integer_stack(value);
        Self::new(
            tag::universal::INTEGER,
            Bytes::copy_from_slice(&arr[4 - len..]),
        )
    }

    /// An OCTET STRING.
    pub fn octet_string(data: impl Into<Bytes>) -> Self {
        Self::new(tag::universal::OCTET_STRING, data)
    }

    /// The value's tag byte.
    pub fn tag(&self) -> u8 {
        self.tag
    }

    /// The raw payload bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the value and return its payload.
    pub fn into_bytes(self) -> Bytes {
        self.data
    }

    pub fn is_null(&self) -> bool {
        self.tag == tag::universal::NULL
    }

    /// Whether this is one of the v2c exception values
    /// (noSuchObject, noSuchInstance, endOfMibView).
    pub fn is_exception(&self) -> bool {
        matches!(
            self.tag,
            tag::context::NO_SUCH_OBJECT
                | tag::context::NO_SUCH_INSTANCE
                | tag::context::END_OF_MIB_VIEW
        )
    }

    /// Interpret an OCTET STRING as UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        if self.tag != tag::universal::OCTET_STRING {
            return None;
        }
        std::str::from_utf8(&self.data).ok()
    }

    /// Interpret a signed INTEGER (1 to 8 bytes, two's complement).
    pub fn as_i64(&self) -> Option<i64> {
        if self.tag != tag::universal::INTEGER || self.data.is_empty() || self.data.len() > 8 {
            return None;
        }
        let init: i64 = if self.data[0] & 0x80 != 0 { -1 } else { 0 };
        Some(
            self.data
                .iter()
                .fold(init, |acc, &b| (acc << 8) | i64::from(b)),
        )
    }

    /// Interpret an unsigned application value (Counter32, Gauge32,
    /// TimeTicks, Counter64).
    ///
    /// A single leading zero byte used to keep the value positive is allowed.
    pub fn as_u64(&self) -> Option<u64> {
        let unsigned = matches!(
            self.tag,
            tag::application::COUNTER32
                | tag::application::GAUGE32
                | tag::application::TIMETICKS
                | tag::application::COUNTER64
        );
        let data: &[u8] = match &self.data[..] {
            [0, rest @ ..] if !rest.is_empty() => rest,
            all => all,
        };
        if !unsigned || data.is_empty() || data.len() > 8 {
            return None;
        }
        Some(data.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b)))
    }

    /// Interpret an OBJECT IDENTIFIER value.
    pub fn as_oid(&self) -> Option<Oid> {
        if self.tag != tag::universal::OBJECT_IDENTIFIER {
            return None;
        }
        Oid::from_ber(&self.data).ok()
    }

    /// Short type name for display.
    pub fn type_name(&self) -> &'static str {
        match self.tag {
            tag::universal::INTEGER => "INTEGER",
            tag::universal::OCTET_STRING => "STRING",
            tag::universal::NULL => "NULL",
            tag::universal::OBJECT_IDENTIFIER => "OID",
            tag::application::IP_ADDRESS => "IpAddress",
            tag::application::COUNTER32 => "Counter32",
            tag::application::GAUGE32 => "Gauge32",
            tag::application::TIMETICKS => "Timeticks",
            tag::application::OPAQUE => "Opaque",
            tag::application::COUNTER64 => "Counter64",
            tag::context::NO_SUCH_OBJECT => "NoSuchObject",
            tag::context::NO_SUCH_INSTANCE => "NoSuchInstance",
            tag::context::END_OF_MIB_VIEW => "EndOfMibView",
            _ => "Unknown",
        }
    }

    /// Encode as a TLV.
    pub fn encode(&self, buf: &mut EncodeBuf) -> Result<()> {
        buf.push_tlv(self.tag, &self.data)
    }

    /// Decode one TLV of any tag.
    pub fn decode(decoder: &mut Decoder) -> Result<Self> {
        let tlv = decoder.read_tlv(Field::Value)?;
        Ok(Self {
            tag: tlv.tag,
            data: tlv.payload,
        })
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(v) = self.as_i64() {
            return write!(f, "{}", v);
        }
        if let Some(v) = self.as_u64() {
            return write!(f, "{}", v);
        }
        if let Some(oid) = self.as_oid() {
            return write!(f, "{}", oid);
        }
        match self.tag {
            tag::universal::NULL => write!(f, "NULL"),
            tag::context::NO_SUCH_OBJECT => write!(f, "noSuchObject"),
            tag::context::NO_SUCH_INSTANCE => write!(f, "noSuchInstance"),
            tag::context::END_OF_MIB_VIEW => write!(f, "endOfMibView"),
            tag::application::IP_ADDRESS if self.data.len() == 4 => write!(
                f,
                "{}.{}.{}.{}",
                self.data[0], self.data[1], self.data[2], self.data[3]
            ),
            _ => match self.as_str() {
                Some(s) => write!(f, "{}", s),
                None => {
                    for (i, b) in self.data.iter().enumerate() {
                        if i > 0 {
                            write!(f, " ")?;
                        }
                        write!(f, "{:02X}", b)?;
                    }
                    Ok(())
                }
            },
        }
    }
}
