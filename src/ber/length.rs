//! Single-byte length field.
//!
//! The length byte carries the full 0..=255 range. Unlike X.690, bit 7 does
//! not announce a long-form length, so payloads above 255 bytes cannot be
//! represented at all.

use crate::error::{EncodeErrorKind, Error, Result};

/// Largest payload a single length byte can describe.
pub const MAX_LENGTH: usize = u8::MAX as usize;

/// Encode a payload length into its length byte.
pub fn encode_length(len: usize) -> Result<u8> {
    u8::try_from(len).map_err(|_| {
        Error::encode(EncodeErrorKind::PayloadTooLarge {
            length: len,
            max: MAX_LENGTH,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_length_bounds() {
        assert_eq!(encode_length(0).unwrap(), 0);
        assert_eq!(encode_length(127).unwrap(), 127);
        assert_eq!(encode_length(128).unwrap(), 128);
        assert_eq!(encode_length(255).unwrap(), 255);
    }

    #[test]
    fn test_encode_length_too_large() {
        let err = encode_length(256).unwrap_err();
        assert!(matches!(
            err,
            Error::Encode {
                kind: EncodeErrorKind::PayloadTooLarge {
                    length: 256,
                    max: 255
                }
            }
        ));
    }
}
