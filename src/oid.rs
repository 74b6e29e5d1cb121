//! Object Identifier (OID) type and wire codec.
//!
//! OIDs are stored as `SmallVec<[u32; 16]>` to avoid heap allocation for common OIDs.
//!
//! The encoder covers a deliberately small subset of X.690 Section 8.19:
//! the first two arcs must be `1.3` (folded into the single byte `0x2B`) and
//! every later arc must fit in one byte (0-127). Anything outside that subset
//! is rejected with an [`OidErrorKind`] rather than encoded incorrectly.
//!
//! The decoder still requires the `0x2B` prefix but reads later arcs as
//! base-128 subidentifiers, so agent replies naming enterprise OIDs such as
//! `1.3.6.1.4.1.2021` decode.

use crate::error::{Error, OidErrorKind, Result};
use smallvec::SmallVec;
use std::fmt;

/// Leading byte for OIDs under `1.3` (`1 * 40 + 3`).
pub const ISO_ORG_PREFIX: u8 = 0x2B;

/// Largest arc value that fits a single subidentifier byte.
pub const MAX_SINGLE_BYTE_ARC: u32 = 0x7F;

/// Minimum number of arcs an encodable OID must have.
pub const MIN_ENCODED_ARCS: usize = 3;

/// Object Identifier.
///
/// Stored as a sequence of arc values (u32). Uses SmallVec to avoid
/// heap allocation for OIDs with 16 or fewer arcs.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Oid {
    arcs: SmallVec<[u32; 16]>,
}

impl Oid {
    /// Create an OID from arc values.
    pub fn new(arcs: impl IntoIterator<Item = u32>) -> Self {
        Self {
            arcs: arcs.into_iter().collect(),
        }
    }

    /// Create an OID from a slice of arcs.
    ///
    /// # Examples
    ///
    /// ```
    /// use snmp_codec::oid::Oid;
    ///
    /// let oid = Oid::from_slice(&[1, 3, 6, 1, 2, 1, 1, 1, 0]);
    /// assert_eq!(oid.to_string(), "1.3.6.1.2.1.1.1.0");
    /// ```
    pub fn from_slice(arcs: &[u32]) -> Self {
        Self {
            arcs: SmallVec::from_slice(arcs),
        }
    }

    /// Parse an OID from dotted string notation (e.g., "1.3.6.1.2.1.1.1.0").
    ///
    /// Every component must be a decimal integer; empty components
    /// (`"1..3"`, a trailing dot) are rejected. This only checks syntax.
    /// Whether the OID can be put on the wire is checked by [`Oid::to_ber`].
    pub fn parse(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(Error::invalid_oid_with_input(OidErrorKind::Empty, s));
        }

        let mut arcs = SmallVec::new();
        for part in s.split('.') {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(Error::invalid_oid_with_input(OidErrorKind::InvalidArc, s));
            }
            let arc: u32 = part
                .parse()
                .map_err(|_| Error::invalid_oid_with_input(OidErrorKind::InvalidArc, s))?;
            arcs.push(arc);
        }

        Ok(Self { arcs })
    }

    /// Get the arc values.
    pub fn arcs(&self) -> &[u32] {
        &self.arcs
    }

    /// Get the number of arcs.
    pub fn len(&self) -> usize {
        self.arcs.len()
    }

    /// Check if the OID is empty.
    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }

    /// Check if this OID starts with another OID.
    pub fn starts_with(&self, other: &Oid) -> bool {
        self.arcs.len() >= other.arcs.len() && self.arcs[..other.arcs.len()] == other.arcs[..]
    }

    /// Encode the OID content bytes (without tag and length).
    ///
    /// # Errors
    ///
    /// - [`OidErrorKind::TooShort`] with fewer than three arcs
    /// - [`OidErrorKind::UnsupportedPrefix`] unless the OID starts with `1.3`
    /// - [`OidErrorKind::ArcTooLarge`] for any later arc above 127
    pub fn to_ber(&self) -> Result<SmallVec<[u8; 32]>> {
        if self.arcs.len() < MIN_ENCODED_ARCS {
            return Err(self.error(OidErrorKind::TooShort {
                count: self.arcs.len(),
            }));
        }
        if self.arcs[..2] != [1, 3] {
            return Err(self.error(OidErrorKind::UnsupportedPrefix));
        }

        let mut bytes = SmallVec::with_capacity(self.arcs.len() - 1);
        bytes.push(ISO_ORG_PREFIX);
        for &arc in &self.arcs[2..] {
            if arc > MAX_SINGLE_BYTE_ARC {
                return Err(self.error(OidErrorKind::ArcTooLarge(arc)));
            }
            bytes.push(arc as u8);
        }
        Ok(bytes)
    }

    /// Decode OID content bytes (without tag and length).
    ///
    /// The first byte must be `0x2B` (`1.3`). Later arcs are base-128
    /// subidentifiers: a set high bit continues the arc into the next byte.
    pub fn from_ber(data: &[u8]) -> Result<Self> {
        let Some((&first, mut rest)) = data.split_first() else {
            return Err(Error::invalid_oid(OidErrorKind::Empty));
        };
        if first != ISO_ORG_PREFIX {
            return Err(Error::invalid_oid(OidErrorKind::UnsupportedPrefix));
        }

        let mut arcs: SmallVec<[u32; 16]> = SmallVec::with_capacity(rest.len() + 2);
        arcs.extend_from_slice(&[1, 3]);
        while !rest.is_empty() {
            let (arc, consumed) = decode_subidentifier(rest)?;
            arcs.push(arc);
            rest = &rest[consumed..];
        }
        Ok(Self { arcs })
    }

    fn error(&self, kind: OidErrorKind) -> Error {
        Error::invalid_oid_with_input(kind, self.to_string())
    }
}

/// Read one base-128 subidentifier, returning it and the bytes consumed.
fn decode_subidentifier(data: &[u8]) -> Result<(u32, usize)> {
    let mut value: u32 = 0;
    for (i, &byte) in data.iter().enumerate() {
        if value > (u32::MAX >> 7) {
            return Err(Error::invalid_oid(OidErrorKind::ArcOverflow));
        }
        value = (value << 7) | u32::from(byte & 0x7F);
        if byte & 0x80 == 0 {
            return Ok((value, i + 1));
        }
    }
    Err(Error::invalid_oid(OidErrorKind::TruncatedArc))
}

/// Encode a dotted-decimal OID string to its wire bytes.
///
/// # Examples
///
/// ```
/// use snmp_codec::oid::encode_oid;
///
/// assert_eq!(encode_oid("1.3.6.1.2.1").unwrap(), vec![0x2B, 0x06, 0x01, 0x02, 0x01]);
/// assert!(encode_oid("1.3.6.1.4.1.2021").is_err());
/// ```
pub fn encode_oid(oid: &str) -> Result<Vec<u8>> {
    Ok(Oid::parse(oid)?.to_ber()?.to_vec())
}

/// Decode OID wire bytes to a dotted-decimal string.
///
/// # Examples
///
/// ```
/// use snmp_codec::oid::decode_oid;
///
/// assert_eq!(decode_oid(&[0x2B, 0x06, 0x01, 0x02, 0x01]).unwrap(), "1.3.6.1.2.1");
/// ```
pub fn decode_oid(data: &[u8]) -> Result<String> {
    Ok(Oid::from_ber(data)?.to_string())
}

impl fmt::Debug for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Oid({})", self)
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for arc in &self.arcs {
            if !first {
                write!(f, ".")?;
            }
            write!(f, "{}", arc)?;
            first = false;
        }
        Ok(())
    }
}

impl std::str::FromStr for Oid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<&[u32]> for Oid {
    fn from(arcs: &[u32]) -> Self {
        Self::from_slice(arcs)
    }
}

impl PartialOrd for Oid {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Oid {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.arcs.cmp(&other.arcs)
    }
}

/// Macro to create an OID from literal arcs.
///
/// # Examples
///
/// ```
/// use snmp_codec::oid;
///
/// let sys_descr = oid!(1, 3, 6, 1, 2, 1, 1, 1, 0);
/// assert_eq!(sys_descr.to_string(), "1.3.6.1.2.1.1.1.0");
/// ```
#[macro_export]
macro_rules! oid {
    ($($arc:expr),* $(,)?) => {
        $crate::oid::Oid::from_slice(&[$($arc),*])
    };
}
