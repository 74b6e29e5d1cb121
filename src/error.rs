//! Error types for snmp-codec.
//!
//! All errors are `#[non_exhaustive]` to allow adding new variants without breaking changes.

use std::net::SocketAddr;
use std::time::Duration;

/// Result type alias using the library's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Message field being decoded when an error occurred.
///
/// The response parser walks these in order; a decode error names the
/// first field that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// A bare TLV record with no surrounding message context.
    Record,
    /// Outer message SEQUENCE.
    Envelope,
    /// Version INTEGER.
    Version,
    /// Community OCTET STRING.
    Community,
    /// PDU envelope.
    Pdu,
    /// Request ID INTEGER.
    RequestId,
    /// Error status INTEGER.
    ErrorStatus,
    /// Error index INTEGER.
    ErrorIndex,
    /// Varbind list SEQUENCE.
    VarBindList,
    /// Single varbind SEQUENCE.
    VarBind,
    /// OBJECT IDENTIFIER inside a varbind.
    Oid,
    /// Value inside a varbind.
    Value,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Record => write!(f, "TLV record"),
            Self::Envelope => write!(f, "message envelope"),
            Self::Version => write!(f, "version"),
            Self::Community => write!(f, "community string"),
            Self::Pdu => write!(f, "PDU"),
            Self::RequestId => write!(f, "request ID"),
            Self::ErrorStatus => write!(f, "error status"),
            Self::ErrorIndex => write!(f, "error index"),
            Self::VarBindList => write!(f, "varbind list"),
            Self::VarBind => write!(f, "varbind"),
            Self::Oid => write!(f, "varbind OID"),
            Self::Value => write!(f, "varbind value"),
        }
    }
}

/// TLV decode error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeErrorKind {
    /// Expected different tag.
    UnexpectedTag { expected: u8, actual: u8 },
    /// Fewer than the two header bytes (tag and length) remain.
    TruncatedHeader { available: usize },
    /// Declared length runs past the end of the buffer.
    TruncatedRecord { declared: usize, available: usize },
    /// Length does not match the fixed size required for this field.
    InvalidLength { expected: usize, actual: usize },
    /// Unknown SNMP version.
    UnknownVersion(u8),
    /// OID payload could not be decoded.
    InvalidOid(OidErrorKind),
}

impl std::fmt::Display for DecodeErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedTag { expected, actual } => {
                write!(f, "expected tag 0x{:02X}, got 0x{:02X}", expected, actual)
            }
            Self::TruncatedHeader { available } => {
                write!(f, "need 2 header bytes but only {} remaining", available)
            }
            Self::TruncatedRecord {
                declared,
                available,
            } => {
                write!(
                    f,
                    "declared length {} exceeds {} remaining bytes",
                    declared, available
                )
            }
            Self::InvalidLength { expected, actual } => {
                write!(f, "invalid length: expected {}, got {}", expected, actual)
            }
            Self::UnknownVersion(v) => write!(f, "unknown SNMP version: {}", v),
            Self::InvalidOid(kind) => write!(f, "invalid OID: {}", kind),
        }
    }
}

/// TLV encode error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeErrorKind {
    /// Payload does not fit the single-byte length field.
    PayloadTooLarge { length: usize, max: usize },
}

impl std::fmt::Display for EncodeErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PayloadTooLarge { length, max } => {
                write!(
                    f,
                    "payload of {} bytes exceeds single-byte length limit {}",
                    length, max
                )
            }
        }
    }
}

/// OID validation error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OidErrorKind {
    /// Empty OID string or empty BER encoding.
    Empty,
    /// Arc is not a decimal integer.
    InvalidArc,
    /// OID too short (minimum 3 arcs).
    TooShort { count: usize },
    /// OID does not start with 1.3.
    UnsupportedPrefix,
    /// Arc does not fit in a single byte.
    ArcTooLarge(u32),
    /// Encoded subidentifier ends with the continuation bit still set.
    TruncatedArc,
    /// Encoded subidentifier does not fit in a u32.
    ArcOverflow,
}

impl std::fmt::Display for OidErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty OID"),
            Self::InvalidArc => write!(f, "invalid arc value"),
            Self::TooShort { count } => {
                write!(f, "OID must have at least 3 arcs, got {}", count)
            }
            Self::UnsupportedPrefix => write!(f, "only OIDs under 1.3 are supported"),
            Self::ArcTooLarge(v) => write!(f, "arc {} exceeds single-byte maximum 127", v),
            Self::TruncatedArc => write!(f, "subidentifier truncated"),
            Self::ArcOverflow => write!(f, "subidentifier exceeds 32 bits"),
        }
    }
}

/// SNMP error status codes (RFC 3416).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorStatus {
    NoError,
    TooBig,
    NoSuchName,
    BadValue,
    ReadOnly,
    GenErr,
    NoAccess,
    WrongType,
    WrongLength,
    WrongEncoding,
    WrongValue,
    NoCreation,
    InconsistentValue,
    ResourceUnavailable,
    CommitFailed,
    UndoFailed,
    AuthorizationError,
    NotWritable,
    InconsistentName,
    /// Unknown/future error status code.
    Unknown(u8),
}

impl ErrorStatus {
    /// Create from the raw status byte.
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::NoError,
            1 => Self::TooBig,
            2 => Self::NoSuchName,
            3 => Self::BadValue,
            4 => Self::ReadOnly,
            5 => Self::GenErr,
            6 => Self::NoAccess,
            7 => Self::WrongType,
            8 => Self::WrongLength,
            9 => Self::WrongEncoding,
            10 => Self::WrongValue,
            11 => Self::NoCreation,
            12 => Self::InconsistentValue,
            13 => Self::ResourceUnavailable,
            14 => Self::CommitFailed,
            15 => Self::UndoFailed,
            16 => Self::AuthorizationError,
            17 => Self::NotWritable,
            18 => Self::InconsistentName,
            other => Self::Unknown(other),
        }
    }
}

impl std::fmt::Display for ErrorStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoError => write!(f, "noError"),
            Self::TooBig => write!(f, "tooBig"),
            Self::NoSuchName => write!(f, "noSuchName"),
            Self::BadValue => write!(f, "badValue"),
            Self::ReadOnly => write!(f, "readOnly"),
            Self::GenErr => write!(f, "genErr"),
            Self::NoAccess => write!(f, "noAccess"),
            Self::WrongType => write!(f, "wrongType"),
            Self::WrongLength => write!(f, "wrongLength"),
            Self::WrongEncoding => write!(f, "wrongEncoding"),
            Self::WrongValue => write!(f, "wrongValue"),
            Self::NoCreation => write!(f, "noCreation"),
            Self::InconsistentValue => write!(f, "inconsistentValue"),
            Self::ResourceUnavailable => write!(f, "resourceUnavailable"),
            Self::CommitFailed => write!(f, "commitFailed"),
            Self::UndoFailed => write!(f, "undoFailed"),
            Self::AuthorizationError => write!(f, "authorizationError"),
            Self::NotWritable => write!(f, "notWritable"),
            Self::InconsistentName => write!(f, "inconsistentName"),
            Self::Unknown(code) => write!(f, "unknown({})", code),
        }
    }
}

/// Library error type.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// I/O error during communication.
    #[error("I/O error{}: {source}", target.map(|t| format!(" communicating with {}", t)).unwrap_or_default())]
    Io {
        target: Option<SocketAddr>,
        #[source]
        source: std::io::Error,
    },

    /// Request timed out (after retries if configured).
    #[error("timeout after {elapsed:?} waiting for {target} (request_id={request_id}, retries={retries})")]
    Timeout {
        target: SocketAddr,
        elapsed: Duration,
        request_id: u32,
        retries: u32,
    },

    /// Invalid OID format.
    #[error("invalid OID: {kind}")]
    InvalidOid {
        kind: OidErrorKind,
        input: Option<Box<str>>, // Only allocated when parsing string input
    },

    /// TLV decoding error.
    #[error("decode error in {field} at offset {offset}: {kind}")]
    Decode {
        field: Field,
        offset: usize,
        kind: DecodeErrorKind,
    },

    /// TLV encoding error.
    #[error("encode error: {kind}")]
    Encode { kind: EncodeErrorKind },

    /// Response request ID doesn't match.
    #[error("request ID mismatch: expected {expected}, got {actual}")]
    RequestIdMismatch { expected: u32, actual: u32 },
}

impl Error {
    /// Create a decode error.
    pub fn decode(field: Field, offset: usize, kind: DecodeErrorKind) -> Self {
        Self::Decode {
            field,
            offset,
            kind,
        }
    }

    /// Create an encode error.
    pub fn encode(kind: EncodeErrorKind) -> Self {
        Self::Encode { kind }
    }

    /// Create an invalid OID error from a kind (no input string).
    pub fn invalid_oid(kind: OidErrorKind) -> Self {
        Self::InvalidOid { kind, input: None }
    }

    /// Create an invalid OID error with the input string that failed.
    pub fn invalid_oid_with_input(kind: OidErrorKind, input: impl Into<Box<str>>) -> Self {
        Self::InvalidOid {
            kind,
            input: Some(input.into()),
        }
    }

    /// Get the target address if this error has one.
    pub fn target(&self) -> Option<SocketAddr> {
        match self {
            Self::Io { target, .. } => *target,
            Self::Timeout { target, .. } => Some(*target),
            _ => None,
        }
    }

    /// The message field a decode error was raised for.
    pub fn field(&self) -> Option<Field> {
        match self {
            Self::Decode { field, .. } => Some(*field),
            _ => None,
        }
    }

    /// Whether this error reports a length violation while decoding.
    pub fn is_length_error(&self) -> bool {
        matches!(
            self,
            Self::Decode {
                kind: DecodeErrorKind::TruncatedHeader { .. }
                    | DecodeErrorKind::TruncatedRecord { .. }
                    | DecodeErrorKind::InvalidLength { .. },
                ..
            }
        )
    }
}
