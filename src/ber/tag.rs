//! Tag bytes used by the GET codec.
//!
//! Only the low-tag-number form exists here: every tag is one byte, class in
//! bits 7-6, constructed flag in bit 5, number in bits 4-0.

/// Tag class bits.
pub mod class {
    pub const UNIVERSAL: u8 = 0x00;
    pub const APPLICATION: u8 = 0x40;
    pub const CONTEXT_SPECIFIC: u8 = 0x80;
}

/// Constructed flag.
pub const CONSTRUCTED: u8 = 0x20;

/// Universal types the codec builds and checks.
pub mod universal {
    pub const INTEGER: u8 = 0x02;
    pub const OCTET_STRING: u8 = 0x04;
    pub const NULL: u8 = 0x05;
    pub const OBJECT_IDENTIFIER: u8 = 0x06;
    pub const SEQUENCE: u8 = 0x30;
}

/// SNMP application types. Carried as raw values, recognised for display.
pub mod application {
    use super::class::APPLICATION;

    pub const IP_ADDRESS: u8 = APPLICATION;
    pub const COUNTER32: u8 = APPLICATION | 0x01;
    pub const GAUGE32: u8 = APPLICATION | 0x02;
    pub const TIMETICKS: u8 = APPLICATION | 0x03;
    pub const OPAQUE: u8 = APPLICATION | 0x04;
    pub const COUNTER64: u8 = APPLICATION | 0x06;
}

/// v2c exception values returned in place of a varbind value.
pub mod context {
    use super::class::CONTEXT_SPECIFIC;

    pub const NO_SUCH_OBJECT: u8 = CONTEXT_SPECIFIC;
    pub const NO_SUCH_INSTANCE: u8 = CONTEXT_SPECIFIC | 0x01;
    pub const END_OF_MIB_VIEW: u8 = CONTEXT_SPECIFIC | 0x02;
}

/// PDU envelopes.
pub mod pdu {
    use super::CONSTRUCTED;
    use super::class::CONTEXT_SPECIFIC;

    pub const GET_REQUEST: u8 = CONTEXT_SPECIFIC | CONSTRUCTED; // 0xA0
    pub const GET_NEXT_REQUEST: u8 = CONTEXT_SPECIFIC | CONSTRUCTED | 0x01; // 0xA1
    pub const RESPONSE: u8 = CONTEXT_SPECIFIC | CONSTRUCTED | 0x02; // 0xA2
}

#[inline]
pub const fn is_constructed(tag: u8) -> bool {
    tag & CONSTRUCTED != 0
}
