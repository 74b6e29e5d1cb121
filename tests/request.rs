//! Request building against known wire layouts.

mod common;

use common::*;
use snmp_codec::ber::{Tlv, encode_tlv, tag};
use snmp_codec::error::{EncodeErrorKind, OidErrorKind};
use snmp_codec::{Error, GetRequest, PduType, Value, Version, build_request, encode_oid};

#[test]
fn minimal_get_request() {
    let request = GetRequest::new(Version::V2c, COMMUNITY, REQUEST_ID).oids(&[mib2()]);
    let bytes = build_request(&request).unwrap();

    assert_eq!(bytes[0], tag::universal::SEQUENCE);
    assert_eq!(bytes[1] as usize, bytes.len() - 2);
    assert_eq!(&bytes[2..5], &[0x02, 0x01, 0x01]);
    assert_eq!(&bytes[5..13], b"\x04\x06public");
    assert_eq!(bytes[13], 0xA1);
    assert_eq!(&bytes[15..21], &[0x02, 0x04, 0x11, 0x22, 0x33, 0x44]);
    assert!(bytes.ends_with(&[0x06, 0x05, 0x2B, 0x06, 0x01, 0x02, 0x01, 0x05, 0x00]));
}

#[test]
fn v1_exact_get() {
    let request = GetRequest::new(Version::V1, "private", 1)
        .pdu_type(PduType::Get)
        .oids(&[sys_descr()]);
    let bytes = build_request(&request).unwrap();
    assert_eq!(&bytes[2..5], &[0x02, 0x01, 0x00]);
    assert_eq!(bytes[14], 0xA0);
}

#[test]
fn bindings_keep_insertion_order() {
    let request = GetRequest::new(Version::V2c, COMMUNITY, 5).oids(&[
        sys_name(),
        sys_descr(),
        sys_uptime(),
    ]);
    let bytes = build_request(&request).unwrap();
    let response = snmp_codec::parse_response(&bytes).unwrap();
    let oids: Vec<_> = response.varbinds.iter().map(|vb| vb.oid.clone()).collect();
    assert_eq!(oids, vec![sys_name(), sys_descr(), sys_uptime()]);
}

#[test]
fn build_twice_is_identical() {
    let request = GetRequest::new(Version::V2c, COMMUNITY, 77)
        .varbind(sys_name(), Value::octet_string("router"))
        .varbind(sys_uptime(), Value::integer(-1));
    assert_eq!(
        build_request(&request).unwrap(),
        build_request(&request).unwrap()
    );
}

#[test]
fn oversize_nesting_is_rejected() {
    // 30 OIDs of 9 arcs: each binding is 13 bytes, so the list overflows 255
    let oids: Vec<_> = (0..30).map(|_| sys_descr()).collect();
    let request = GetRequest::new(Version::V2c, COMMUNITY, 1).oids(&oids);
    let err = build_request(&request).unwrap_err();
    assert!(matches!(
        err,
        Error::Encode {
            kind: EncodeErrorKind::PayloadTooLarge { max: 255, .. }
        }
    ));
}

#[test]
fn unsupported_oids_are_rejected() {
    let request = GetRequest::new(Version::V2c, COMMUNITY, 1).oids(&[ucd_snmp()]);
    assert!(matches!(
        build_request(&request),
        Err(Error::InvalidOid {
            kind: OidErrorKind::ArcTooLarge(2021),
            ..
        })
    ));

    let request =
        GetRequest::new(Version::V2c, COMMUNITY, 1).oids(&[snmp_codec::oid!(1, 2, 840, 1)]);
    assert!(matches!(
        build_request(&request),
        Err(Error::InvalidOid {
            kind: OidErrorKind::UnsupportedPrefix,
            ..
        })
    ));
}

#[test]
fn encode_oid_string() {
    assert_eq!(
        encode_oid("1.3.6.1.2.1").unwrap(),
        vec![0x2B, 0x06, 0x01, 0x02, 0x01]
    );
    assert!(encode_oid("1.3").is_err());
    assert!(encode_oid("1.3.6.x").is_err());
}

#[test]
fn tlv_length_limit() {
    let max = vec![0xAB; 255];
    let encoded = encode_tlv(tag::universal::OCTET_STRING, &max).unwrap();
    assert_eq!(&encoded[..2], &[0x04, 0xFF]);
    assert_eq!(Tlv::decode(&encoded).unwrap().payload.len(), 255);

    assert!(matches!(
        encode_tlv(tag::universal::OCTET_STRING, &[0u8; 256]),
        Err(Error::Encode { .. })
    ));
}
