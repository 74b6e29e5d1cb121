#![no_main]

use libfuzzer_sys::fuzz_target;

use snmp_codec::oid::{Oid, decode_oid, encode_oid};

fuzz_target!(|data: &[u8]| {
    // Single-byte arcs encode back unchanged. Multi-byte (including
    // non-minimal) arcs and a bare 0x2B ("1.3") are decode-only.
    if let Ok(oid) = Oid::from_ber(data)
        && data[1..].iter().all(|&b| b & 0x80 == 0)
        && let Ok(ber) = oid.to_ber()
    {
        assert_eq!(&ber[..], data);
    }
    let _ = decode_oid(data);

    if let Ok(s) = std::str::from_utf8(data) {
        let _ = Oid::parse(s);
        let _ = encode_oid(s);
    }
});
