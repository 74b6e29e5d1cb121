#![no_main]

use bytes::Bytes;
use libfuzzer_sys::fuzz_target;

use snmp_codec::ber::{Decoder, Tlv, encode_tlv};
use snmp_codec::error::Field;
use snmp_codec::value::Value;
use snmp_codec::varbind::{VarBind, decode_varbind_list};

fuzz_target!(|data: &[u8]| {
    let bytes = Bytes::copy_from_slice(data);

    // A record that decodes must re-encode to the bytes it came from
    if let Ok(tlv) = Tlv::decode(data) {
        let encoded = encode_tlv(tlv.tag, &tlv.payload).expect("decoded payload fits");
        assert_eq!(&encoded[..], &data[..tlv.encoded_len()]);
    }

    let mut decoder = Decoder::new(bytes.clone());
    while decoder.read_tlv(Field::Record).is_ok() {}

    let mut decoder = Decoder::new(bytes.clone());
    let _ = decoder.read_integer_u32(Field::RequestId);

    let mut decoder = Decoder::new(bytes.clone());
    let _ = Value::decode(&mut decoder);

    let mut decoder = Decoder::new(bytes.clone());
    let _ = VarBind::decode(&mut decoder);

    let mut decoder = Decoder::new(bytes);
    let _ = decode_varbind_list(&mut decoder);
});
