#![no_main]

use bytes::Bytes;
use libfuzzer_sys::fuzz_target;

use snmp_codec::message::GetResponse;
use snmp_codec::parse_response;

fuzz_target!(|data: &[u8]| {
    let _ = parse_response(data);
    let _ = GetResponse::decode(Bytes::copy_from_slice(data));
});
