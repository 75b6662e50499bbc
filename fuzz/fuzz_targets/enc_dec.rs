#![no_main]
use canon_uri::{decode, decode_form, encode, validate, EncodeSet};
use libfuzzer_sys::fuzz_target;

const ALL_SETS: [EncodeSet; 6] = [
    EncodeSet::Unreserved,
    EncodeSet::Component,
    EncodeSet::Query,
    EncodeSet::QueryFormValue,
    EncodeSet::UserInfo,
    EncodeSet::Fragment,
];

fuzz_target!(|data: &str| {
    for set in ALL_SETS {
        let encoded = encode(data, set);
        assert!(encoded.is_ascii());
        assert!(validate(&encoded).is_ok());

        let decoded = if set == EncodeSet::QueryFormValue {
            decode_form(&encoded)
        } else {
            decode(&encoded)
        };
        assert_eq!(decoded.as_deref(), Ok(data));
    }

    // Decoding arbitrary input either fails or yields no more bytes than given.
    if let Ok(s) = decode(data) {
        assert!(s.len() <= data.len());
    }
});
