use canon_uri::{
    pct_enc::{
        decode, decode_form, decode_to_bytes, encode, encode_to,
        encoder::{Path, Query},
        table, validate, DecodedChunk, EStr, EncodeSet, Table,
    },
    DecodeError,
};

const ALL_SETS: [EncodeSet; 6] = [
    EncodeSet::Unreserved,
    EncodeSet::Component,
    EncodeSet::Query,
    EncodeSet::QueryFormValue,
    EncodeSet::UserInfo,
    EncodeSet::Fragment,
];

#[test]
fn encode_sets() {
    let s = "a-._~ /?#[]@!$&'()*+,;=:%\u{e9}";

    assert_eq!(
        encode(s, EncodeSet::Unreserved),
        "a-._~%20%2F%3F%23%5B%5D%40%21%24%26%27%28%29%2A%2B%2C%3B%3D%3A%25%C3%A9"
    );
    assert_eq!(
        encode(s, EncodeSet::Component),
        "a-._~%20%2F%3F%23%5B%5D@!$&'()*+,;=:%25%C3%A9"
    );
    assert_eq!(
        encode(s, EncodeSet::Query),
        "a-._~%20/?%23%5B%5D@!$&'()*+,;=:%25%C3%A9"
    );
    assert_eq!(
        encode(s, EncodeSet::QueryFormValue),
        "a-._~+/?%23%5B%5D@!$%26'()*%2B,;%3D:%25%C3%A9"
    );
    assert_eq!(
        encode(s, EncodeSet::UserInfo),
        "a-._~%20%2F%3F%23%5B%5D%40!$&'()*+,;=:%25%C3%A9"
    );
    assert_eq!(
        encode(s, EncodeSet::Fragment),
        "a-._~%20/?%23%5B%5D@!$&'()*+,;=:%25%C3%A9"
    );
}

#[test]
fn encode_to_appends() {
    let mut buf = String::from("q=");
    encode_to("a b", EncodeSet::QueryFormValue, &mut buf);
    buf.push('&');
    encode_to("\u{1f980}", EncodeSet::Query, &mut buf);
    assert_eq!(buf, "q=a+b&%F0%9F%A6%80");
}

#[test]
fn encode_is_not_idempotent() {
    assert_eq!(encode("%", EncodeSet::Component), "%25");
    assert_eq!(encode("%25", EncodeSet::Component), "%2525");

    let once = encode("100% sure", EncodeSet::Query);
    assert_eq!(once, "100%25%20sure");
    assert_ne!(encode(&once, EncodeSet::Query), once);
}

#[test]
fn unreserved_is_subset_of_every_set() {
    for set in ALL_SETS {
        assert!(table::UNRESERVED.is_subset(set.table()), "{set:?}");
    }
    assert!(!table::RESERVED.is_subset(EncodeSet::Component.table()));
}

#[test]
fn decode_ok() {
    assert_eq!(decode("").unwrap(), "");
    assert_eq!(decode("abc").unwrap(), "abc");
    assert_eq!(decode("a%20b").unwrap(), "a b");
    assert_eq!(decode("%e6%b5%8b%E8%AF%95").unwrap(), "\u{6d4b}\u{8bd5}");
    // "+" is left as is.
    assert_eq!(decode("a+b").unwrap(), "a+b");
    // Non-ASCII input passes through.
    assert_eq!(decode("\u{e9}%21").unwrap(), "\u{e9}!");
}

#[test]
fn decode_error() {
    assert_eq!(decode("hello%ZZ"), Err(DecodeError::InvalidPercentEncoding(5)));
    assert_eq!(decode("%"), Err(DecodeError::InvalidPercentEncoding(0)));
    assert_eq!(decode("ab%2"), Err(DecodeError::InvalidPercentEncoding(2)));
    assert_eq!(decode("%20%2x"), Err(DecodeError::InvalidPercentEncoding(3)));

    let e = decode("%C3%28").unwrap_err();
    assert!(matches!(e, DecodeError::InvalidUtf8(_)));
    assert!(std::error::Error::source(&e).is_some());

    assert_eq!(
        decode("hello%ZZ").unwrap_err().to_string(),
        "invalid percent-encoded octet at index 5"
    );
}

#[test]
fn decode_to_bytes_borrows() {
    assert!(matches!(decode_to_bytes("abc").unwrap(), std::borrow::Cow::Borrowed(b"abc")));
    assert_eq!(*decode_to_bytes("%FF%00").unwrap(), [0xff, 0x00]);
}

#[test]
fn form() {
    assert_eq!(encode("a b&c=d+e", EncodeSet::QueryFormValue), "a+b%26c%3Dd%2Be");
    assert_eq!(decode_form("a+b%26c%3Dd%2Be").unwrap(), "a b&c=d+e");
    assert_eq!(
        decode_form("a+%ZZ"),
        Err(DecodeError::InvalidPercentEncoding(2))
    );
}

#[test]
fn round_trip() {
    for s in ["", "abc", "a b", "\u{1f980}/?#[]", "100%", "x+y=z&w"] {
        for set in ALL_SETS {
            let encoded = encode(s, set);
            let decoded = if set == EncodeSet::QueryFormValue {
                decode_form(&encoded)
            } else {
                decode(&encoded)
            };
            assert_eq!(decoded.as_deref(), Ok(s), "{set:?}");
        }
    }
}

#[test]
fn validate_escapes() {
    assert!(validate("").is_ok());
    assert!(validate("%00%ff%AB").is_ok());
    assert!(validate("no escapes here").is_ok());
    assert_eq!(validate("ok%20then%").unwrap_err().index(), 9);
    assert_eq!(validate("%g1").unwrap_err().index(), 0);
}

#[test]
fn estr() {
    assert!(EStr::<Path>::new("/a%20b/c").is_some());
    assert!(EStr::<Path>::new("/a b").is_none());
    assert!(EStr::<Path>::new("/a?b").is_none());
    assert!(EStr::<Query>::new("a?b").is_some());
    assert!(EStr::<Query>::new("%2").is_none());

    let s = EStr::<Query>::new_or_panic("name=%E5%BC%A0%E4%B8%89&age=20");
    let pairs: Vec<_> = s
        .split('&')
        .map(|pair| pair.split_once('=').unwrap())
        .map(|(k, v)| (k.as_str(), v.decode().into_string().unwrap().into_owned()))
        .collect();
    assert_eq!(
        pairs,
        [
            ("name", String::from("\u{5f20}\u{4e09}")),
            ("age", String::from("20"))
        ]
    );

    let chunks: Vec<_> = EStr::<Path>::new_or_panic("a%2Fb").decode().collect();
    assert_eq!(
        chunks,
        [
            DecodedChunk::Unencoded("a"),
            DecodedChunk::PctDecoded(b'/'),
            DecodedChunk::Unencoded("b"),
        ]
    );

    let lossy = EStr::<Path>::new_or_panic("%FFa").decode().to_string_lossy();
    assert_eq!(lossy, "\u{fffd}a");
}

#[test]
#[should_panic = "splitting with non-reserved character"]
fn split_with_unreserved_char() {
    let _ = EStr::<Path>::EMPTY.split('a');
}

#[test]
fn custom_table() {
    const MY: Table = table::ALPHA.or(Table::new(b"-"));
    assert!(MY.allows('a'));
    assert!(MY.allows('-'));
    assert!(!MY.allows('1'));
    assert!(!MY.allows('%'));
    assert!(!MY.allows_pct_encoded());
    assert!(MY.or_pct_encoded().allows_pct_encoded());
    assert!(MY.is_subset(table::UNRESERVED));
    assert_eq!(MY.sub(Table::new(b"-")), table::ALPHA);
}
