#![no_main]
use canon_uri::Uri;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let Ok(u1) = Uri::parse(data) else {
        return;
    };
    let text = u1.to_text();
    let u2 = Uri::parse(&text).unwrap();
    assert_eq!(u1, u2);

    // An empty port is the only thing dropped when printing.
    if !data.contains(':') || text.len() == data.len() {
        assert_eq!(text, data);
    }

    if let Some(a) = u1.authority() {
        assert!(data.contains(a.host()));
        if let Some(ui) = a.userinfo() {
            assert!(!ui.as_str().contains('@'));
        }
    }
    assert!(u1.path().as_str().len() <= data.len());
});
