#![no_main]
use canon_uri::Uri;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let Ok(r) = Uri::parse(data) else {
        return;
    };

    let r1 = r.normalize();
    let r2 = Uri::parse(&r1.to_text()).unwrap();
    assert_eq!(r1, r2);

    assert_eq!(
        r1.scheme().map(|s| s.as_str()),
        r.scheme().map(|s| s.as_str().to_ascii_lowercase()).as_deref()
    );
    assert_eq!(r1.authority().is_some(), r.authority().is_some());
    assert_eq!(r1.query().is_some(), r.query().is_some());
    assert_eq!(r1.fragment().is_some(), r.fragment().is_some());

    // We cannot normalize beyond a normalized `Uri`.
    assert_eq!(r1.normalize(), r1);
    assert!(r.equals_normalized(&r1));
});
