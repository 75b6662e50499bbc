#![no_main]
use canon_uri::Uri;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (&str, &str)| {
    let (Ok(base), Ok(r)) = (Uri::parse(data.0), Uri::parse(data.1)) else {
        return;
    };

    let Ok(u1) = canon_uri::resolve(&base, &r) else {
        assert!(!base.is_absolute());
        return;
    };
    let u2 = Uri::parse(&u1.to_text()).unwrap();
    assert_eq!(u1, u2);

    assert!(u1.is_absolute());
    assert_eq!(u1.fragment(), r.fragment());

    // A rootless base loses its dot segments when normalized, which changes the merge.
    if base.path().is_rootless() && base.authority().is_none() {
        return;
    }

    // Swapping the order of resolution and normalization does not change the result.
    let resolve_then_normalize = u1.normalize();
    let normalize_then_resolve = canon_uri::resolve(&base.normalize(), &r.normalize()).unwrap();
    assert_eq!(resolve_then_normalize, normalize_then_resolve.normalize());
});
