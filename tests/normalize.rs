use std::net::Ipv4Addr;

use canon_uri::{
    component::{Host, Scheme},
    normalize::{remove_dot_segments, Normalizer},
    Uri,
};

trait Test {
    fn normalizes_to(&self, expected: &str);
}

impl Test for str {
    #[track_caller]
    fn normalizes_to(&self, expected: &str) {
        let normalized = Uri::parse(self).unwrap().normalize();
        assert_eq!(normalized.to_text(), expected);
        // Idempotence.
        assert_eq!(normalized.normalize(), normalized);
        // The output is itself a valid reference that parses to the same value.
        assert_eq!(Uri::parse(expected).unwrap(), normalized);
    }
}

#[test]
fn dot_segments() {
    assert_eq!(remove_dot_segments("/a/b/c/./../../g"), "/a/g");
    assert_eq!(remove_dot_segments("mid/content=5/../6"), "mid/6");
    assert_eq!(remove_dot_segments(""), "");
    assert_eq!(remove_dot_segments("/"), "/");
    assert_eq!(remove_dot_segments("."), "");
    assert_eq!(remove_dot_segments(".."), "");
    assert_eq!(remove_dot_segments("./"), "");
    assert_eq!(remove_dot_segments("../../a"), "a");
    assert_eq!(remove_dot_segments("/."), "/");
    assert_eq!(remove_dot_segments("/.."), "/");
    assert_eq!(remove_dot_segments("/a/."), "/a/");
    assert_eq!(remove_dot_segments("/a/.."), "/");
    assert_eq!(remove_dot_segments("/a/b/.."), "/a/");
    assert_eq!(remove_dot_segments("/../../../g"), "/g");
    assert_eq!(remove_dot_segments("a/./b"), "a/b");
    assert_eq!(remove_dot_segments("a//../b"), "a/b");
    assert_eq!(remove_dot_segments("/./.././g/"), "/g/");
    // Segments only resembling dot segments.
    assert_eq!(remove_dot_segments("/a/.b/..c/.../d."), "/a/.b/..c/.../d.");
    // Escaped dots are not recognized.
    assert_eq!(remove_dot_segments("/a/%2E/b"), "/a/%2E/b");
}

#[test]
fn dot_segments_idempotent() {
    for p in ["/a/b/../../..", "../a/./b/../", "//..//./", "a/..", "/./../x/."] {
        let once = remove_dot_segments(p);
        assert_eq!(remove_dot_segments(&once), once, "{p}");
    }
}

#[test]
fn normalize() {
    // Example from Section 6.2 of RFC 3986.
    "eXAMPLE://a/./b/../b/%63/%7bfoo%7d".normalizes_to("example://a/b/c/%7Bfoo%7D");

    "HTTP://Example.COM:80/path/../file.html".normalizes_to("http://example.com/file.html");

    // Lowercase percent-encoded octet.
    "%3a".normalizes_to("%3A");

    // Uppercase letters in scheme and registered name.
    "HTTP://www.EXAMPLE.com/".normalizes_to("http://www.example.com/");

    // Userinfo, path, query and fragment keep their case.
    "http://User@h/A?B#C".normalizes_to("http://User@h/A?B#C");

    // Escaped unreserved characters are decoded everywhere.
    "http://%7Eu@%41b.c/%7e%2D?%5F#%2e".normalizes_to("http://~u@ab.c/~-?_#.");

    // Escaped reserved characters are kept.
    "http://a/%2f%3F?%26#%23".normalizes_to("http://a/%2F%3F?%26#%23");

    // Underflow in path resolution.
    "http://a/../../../g".normalizes_to("http://a/g");

    // Escaped dot segments are removed once decoded.
    "http://a/b/c/%2E/%2E./%2e%2E/d".normalizes_to("http://a/d");

    // Dot segments are kept in relative references.
    "foo/../bar".normalizes_to("foo/../bar");
    "/foo/../bar".normalizes_to("/foo/../bar");

    // They are removed for a URI, whether its path is absolute or rootless.
    "foo:/bar/./../baz".normalizes_to("foo:/baz");
    "foo:bar/../baz".normalizes_to("foo:/baz");
    "foo:a/./b/../c".normalizes_to("foo:a/c");
    "mailto:./../user@example.com".normalizes_to("mailto:user@example.com");
    "foo:a/..".normalizes_to("foo:/");
    "foo:.".normalizes_to("foo:");

    // The output stays a valid URI reference.
    "foo:/.//@@".normalizes_to("foo:/.//@@");
    "foo:/a/..//b".normalizes_to("foo:/.//b");
    "foo:a/..//b".normalizes_to("foo:/.//b");
}

#[test]
fn normalize_port_and_empty_path() {
    // Default port removed.
    "http://example.com:80".normalizes_to("http://example.com/");
    "HTTPS://example.com:443/x".normalizes_to("https://example.com/x");
    "ws://h:80/".normalizes_to("ws://h/");
    "ssh://h:22".normalizes_to("ssh://h/");

    // Non-default port kept.
    "http://example.com:443/".normalizes_to("http://example.com:443/");
    "foo://example.com:80/".normalizes_to("foo://example.com:80/");

    // Empty port.
    "http://example.com:/".normalizes_to("http://example.com/");

    // Empty path with authority.
    "//example.com".normalizes_to("//example.com/");
    "http://example.com?q".normalizes_to("http://example.com/?q");
}

#[test]
fn normalize_hosts() {
    // IP literals keep their text.
    "http://[::FFFF:1.2.3.4]/".normalizes_to("http://[::FFFF:1.2.3.4]/");
    "http://[vF.ABC]/".normalizes_to("http://[vF.ABC]/");
    "http://127.0.0.1/".normalizes_to("http://127.0.0.1/");

    // A registered name decoding to an IPv4 address is classified as one.
    let u = Uri::parse("http://127.0.0.%31/").unwrap().normalize();
    assert_eq!(u.authority().unwrap().host(), "127.0.0.1");
    assert_eq!(
        u.authority().unwrap().host_parsed(),
        Host::Ipv4(Ipv4Addr::LOCALHOST)
    );

    // Non-ASCII registered names stay encoded, with uppercase hex digits.
    "http://%c3%a9.EXAMPLE/".normalizes_to("http://%C3%A9.example/");
}

#[test]
fn equals_normalized() {
    let eq = |a: &str, b: &str| {
        canon_uri::equals_normalized(&Uri::parse(a).unwrap(), &Uri::parse(b).unwrap())
    };

    assert!(eq(
        "HTTP://Example.COM:80/path/../file.html",
        "http://example.com/file.html"
    ));
    assert!(eq("http://example.com", "http://example.com:/"));
    assert!(eq("http://a/%7e", "http://a/~"));
    assert!(eq("http://a/%3a", "http://a/%3A"));

    assert!(!eq("http://a/%2F", "http://a//"));
    assert!(!eq("http://a/", "https://a/"));
    assert!(!eq("http://a/?", "http://a/"));
    assert!(!eq("http://a/#", "http://a/"));
    assert!(!eq("http://[::1]/", "http://[0::1]/"));
}

#[test]
fn custom_default_port() {
    const SCHEME_FOO: &Scheme = Scheme::new_or_panic("foo");

    let normalizer = Normalizer::new().default_port_with(|scheme| {
        if scheme == SCHEME_FOO {
            Some(4673)
        } else {
            None
        }
    });

    let u = Uri::parse("FOO://localhost:4673/").unwrap();
    assert_eq!(normalizer.normalize(&u).to_text(), "foo://localhost/");

    // The default table is no longer consulted.
    let u = Uri::parse("http://localhost:80/").unwrap();
    assert_eq!(normalizer.normalize(&u).to_text(), "http://localhost:80/");

    assert_eq!(
        Normalizer::default().normalize(&u).to_text(),
        "http://localhost/"
    );
}
