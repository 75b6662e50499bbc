use std::net::{Ipv4Addr, Ipv6Addr};

use canon_uri::{component::Host, error::HostError, ParseError, Uri};

fn host_of(s: &str) -> Result<Host<'static>, ParseError> {
    // Leaked so that the borrowed host can be returned.
    let uri: &'static Uri = Box::leak(Box::new(Uri::parse(s)?));
    Ok(uri.authority().unwrap().host_parsed())
}

fn parse_v4(s: &str) -> Option<Ipv4Addr> {
    match host_of(&format!("//{s}")).ok()? {
        Host::Ipv4(addr) => Some(addr),
        _ => None,
    }
}

fn parse_v6(s: &str) -> Option<Ipv6Addr> {
    match host_of(&format!("//[{s}]")).ok()? {
        Host::Ipv6(addr) => Some(addr),
        _ => None,
    }
}

#[test]
fn v4() {
    assert_eq!(parse_v4("127.0.0.1"), Some(Ipv4Addr::LOCALHOST));
    assert_eq!(parse_v4("255.255.255.255"), Some(Ipv4Addr::BROADCAST));
    assert_eq!(parse_v4("0.0.0.0"), Some(Ipv4Addr::UNSPECIFIED));
    assert_eq!(parse_v4("10.20.30.40"), Some(Ipv4Addr::new(10, 20, 30, 40)));

    // Out of range
    assert!(parse_v4("256.0.0.1").is_none());
    assert!(parse_v4("1.2.3.999").is_none());
    // Too short
    assert!(parse_v4("255.0.0").is_none());
    // Too long
    assert!(parse_v4("255.0.0.1.2").is_none());
    // No number between dots
    assert!(parse_v4("255.0..1").is_none());
    // Leading zeros
    assert!(parse_v4("255.0.0.01").is_none());
    assert!(parse_v4("255.0.00.0").is_none());
    // Leading or trailing dot
    assert!(parse_v4(".0.0.0.0").is_none());
    assert!(parse_v4("0.0.0.0.").is_none());
    // Hexadecimal
    assert!(parse_v4("0x7f.0.0.1").is_none());
}

#[test]
fn v4_lookalikes_are_reg_names() {
    for s in ["256.0.0.1", "1.2.3", "1.2.3.4.5", "01.2.3.4", "1.2.3.4a"] {
        let host = host_of(&format!("http://{s}/")).unwrap();
        assert!(matches!(host, Host::RegName(name) if name == s), "{s}");
    }
}

#[test]
fn v4_with_port() {
    let u = Uri::parse("http://192.168.0.1:8080/").unwrap();
    let a = u.authority().unwrap();
    assert_eq!(a.host_parsed(), Host::Ipv4(Ipv4Addr::new(192, 168, 0, 1)));
    assert_eq!(a.port(), Some(8080));
}

#[test]
fn v6() {
    assert_eq!(parse_v6("0:0:0:0:0:0:0:0"), Some(Ipv6Addr::UNSPECIFIED));
    assert_eq!(
        parse_v6("1:02:003:0004:0005:006:07:8"),
        Some(Ipv6Addr::new(1, 2, 3, 4, 5, 6, 7, 8))
    );
    assert_eq!(parse_v6("::1"), Some(Ipv6Addr::LOCALHOST));
    assert_eq!(parse_v6("::"), Some(Ipv6Addr::UNSPECIFIED));
    assert_eq!(parse_v6("1::"), Some(Ipv6Addr::new(1, 0, 0, 0, 0, 0, 0, 0)));
    assert_eq!(
        parse_v6("fe80::AbCd:1"),
        Some(Ipv6Addr::new(0xfe80, 0, 0, 0, 0, 0, 0xabcd, 1))
    );
    assert_eq!(
        parse_v6("1:2:3:4::6:7:8"),
        Some(Ipv6Addr::new(1, 2, 3, 4, 0, 6, 7, 8))
    );
    assert_eq!(
        parse_v6("1:2:3:4:5:6:7::"),
        Some(Ipv6Addr::new(1, 2, 3, 4, 5, 6, 7, 0))
    );

    // Only a colon
    assert!(parse_v6(":").is_none());
    // Group too long
    assert!(parse_v6("::00000").is_none());
    // Too few or too many groups
    assert!(parse_v6("1:2:3:4:5:6:7").is_none());
    assert!(parse_v6("1:2:3:4:5:6:7:8:9").is_none());
    // Triple colons
    assert!(parse_v6("1:2:::6:7:8").is_none());
    assert!(parse_v6(":::").is_none());
    // Two ellipses
    assert!(parse_v6("1:2::6::8").is_none());
    assert!(parse_v6("::2:6::").is_none());
    // Ellipsis eliding nothing
    assert!(parse_v6("::1:2:3:4:5:6:7:8").is_none());
    assert!(parse_v6("1:2:3:4:5:6:7:8::").is_none());
    // Leading or trailing colon
    assert!(parse_v6(":1::1").is_none());
    assert!(parse_v6("1::1:").is_none());
    // Non-hexadecimal
    assert!(parse_v6("::g").is_none());
}

#[test]
fn v4_in_v6() {
    assert_eq!(
        parse_v6("::192.0.2.33"),
        Some(Ipv6Addr::new(0, 0, 0, 0, 0, 0, 0xc000, 0x221))
    );
    assert_eq!(
        parse_v6("::ffff:192.0.2.33"),
        Some(Ipv6Addr::new(0, 0, 0, 0, 0, 0xffff, 0xc000, 0x221))
    );
    assert_eq!(
        parse_v6("2001:db8:122:c000:2:2100:192.0.2.33"),
        Some(Ipv6Addr::new(
            0x2001, 0xdb8, 0x122, 0xc000, 0x2, 0x2100, 0xc000, 0x221
        ))
    );

    // Colon after IPv4
    assert!(parse_v6("::127.0.0.1:").is_none());
    // Not enough or too many groups
    assert!(parse_v6("1:2:3:4:5:127.0.0.1").is_none());
    assert!(parse_v6("1:2:3:4:5:6:7:127.0.0.1").is_none());
    // No colon before IPv4
    assert!(parse_v6("::ffff4.4.4.4").is_none());
    // Invalid IPv4
    assert!(parse_v6("::1.2.3.256").is_none());
}

#[test]
fn ipv_future() {
    let u = Uri::parse("http://[v7.host:name!]/").unwrap();
    let a = u.authority().unwrap();
    assert_eq!(a.host(), "[v7.host:name!]");
    assert_eq!(a.host_parsed(), Host::IpvFuture("v7.host:name!"));

    let u = Uri::parse("http://[VaB.x]:1").unwrap();
    assert_eq!(u.authority().unwrap().host_parsed(), Host::IpvFuture("VaB.x"));
    assert_eq!(u.authority().unwrap().port(), Some(1));

    // Percent-encoded octets are not allowed in IPvFuture.
    assert_eq!(
        Uri::parse("http://[v1.%20]").unwrap_err(),
        ParseError::InvalidHost(HostError::InvalidIpvFuture { index: 8 })
    );
}
