//! URI components.

use crate::pct_enc::{
    encoder::{RegName, Userinfo},
    table, EStr,
};
use alloc::string::{String, ToString};
use core::net::{Ipv4Addr, Ipv6Addr};
use ref_cast::{ref_cast_custom, RefCastCustom};

/// Well-known default ports, looked up case-insensitively.
const DEFAULT_PORTS: &[(&str, u16)] = &[
    ("ftp", 21),
    ("ssh", 22),
    ("telnet", 23),
    ("smtp", 25),
    ("gopher", 70),
    ("http", 80),
    ("ws", 80),
    ("pop3", 110),
    ("nntp", 119),
    ("imap", 143),
    ("ldap", 389),
    ("https", 443),
    ("wss", 443),
    ("rtsp", 554),
    ("ldaps", 636),
    ("sip", 5060),
    ("sips", 5061),
    ("git", 9418),
];

/// Returns the well-known default port of a scheme, if any.
///
/// The scheme is matched case-insensitively.
///
/// # Examples
///
/// ```
/// use canon_uri::default_port;
///
/// assert_eq!(default_port("http"), Some(80));
/// assert_eq!(default_port("HTTPS"), Some(443));
/// assert_eq!(default_port("foo"), None);
/// ```
#[must_use]
pub fn default_port(scheme: &str) -> Option<u16> {
    DEFAULT_PORTS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(scheme))
        .map(|&(_, port)| port)
}

/// The [scheme] of a URI, as written.
///
/// [scheme]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.1
///
/// Two `Scheme`s are equal if they match ignoring ASCII case, since schemes
/// are case-insensitive. Compare [`as_str`](Self::as_str) for an exact match.
///
/// # Examples
///
/// ```
/// use canon_uri::{component::Scheme, Uri};
///
/// const SCHEME_HTTP: &Scheme = Scheme::new_or_panic("http");
///
/// let uri = Uri::parse("HTTP://EXAMPLE.COM/")?;
/// let scheme = uri.scheme().unwrap();
///
/// assert_eq!(scheme, SCHEME_HTTP);
/// assert_eq!(scheme.as_str(), "HTTP");
/// assert_eq!(scheme.default_port(), Some(80));
/// # Ok::<_, canon_uri::ParseError>(())
/// ```
#[derive(RefCastCustom)]
#[repr(transparent)]
pub struct Scheme {
    inner: str,
}

impl Scheme {
    #[ref_cast_custom]
    #[inline]
    pub(crate) const fn new_validated(scheme: &str) -> &Scheme;

    /// Checks a scheme name and wraps it, in a `const` context if needed.
    ///
    /// # Panics
    ///
    /// Panics if the string does not match the `scheme` rule.
    /// See [`new`](Self::new) for a non-panicking variant.
    #[inline]
    #[must_use]
    pub const fn new_or_panic(s: &str) -> &Scheme {
        match Self::new(s) {
            Some(scheme) => scheme,
            None => panic!("invalid scheme"),
        }
    }

    /// Checks a scheme name and wraps it, or returns `None`.
    #[inline]
    #[must_use]
    pub const fn new(s: &str) -> Option<&Scheme> {
        if matches!(s.as_bytes(), [first, rem @ ..]
        if first.is_ascii_alphabetic() && table::SCHEME.validate(rem))
        {
            Some(Scheme::new_validated(s))
        } else {
            None
        }
    }

    /// Returns the scheme with its original case.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Returns the well-known default port of this scheme, if any.
    ///
    /// See [`default_port`](crate::default_port) for the table in use.
    #[must_use]
    pub fn default_port(&self) -> Option<u16> {
        default_port(&self.inner)
    }
}

impl PartialEq for Scheme {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.inner.eq_ignore_ascii_case(&other.inner)
    }
}

impl Eq for Scheme {}

/// How a host was classified at parse time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum HostMeta {
    Ipv4(Ipv4Addr),
    Ipv6(Ipv6Addr),
    IpvFuture,
    RegName,
}

/// A [host], classified when the URI is parsed.
///
/// [host]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2.2
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Host<'a> {
    /// A dotted-decimal IPv4 address.
    Ipv4(Ipv4Addr),
    /// An IPv6 address in brackets.
    Ipv6(Ipv6Addr),
    /// An IP address of future version, without the enclosing brackets.
    IpvFuture(&'a str),
    /// Anything else, including the empty host. Not necessarily a DNS name.
    RegName(&'a EStr<RegName>),
}

/// The [authority] of a URI: `[userinfo "@"] host [":" port]`.
///
/// [authority]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2
///
/// # Examples
///
/// ```
/// use canon_uri::{component::Host, Uri};
///
/// let uri = Uri::parse("foo://user@example.com:8042/over/there")?;
/// let auth = uri.authority().unwrap();
/// assert_eq!(auth.to_string(), "user@example.com:8042");
/// assert_eq!(auth.userinfo().unwrap(), "user");
/// assert_eq!(auth.host(), "example.com");
/// assert!(matches!(auth.host_parsed(), Host::RegName(name) if name == "example.com"));
/// assert_eq!(auth.port(), Some(8042));
/// # Ok::<_, canon_uri::ParseError>(())
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Authority {
    pub(crate) userinfo: Option<String>,
    pub(crate) host: String,
    pub(crate) host_meta: HostMeta,
    pub(crate) port: Option<u16>,
}

impl Authority {
    /// Returns the [userinfo] before `"@"`, if any.
    ///
    /// [userinfo]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2.1
    #[must_use]
    pub fn userinfo(&self) -> Option<&EStr<Userinfo>> {
        self.userinfo.as_deref().map(EStr::new_validated)
    }

    /// Returns the [host] as written, brackets included for an IP literal.
    ///
    /// May be empty, as in `file:///etc`.
    ///
    /// [host]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2.2
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the [host] with its classification.
    ///
    /// [host]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2.2
    ///
    /// # Examples
    ///
    /// ```
    /// use canon_uri::{component::Host, Uri};
    /// use std::net::{Ipv4Addr, Ipv6Addr};
    ///
    /// for (s, expected) in [
    ///     ("foo://127.0.0.1", Host::Ipv4(Ipv4Addr::LOCALHOST)),
    ///     ("foo://[::1]:8080", Host::Ipv6(Ipv6Addr::LOCALHOST)),
    ///     ("foo://[v1.addr]", Host::IpvFuture("v1.addr")),
    /// ] {
    ///     let uri = Uri::parse(s)?;
    ///     assert_eq!(uri.authority().unwrap().host_parsed(), expected);
    /// }
    ///
    /// let uri = Uri::parse("foo://127.0.0.256")?;
    /// assert!(matches!(uri.authority().unwrap().host_parsed(), Host::RegName(_)));
    /// # Ok::<_, canon_uri::ParseError>(())
    /// ```
    #[must_use]
    pub fn host_parsed(&self) -> Host<'_> {
        match self.host_meta {
            HostMeta::Ipv4(addr) => Host::Ipv4(addr),
            HostMeta::Ipv6(addr) => Host::Ipv6(addr),
            HostMeta::IpvFuture => Host::IpvFuture(&self.host[1..self.host.len() - 1]),
            HostMeta::RegName => Host::RegName(EStr::new_validated(&self.host)),
        }
    }

    /// Returns the [port] number, if one is given.
    ///
    /// An empty port (a colon with no digits after it) is `None`.
    ///
    /// [port]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2.3
    #[must_use]
    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// Checks whether a non-empty port is present.
    #[must_use]
    pub fn has_port(&self) -> bool {
        self.port.is_some()
    }

    /// Reassembles the authority as `[userinfo "@"] host [":" port]`.
    #[must_use]
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}
