//! Module for normalization.

use crate::{
    component::{Authority, HostMeta, Scheme},
    parser,
    pct_enc::{self, table, Decode, DecodedChunk},
    Uri,
};
use alloc::string::String;

/// Removes dot segments from a path, following
/// [Section 5.2.4 of RFC 3986](https://datatracker.ietf.org/doc/html/rfc3986/#section-5.2.4).
///
/// Only the literal segments `"."` and `".."` are recognized; escaped dots
/// are left alone. This function is idempotent and never fails: a `".."`
/// that would climb above the root is dropped.
///
/// # Examples
///
/// ```
/// use canon_uri::normalize::remove_dot_segments;
///
/// assert_eq!(remove_dot_segments("/a/b/c/./../../g"), "/a/g");
/// assert_eq!(remove_dot_segments("mid/content=5/../6"), "mid/6");
/// assert_eq!(remove_dot_segments("/../a"), "/a");
/// assert_eq!(remove_dot_segments("../a"), "a");
/// assert_eq!(remove_dot_segments("/a/.."), "/");
/// ```
#[must_use]
pub fn remove_dot_segments(path: &str) -> String {
    let mut input = path;
    let mut output = String::with_capacity(path.len());

    while !input.is_empty() {
        if let Some(rem) = input
            .strip_prefix("../")
            .or_else(|| input.strip_prefix("./"))
        {
            input = rem;
        } else if input.starts_with("/./") {
            // Keep the second slash.
            input = &input[2..];
        } else if input == "/." {
            input = "/";
        } else if input.starts_with("/../") {
            input = &input[3..];
            pop_last_segment(&mut output);
        } else if input == "/.." {
            input = "/";
            pop_last_segment(&mut output);
        } else if input == "." || input == ".." {
            input = "";
        } else {
            let start = usize::from(input.starts_with('/'));
            let end = input[start..].find('/').map_or(input.len(), |i| start + i);
            output.push_str(&input[..end]);
            input = &input[end..];
        }
    }
    output
}

// Removes the last segment and its preceding "/", if any.
fn pop_last_segment(output: &mut String) {
    let i = output.rfind('/').unwrap_or(0);
    output.truncate(i);
}

/// A configurable URI reference normalizer.
///
/// # Examples
///
/// ```
/// use canon_uri::{normalize::Normalizer, Uri};
///
/// let uri = Uri::parse("HTTP://Example.COM:80/%7euser/./a/../b?q=%3f#%41")?;
/// assert_eq!(Normalizer::new().normalize(&uri).to_text(), "http://example.com/~user/b?q=%3F#A");
/// # Ok::<_, canon_uri::ParseError>(())
/// ```
#[derive(Clone, Copy)]
#[allow(missing_debug_implementations)]
#[must_use]
pub struct Normalizer {
    default_port_f: fn(&Scheme) -> Option<u16>,
}

impl Normalizer {
    /// Creates a new `Normalizer` with default configuration.
    pub fn new() -> Self {
        Self {
            default_port_f: Scheme::default_port,
        }
    }

    /// Sets the function with which to get the default port of a scheme.
    ///
    /// This defaults to [`Scheme::default_port`]. The scheme passed to
    /// the function is already lower-cased.
    ///
    /// # Examples
    ///
    /// ```
    /// use canon_uri::{component::Scheme, normalize::Normalizer, Uri};
    ///
    /// const SCHEME_FOO: &Scheme = Scheme::new_or_panic("foo");
    ///
    /// let normalizer = Normalizer::new().default_port_with(|scheme| {
    ///     if scheme == SCHEME_FOO {
    ///         Some(4673)
    ///     } else {
    ///         scheme.default_port()
    ///     }
    /// });
    /// let uri = Uri::parse("foo://localhost:4673")?;
    ///
    /// assert_eq!(normalizer.normalize(&uri).to_text(), "foo://localhost/");
    /// # Ok::<_, canon_uri::ParseError>(())
    /// ```
    pub fn default_port_with(mut self, f: fn(&Scheme) -> Option<u16>) -> Self {
        self.default_port_f = f;
        self
    }

    /// Normalizes the given URI reference.
    ///
    /// This method applies syntax-based normalization described in
    /// [Section 6.2.2 of RFC 3986](https://datatracker.ietf.org/doc/html/rfc3986/#section-6.2.2)
    /// and scheme-based normalization described in
    /// [Section 6.2.3](https://datatracker.ietf.org/doc/html/rfc3986/#section-6.2.3):
    ///
    /// - Lowercase the scheme and a registered name host.
    /// - Uppercase the hexadecimal digits within all percent-encoded octets.
    /// - Decode all percent-encoded octets that correspond to an unreserved character.
    /// - Remove the dot segments from the path of a URI with a scheme.
    ///   Relative references keep theirs, as they may still be resolved.
    /// - Remove the port if it is equal to the default port of the scheme.
    /// - Replace an empty path with `"/"` when the authority is present.
    ///
    /// IP literals keep their text. A registered name that decodes
    /// to an IPv4 address is classified as one.
    ///
    /// If the result would have no authority and a path starting with `"//"`,
    /// `"/."` is prepended to the path so that it stays a valid reference.
    ///
    /// This method never fails and is idempotent.
    pub fn normalize(&self, uri: &Uri) -> Uri {
        let scheme = uri.scheme.as_ref().map(|s| s.to_ascii_lowercase());

        let mut path = String::with_capacity(uri.path.len());
        normalize_estr(&mut path, &uri.path, false);
        if scheme.is_some() {
            path = remove_dot_segments(&path);
        }

        let authority = uri.authority.as_ref().map(|auth| {
            let default = scheme
                .as_deref()
                .and_then(|s| (self.default_port_f)(Scheme::new_validated(s)));
            normalize_authority(auth, default)
        });

        if authority.is_some() && path.is_empty() {
            path.push('/');
        } else if authority.is_none() && path.starts_with("//") {
            path.insert_str(0, "/.");
        }

        Uri {
            scheme,
            authority,
            path,
            query: uri.query.as_deref().map(normalize_estr_owned),
            fragment: uri.fragment.as_deref().map(normalize_estr_owned),
        }
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn normalize(uri: &Uri) -> Uri {
    Normalizer::new().normalize(uri)
}

pub(crate) fn equals_normalized(a: &Uri, b: &Uri) -> bool {
    a == b || normalize(a) == normalize(b)
}

fn normalize_authority(auth: &Authority, default_port: Option<u16>) -> Authority {
    let (host, host_meta) = match auth.host_meta {
        HostMeta::RegName => {
            let mut host = String::with_capacity(auth.host.len());
            normalize_estr(&mut host, &auth.host, true);
            let meta = parser::classify_reg_name(&host);
            (host, meta)
        }
        meta => (auth.host.clone(), meta),
    };

    Authority {
        userinfo: auth.userinfo.as_deref().map(normalize_estr_owned),
        host,
        host_meta,
        port: auth.port.filter(|&port| Some(port) != default_port),
    }
}

fn normalize_estr_owned(s: &str) -> String {
    let mut buf = String::with_capacity(s.len());
    normalize_estr(&mut buf, s, false);
    buf
}

// The string must be validated.
fn normalize_estr(buf: &mut String, s: &str, to_ascii_lowercase: bool) {
    for chunk in Decode::new(s) {
        match chunk {
            DecodedChunk::Unencoded(s) => {
                let i = buf.len();
                buf.push_str(s);
                if to_ascii_lowercase {
                    buf[i..].make_ascii_lowercase();
                }
            }
            DecodedChunk::PctDecoded(mut x) => {
                if table::UNRESERVED.allows_ascii(x) {
                    if to_ascii_lowercase {
                        x.make_ascii_lowercase();
                    }
                    buf.push(x as char);
                } else {
                    buf.push_str(pct_enc::encode_byte(x));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::default_port;

    #[test]
    fn default_port_is_consulted_lowercased() {
        let normalizer = Normalizer::new().default_port_with(|scheme| {
            assert_eq!(scheme.as_str(), "http");
            default_port(scheme.as_str())
        });
        let uri = Uri::parse("HTTP://a:80").unwrap();
        assert_eq!(normalizer.normalize(&uri).to_text(), "http://a/");
    }

    #[test]
    fn pop_last_segment_at_root() {
        let mut s = String::from("/a");
        pop_last_segment(&mut s);
        assert_eq!(s, "");
        pop_last_segment(&mut s);
        assert_eq!(s, "");
    }
}
