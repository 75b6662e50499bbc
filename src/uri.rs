use crate::{
    component::{Authority, Scheme},
    error::{ParseError, SchemeError},
    normalize, parser,
    pct_enc::{
        encoder::{Fragment, Path, Query},
        EStr,
    },
    resolve,
};
use alloc::string::{String, ToString};
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// A [URI reference] defined in RFC 3986.
///
/// [URI reference]: https://datatracker.ietf.org/doc/html/rfc3986/#section-4.1
///
/// A `Uri` is either an absolute URI, which has a scheme, or a relative
/// reference, which has none. It is an immutable owned value: every
/// operation that changes a component returns a new `Uri`.
///
/// # Comparison
///
/// `Uri`s are compared structurally, component by component, without
/// normalization. Use [`equals_normalized`](Self::equals_normalized) to
/// compare for equivalence.
///
/// # Examples
///
/// Parse and extract components from a URI:
///
/// ```
/// use canon_uri::{
///     component::{Host, Scheme},
///     Uri,
/// };
///
/// const SCHEME_FOO: &Scheme = Scheme::new_or_panic("foo");
///
/// let s = "foo://user@example.com:8042/over/there?name=ferret#nose";
/// let uri = Uri::parse(s)?;
///
/// assert_eq!(uri.scheme().unwrap(), SCHEME_FOO);
///
/// let auth = uri.authority().unwrap();
/// assert_eq!(auth.userinfo().unwrap(), "user");
/// assert_eq!(auth.host(), "example.com");
/// assert!(matches!(auth.host_parsed(), Host::RegName(name) if name == "example.com"));
/// assert_eq!(auth.port(), Some(8042));
///
/// assert_eq!(uri.path(), "/over/there");
/// assert_eq!(uri.query().unwrap(), "name=ferret");
/// assert_eq!(uri.fragment().unwrap(), "nose");
/// assert_eq!(uri.to_text(), s);
/// # Ok::<_, canon_uri::ParseError>(())
/// ```
///
/// Parse a relative reference and resolve it against a base:
///
/// ```
/// use canon_uri::Uri;
///
/// let base = Uri::parse("http://example.com/dir/file.html")?;
/// let reference = Uri::parse("../other/page.html")?;
/// assert!(!reference.is_absolute());
///
/// let target = reference.resolve_against(&base)?;
/// assert_eq!(target.to_text(), "http://example.com/other/page.html");
/// # Ok::<_, canon_uri::ParseError>(())
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Uri {
    pub(crate) scheme: Option<String>,
    pub(crate) authority: Option<Authority>,
    pub(crate) path: String,
    pub(crate) query: Option<String>,
    pub(crate) fragment: Option<String>,
}

impl Uri {
    /// Parses a URI reference from a string.
    ///
    /// Both absolute URIs and relative references are accepted.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the string does not match the `URI-reference`
    /// ABNF rule from RFC 3986, or if the port does not fit in a `u16`.
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        parser::parse(s)
    }

    /// Parses an absolute URI (one with a scheme) from a string.
    ///
    /// # Errors
    ///
    /// Returns `Err` on the same conditions as [`parse`](Self::parse),
    /// or with [`SchemeError::Missing`] if the string is a relative reference.
    ///
    /// # Examples
    ///
    /// ```
    /// use canon_uri::{error::SchemeError, ParseError, Uri};
    ///
    /// assert!(Uri::parse_absolute("http://example.com").is_ok());
    /// assert_eq!(
    ///     Uri::parse_absolute("example.com"),
    ///     Err(ParseError::InvalidScheme(SchemeError::Missing))
    /// );
    /// ```
    pub fn parse_absolute(s: &str) -> Result<Self, ParseError> {
        let uri = parser::parse(s)?;
        if uri.is_absolute() {
            Ok(uri)
        } else {
            Err(ParseError::InvalidScheme(SchemeError::Missing))
        }
    }

    /// Returns the optional [scheme] component.
    ///
    /// [scheme]: https://datatracker.ietf.org/doc/html/rfc3986/#section-3.1
    #[must_use]
    pub fn scheme(&self) -> Option<&Scheme> {
        self.scheme.as_deref().map(Scheme::new_validated)
    }

    /// Returns the optional [authority] component.
    ///
    /// [authority]: https://datatracker.ietf.org/doc/html/rfc3986/#section-3.2
    #[must_use]
    pub fn authority(&self) -> Option<&Authority> {
        self.authority.as_ref()
    }

    /// Returns the [path] component.
    ///
    /// The path component is always present, although it may be empty.
    ///
    /// [path]: https://datatracker.ietf.org/doc/html/rfc3986/#section-3.3
    #[must_use]
    pub fn path(&self) -> &EStr<Path> {
        EStr::new_validated(&self.path)
    }

    /// Returns the optional [query] component.
    ///
    /// [query]: https://datatracker.ietf.org/doc/html/rfc3986/#section-3.4
    #[must_use]
    pub fn query(&self) -> Option<&EStr<Query>> {
        self.query.as_deref().map(EStr::new_validated)
    }

    /// Returns the optional [fragment] component.
    ///
    /// [fragment]: https://datatracker.ietf.org/doc/html/rfc3986/#section-3.5
    #[must_use]
    pub fn fragment(&self) -> Option<&EStr<Fragment>> {
        self.fragment.as_deref().map(EStr::new_validated)
    }

    /// Checks whether a scheme is present, i.e., whether this is an absolute URI.
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        self.scheme.is_some()
    }

    /// Checks whether an authority component is present.
    #[must_use]
    pub fn has_authority(&self) -> bool {
        self.authority.is_some()
    }

    /// Returns the explicit port, or the default port of the scheme when absent.
    ///
    /// Returns `None` when there is no authority.
    ///
    /// # Examples
    ///
    /// ```
    /// use canon_uri::Uri;
    ///
    /// assert_eq!(Uri::parse("https://example.com/")?.effective_port(), Some(443));
    /// assert_eq!(Uri::parse("https://example.com:8443/")?.effective_port(), Some(8443));
    /// assert_eq!(Uri::parse("foo://example.com/")?.effective_port(), None);
    /// assert_eq!(Uri::parse("mailto:a@example.com")?.effective_port(), None);
    /// # Ok::<_, canon_uri::ParseError>(())
    /// ```
    #[must_use]
    pub fn effective_port(&self) -> Option<u16> {
        let auth = self.authority.as_ref()?;
        auth.port.or_else(|| self.scheme().and_then(Scheme::default_port))
    }

    /// Reassembles the URI reference as a string.
    ///
    /// The output is `[scheme ":"] ["//" authority] path ["?" query] ["#" fragment]`.
    #[must_use]
    pub fn to_text(&self) -> String {
        self.to_string()
    }

    /// Normalizes the URI reference.
    ///
    /// See [`Normalizer::normalize`](crate::normalize::Normalizer::normalize)
    /// for the exact behavior of this method.
    #[must_use]
    pub fn normalize(&self) -> Uri {
        normalize::normalize(self)
    }

    /// Checks whether two URI references are equivalent after normalization.
    #[must_use]
    pub fn equals_normalized(&self, other: &Uri) -> bool {
        normalize::equals_normalized(self, other)
    }

    /// Resolves the URI reference against the given base URI.
    ///
    /// See [`resolve`](crate::resolve::resolve) for the exact behavior of this method.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the base has no scheme.
    pub fn resolve_against(&self, base: &Uri) -> Result<Uri, ParseError> {
        resolve::resolve(base, self)
    }
}

impl FromStr for Uri {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uri::parse(s)
    }
}

#[cfg(feature = "serde")]
impl Serialize for Uri {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Uri {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Uri::parse(&s).map_err(de::Error::custom)
    }
}
