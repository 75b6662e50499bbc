//! Module for reference resolution.

use crate::{
    error::{ParseError, SchemeError},
    normalize::remove_dot_segments,
    Uri,
};
use alloc::{string::String, vec::Vec};

/// A URI reference resolver against a fixed base.
///
/// # Examples
///
/// ```
/// use canon_uri::{resolve::Resolver, Uri};
///
/// let base = Uri::parse("http://example.com/foo/bar")?;
/// let resolver = Resolver::with_base(base);
///
/// assert_eq!(resolver.resolve(&Uri::parse("baz")?)?.to_text(), "http://example.com/foo/baz");
/// assert_eq!(resolver.resolve(&Uri::parse("../baz")?)?.to_text(), "http://example.com/baz");
/// assert_eq!(resolver.resolve(&Uri::parse("?baz")?)?.to_text(), "http://example.com/foo/bar?baz");
/// # Ok::<_, canon_uri::ParseError>(())
/// ```
#[derive(Clone)]
#[must_use]
pub struct Resolver {
    base: Uri,
}

impl Resolver {
    /// Creates a new `Resolver` with the given base.
    ///
    /// A base without a scheme is accepted here, but every resolution
    /// against it fails with [`SchemeError::Missing`].
    pub fn with_base(base: Uri) -> Self {
        Self { base }
    }

    /// Returns the base URI.
    #[must_use]
    pub fn base(&self) -> &Uri {
        &self.base
    }

    /// Resolves the given reference against the configured base.
    ///
    /// See [`resolve()`] for the exact behavior of this method.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the base has no scheme.
    pub fn resolve(&self, reference: &Uri) -> Result<Uri, ParseError> {
        resolve(&self.base, reference)
    }

    /// Resolves each of the given references against the configured base.
    ///
    /// See [`resolve_all()`] for the exact behavior of this method.
    pub fn resolve_all<'a, I>(&self, references: I) -> Vec<Result<Uri, ParseError>>
    where
        I: IntoIterator<Item = &'a Uri>,
    {
        resolve_all(&self.base, references)
    }
}

/// Resolves a URI reference against a base URI, following
/// [Section 5.2 of RFC 3986](https://datatracker.ietf.org/doc/html/rfc3986/#section-5.2).
///
/// Dot segments are removed from the path taken from the reference, or from
/// the merged path. A path taken as is from the base keeps its dot segments.
/// The fragment always comes from the reference.
///
/// If the target would have no authority and a path starting with `"//"`,
/// `"/."` is prepended to the path so that it stays a valid reference.
///
/// # Errors
///
/// Returns `Err` with [`SchemeError::Missing`] if the base has no scheme.
///
/// # Examples
///
/// ```
/// use canon_uri::{resolve::resolve, Uri};
///
/// let base = Uri::parse("http://a/b/c/d;p?q")?;
/// let target = resolve(&base, &Uri::parse("../g?y#s")?)?;
/// assert_eq!(target.to_text(), "http://a/b/g?y#s");
/// # Ok::<_, canon_uri::ParseError>(())
/// ```
pub fn resolve(base: &Uri, reference: &Uri) -> Result<Uri, ParseError> {
    let Some(base_scheme) = &base.scheme else {
        tracing::trace!(base = %base, "cannot resolve against a base without scheme");
        return Err(ParseError::InvalidScheme(SchemeError::Missing));
    };

    let (t_scheme, t_authority, mut t_path, t_query);

    if let Some(r_scheme) = &reference.scheme {
        t_scheme = r_scheme.clone();
        t_authority = reference.authority.clone();
        t_path = remove_dot_segments(&reference.path);
        t_query = reference.query.clone();
    } else {
        if reference.authority.is_some() {
            t_authority = reference.authority.clone();
            t_path = remove_dot_segments(&reference.path);
            t_query = reference.query.clone();
        } else {
            if reference.path.is_empty() {
                t_path = base.path.clone();
                t_query = reference.query.clone().or_else(|| base.query.clone());
            } else {
                if reference.path.starts_with('/') {
                    t_path = remove_dot_segments(&reference.path);
                } else {
                    t_path = remove_dot_segments(&merge(base, &reference.path));
                }
                t_query = reference.query.clone();
            }
            t_authority = base.authority.clone();
        }
        t_scheme = base_scheme.clone();
    }

    // An authority-less path must not start with "//".
    if t_authority.is_none() && t_path.starts_with("//") {
        t_path.insert_str(0, "/.");
    }

    let target = Uri {
        scheme: Some(t_scheme),
        authority: t_authority,
        path: t_path,
        query: t_query,
        fragment: reference.fragment.clone(),
    };
    tracing::trace!(
        base = %base,
        reference = %reference,
        target = %target,
        "resolved URI reference"
    );
    Ok(target)
}

/// Resolves each of the given references against a base URI.
///
/// Returns one result per reference, in input order. A failed resolution
/// does not stop the others.
///
/// # Examples
///
/// ```
/// use canon_uri::{resolve::resolve_all, Uri};
///
/// let base = Uri::parse("http://a/b/c/d;p?q")?;
/// let refs = [Uri::parse("g")?, Uri::parse("/g")?, Uri::parse("//g")?];
/// let targets: Vec<_> = resolve_all(&base, &refs)
///     .into_iter()
///     .map(|t| t.map(|t| t.to_text()))
///     .collect::<Result<_, _>>()?;
/// assert_eq!(targets, ["http://a/b/c/g", "http://a/g", "http://g"]);
/// # Ok::<_, canon_uri::ParseError>(())
/// ```
pub fn resolve_all<'a, I>(base: &Uri, references: I) -> Vec<Result<Uri, ParseError>>
where
    I: IntoIterator<Item = &'a Uri>,
{
    let results: Vec<_> = references
        .into_iter()
        .map(|reference| resolve(base, reference))
        .collect();

    let failed = results.iter().filter(|res| res.is_err()).count();
    tracing::debug!(
        total = results.len(),
        failed,
        "resolved batch of URI references"
    );
    results
}

/// Merges a relative-path reference with the path of the base,
/// as in [Section 5.2.3 of RFC 3986](https://datatracker.ietf.org/doc/html/rfc3986/#section-5.2.3).
fn merge(base: &Uri, r_path: &str) -> String {
    let base_path = &base.path;
    if base.authority.is_some() && base_path.is_empty() {
        let mut buf = String::with_capacity(r_path.len() + 1);
        buf.push('/');
        buf.push_str(r_path);
        return buf;
    }

    let prefix = base_path.rfind('/').map_or("", |i| &base_path[..=i]);
    let mut buf = String::with_capacity(prefix.len() + r_path.len());
    buf.push_str(prefix);
    buf.push_str(r_path);
    buf
}
