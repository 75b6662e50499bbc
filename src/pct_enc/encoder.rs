#![allow(missing_debug_implementations)]

//! Percent-encoders for URI components.

use super::table::{self, Table};

/// A trait used by [`EStr`] to specify the table used for encoding.
///
/// [`EStr`]: super::EStr
///
/// # Sub-encoders
///
/// A sub-encoder `SubE` of `E` is an encoder such that `SubE::TABLE` is a [subset] of `E::TABLE`.
///
/// [subset]: Table::is_subset
pub trait Encoder: 'static {
    /// The table used for encoding.
    const TABLE: Table;
}

/// An encoder for userinfo.
pub struct Userinfo(());

impl Encoder for Userinfo {
    const TABLE: Table = table::USERINFO;
}

/// An encoder for registered name.
pub struct RegName(());

impl Encoder for RegName {
    const TABLE: Table = table::REG_NAME;
}

/// An encoder for path.
///
/// [`EStr`] has [extension methods] for the path component.
///
/// [`EStr`]: super::EStr
/// [extension methods]: super::EStr#impl-EStr<Path>
pub struct Path(());

impl Encoder for Path {
    const TABLE: Table = table::PATH;
}

/// An encoder for path segment.
pub struct Segment(());

impl Encoder for Segment {
    const TABLE: Table = table::SEGMENT;
}

/// An encoder for query.
pub struct Query(());

impl Encoder for Query {
    const TABLE: Table = table::QUERY;
}

/// An encoder for fragment.
pub struct Fragment(());

impl Encoder for Fragment {
    const TABLE: Table = table::FRAGMENT;
}

/// A named set of characters that pass through [`encode`] unescaped.
///
/// Every set allows the `unreserved` characters (`ALPHA / DIGIT / "-" / "." / "_" / "~"`).
///
/// [`encode`]: super::encode
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EncodeSet {
    /// `unreserved` only.
    Unreserved,
    /// Characters safe within a single path segment (`pchar`).
    ///
    /// `"/"` is escaped.
    Component,
    /// `query` characters.
    Query,
    /// The value side of an `application/x-www-form-urlencoded` pair.
    ///
    /// `"&"`, `"="` and `"+"` are escaped, and space is encoded as `"+"`.
    QueryFormValue,
    /// `userinfo` characters.
    UserInfo,
    /// `fragment` characters.
    Fragment,
}

impl EncodeSet {
    /// Returns the table of characters allowed unescaped by this set.
    #[must_use]
    pub const fn table(self) -> Table {
        match self {
            Self::Unreserved => table::UNRESERVED,
            Self::Component => table::SEGMENT,
            Self::Query => table::QUERY,
            Self::QueryFormValue => table::QUERY_FORM_VALUE,
            Self::UserInfo => table::USERINFO,
            Self::Fragment => table::FRAGMENT,
        }
    }

    pub(crate) const fn encodes_space_as_plus(self) -> bool {
        matches!(self, Self::QueryFormValue)
    }
}
