//! Character tables from RFC 3986.
//!
//! Each constant is documented with the ABNF rule of [RFC 3986] it stands for.
//!
//! [RFC 3986]: https://datatracker.ietf.org/doc/html/rfc3986/#appendix-A

use super::is_hexdig_pair;

/// A set of ASCII characters allowed unencoded in a string, plus a flag
/// telling whether percent-encoded octets are allowed too.
///
/// Tables are built at compile time:
///
/// ```
/// use canon_uri::pct_enc::{table, Table};
///
/// const LABEL: Table = table::ALPHA.or(table::DIGIT).or(Table::new(b"-"));
///
/// assert!(LABEL.allows('x') && LABEL.allows('-'));
/// assert!(!LABEL.allows('.'));
/// assert!(LABEL.is_subset(table::UNRESERVED));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Table {
    bits: u128,
    pct_encoded: bool,
}

impl Table {
    /// Creates a table allowing exactly the given bytes, unencoded.
    ///
    /// # Panics
    ///
    /// Panics if a byte is `b'%'` or is not ASCII.
    #[must_use]
    pub const fn new(bytes: &[u8]) -> Self {
        let mut bits = 0u128;
        let mut i = 0;
        while i < bytes.len() {
            let x = bytes[i];
            assert!(x < 128 && x != b'%', "cannot allow non-ASCII byte or %");
            bits |= 1u128 << x;
            i += 1;
        }
        Self {
            bits,
            pct_encoded: false,
        }
    }

    /// Returns the union of two tables.
    #[must_use]
    pub const fn or(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
            pct_encoded: self.pct_encoded || other.pct_encoded,
        }
    }

    /// Returns a copy of this table that also allows percent-encoded octets.
    #[must_use]
    pub const fn or_pct_encoded(self) -> Self {
        Self {
            bits: self.bits,
            pct_encoded: true,
        }
    }

    /// Returns the characters of `self` that `other` does not allow.
    ///
    /// Whether percent-encoded octets are allowed is kept from `self`.
    #[must_use]
    pub const fn sub(self, other: Self) -> Self {
        Self {
            bits: self.bits & !other.bits,
            pct_encoded: self.pct_encoded,
        }
    }

    /// Checks whether `other` allows everything `self` allows.
    #[must_use]
    pub const fn is_subset(self, other: Self) -> bool {
        self.bits & !other.bits == 0 && (!self.pct_encoded || other.pct_encoded)
    }

    #[inline]
    pub(crate) const fn allows_ascii(self, x: u8) -> bool {
        x < 128 && self.bits & (1u128 << x) != 0
    }

    /// Checks whether a character is allowed unencoded.
    ///
    /// Non-ASCII characters never are.
    #[inline]
    #[must_use]
    pub const fn allows(self, ch: char) -> bool {
        ch.is_ascii() && self.allows_ascii(ch as u8)
    }

    /// Checks whether percent-encoded octets are allowed.
    #[inline]
    #[must_use]
    pub const fn allows_pct_encoded(self) -> bool {
        self.pct_encoded
    }

    /// Checks a whole string against the table.
    pub(crate) const fn validate(self, s: &[u8]) -> bool {
        let mut i = 0;
        while i < s.len() {
            if s[i] == b'%' && self.pct_encoded {
                if i + 2 >= s.len() || !is_hexdig_pair(s[i + 1], s[i + 2]) {
                    return false;
                }
                i += 3;
            } else if self.allows_ascii(s[i]) {
                i += 1;
            } else {
                return false;
            }
        }
        true
    }
}

const fn new(bytes: &[u8]) -> Table {
    Table::new(bytes)
}

/// `ALPHA = %x41-5A / %x61-7A`
pub const ALPHA: Table = new(b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz");

/// `DIGIT = %x30-39`
pub const DIGIT: Table = new(b"0123456789");

/// `HEXDIG = DIGIT / "A" / "B" / "C" / "D" / "E" / "F"`, either case.
pub const HEXDIG: Table = DIGIT.or(new(b"ABCDEFabcdef"));

/// `unreserved = ALPHA / DIGIT / "-" / "." / "_" / "~"`
pub const UNRESERVED: Table = ALPHA.or(DIGIT).or(new(b"-._~"));

/// `gen-delims = ":" / "/" / "?" / "#" / "[" / "]" / "@"`
pub const GEN_DELIMS: Table = new(b":/?#[]@");

/// `sub-delims = "!" / "$" / "&" / "'" / "(" / ")" / "*" / "+" / "," / ";" / "="`
pub const SUB_DELIMS: Table = new(b"!$&'()*+,;=");

/// `reserved = gen-delims / sub-delims`
pub const RESERVED: Table = GEN_DELIMS.or(SUB_DELIMS);

/// Characters after the first one in `scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`.
pub const SCHEME: Table = ALPHA.or(DIGIT).or(new(b"+-."));

/// `userinfo = *( unreserved / pct-encoded / sub-delims / ":" )`
pub const USERINFO: Table = UNRESERVED.or(SUB_DELIMS).or(new(b":")).or_pct_encoded();

/// The tail of `IPvFuture = "v" 1*HEXDIG "." 1*( unreserved / sub-delims / ":" )`.
pub const IPV_FUTURE: Table = UNRESERVED.or(SUB_DELIMS).or(new(b":"));

/// `reg-name = *( unreserved / pct-encoded / sub-delims )`
pub const REG_NAME: Table = UNRESERVED.or(SUB_DELIMS).or_pct_encoded();

/// `port = *DIGIT`
pub const PORT: Table = DIGIT;

/// `pchar = unreserved / pct-encoded / sub-delims / ":" / "@"`
pub const PCHAR: Table = UNRESERVED.or(SUB_DELIMS).or(new(b":@")).or_pct_encoded();

/// `segment = *pchar`
pub const SEGMENT: Table = PCHAR;

/// Any of the path rules, i.e. `*( pchar / "/" )`.
pub const PATH: Table = PCHAR.or(new(b"/"));

/// `query = *( pchar / "/" / "?" )`
pub const QUERY: Table = PCHAR.or(new(b"/?"));

/// `fragment = *( pchar / "/" / "?" )`
pub const FRAGMENT: Table = QUERY;

/// The value side of an `application/x-www-form-urlencoded` pair:
/// `query` without `"&"`, `"="` and `"+"`.
pub const QUERY_FORM_VALUE: Table = QUERY.sub(new(b"&=+"));
