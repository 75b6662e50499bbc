//! Percent-encoding utilities.

pub mod encoder;
pub mod table;

pub use encoder::{EncodeSet, Encoder};
pub use table::Table;

use crate::error::{DecodeError, ValidationError};
use alloc::{
    borrow::Cow,
    string::{FromUtf8Error, String},
    vec::Vec,
};
use core::{cmp::Ordering, hash, iter::FusedIterator, marker::PhantomData, str};
use encoder::Path;
use ref_cast::{ref_cast_custom, RefCastCustom};

/// A slice of a URI component, known to be properly percent-encoded.
///
/// The type parameter `E` is an [`Encoder`] naming the component. Every byte
/// of the slice is either an ASCII character allowed by `E::TABLE`, or part of
/// a `%XX` triple when `E::TABLE` allows percent-encoded octets.
///
/// `EStr` slices compare by their bytes. No normalization happens first,
/// so `"%7e"` and `"~"` are different slices.
///
/// # Examples
///
/// Collect the pairs of a query into a map:
///
/// ```
/// use canon_uri::{pct_enc::EStr, Uri};
/// use std::collections::HashMap;
///
/// let uri = Uri::parse("?name=%E5%BC%A0%E4%B8%89&speech=%C2%A1Ol%C3%A9%21&flag")?;
/// let map: HashMap<_, _> = uri
///     .query()
///     .unwrap()
///     .split('&')
///     .map(|pair| pair.split_once('=').unwrap_or((pair, EStr::EMPTY)))
///     .map(|(k, v)| (k.decode().to_string_lossy(), v.decode().to_string_lossy()))
///     .collect();
/// assert_eq!(map["name"], "张三");
/// assert_eq!(map["speech"], "¡Olé!");
/// assert_eq!(map["flag"], "");
/// # Ok::<_, canon_uri::ParseError>(())
/// ```
#[derive(RefCastCustom)]
#[repr(transparent)]
pub struct EStr<E: Encoder> {
    encoder: PhantomData<E>,
    inner: str,
}

impl<E: Encoder> EStr<E> {
    #[ref_cast_custom]
    pub(crate) const fn new_validated(s: &str) -> &Self;

    /// The empty slice.
    pub const EMPTY: &'static Self = Self::new_validated("");

    /// Checks a string against `E::TABLE` and wraps it.
    ///
    /// # Panics
    ///
    /// Panics if the check fails. See [`new`](Self::new) for a
    /// non-panicking variant.
    #[must_use]
    pub const fn new_or_panic(s: &str) -> &Self {
        match Self::new(s) {
            Some(s) => s,
            None => panic!("improperly encoded string"),
        }
    }

    /// Checks a string against `E::TABLE` and wraps it, or returns `None`.
    #[must_use]
    pub const fn new(s: &str) -> Option<&Self> {
        if E::TABLE.validate(s.as_bytes()) {
            Some(Self::new_validated(s))
        } else {
            None
        }
    }

    /// Returns the slice as it appears in the URI, still encoded.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Returns the length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Checks whether the slice is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns a decoder over the slice.
    ///
    /// Split the slice on its delimiters first: a decoded `"%26"` can no longer
    /// be told apart from a literal `"&"`.
    ///
    /// `"+"` is not decoded as space here. Use [`decode_form`] on the string
    /// for form data.
    ///
    /// # Examples
    ///
    /// ```
    /// use canon_uri::pct_enc::{encoder::Path, EStr};
    ///
    /// let dec = EStr::<Path>::new_or_panic("%C2%A1Hola%21").decode();
    /// assert_eq!(*dec.clone().to_bytes(), [0xc2, 0xa1, 0x48, 0x6f, 0x6c, 0x61, 0x21]);
    /// assert_eq!(dec.into_string().unwrap(), "¡Hola!");
    /// ```
    pub fn decode(&self) -> Decode<'_> {
        Decode::new(&self.inner)
    }

    /// Splits the slice on a delimiter.
    ///
    /// # Panics
    ///
    /// Panics if the delimiter is not a [reserved] character.
    ///
    /// [reserved]: https://datatracker.ietf.org/doc/html/rfc3986#section-2.2
    ///
    /// # Examples
    ///
    /// ```
    /// use canon_uri::pct_enc::{encoder::Path, EStr};
    ///
    /// assert!(EStr::<Path>::new_or_panic("a,b,c").split(',').eq(["a", "b", "c"]));
    /// assert!(EStr::<Path>::new_or_panic(",").split(',').eq(["", ""]));
    /// assert!(EStr::<Path>::EMPTY.split(',').eq([""]));
    /// ```
    pub fn split(&self, delim: char) -> Split<'_, E> {
        assert_reserved(delim);
        Split {
            inner: self.inner.split(delim),
            encoder: PhantomData,
        }
    }

    /// Splits the slice at the first occurrence of a delimiter.
    ///
    /// Returns `None` if the delimiter does not occur.
    ///
    /// # Panics
    ///
    /// Panics if the delimiter is not a [reserved] character.
    ///
    /// [reserved]: https://datatracker.ietf.org/doc/html/rfc3986#section-2.2
    #[must_use]
    pub fn split_once(&self, delim: char) -> Option<(&Self, &Self)> {
        assert_reserved(delim);
        let (a, b) = self.inner.split_once(delim)?;
        Some((Self::new_validated(a), Self::new_validated(b)))
    }
}

fn assert_reserved(delim: char) {
    assert!(
        table::RESERVED.allows(delim),
        "splitting with non-reserved character"
    );
}

impl<E: Encoder> AsRef<str> for EStr<E> {
    fn as_ref(&self) -> &str {
        &self.inner
    }
}

impl<E: Encoder> PartialEq for EStr<E> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<E: Encoder> PartialEq<str> for EStr<E> {
    fn eq(&self, other: &str) -> bool {
        &self.inner == other
    }
}

impl<E: Encoder> PartialEq<EStr<E>> for str {
    fn eq(&self, other: &EStr<E>) -> bool {
        self == &other.inner
    }
}

impl<E: Encoder> Eq for EStr<E> {}

impl<E: Encoder> hash::Hash for EStr<E> {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.inner.hash(state);
    }
}

impl<E: Encoder> PartialOrd for EStr<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E: Encoder> Ord for EStr<E> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}

impl<E: Encoder> Default for &EStr<E> {
    /// Creates an empty `EStr` slice.
    fn default() -> Self {
        EStr::EMPTY
    }
}

/// Methods specific to the [path] component.
///
/// [path]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.3
impl EStr<Path> {
    /// Checks whether the path starts with `"/"`.
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        self.inner.starts_with('/')
    }

    /// Checks whether the path does not start with `"/"`.
    #[must_use]
    pub fn is_rootless(&self) -> bool {
        !self.is_absolute()
    }

    /// Returns the segments of an absolute path, or `None` for a rootless one.
    ///
    /// The leading `"/"` does not open an empty segment, but any other
    /// `"/"` does. Use [`split`](Self::split) to cut a rootless path.
    ///
    /// # Examples
    ///
    /// ```
    /// use canon_uri::Uri;
    ///
    /// let uri = Uri::parse("file:///path/to//dir/")?;
    /// assert!(uri.path().segments_if_absolute().unwrap().eq(["path", "to", "", "dir", ""]));
    ///
    /// let uri = Uri::parse("foo:bar/baz")?;
    /// assert!(uri.path().segments_if_absolute().is_none());
    /// # Ok::<_, canon_uri::ParseError>(())
    /// ```
    #[must_use]
    pub fn segments_if_absolute(&self) -> Option<Split<'_, encoder::Segment>> {
        let rest = self.inner.strip_prefix('/')?;
        Some(Split {
            inner: rest.split('/'),
            encoder: PhantomData,
        })
    }
}

/// Value of each byte as a hexadecimal digit, or `0xff` if it is not one.
pub(crate) const HEX_VALUE: &[u8; 256] = &{
    let mut out = [0xff; 256];
    let mut i = 0;
    while i < 16 {
        out[b"0123456789abcdef"[i] as usize] = i as u8;
        out[b"0123456789ABCDEF"[i] as usize] = i as u8;
        i += 1;
    }
    out
};

pub(crate) const fn is_hexdig_pair(hi: u8, lo: u8) -> bool {
    HEX_VALUE[hi as usize] | HEX_VALUE[lo as usize] != 0xff
}

/// Decodes a `%XX` triple from its two digits, which must be hexadecimal.
fn decode_octet(hi: u8, lo: u8) -> u8 {
    debug_assert!(is_hexdig_pair(hi, lo));
    (HEX_VALUE[hi as usize] << 4) | HEX_VALUE[lo as usize]
}

/// Returns the `%XX` triple of a byte, with uppercase hexadecimal digits.
pub(crate) fn encode_byte(x: u8) -> &'static str {
    const TRIPLES: &str = {
        const BYTES: &[u8; 256 * 3] = &{
            const DIGITS: &[u8; 16] = b"0123456789ABCDEF";
            let mut out = [0; 256 * 3];
            let mut i = 0;
            while i < 256 {
                out[i * 3] = b'%';
                out[i * 3 + 1] = DIGITS[i >> 4];
                out[i * 3 + 2] = DIGITS[i & 0xf];
                i += 1;
            }
            out
        };
        match str::from_utf8(BYTES) {
            Ok(s) => s,
            Err(_) => unreachable!(),
        }
    };

    let i = x as usize * 3;
    &TRIPLES[i..i + 3]
}

/// Percent-encodes a string with the given set.
///
/// Each character that is ASCII and allowed by `set` is emitted as is.
/// Every other character is emitted as the `%XX` triples of its UTF-8 bytes,
/// with uppercase hexadecimal digits. With [`EncodeSet::QueryFormValue`],
/// space is emitted as `"+"`.
///
/// Encoding is not idempotent: a `"%"` in the input always becomes `"%25"`.
///
/// # Examples
///
/// ```
/// use canon_uri::pct_enc::{encode, EncodeSet};
///
/// assert_eq!(encode("a b/c", EncodeSet::Component), "a%20b%2Fc");
/// assert_eq!(encode("a b+c", EncodeSet::QueryFormValue), "a+b%2Bc");
/// assert_eq!(encode("%20", EncodeSet::Unreserved), "%2520");
/// ```
#[must_use]
pub fn encode(s: &str, set: EncodeSet) -> String {
    let mut buf = String::with_capacity(s.len());
    encode_to(s, set, &mut buf);
    buf
}

/// Percent-encodes a string with the given set, appending the result to a buffer.
///
/// See [`encode`] for the exact behavior.
pub fn encode_to(s: &str, set: EncodeSet, buf: &mut String) {
    let table = set.table();
    let space_as_plus = set.encodes_space_as_plus();

    buf.reserve(s.len());
    for ch in s.chars() {
        if table.allows(ch) {
            buf.push(ch);
        } else if space_as_plus && ch == ' ' {
            buf.push('+');
        } else {
            for &x in ch.encode_utf8(&mut [0; 4]).as_bytes() {
                buf.push_str(encode_byte(x));
            }
        }
    }
}

/// Checks that every `"%"` in a string is followed by two hexadecimal digits.
///
/// # Errors
///
/// Returns `Err` pointing to the first offending `"%"`.
///
/// # Examples
///
/// ```
/// use canon_uri::pct_enc::validate;
///
/// assert!(validate("a%20b").is_ok());
/// assert_eq!(validate("a%2").unwrap_err().index(), 1);
/// ```
pub fn validate(s: &str) -> Result<(), ValidationError> {
    let bytes = s.as_bytes();
    let mut i = 0;

    while let Some(offset) = bytes[i..].iter().position(|&x| x == b'%') {
        i += offset;
        match bytes.get(i + 1..i + 3) {
            Some(&[hi, lo]) if is_hexdig_pair(hi, lo) => i += 3,
            _ => return Err(ValidationError { index: i }),
        }
    }
    Ok(())
}

/// Decodes a percent-encoded string to bytes.
///
/// This function allocates only when the string contains any percent-encoded octet.
///
/// # Errors
///
/// Returns `Err` if a `"%"` is not followed by two hexadecimal digits.
pub fn decode_to_bytes(s: &str) -> Result<Cow<'_, [u8]>, DecodeError> {
    validate(s)?;
    Ok(Decode::new(s).to_bytes())
}

/// Decodes a percent-encoded string.
///
/// `"+"` is left as is. Use [`decode_form`] to decode it as space.
///
/// # Errors
///
/// Returns `Err` if a `"%"` is not followed by two hexadecimal digits,
/// or if the decoded bytes are not valid UTF-8.
///
/// # Examples
///
/// ```
/// use canon_uri::{pct_enc::decode, DecodeError};
///
/// assert_eq!(decode("%E6%B5%8B%E8%AF%95+1").unwrap(), "测试+1");
/// assert_eq!(decode("hello%ZZ"), Err(DecodeError::InvalidPercentEncoding(5)));
/// assert!(matches!(decode("%FF"), Err(DecodeError::InvalidUtf8(_))));
/// ```
pub fn decode(s: &str) -> Result<String, DecodeError> {
    let bytes = decode_to_bytes(s)?.into_owned();
    String::from_utf8(bytes).map_err(|e| DecodeError::InvalidUtf8(e.utf8_error()))
}

/// Decodes an `application/x-www-form-urlencoded` string.
///
/// Same as [`decode`], except that `"+"` is decoded as space.
///
/// # Errors
///
/// Returns `Err` on the same conditions as [`decode`].
///
/// # Examples
///
/// ```
/// use canon_uri::pct_enc::decode_form;
///
/// assert_eq!(decode_form("Ferris+the%20crab%2B").unwrap(), "Ferris the crab+");
/// ```
pub fn decode_form(s: &str) -> Result<String, DecodeError> {
    validate(s)?;

    let mut buf = Vec::with_capacity(s.len());
    for chunk in Decode::new(s) {
        match chunk {
            DecodedChunk::Unencoded(s) => {
                buf.extend(s.bytes().map(|x| if x == b'+' { b' ' } else { x }));
            }
            DecodedChunk::PctDecoded(x) => buf.push(x),
        }
    }
    String::from_utf8(buf).map_err(|e| DecodeError::InvalidUtf8(e.utf8_error()))
}

/// A decoder over a percent-encoded string, created by [`EStr::decode`].
///
/// Iterating yields [`DecodedChunk`]s, for callers that want to control
/// allocation themselves. The methods below cover the common cases.
#[derive(Clone, Debug)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Decode<'a> {
    source: &'a str,
}

/// An item yielded by [`Decode`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodedChunk<'a> {
    /// A run of bytes with no `"%"` in it.
    Unencoded(&'a str),
    /// The byte of one `%XX` triple.
    PctDecoded(u8),
}

impl<'a> Decode<'a> {
    // Every "%" in the source must start a valid triple.
    pub(crate) fn new(source: &'a str) -> Self {
        Self { source }
    }

    /// Decodes to bytes, borrowing when there is nothing to decode.
    #[must_use]
    pub fn to_bytes(self) -> Cow<'a, [u8]> {
        if !self.source.contains('%') {
            return Cow::Borrowed(self.source.as_bytes());
        }

        let mut buf = Vec::with_capacity(self.source.len());
        for chunk in self {
            match chunk {
                DecodedChunk::Unencoded(s) => buf.extend_from_slice(s.as_bytes()),
                DecodedChunk::PctDecoded(x) => buf.push(x),
            }
        }
        Cow::Owned(buf)
    }

    /// Decodes to a string, borrowing when there is nothing to decode.
    ///
    /// # Errors
    ///
    /// Returns `Err` holding the decoded bytes if they are not valid UTF-8.
    pub fn into_string(self) -> Result<Cow<'a, str>, FromUtf8Error> {
        let source = self.source;
        match self.to_bytes() {
            Cow::Borrowed(_) => Ok(Cow::Borrowed(source)),
            Cow::Owned(buf) => String::from_utf8(buf).map(Cow::Owned),
        }
    }

    /// Decodes to a string, replacing invalid UTF-8 with
    /// [`U+FFFD REPLACEMENT CHARACTER`][U+FFFD].
    ///
    /// [U+FFFD]: char::REPLACEMENT_CHARACTER
    #[must_use]
    pub fn to_string_lossy(self) -> Cow<'a, str> {
        match self.into_string() {
            Ok(s) => s,
            Err(e) => Cow::Owned(String::from_utf8_lossy(e.as_bytes()).into_owned()),
        }
    }
}

impl<'a> Iterator for Decode<'a> {
    type Item = DecodedChunk<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.source.as_bytes();
        match *bytes.first()? {
            b'%' => {
                let x = decode_octet(bytes[1], bytes[2]);
                self.source = &self.source[3..];
                Some(DecodedChunk::PctDecoded(x))
            }
            _ => {
                let i = self.source.find('%').unwrap_or(self.source.len());
                let (s, rest) = self.source.split_at(i);
                self.source = rest;
                Some(DecodedChunk::Unencoded(s))
            }
        }
    }
}

impl FusedIterator for Decode<'_> {}

/// An iterator over subslices of an [`EStr`] slice separated by a delimiter.
///
/// This struct is created by [`EStr::split`].
#[derive(Clone, Debug)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Split<'a, E: Encoder> {
    inner: str::Split<'a, char>,
    encoder: PhantomData<E>,
}

impl<'a, E: Encoder> Iterator for Split<'a, E> {
    type Item = &'a EStr<E>;

    fn next(&mut self) -> Option<&'a EStr<E>> {
        self.inner.next().map(EStr::new_validated)
    }
}

impl<'a, E: Encoder> DoubleEndedIterator for Split<'a, E> {
    fn next_back(&mut self) -> Option<&'a EStr<E>> {
        self.inner.next_back().map(EStr::new_validated)
    }
}

impl<E: Encoder> FusedIterator for Split<'_, E> {}
