//! Error types.

use alloc::string::String;
use core::str::Utf8Error;

/// Cause of a [`ParseError::InvalidScheme`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchemeError {
    /// The scheme before `":"` is empty.
    Empty,
    /// The scheme does not start with a letter.
    InvalidStart,
    /// A character outside `ALPHA / DIGIT / "+" / "-" / "."` appears in the scheme.
    UnexpectedChar {
        /// Byte index of the character in the input.
        index: usize,
        /// The offending character.
        ch: char,
    },
    /// No scheme is present where one is required.
    Missing,
}

/// Cause of a [`ParseError::InvalidHost`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostError {
    /// An IP literal has no closing `"]"`.
    ///
    /// The index points to the opening `"["`.
    UnclosedBracket {
        /// Byte index of the opening bracket.
        index: usize,
    },
    /// The content of an IP literal is not a valid IPv6 address.
    ///
    /// The index points to the first byte of the address.
    InvalidIpv6 {
        /// Byte index of the address.
        index: usize,
    },
    /// The content of an IP literal starting with `"v"` is not a valid IPvFuture.
    ///
    /// The index points to the `"v"`.
    InvalidIpvFuture {
        /// Byte index of the address.
        index: usize,
    },
    /// Something other than a port follows an IP literal.
    UnexpectedChar {
        /// Byte index of the character in the input.
        index: usize,
        /// The offending character.
        ch: char,
    },
}

/// An error occurred when parsing a URI reference.
///
/// Indexes are byte offsets into the input string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// Malformed scheme.
    InvalidScheme(SchemeError),
    /// The port is not a sequence of digits fitting in a `u16`.
    ///
    /// Holds the raw text after the colon.
    InvalidPort(String),
    /// Malformed IP literal host.
    InvalidHost(HostError),
    /// A `"%"` not followed by two hexadecimal digits.
    ///
    /// Holds the index of the `"%"`.
    InvalidPercentEncoding(usize),
    /// A character not allowed in the component it appears in.
    InvalidCharacter(usize, char),
    /// The input is empty.
    Empty,
}

impl ParseError {
    /// Returns the index in the input where the error occurred, if known.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        match *self {
            Self::InvalidScheme(SchemeError::UnexpectedChar { index, .. }) => Some(index),
            Self::InvalidScheme(SchemeError::Empty | SchemeError::InvalidStart) => Some(0),
            Self::InvalidHost(
                HostError::UnclosedBracket { index }
                | HostError::InvalidIpv6 { index }
                | HostError::InvalidIpvFuture { index }
                | HostError::UnexpectedChar { index, .. },
            ) => Some(index),
            Self::InvalidPercentEncoding(index) | Self::InvalidCharacter(index, _) => Some(index),
            Self::InvalidScheme(SchemeError::Missing) | Self::InvalidPort(_) | Self::Empty => {
                None
            }
        }
    }
}

/// An error occurred when decoding a percent-encoded string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodeError {
    /// A `"%"` not followed by two hexadecimal digits.
    ///
    /// Holds the index of the `"%"` in the input.
    InvalidPercentEncoding(usize),
    /// The decoded bytes are not valid UTF-8.
    InvalidUtf8(Utf8Error),
}

/// An error occurred when validating a percent-encoded string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValidationError {
    pub(crate) index: usize,
}

impl ValidationError {
    /// Returns the index of the offending `"%"` in the input.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }
}

impl From<ValidationError> for DecodeError {
    fn from(e: ValidationError) -> Self {
        Self::InvalidPercentEncoding(e.index)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseError {}

#[cfg(feature = "std")]
impl std::error::Error for ValidationError {}

#[cfg(feature = "std")]
impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidUtf8(e) => Some(e),
            Self::InvalidPercentEncoding(_) => None,
        }
    }
}
