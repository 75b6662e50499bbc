use crate::{
    component::{Authority, Scheme},
    error::{DecodeError, HostError, ParseError, SchemeError, ValidationError},
    pct_enc::{EStr, Encoder},
    resolve::Resolver,
    Uri,
};
use core::fmt;

impl fmt::Display for SchemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Empty => f.write_str("empty scheme"),
            Self::InvalidStart => f.write_str("scheme does not start with a letter"),
            Self::UnexpectedChar { index, ch } => {
                write!(f, "unexpected character {ch:?} in scheme at index {index}")
            }
            Self::Missing => f.write_str("scheme required but missing"),
        }
    }
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::UnclosedBracket { index } => write!(f, "unclosed bracket at index {index}"),
            Self::InvalidIpv6 { index } => write!(f, "invalid IPv6 address at index {index}"),
            Self::InvalidIpvFuture { index } => {
                write!(f, "invalid IPvFuture address at index {index}")
            }
            Self::UnexpectedChar { index, ch } => {
                write!(f, "unexpected character {ch:?} after IP literal at index {index}")
            }
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidScheme(e) => write!(f, "invalid scheme: {e}"),
            Self::InvalidPort(port) => write!(f, "invalid port {port:?}"),
            Self::InvalidHost(e) => write!(f, "invalid host: {e}"),
            Self::InvalidPercentEncoding(index) => {
                write!(f, "invalid percent-encoded octet at index {index}")
            }
            Self::InvalidCharacter(index, ch) => {
                write!(f, "unexpected character {ch:?} at index {index}")
            }
            Self::Empty => f.write_str("empty input"),
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPercentEncoding(index) => {
                write!(f, "invalid percent-encoded octet at index {index}")
            }
            Self::InvalidUtf8(e) => write!(f, "decoded bytes are not valid UTF-8: {e}"),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid percent-encoded octet at index {}", self.index)
    }
}

impl<E: Encoder> fmt::Debug for EStr<E> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl<E: Encoder> fmt::Display for EStr<E> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_str(), f)
    }
}

impl fmt::Display for Scheme {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_str(), f)
    }
}

impl fmt::Debug for Scheme {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl fmt::Debug for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Authority")
            .field("userinfo", &self.userinfo())
            .field("host", &self.host())
            .field("host_parsed", &self.host_parsed())
            .field("port", &self.port())
            .finish()
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(userinfo) = &self.userinfo {
            write!(f, "{userinfo}@")?;
        }
        f.write_str(&self.host)?;
        if let Some(port) = self.port {
            write!(f, ":{port}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Uri")
            .field("scheme", &self.scheme())
            .field("authority", &self.authority())
            .field("path", &self.path())
            .field("query", &self.query())
            .field("fragment", &self.fragment())
            .finish()
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(scheme) = &self.scheme {
            write!(f, "{scheme}:")?;
        }
        if let Some(auth) = &self.authority {
            write!(f, "//{auth}")?;
        }
        f.write_str(&self.path)?;
        if let Some(query) = &self.query {
            write!(f, "?{query}")?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{fragment}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("base", &format_args!("{}", self.base()))
            .finish()
    }
}
