use crate::{
    component::{Authority, HostMeta},
    error::{HostError, ParseError, SchemeError},
    pct_enc::{
        is_hexdig_pair,
        table::{self, Table},
        HEX_VALUE,
    },
    Uri,
};
use alloc::borrow::ToOwned;
use core::net::{Ipv4Addr, Ipv6Addr};

type Result<T> = core::result::Result<T, ParseError>;

/// Parses a URI reference.
///
/// The input is scanned once from left to right. Each component is split off
/// at its delimiter and validated against its ABNF rule; percent-encoded
/// octets are checked for well-formedness but left encoded.
pub(crate) fn parse(s: &str) -> Result<Uri> {
    let res = Reader::new(s).parse_uri_ref();
    if let Err(e) = &res {
        tracing::trace!(input = s, error = %e, "failed to parse URI reference");
    }
    res
}

/// URI reader.
///
/// # Invariants
///
/// `pos <= len`, `pos` is non-decreasing and on the boundary of a UTF-8 code point.
///
/// A reader may be bounded to a prefix of the input, in which case
/// indexes stay relative to the start of the whole input.
struct Reader<'a> {
    s: &'a str,
    pos: usize,
}

enum Seg {
    // *1":" 1*4HEXDIG
    Normal(u16, bool),
    // "::"
    Ellipsis,
    // *1":" 1*4HEXDIG "."
    MaybeV4(bool),
    // ":"
    SingleColon,
}

impl<'a> Reader<'a> {
    fn new(s: &'a str) -> Self {
        Reader { s, pos: 0 }
    }

    /// Returns a reader over the input up to `end`, starting at the current position.
    fn bounded(&self, end: usize) -> Reader<'a> {
        debug_assert!(self.pos <= end && end <= self.len());
        Reader {
            s: &self.s[..end],
            pos: self.pos,
        }
    }

    fn bytes(&self) -> &'a [u8] {
        self.s.as_bytes()
    }

    fn len(&self) -> usize {
        self.s.len()
    }

    fn has_remaining(&self) -> bool {
        self.pos < self.len()
    }

    fn peek(&self, i: usize) -> Option<u8> {
        self.bytes().get(self.pos + i).copied()
    }

    // Any call to this method must keep the invariants.
    fn skip(&mut self, n: usize) {
        // INVARIANT: `pos` is non-decreasing.
        self.pos += n;
        debug_assert!(self.pos <= self.len());
    }

    /// Returns the index of the first of `delims` at or after the current position,
    /// or the length of the input.
    fn find_any(&self, delims: &[u8]) -> usize {
        self.bytes()[self.pos..]
            .iter()
            .position(|x| delims.contains(x))
            .map_or(self.len(), |i| self.pos + i)
    }

    /// The error for an unexpected character at the current position.
    fn unexpected_char(&self) -> ParseError {
        let ch = self.s[self.pos..].chars().next().unwrap_or_default();
        ParseError::InvalidCharacter(self.pos, ch)
    }

    // Returns `true` iff any byte is read.
    fn read(&mut self, table: Table) -> Result<bool> {
        let start = self.pos;
        let bytes = self.bytes();
        let allow_pct_encoded = table.allows_pct_encoded();
        let mut i = self.pos;

        while i < bytes.len() {
            let x = bytes[i];
            if allow_pct_encoded && x == b'%' {
                match bytes.get(i + 1..i + 3) {
                    Some(&[hi, lo]) if is_hexdig_pair(hi, lo) => i += 3,
                    _ => return Err(ParseError::InvalidPercentEncoding(i)),
                }
            } else if table.allows_ascii(x) {
                i += 1;
            } else {
                break;
            }
        }

        // INVARIANT: `i` is non-decreasing and only ASCII bytes are skipped.
        self.pos = i;
        Ok(self.pos > start)
    }

    /// Reads bytes allowed by a table with no percent-encoded octets.
    fn read_plain(&mut self, table: Table) -> bool {
        let start = self.pos;
        while matches!(self.peek(0), Some(x) if table.allows_ascii(x)) {
            // INVARIANT: Skipping an allowed ASCII byte is fine.
            self.skip(1);
        }
        self.pos > start
    }

    /// Reads the rest of the input with a table, failing on any disallowed character.
    fn read_to_end(&mut self, table: Table) -> Result<()> {
        self.read(table)?;
        if self.has_remaining() {
            return Err(self.unexpected_char());
        }
        Ok(())
    }

    fn read_str(&mut self, s: &str) -> bool {
        if self.bytes()[self.pos..].starts_with(s.as_bytes()) {
            // INVARIANT: The remaining bytes start with `s` so it's fine to skip `s.len()`.
            self.skip(s.len());
            true
        } else {
            false
        }
    }

    fn read_v6(&mut self) -> Option<[u16; 8]> {
        let mut segs = [0; 8];
        let mut ellipsis_i = 8;

        let mut i = 0;
        while i < 8 {
            match self.read_v6_segment() {
                Some(Seg::Normal(seg, colon)) => {
                    if colon == (i == 0 || i == ellipsis_i) {
                        // Leading colon, triple colons, or no colon.
                        return None;
                    }
                    segs[i] = seg;
                    i += 1;
                }
                Some(Seg::Ellipsis) => {
                    if ellipsis_i != 8 {
                        // Multiple ellipses.
                        return None;
                    }
                    ellipsis_i = i;
                }
                Some(Seg::MaybeV4(colon)) => {
                    if i > 6 || colon == (i == ellipsis_i) {
                        // Not enough space, triple colons, or no colon.
                        return None;
                    }
                    let octets = self.read_v4()?.to_be_bytes();
                    segs[i] = u16::from_be_bytes([octets[0], octets[1]]);
                    segs[i + 1] = u16::from_be_bytes([octets[2], octets[3]]);
                    i += 2;
                    break;
                }
                Some(Seg::SingleColon) => return None,
                None => break,
            }
        }

        if ellipsis_i == 8 {
            // No ellipsis.
            if i != 8 {
                // Too short.
                return None;
            }
        } else if i == 8 {
            // Eliding nothing.
            return None;
        } else {
            // Shift the segments after the ellipsis to the right.
            for j in (ellipsis_i..i).rev() {
                segs[8 - (i - j)] = segs[j];
                segs[j] = 0;
            }
        }

        Some(segs)
    }

    fn read_v6_segment(&mut self) -> Option<Seg> {
        let colon = self.read_str(":");
        let Some(first) = self.peek(0) else {
            return colon.then_some(Seg::SingleColon);
        };

        let mut x = match HEX_VALUE[first as usize] {
            v if v < 128 => v as u16,
            _ => {
                return colon.then(|| {
                    if first == b':' {
                        // INVARIANT: Skipping ":" is fine.
                        self.skip(1);
                        Seg::Ellipsis
                    } else {
                        Seg::SingleColon
                    }
                });
            }
        };
        let mut i = 1;

        while i < 4 {
            let Some(b) = self.peek(i) else {
                // INVARIANT: Skipping `i` hexadecimal digits is fine.
                self.skip(i);
                return Some(Seg::Normal(x, colon));
            };
            match HEX_VALUE[b as usize] {
                v if v < 128 => {
                    x = (x << 4) | v as u16;
                    i += 1;
                    continue;
                }
                _ if b == b'.' => return Some(Seg::MaybeV4(colon)),
                _ => break,
            }
        }
        // INVARIANT: Skipping `i` hexadecimal digits is fine.
        self.skip(i);
        Some(Seg::Normal(x, colon))
    }

    fn read_v4(&mut self) -> Option<u32> {
        let mut addr = self.read_v4_octet()? << 24;
        for i in (0..3).rev() {
            if !self.read_str(".") {
                return None;
            }
            addr |= self.read_v4_octet()? << (i * 8);
        }
        Some(addr)
    }

    fn read_v4_octet(&mut self) -> Option<u32> {
        let mut res = self.peek_digit(0)?;
        if res == 0 {
            // INVARIANT: Skipping "0" is fine.
            self.skip(1);
            return Some(0);
        }

        for i in 1..3 {
            let Some(x) = self.peek_digit(i) else {
                // INVARIANT: Skipping `i` digits is fine.
                self.skip(i);
                return Some(res);
            };
            res = res * 10 + x;
        }
        // INVARIANT: Skipping 3 digits is fine.
        self.skip(3);

        u8::try_from(res).is_ok().then_some(res)
    }

    fn peek_digit(&self, i: usize) -> Option<u32> {
        self.peek(i).and_then(|x| (x as char).to_digit(10))
    }

    fn read_ipv_future(&mut self) -> bool {
        if let Some(b'v' | b'V') = self.peek(0) {
            // INVARIANT: Skipping "v" or "V" is fine.
            self.skip(1);
            return self.read_plain(table::HEXDIG)
                && self.read_str(".")
                && self.read_plain(table::IPV_FUTURE)
                && !self.has_remaining();
        }
        false
    }

    /// Reads an IP literal starting at `"["`, bounded to the authority.
    fn read_ip_literal(&mut self) -> Result<HostMeta> {
        let bracket_i = self.pos;
        // INVARIANT: Skipping "[" is fine.
        self.skip(1);

        let close_i = self.find_any(b"]");
        if close_i == self.len() {
            return Err(ParseError::InvalidHost(HostError::UnclosedBracket {
                index: bracket_i,
            }));
        }

        let mut inner = self.bounded(close_i);
        let start = inner.pos;

        let meta = if let Some(b'v' | b'V') = inner.peek(0) {
            if !inner.read_ipv_future() {
                return Err(ParseError::InvalidHost(HostError::InvalidIpvFuture {
                    index: start,
                }));
            }
            HostMeta::IpvFuture
        } else {
            match inner.read_v6() {
                Some(segs) if !inner.has_remaining() => HostMeta::Ipv6(Ipv6Addr::from(segs)),
                _ => {
                    return Err(ParseError::InvalidHost(HostError::InvalidIpv6 {
                        index: start,
                    }))
                }
            }
        };

        // INVARIANT: Skipping to just past "]" is fine.
        self.skip(close_i + 1 - self.pos);

        if self.has_remaining() && self.peek(0) != Some(b':') {
            let ch = self.s[self.pos..].chars().next().unwrap_or_default();
            return Err(ParseError::InvalidHost(HostError::UnexpectedChar {
                index: self.pos,
                ch,
            }));
        }
        Ok(meta)
    }

    fn read_v4_or_reg_name(&mut self) -> Result<HostMeta> {
        Ok(match (self.read_v4(), self.read(table::REG_NAME)?) {
            (Some(addr), false) => HostMeta::Ipv4(Ipv4Addr::from(addr)),
            _ => HostMeta::RegName,
        })
    }

    /// Reads an optional port, bounded to the authority.
    ///
    /// A colon followed by nothing yields `None`.
    fn read_port(&mut self) -> Result<Option<u16>> {
        if !self.has_remaining() {
            return Ok(None);
        }
        if !self.read_str(":") {
            return Err(self.unexpected_char());
        }

        let raw = &self.s[self.pos..];
        // INVARIANT: Skipping the rest of the authority is fine.
        self.skip(raw.len());

        if raw.is_empty() {
            return Ok(None);
        }
        if !table::PORT.validate(raw.as_bytes()) {
            return Err(ParseError::InvalidPort(raw.to_owned()));
        }
        raw.parse()
            .map(Some)
            .map_err(|_| ParseError::InvalidPort(raw.to_owned()))
    }

    fn parse_uri_ref(mut self) -> Result<Uri> {
        if self.s.is_empty() {
            return Err(ParseError::Empty);
        }

        let scheme = self.read_scheme()?;

        let authority = if self.read_str("//") {
            Some(self.read_authority()?)
        } else {
            None
        };

        let path_start = self.pos;
        self.read(table::PATH)?;
        let path = &self.s[path_start..self.pos];

        let query = if self.read_str("?") {
            let start = self.pos;
            self.read(table::QUERY)?;
            Some(&self.s[start..self.pos])
        } else {
            None
        };

        let fragment = if self.read_str("#") {
            let start = self.pos;
            self.read(table::FRAGMENT)?;
            Some(&self.s[start..self.pos])
        } else {
            None
        };

        if self.has_remaining() {
            return Err(self.unexpected_char());
        }

        Ok(Uri {
            scheme: scheme.map(ToOwned::to_owned),
            authority,
            path: path.to_owned(),
            query: query.map(ToOwned::to_owned),
            fragment: fragment.map(ToOwned::to_owned),
        })
    }

    /// Reads a scheme if a `":"` comes before any of `"/"`, `"?"` and `"#"`.
    fn read_scheme(&mut self) -> Result<Option<&'a str>> {
        let delim_i = self.find_any(b":/?#");
        if self.peek(delim_i) != Some(b':') {
            // A relative reference.
            return Ok(None);
        }

        let scheme = &self.s[..delim_i];
        match scheme.bytes().next() {
            None => return Err(ParseError::InvalidScheme(SchemeError::Empty)),
            Some(x) if !x.is_ascii_alphabetic() => {
                return Err(ParseError::InvalidScheme(SchemeError::InvalidStart))
            }
            Some(_) => {}
        }
        if let Some((index, ch)) = scheme
            .char_indices()
            .find(|&(_, ch)| !table::SCHEME.allows(ch))
        {
            return Err(ParseError::InvalidScheme(SchemeError::UnexpectedChar {
                index,
                ch,
            }));
        }

        // INVARIANT: Skipping the scheme and ":" is fine.
        self.skip(delim_i + 1);
        Ok(Some(scheme))
    }

    fn read_authority(&mut self) -> Result<Authority> {
        let auth_end = self.find_any(b"/?#");
        let auth_start = self.pos;

        let userinfo = match self.s[auth_start..auth_end].rfind('@') {
            Some(i) => {
                let at_i = auth_start + i;
                self.bounded(at_i).read_to_end(table::USERINFO)?;
                // INVARIANT: Skipping the userinfo and "@" is fine.
                self.skip(i + 1);
                Some(&self.s[auth_start..at_i])
            }
            None => None,
        };

        let mut r = self.bounded(auth_end);
        let host_start = r.pos;
        let host_meta = if r.peek(0) == Some(b'[') {
            r.read_ip_literal()?
        } else {
            r.read_v4_or_reg_name()?
        };
        let host = &self.s[host_start..r.pos];
        let port = r.read_port()?;

        debug_assert_eq!(r.pos, auth_end);
        // INVARIANT: Skipping the authority is fine.
        self.skip(auth_end - self.pos);

        Ok(Authority {
            userinfo: userinfo.map(ToOwned::to_owned),
            host: host.to_owned(),
            host_meta,
            port,
        })
    }
}

/// Classifies a valid registered name as either an IPv4 address or a registered name.
pub(crate) fn classify_reg_name(s: &str) -> HostMeta {
    let mut reader = Reader::new(s);
    match reader.read_v4() {
        Some(addr) if !reader.has_remaining() => HostMeta::Ipv4(Ipv4Addr::from(addr)),
        _ => HostMeta::RegName,
    }
}
