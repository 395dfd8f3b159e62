//! Permissive splitting of a URL into its parts
//!
//! Relative and partial URLs are fine : `example.com/path` is all path,
//! `//host/x` has a host but no scheme. Nothing is decoded or normalized,
//! each part is a slice of the input. [`UrlParts::hostname`] gives the host
//! with its escapes decoded.
//!
//! ```
//! use urlsort::url::UrlParts;
//! let u = UrlParts::parse("HTTPS://user@Example.com:8443/a%20b?y=2&x=1#Top").unwrap();
//! assert_eq!(u.scheme, "HTTPS");
//! assert_eq!(u.host, "Example.com");
//! assert_eq!(u.port, Some("8443"));
//! assert_eq!(u.path, "/a%20b");
//! assert_eq!(u.query, "y=2&x=1");
//! assert_eq!(u.fragment, "Top");
//! ```

use memchr::{memchr, memchr_iter};
use std::borrow::Cow;
use std::fmt;

/// Why a URL could not be split
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadUrl {
    /// contains an ascii control character
    Control,
    /// starts with a colon
    MissingScheme,
    /// relative reference with a colon in the first path segment
    ColonInFirstSegment,
    /// `[` with no matching `]` in the host
    UnclosedBracket,
    /// something other than `:port` after a bracketed host
    AfterBracket,
    /// illegal character in the userinfo
    UserInfo,
    /// illegal character in the host
    HostChar(char),
    /// escape of a character that may not be escaped in a host
    HostEscape,
    /// `%` not followed by two hex digits
    Escape,
}

impl fmt::Display for BadUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BadUrl::Control => write!(f, "control character in URL"),
            BadUrl::MissingScheme => write!(f, "missing scheme before ':'"),
            BadUrl::ColonInFirstSegment => write!(f, "first path segment contains ':'"),
            BadUrl::UnclosedBracket => write!(f, "missing ']' in host"),
            BadUrl::AfterBracket => write!(f, "unexpected text after ']' in host"),
            BadUrl::UserInfo => write!(f, "invalid userinfo"),
            BadUrl::HostChar(ch) => write!(f, "invalid character {:?} in host", ch),
            BadUrl::HostEscape => write!(f, "invalid escape in host"),
            BadUrl::Escape => write!(f, "invalid percent escape"),
        }
    }
}

/// The pieces of a URL, as slices of the original text.
/// Missing pieces are empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UrlParts<'a> {
    /// scheme, without the colon, case as given
    pub scheme: &'a str,
    /// host name, without userinfo, port or IPv6 brackets
    pub host: &'a str,
    /// text after the port colon, if not empty
    pub port: Option<&'a str>,
    /// path, or the opaque part of a URL like `mailto:someone`
    pub path: &'a str,
    /// text after the first `?`
    pub query: &'a str,
    /// text after the first `#`
    pub fragment: &'a str,
}

const fn is_scheme_start(ch: u8) -> bool {
    ch.is_ascii_alphabetic()
}

const fn is_scheme_char(ch: u8) -> bool {
    ch.is_ascii_alphanumeric() || ch == b'+' || ch == b'-' || ch == b'.'
}

// unreserved, sub-delims and the few extras tolerated in hosts
fn is_host_char(ch: u8) -> bool {
    !ch.is_ascii() || ch.is_ascii_alphanumeric() || b"-._~!$&'()*+,;=%:<>\"".contains(&ch)
}

fn is_userinfo_char(ch: u8) -> bool {
    ch.is_ascii_alphanumeric() || b"-._:~!$&'()*+,;=%@".contains(&ch)
}

// characters that may appear escaped in the zone of an IPv6 literal
fn is_zone_char(ch: u8) -> bool {
    ch == b' ' || ch.is_ascii_alphanumeric() || b"-._~!$&'()*+,;=:[]<>\"".contains(&ch)
}

const fn unhex(ch: u8) -> u8 {
    match ch {
        b'0'..=b'9' => ch - b'0',
        b'a'..=b'f' => ch - b'a' + 10,
        b'A'..=b'F' => ch - b'A' + 10,
        _ => 0,
    }
}

/// Host escapes may only encode non-ascii bytes, or `%` itself as `%25`.
/// The zone of an IPv6 literal may also escape a few ascii characters.
fn check_host_escapes(s: &str, zone: bool) -> Result<(), BadUrl> {
    check_escapes(s)?;
    let b = s.as_bytes();
    for i in memchr_iter(b'%', b) {
        if &b[i..i + 3] == b"%25" {
            continue;
        }
        let v = unhex(b[i + 1]) << 4 | unhex(b[i + 2]);
        let ok = if zone { is_zone_char(v) } else { !v.is_ascii() };
        if !ok {
            return Err(BadUrl::HostEscape);
        }
    }
    Ok(())
}

/// every `%` must start a two digit hex escape
fn check_escapes(s: &str) -> Result<(), BadUrl> {
    let b = s.as_bytes();
    for i in memchr_iter(b'%', b) {
        if i + 2 >= b.len() || !b[i + 1].is_ascii_hexdigit() || !b[i + 2].is_ascii_hexdigit() {
            return Err(BadUrl::Escape);
        }
    }
    Ok(())
}

/// split off the scheme, if any. Return (scheme, rest)
fn split_scheme(s: &str) -> Result<(&str, &str), BadUrl> {
    for (i, ch) in s.bytes().enumerate() {
        if ch == b':' {
            if i == 0 {
                return Err(BadUrl::MissingScheme);
            }
            return Ok((&s[..i], &s[i + 1..]));
        }
        let ok = if i == 0 {
            is_scheme_start(ch)
        } else {
            is_scheme_char(ch)
        };
        if !ok {
            break;
        }
    }
    Ok(("", s))
}

impl<'a> UrlParts<'a> {
    /// Split a URL into its parts
    pub fn parse(s: &'a str) -> Result<Self, BadUrl> {
        if s.bytes().any(|ch| ch < 0x20 || ch == 0x7f) {
            return Err(BadUrl::Control);
        }
        let mut parts = Self::default();
        let mut rest = s;
        if let Some(pos) = memchr(b'#', rest.as_bytes()) {
            parts.fragment = &rest[pos + 1..];
            rest = &rest[..pos];
            check_escapes(parts.fragment)?;
        }

        let (scheme, r) = split_scheme(rest)?;
        parts.scheme = scheme;
        rest = r;

        if let Some(pos) = memchr(b'?', rest.as_bytes()) {
            parts.query = &rest[pos + 1..];
            rest = &rest[..pos];
        }

        if !rest.starts_with('/') {
            if !scheme.is_empty() {
                parts.path = rest;
                return Ok(parts);
            }
            let first = rest.split('/').next().unwrap_or("");
            if first.contains(':') {
                return Err(BadUrl::ColonInFirstSegment);
            }
        }

        if rest.starts_with("//") && (!scheme.is_empty() || !rest.starts_with("///")) {
            let after = &rest[2..];
            let end = memchr(b'/', after.as_bytes()).unwrap_or(after.len());
            parts.parse_authority(&after[..end])?;
            rest = &after[end..];
        }
        check_escapes(rest)?;
        parts.path = rest;
        Ok(parts)
    }

    /// The host, with percent escapes decoded.
    /// `[fe80::1%25eth0]` becomes `fe80::1%eth0`.
    pub fn hostname(&self) -> Cow<'a, str> {
        if !self.host.contains('%') {
            return Cow::Borrowed(self.host);
        }
        let b = self.host.as_bytes();
        let mut out = Vec::with_capacity(b.len());
        let mut i = 0;
        while i < b.len() {
            if b[i] == b'%' && i + 2 < b.len() && b[i + 1].is_ascii_hexdigit() && b[i + 2].is_ascii_hexdigit() {
                out.push(unhex(b[i + 1]) << 4 | unhex(b[i + 2]));
                i += 3;
            } else {
                out.push(b[i]);
                i += 1;
            }
        }
        Cow::Owned(String::from_utf8_lossy(&out).into_owned())
    }

    fn parse_authority(&mut self, authority: &'a str) -> Result<(), BadUrl> {
        let host = match authority.rfind('@') {
            Some(pos) => {
                let userinfo = &authority[..pos];
                if !userinfo.bytes().all(is_userinfo_char) {
                    return Err(BadUrl::UserInfo);
                }
                check_escapes(userinfo)?;
                &authority[pos + 1..]
            }
            None => authority,
        };
        let bracketed = host.starts_with('[');
        let (name, port) = if let Some(inner) = host.strip_prefix('[') {
            let close = inner.rfind(']').ok_or(BadUrl::UnclosedBracket)?;
            let after = &inner[close + 1..];
            let port = if after.is_empty() {
                ""
            } else {
                after.strip_prefix(':').ok_or(BadUrl::AfterBracket)?
            };
            (&inner[..close], port)
        } else {
            match host.rfind(':') {
                Some(pos) => (&host[..pos], &host[pos + 1..]),
                None => (host, ""),
            }
        };
        if let Some(ch) = name.bytes().find(|ch| !is_host_char(*ch)) {
            return Err(BadUrl::HostChar(char::from(ch)));
        }
        match name.find("%25") {
            Some(zone) if bracketed => {
                check_host_escapes(&name[..zone], false)?;
                check_host_escapes(&name[zone..], true)?;
            }
            _ => check_host_escapes(name, false)?,
        }
        self.host = name;
        self.port = if port.is_empty() { None } else { Some(port) };
        Ok(())
    }
}
