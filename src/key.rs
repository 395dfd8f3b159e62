//! The sort key derived from one line of input
//!
//! Extraction never fails. A line that can't be understood as a URL
//! gets a key with every field empty, and the port set to [`Port::None`].
//!
//! ```
//! use urlsort::key::KeyMaker;
//! use urlsort::port::{Port, StaticServices};
//! let maker = KeyMaker::with_services(StaticServices::empty());
//! let k = maker.extract("HTTP://www.Example.com/Index.html?b=2&a=1#Top");
//! assert_eq!(k.domain, "com.example.www");
//! assert_eq!(k.port, Port::Num(80));
//! assert_eq!(k.scheme, "http");
//! assert_eq!(k.path, "/Index.html");
//! assert_eq!(k.query, "b=2&a=1");
//! assert_eq!(k.fragment, "Top");
//! ```

use crate::domain::domain_key;
use crate::port::{Port, PortResolver, ServiceLookup, SystemServices};
use crate::url::UrlParts;

/// The six fields used for sorting, most significant first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SortKey {
    /// reversed domain name, or IP literal, lowercased
    pub domain: String,
    /// explicit or implied port
    pub port: Port,
    /// lowercased scheme
    pub scheme: String,
    /// path, verbatim
    pub path: String,
    /// query string, verbatim
    pub query: String,
    /// fragment, verbatim
    pub fragment: String,
}

impl SortKey {
    /// the key used for empty lines and things that aren't URLs
    pub fn empty() -> Self {
        Self::default()
    }
    /// true if this is the empty key
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Makes sort keys from lines of text
#[derive(Debug, Default, Clone)]
pub struct KeyMaker<S = SystemServices> {
    ports: PortResolver<S>,
}

impl KeyMaker {
    /// new KeyMaker, using the system services database for port names
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: ServiceLookup> KeyMaker<S> {
    /// new KeyMaker, using the given services for port names
    pub fn with_services(services: S) -> Self {
        Self {
            ports: PortResolver::with_services(services),
        }
    }
    /// Sort key for a line of text
    pub fn extract(&self, line: &str) -> SortKey {
        if line.trim().is_empty() {
            return SortKey::empty();
        }
        let parts = match UrlParts::parse(line) {
            Ok(p) => p,
            Err(e) => {
                tracing::debug!(line, reason = %e, "not a URL, using empty sort key");
                return SortKey::empty();
            }
        };
        let scheme = parts.scheme.to_ascii_lowercase();
        SortKey {
            domain: domain_key(&parts.hostname()),
            port: self.ports.resolve(parts.port, &scheme),
            path: parts.path.to_string(),
            query: parts.query.to_string(),
            fragment: parts.fragment.to_string(),
            scheme,
        }
    }
    /// Sort key for a raw input line.
    /// A single trailing carriage return is ignored, and invalid utf8 is replaced.
    pub fn extract_bytes(&self, line: &[u8]) -> SortKey {
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        self.extract(&String::from_utf8_lossy(line))
    }
}

/// Sort key for a line, using the system services database
pub fn extract(line: &str) -> SortKey {
    KeyMaker::new().extract(line)
}
