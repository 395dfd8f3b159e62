//! Turn a port token and a scheme into a sortable port number
//!
//! A port token is the text after the colon in the authority part of a URL.
//! It may be a number, like `8080`, or a service name, like `http`.
//! When there is no token, or the token can't be resolved, the port
//! is implied by the scheme.
//!
//! ```
//! use urlsort::port::{Port, PortResolver, StaticServices, Transport};
//! let services = StaticServices::new(&[("gopher", Transport::Tcp, 70)]);
//! let ports = PortResolver::with_services(services);
//! assert_eq!(ports.resolve(Some("8080"), "http"), Port::Num(8080));
//! assert_eq!(ports.resolve(Some("gopher"), "http"), Port::Num(70));
//! assert_eq!(ports.resolve(Some("nonsense"), "https"), Port::Num(443));
//! assert_eq!(ports.resolve(None, "file"), Port::None);
//! ```

use fnv::FnvHashMap;
use lazy_static::lazy_static;
use std::ffi::CString;
use std::fmt;
use std::sync::Mutex;

/// A port number, or no port at all.
/// `None` sorts before every real port, including zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Port {
    /// no port could be determined
    #[default]
    None,
    /// an actual port number
    Num(u64),
}

impl Port {
    /// the port number, if any
    pub const fn num(&self) -> Option<u64> {
        match self {
            Port::None => None,
            Port::Num(n) => Some(*n),
        }
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Port::None => write!(f, "none"),
            Port::Num(n) => write!(f, "{}", n),
        }
    }
}

/// transport protocol for a service lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transport {
    /// stream oriented
    Tcp,
    /// datagram oriented
    Udp,
}

impl Transport {
    /// name as known to the services database
    pub const fn as_str(&self) -> &'static str {
        match self {
            Transport::Tcp => "tcp",
            Transport::Udp => "udp",
        }
    }
}

/// method of looking up a service name, like `/etc/services`
pub trait ServiceLookup {
    /// port number for the named service, if known
    fn lookup(&self, name: &str, proto: Transport) -> Option<u16>;
}

/// The system services database, via `getservbyname`.
/// Results are remembered for the life of the process.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemServices;

lazy_static! {
    // also serializes getservbyname, which returns a pointer to static storage
    static ref SERVICE_CACHE: Mutex<FnvHashMap<(String, Transport), Option<u16>>> =
        Mutex::new(FnvHashMap::default());
}

#[allow(unsafe_code)]
fn getservbyname(name: &str, proto: Transport) -> Option<u16> {
    let cname = CString::new(name).ok()?;
    let cproto = CString::new(proto.as_str()).ok()?;
    // SAFETY: both arguments are valid NUL terminated strings, and the returned
    // entry is only read while SERVICE_CACHE is locked by our caller.
    unsafe {
        let ent = libc::getservbyname(cname.as_ptr(), cproto.as_ptr());
        if ent.is_null() {
            None
        } else {
            Some(u16::from_be((*ent).s_port as u16))
        }
    }
}

impl ServiceLookup for SystemServices {
    fn lookup(&self, name: &str, proto: Transport) -> Option<u16> {
        if name.is_empty() {
            return None;
        }
        let name = name.to_ascii_lowercase();
        let mut cache = match SERVICE_CACHE.lock() {
            Ok(c) => c,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(port) = cache.get(&(name.clone(), proto)) {
            return *port;
        }
        let port = getservbyname(&name, proto);
        tracing::trace!(service = %name, proto = proto.as_str(), ?port, "service lookup");
        cache.insert((name, proto), port);
        port
    }
}

/// A fixed services table, for when the system database should not be consulted
#[derive(Debug, Default, Clone)]
pub struct StaticServices {
    table: FnvHashMap<(String, Transport), u16>,
}

impl StaticServices {
    /// new from (name, transport, port) triples
    pub fn new(entries: &[(&str, Transport, u16)]) -> Self {
        let mut table = FnvHashMap::default();
        for (name, proto, port) in entries {
            table.insert((name.to_ascii_lowercase(), *proto), *port);
        }
        Self { table }
    }
    /// A table that knows no services at all
    pub fn empty() -> Self {
        Self::default()
    }
}

impl ServiceLookup for StaticServices {
    fn lookup(&self, name: &str, proto: Transport) -> Option<u16> {
        self.table.get(&(name.to_ascii_lowercase(), proto)).copied()
    }
}

/// ports implied by well known schemes, consulted before any service lookup
const SCHEME_PORTS: [(&str, Port); 7] = [
    ("http", Port::Num(80)),
    ("https", Port::Num(443)),
    ("ftp", Port::Num(21)),
    ("ssh", Port::Num(22)),
    ("ws", Port::Num(80)),
    ("wss", Port::Num(443)),
    ("file", Port::None),
];

/// parse a port token made entirely of ascii digits
pub fn port_number(token: &str) -> Option<u64> {
    if token.is_empty() || !token.bytes().all(|ch| ch.is_ascii_digit()) {
        return None;
    }
    token.parse::<u64>().ok()
}

/// Resolves port tokens and scheme defaults against a services database
#[derive(Debug, Default, Clone)]
pub struct PortResolver<S = SystemServices> {
    services: S,
}

impl PortResolver {
    /// new resolver using the system services database
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: ServiceLookup> PortResolver<S> {
    /// new resolver using the given services
    pub fn with_services(services: S) -> Self {
        Self { services }
    }
    /// Port for an explicit token, falling back to the scheme's default
    /// if the token is missing or can't be resolved.
    pub fn resolve(&self, token: Option<&str>, scheme: &str) -> Port {
        match token {
            Some(t) => self.resolve_token(t).unwrap_or_else(|| self.default_port(scheme)),
            None => self.default_port(scheme),
        }
    }
    /// Port for a token that is a number or a tcp or udp service name
    pub fn resolve_token(&self, token: &str) -> Option<Port> {
        if let Some(n) = port_number(token) {
            return Some(Port::Num(n));
        }
        self.services
            .lookup(token, Transport::Tcp)
            .or_else(|| self.services.lookup(token, Transport::Udp))
            .map(|n| Port::Num(u64::from(n)))
    }
    /// Port implied by the scheme
    pub fn default_port(&self, scheme: &str) -> Port {
        if scheme.is_empty() {
            return Port::None;
        }
        for (name, port) in &SCHEME_PORTS {
            if scheme.eq_ignore_ascii_case(name) {
                return *port;
            }
        }
        match self.services.lookup(scheme, Transport::Tcp) {
            Some(n) => Port::Num(u64::from(n)),
            None => Port::None,
        }
    }
}
