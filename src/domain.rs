//! Make a comparable key from a host name

use std::net::{IpAddr, Ipv6Addr};

/// Is this an IPv4 or IPv6 literal? Brackets and an IPv6 zone are allowed.
pub fn is_ip_literal(host: &str) -> bool {
    let inner = host
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host);
    if inner.parse::<IpAddr>().is_ok() {
        return true;
    }
    match inner.split_once('%') {
        Some((addr, zone)) => !zone.is_empty() && addr.parse::<Ipv6Addr>().is_ok(),
        None => false,
    }
}

/// Domain part of the sort key.
/// Names are lowercased with their labels reversed, so `www.Yahoo.com` becomes `com.yahoo.www`.
/// IP literals are lowercased but otherwise left alone.
pub fn domain_key(host: &str) -> String {
    if host.is_empty() {
        return String::new();
    }
    let lower = host.to_lowercase();
    if is_ip_literal(host) {
        return lower;
    }
    let mut labels: Vec<&str> = lower.split('.').collect();
    labels.reverse();
    labels.join(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reversed() {
        assert_eq!(domain_key("www.yahoo.com"), "com.yahoo.www");
        assert_eq!(domain_key("yahoo.com"), "com.yahoo");
        assert_eq!(domain_key("WWW.Example.COM"), "com.example.www");
        assert_eq!(domain_key("localhost"), "localhost");
        assert_eq!(domain_key("a.b.com"), "com.b.a");
        assert_eq!(domain_key("example.com."), ".com.example");
        assert_eq!(domain_key(""), "");
        assert!(domain_key("yahoo.com") < domain_key("www.yahoo.com"));
    }

    #[test]
    fn literals() {
        assert_eq!(domain_key("192.168.1.1"), "192.168.1.1");
        assert_eq!(domain_key("10.0.0.1"), "10.0.0.1");
        assert!(domain_key("10.0.0.1") < domain_key("192.168.1.1"));
        assert_eq!(domain_key("2001:DB8::1"), "2001:db8::1");
        assert_eq!(domain_key("[2001:DB8::1]"), "[2001:db8::1]");
        assert_eq!(domain_key("::1"), "::1");
        assert_eq!(domain_key("fe80::1%eth0"), "fe80::1%eth0");
        assert_eq!(domain_key("[FE80::1%25Eth0]"), "[fe80::1%25eth0]");
    }

    #[test]
    fn not_literals() {
        assert!(!is_ip_literal("1.2.3"));
        assert!(!is_ip_literal("1.2.3.4.5"));
        assert!(!is_ip_literal("[1.2.3.4"));
        assert!(!is_ip_literal("fe80::1%"));
        assert!(!is_ip_literal("example.com"));
        assert_eq!(domain_key("1.2.3.4.5"), "5.4.3.2.1");
        assert!(is_ip_literal("[::ffff:1.2.3.4]"));
    }
}
