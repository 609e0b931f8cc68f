use std::net::{IpAddr, Ipv6Addr};
use idna::uts46::{AsciiDenyList, DnsLength, Hyphens, Uts46};
use log::{debug, trace};
use crate::error::{Error, Result};

/// Converts a domain name to its ASCII-compatible encoding ([RFC 5891](https://tools.ietf.org/html/rfc5891)),
/// using the [UTS #46](https://www.unicode.org/reports/tr46/) mapping.
///
/// Unicode labels are punycode encoded with the `xn--` prefix; ASCII domains are returned lower-cased but otherwise
/// unchanged.  Applying this to its own output returns the same string.
///
/// Host code points forbidden in URLs (space, `%`, `<`, `/` and so on), empty or overlong labels, and labels that
/// start or end with a hyphen are rejected.  The wildcard label `*` and a trailing root dot are accepted.
pub fn to_ace(domain: &str) -> Result<String> {
    let domain = domain.trim();
    let ace = Uts46::new()
        .to_ascii(domain.as_bytes(), AsciiDenyList::URL, Hyphens::CheckFirstLast, DnsLength::VerifyAllowRootDot)
        .map_err(|e| Error::idna_error(domain, e))?
        .into_owned();
    if ace != domain {
        debug!("Encoded domain {:?} as {:?}", domain, ace);
    }
    Ok(ace)
}

/// Parses an IPv4 or IPv6 address literal.  IPv6 literals may be wrapped in brackets (`[::1]`).
///
/// This never performs a name lookup; host names are rejected.
pub(crate) fn parse_ip(text: &str) -> Result<IpAddr> {
    let trimmed = text.trim();
    let parsed = if trimmed.len() >= 2 && trimmed.starts_with('[') && trimmed.ends_with(']') {
        trimmed[1..trimmed.len() - 1].parse::<Ipv6Addr>().map(IpAddr::V6)
    } else {
        trimmed.parse::<IpAddr>()
    };

    parsed.map_err(|e| Error::host_resolution(text, e))
}

/// Returns the canonical textual form of an address.
///
/// IPv4 addresses are written in dotted-decimal.  IPv6 addresses are written as all eight groups in lower-case hex
/// without leading zeros and without `::` compression, e.g. `2001:db8:85a3:0:0:8a2e:370:7334`.  IPv4-mapped IPv6
/// addresses (`::ffff:a.b.c.d`) are written as the IPv4 address.
pub fn host_address(ip: &IpAddr) -> String {
    let canonical = match ip {
        IpAddr::V4(v4) => v4.to_string(),
        IpAddr::V6(v6) => match v6.to_ipv4_mapped() {
            Some(v4) => v4.to_string(),
            None => {
                let groups: Vec<String> = v6.segments().iter().map(|s| format!("{:x}", s)).collect();
                groups.join(":")
            }
        },
    };
    trace!("Canonical address for {} is {}", ip, canonical);
    canonical
}

#[cfg(test)]
mod tests {
    use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
    use super::{host_address, parse_ip, to_ace};

    #[test]
    fn ace_passes_ascii_through() {
        assert_eq!(to_ace("example.com").unwrap(), "example.com");
        assert_eq!(to_ace("www.example.org").unwrap(), "www.example.org");
    }

    #[test]
    fn ace_encodes_unicode_labels() {
        assert_eq!(to_ace("ëxämþlë.com").unwrap(), "xn--xml-qla7ae5k.com");
        assert_eq!(to_ace("münchen.de").unwrap(), "xn--mnchen-3ya.de");
        assert_eq!(to_ace("ExAmPlE.CoM").unwrap(), "example.com");
    }

    #[test]
    fn ace_is_idempotent() {
        for domain in &["example.com", "ëxämþlë.com", "münchen.de", "a.b.ëxämþlë.net"] {
            let once = to_ace(domain).unwrap();
            let twice = to_ace(&once).unwrap();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn ace_rejects_forbidden_characters() {
        for domain in &["exa mple.com", "exa<mple.com", "a%b.com", "a/b.com", "user@example.com"] {
            let err = to_ace(domain).unwrap_err();
            assert_eq!(err.category(), "protocol-encoding", "{:?} was accepted", domain);
        }
    }

    #[test]
    fn ace_rejects_malformed_labels() {
        let long_label = format!("{}.com", "a".repeat(64));
        for domain in &["a..b", ".example.com", "-abc.com", "abc-.com", long_label.as_str()] {
            let err = to_ace(domain).unwrap_err();
            assert_eq!(err.category(), "protocol-encoding", "{:?} was accepted", domain);
        }
    }

    #[test]
    fn ace_accepts_wildcards_and_inner_hyphens() {
        assert_eq!(to_ace("*.example.com").unwrap(), "*.example.com");
        assert_eq!(to_ace("example.com.").unwrap(), "example.com.");
        assert_eq!(to_ace("r3---sn-abc.example.com").unwrap(), "r3---sn-abc.example.com");
        assert_eq!(to_ace("*.ëxämþlë.com").unwrap(), "*.xn--xml-qla7ae5k.com");
    }

    #[test]
    fn ipv6_is_not_compressed() {
        let ip = parse_ip("2001:db8:85a3::8a2e:370:7334").unwrap();
        assert_eq!(host_address(&ip), "2001:db8:85a3:0:0:8a2e:370:7334");

        let loopback = IpAddr::V6(Ipv6Addr::LOCALHOST);
        assert_eq!(host_address(&loopback), "0:0:0:0:0:0:0:1");

        let upper = parse_ip("2001:DB8::00FF").unwrap();
        assert_eq!(host_address(&upper), "2001:db8:0:0:0:0:0:ff");
    }

    #[test]
    fn ipv4_mapped_is_written_as_ipv4() {
        let ip = parse_ip("::ffff:10.0.0.1").unwrap();
        assert_eq!(host_address(&ip), "10.0.0.1");
    }

    #[test]
    fn ipv4_is_dotted_decimal() {
        let ip = IpAddr::V4(Ipv4Addr::new(192, 168, 1, 2));
        assert_eq!(host_address(&ip), "192.168.1.2");
        assert_eq!(parse_ip("192.168.1.2").unwrap(), ip);
    }

    #[test]
    fn bracketed_ipv6_literal() {
        let ip = parse_ip("[::1]").unwrap();
        assert_eq!(ip, IpAddr::V6(Ipv6Addr::LOCALHOST));
        assert!(parse_ip("[127.0.0.1]").is_err());
    }

    #[test]
    fn host_names_are_not_resolved() {
        for text in &["localhost", "example.com", "256.1.1.1", "fe80::1%eth0", ""] {
            let err = parse_ip(text).unwrap_err();
            assert_eq!(err.category(), "host-resolution");
        }
    }
}
