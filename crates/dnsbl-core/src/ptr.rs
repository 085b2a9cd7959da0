//! Reverse-name formatting for DNSBL queries.
//!
//! Standard DNSBL pattern: reverse the address and query it under the zone.
//! Example: checking 1.2.3.4 against `zen.spamhaus.org` queries
//! `4.3.2.1.zen.spamhaus.org`.
//!
//! IPv6 addresses use the `ip6.arpa` nibble form, so `2001:db8::1` becomes 32
//! single-hex-digit labels in reverse order.

use std::fmt::Write;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use crate::{DnsblError, Result};

const IPV4_SUFFIX: &str = ".in-addr.arpa";
const IPV6_SUFFIX: &str = ".ip6.arpa";

/// Reverse an IPv4 address.
///
/// Converts `1.2.3.4` into `4.3.2.1` (without zone suffix).
#[must_use]
pub fn reverse_ipv4(ip: &Ipv4Addr) -> String {
    let octets = ip.octets();
    format!("{}.{}.{}.{}", octets[3], octets[2], octets[1], octets[0])
}

/// Reverse an IPv6 address into dot-separated nibbles (without zone suffix).
#[must_use]
pub fn reverse_ipv6(ip: &Ipv6Addr) -> String {
    let mut out = String::with_capacity(63);
    for byte in ip.octets().iter().rev() {
        if !out.is_empty() {
            out.push('.');
        }
        let _ = write!(out, "{:x}.{:x}", byte & 0x0f, byte >> 4);
    }
    out
}

/// Full PTR name for an address, e.g. `4.3.2.1.in-addr.arpa`.
#[must_use]
pub fn reverse_pointer(ip: &IpAddr) -> String {
    match ip {
        IpAddr::V4(v4) => format!("{}{IPV4_SUFFIX}", reverse_ipv4(v4)),
        IpAddr::V6(v6) => format!("{}{IPV6_SUFFIX}", reverse_ipv6(v6)),
    }
}

/// Reverse-DNS fragment of an address string, with the arpa suffix stripped.
pub fn reverse_fragment(address: &str) -> Result<String> {
    let ip: IpAddr = address
        .trim()
        .parse()
        .map_err(|_| DnsblError::InvalidAddress(address.to_string()))?;

    let pointer = reverse_pointer(&ip);
    let fragment = pointer
        .strip_suffix(IPV4_SUFFIX)
        .or_else(|| pointer.strip_suffix(IPV6_SUFFIX))
        .unwrap_or(&pointer);

    Ok(fragment.to_string())
}

/// Build the DNSBL query name for an address under a blacklist zone.
///
/// Example: `query_name("1.2.3.4", "bl.example.org")` -> `"4.3.2.1.bl.example.org"`
pub fn query_name(address: &str, blacklist: &str) -> Result<String> {
    let zone = blacklist.trim();
    if zone.trim_end_matches('.').is_empty() {
        return Err(DnsblError::InvalidBlacklist(blacklist.to_string()));
    }

    let fragment = reverse_fragment(address)?;
    Ok(format!("{fragment}.{zone}"))
}
