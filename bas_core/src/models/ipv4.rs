//! IPv4 dotted-quad parsing and CIDR arithmetic.
//!
//! Addresses are packed into a `u32` as `Σ octet[i] << (24 − 8i)`. Masks are
//! built with an explicit `/0` case because shifting a 32-bit value by 32 is
//! not defined.

use serde::{Deserialize, Serialize};

use crate::input::parse_number;

/// Parse "a.b.c.d" into a packed address. Each octet must be 1-3 ASCII
/// digits with a value of 0-255; anything else is `None`.
pub fn parse_quad(raw: &str) -> Option<u32> {
    let parts: Vec<&str> = raw.trim().split('.').collect();
    if parts.len() != 4 {
        return None;
    }
    parts.iter().enumerate().try_fold(0u32, |acc, (i, part)| {
        let octet = parse_octet(part)?;
        Some(acc | (u32::from(octet) << (24 - 8 * i)))
    })
}

// `u8::from_str` alone would let "+168" through.
fn parse_octet(part: &str) -> Option<u8> {
    if part.is_empty() || part.len() > 3 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// Parse a CIDR prefix length. Must be a whole number 0-32.
pub fn parse_prefix(raw: &str) -> Option<u32> {
    let value = parse_number(raw);
    if value.fract() != 0.0 || !(0.0..=32.0).contains(&value) {
        return None;
    }
    Some(value as u32)
}

/// Expand a packed address back to dotted-quad text.
pub fn to_quad(n: u32) -> String {
    format!(
        "{}.{}.{}.{}",
        (n >> 24) & 255,
        (n >> 16) & 255,
        (n >> 8) & 255,
        n & 255
    )
}

/// Netmask for a prefix length (0-32).
pub fn mask_for_prefix(prefix: u32) -> u32 {
    if prefix == 0 {
        0
    } else {
        u32::MAX << (32 - prefix.min(32))
    }
}

/// An address with its prefix, and everything derived from them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subnet {
    pub address: u32,
    pub prefix: u32,
    pub mask: u32,
    pub network: u32,
    pub broadcast: u32,
}

impl Subnet {
    /// Build from a packed address and a prefix already validated to 0-32.
    pub fn new(address: u32, prefix: u32) -> Self {
        let mask = mask_for_prefix(prefix);
        let network = address & mask;
        Subnet {
            address,
            prefix,
            mask,
            network,
            broadcast: network | !mask,
        }
    }

    /// Parse both fields; `None` if either is invalid.
    pub fn parse(address: &str, prefix: &str) -> Option<Self> {
        Some(Self::new(parse_quad(address)?, parse_prefix(prefix)?))
    }

    /// `2^(32 − prefix) − 2`, clamped at zero for /31 and /32.
    pub fn usable_hosts(&self) -> u64 {
        (1u64 << (32 - self.prefix)).saturating_sub(2)
    }

    /// First and last usable host, when there are any.
    pub fn host_range(&self) -> Option<(u32, u32)> {
        if self.usable_hosts() == 0 {
            return None;
        }
        Some((self.network + 1, self.broadcast - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quad() {
        assert_eq!(parse_quad("192.168.1.10"), Some(0xC0A8_010A));
        assert_eq!(parse_quad(" 10.0.0.1 "), Some(0x0A00_0001));
        assert_eq!(parse_quad("0.0.0.0"), Some(0));
        assert_eq!(parse_quad("255.255.255.255"), Some(u32::MAX));
    }

    #[test]
    fn test_parse_quad_rejects_bad_octets() {
        assert_eq!(parse_quad("256.1.1.1"), None);
        assert_eq!(parse_quad("1.1.1"), None);
        assert_eq!(parse_quad("1.1.1.1.1"), None);
        assert_eq!(parse_quad("1.1.-1.1"), None);
        assert_eq!(parse_quad("1.1.a.1"), None);
        assert_eq!(parse_quad("1.1..1"), None);
        assert_eq!(parse_quad(""), None);
    }

    #[test]
    fn test_parse_quad_requires_plain_digits() {
        assert_eq!(parse_quad("192.+168.1.0"), None);
        assert_eq!(parse_quad("192. 168.1.0"), None);
        assert_eq!(parse_quad("192.168 .1.0"), None);
        assert_eq!(parse_quad("0192.168.1.0"), None);
        assert_eq!(parse_quad("192.168.1.0x1"), None);
        assert_eq!(parse_quad("010.001.000.009"), Some(0x0A01_0009));
    }

    #[test]
    fn test_parse_prefix() {
        assert_eq!(parse_prefix("24"), Some(24));
        assert_eq!(parse_prefix("0"), Some(0));
        assert_eq!(parse_prefix("32"), Some(32));
        assert_eq!(parse_prefix("33"), None);
        assert_eq!(parse_prefix("-1"), None);
        assert_eq!(parse_prefix("24.5"), None);
        assert_eq!(parse_prefix(""), None);
    }

    #[test]
    fn test_masks() {
        assert_eq!(mask_for_prefix(0), 0);
        assert_eq!(to_quad(mask_for_prefix(24)), "255.255.255.0");
        assert_eq!(to_quad(mask_for_prefix(20)), "255.255.240.0");
        assert_eq!(mask_for_prefix(32), u32::MAX);
    }

    #[test]
    fn test_slash_24() {
        let subnet = Subnet::parse("192.168.1.77", "24").unwrap();
        assert_eq!(to_quad(subnet.network), "192.168.1.0");
        assert_eq!(to_quad(subnet.broadcast), "192.168.1.255");
        assert_eq!(subnet.usable_hosts(), 254);
        let (first, last) = subnet.host_range().unwrap();
        assert_eq!(to_quad(first), "192.168.1.1");
        assert_eq!(to_quad(last), "192.168.1.254");
    }

    #[test]
    fn test_slash_zero_covers_everything() {
        let subnet = Subnet::parse("10.1.2.3", "0").unwrap();
        assert_eq!(subnet.network, 0);
        assert_eq!(subnet.broadcast, u32::MAX);
        assert_eq!(subnet.usable_hosts(), 4_294_967_294);
    }

    #[test]
    fn test_point_to_point_and_host_routes_have_no_hosts() {
        assert_eq!(Subnet::parse("10.0.0.0", "31").unwrap().usable_hosts(), 0);
        let host = Subnet::parse("10.0.0.5", "32").unwrap();
        assert_eq!(host.usable_hosts(), 0);
        assert_eq!(host.host_range(), None);
    }
}
