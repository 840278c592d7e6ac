//! CIDR allow-lists.
//!
//! A `Netlist` is a list of masked network prefixes. An address is contained
//! if it falls inside any of them. IPv4-mapped IPv6 addresses are matched
//! against IPv4 blocks.

use std::fmt;
use std::net::IpAddr;

use super::errors::NetlistError;

/// A single masked network prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cidr {
    network: IpAddr,
    prefix_len: u8,
}

impl Cidr {
    /// Parse `<ip>/<prefix>`. Host bits are cleared.
    pub fn parse(s: &str) -> Result<Self, NetlistError> {
        let (ip, prefix) = s
            .split_once('/')
            .ok_or_else(|| NetlistError::InvalidCidr(s.to_string()))?;
        let ip: IpAddr = ip
            .parse()
            .map_err(|_| NetlistError::InvalidCidr(s.to_string()))?;
        let prefix_len: u8 = prefix
            .parse()
            .map_err(|_| NetlistError::InvalidPrefix(s.to_string()))?;

        let max = max_prefix(&ip);
        if prefix_len > max {
            return Err(NetlistError::InvalidPrefix(s.to_string()));
        }

        Ok(Self {
            network: mask(ip, prefix_len),
            prefix_len,
        })
    }

    /// Masked network address.
    pub fn network(&self) -> IpAddr {
        self.network
    }

    /// Prefix length in bits.
    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    /// Check whether `ip` lies inside this block.
    pub fn contains(&self, ip: &IpAddr) -> bool {
        match (self.network, ip.to_canonical()) {
            (IpAddr::V4(net), IpAddr::V4(ip)) => {
                prefix_matches(&net.octets(), &ip.octets(), self.prefix_len)
            }
            (IpAddr::V6(net), IpAddr::V6(ip)) => {
                prefix_matches(&net.octets(), &ip.octets(), self.prefix_len)
            }
            _ => false,
        }
    }
}

impl fmt::Display for Cidr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network, self.prefix_len)
    }
}

/// Compiled list of CIDR blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Netlist {
    blocks: Vec<Cidr>,
}

impl Netlist {
    /// Parse a comma-separated list of CIDR blocks.
    ///
    /// Whitespace is ignored and empty items are skipped, so `""` yields an
    /// empty list.
    pub fn parse(s: &str) -> Result<Self, NetlistError> {
        let cleaned: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        let blocks = cleaned
            .split(',')
            .filter(|item| !item.is_empty())
            .map(Cidr::parse)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { blocks })
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Check whether `ip` lies inside any block.
    pub fn contains(&self, ip: &IpAddr) -> bool {
        self.blocks.iter().any(|block| block.contains(ip))
    }
}

impl fmt::Display for Netlist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, block) in self.blocks.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{block}")?;
        }
        Ok(())
    }
}

fn max_prefix(ip: &IpAddr) -> u8 {
    match ip {
        IpAddr::V4(_) => 32,
        IpAddr::V6(_) => 128,
    }
}

fn mask(ip: IpAddr, prefix_len: u8) -> IpAddr {
    match ip {
        IpAddr::V4(v4) => {
            let mut octets = v4.octets();
            clear_host_bits(&mut octets, prefix_len);
            IpAddr::from(octets)
        }
        IpAddr::V6(v6) => {
            let mut octets = v6.octets();
            clear_host_bits(&mut octets, prefix_len);
            IpAddr::from(octets)
        }
    }
}

fn clear_host_bits(bytes: &mut [u8], prefix_len: u8) {
    let full = (prefix_len / 8) as usize;
    let rem = prefix_len % 8;
    for (i, byte) in bytes.iter_mut().enumerate() {
        if i < full {
            continue;
        }
        if i == full && rem > 0 {
            *byte &= 0xFF << (8 - rem);
        } else {
            *byte = 0;
        }
    }
}

/// Returns true if the first `prefix_bits` bits of both slices are equal.
fn prefix_matches(a: &[u8], b: &[u8], prefix_bits: u8) -> bool {
    let prefix_bytes = (prefix_bits / 8) as usize;
    let remaining_bits = prefix_bits % 8;
    let max_bytes = a.len().min(b.len());

    if a[..prefix_bytes.min(max_bytes)] != b[..prefix_bytes.min(max_bytes)] {
        return false;
    }

    // Partial byte when the prefix is not byte-aligned
    if remaining_bits > 0 && prefix_bytes < max_bytes {
        let mask_byte = 0xFF << (8 - remaining_bits);
        return (a[prefix_bytes] & mask_byte) == (b[prefix_bytes] & mask_byte);
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr};

    fn ip(s: &str) -> IpAddr {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_masks_host_bits() {
        let cidr = Cidr::parse("10.1.2.3/8").unwrap();
        assert_eq!(cidr.network(), ip("10.0.0.0"));
        assert_eq!(cidr.to_string(), "10.0.0.0/8");

        let cidr = Cidr::parse("192.168.77.1/20").unwrap();
        assert_eq!(cidr.network(), ip("192.168.64.0"));
    }

    #[test]
    fn test_parse_list_with_whitespace_and_empty_items() {
        let list = Netlist::parse(" 10.0.0.0/8 , ,192.168.0.0/16,").unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.to_string(), "10.0.0.0/8,192.168.0.0/16");
    }

    #[test]
    fn test_empty_input_is_empty_list() {
        assert!(Netlist::parse("").unwrap().is_empty());
        assert!(Netlist::parse(" , ,").unwrap().is_empty());
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            Netlist::parse("10.0.0.0"),
            Err(NetlistError::InvalidCidr(_))
        ));
        assert!(matches!(
            Netlist::parse("not-an-ip/8"),
            Err(NetlistError::InvalidCidr(_))
        ));
        assert!(matches!(
            Netlist::parse("10.0.0.0/33"),
            Err(NetlistError::InvalidPrefix(_))
        ));
        assert!(matches!(
            Netlist::parse("10.0.0.0/x"),
            Err(NetlistError::InvalidPrefix(_))
        ));
        assert!(Netlist::parse("::/128").is_ok());
        assert!(matches!(
            Netlist::parse("::/129"),
            Err(NetlistError::InvalidPrefix(_))
        ));
    }

    #[test]
    fn test_contains() {
        let list = Netlist::parse("10.0.0.0/8,192.168.0.0/16,fd00::/8").unwrap();

        assert!(list.contains(&ip("10.255.1.1")));
        assert!(list.contains(&ip("192.168.3.4")));
        assert!(list.contains(&ip("fd12::1")));
        assert!(!list.contains(&ip("11.0.0.1")));
        assert!(!list.contains(&ip("192.169.0.1")));
        assert!(!list.contains(&ip("fe80::1")));
    }

    #[test]
    fn test_non_aligned_prefix() {
        let list = Netlist::parse("172.16.0.0/12").unwrap();
        assert!(list.contains(&ip("172.31.255.255")));
        assert!(!list.contains(&ip("172.32.0.0")));
    }

    #[test]
    fn test_ipv4_mapped_matches_v4_block() {
        let list = Netlist::parse("10.0.0.0/8").unwrap();
        let mapped = IpAddr::V6(Ipv4Addr::new(10, 1, 1, 1).to_ipv6_mapped());
        assert!(list.contains(&mapped));
    }

    #[test]
    fn test_zero_prefix_matches_family() {
        let list = Netlist::parse("0.0.0.0/0").unwrap();
        assert!(list.contains(&IpAddr::V4(Ipv4Addr::UNSPECIFIED)));
        assert!(!list.contains(&IpAddr::V6(Ipv6Addr::UNSPECIFIED)));
    }
}
