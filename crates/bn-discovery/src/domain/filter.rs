//! Network-tag filter.
//!
//! Peers advertise the chain they belong to as a `network` record entry. A
//! `NodeFilter` admits only records whose entry names the configured chain.

use std::fmt;
use std::str::FromStr;

use super::errors::FilterError;
use super::record::NodeRecord;

/// Networks the filter knows how to select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownNetwork {
    Bsc,
    Chapel,
    Rialto,
    Yolo,
}

impl KnownNetwork {
    const ALL: [KnownNetwork; 4] = [Self::Bsc, Self::Chapel, Self::Rialto, Self::Yolo];

    /// Chain id carried in the `network` entry.
    pub fn chain_id(self) -> u64 {
        match self {
            Self::Bsc => 56,
            Self::Chapel => 97,
            Self::Rialto => 1417,
            Self::Yolo => 133_519_467_574_834,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::Bsc => "bsc",
            Self::Chapel => "chapel",
            Self::Rialto => "rialto",
            Self::Yolo => "yolo",
        }
    }
}

impl FromStr for KnownNetwork {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|network| network.tag() == s)
            .ok_or_else(|| FilterError::UnknownNetwork(s.to_string()))
    }
}

impl fmt::Display for KnownNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Record predicate selecting one network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeFilter {
    network: KnownNetwork,
}

impl NodeFilter {
    /// Build a filter from a network tag.
    pub fn new(tag: &str) -> Result<Self, FilterError> {
        Ok(Self {
            network: tag.parse()?,
        })
    }

    pub fn network(&self) -> KnownNetwork {
        self.network
    }

    /// Records without a `network` entry are rejected.
    pub fn matches(&self, record: &NodeRecord) -> bool {
        record.network == Some(self.network.chain_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_crypto::Secp256k1KeyPair;
    use std::net::{IpAddr, Ipv4Addr};

    fn record(network: Option<u64>) -> NodeRecord {
        let mut secret = [0u8; 32];
        secret[31] = 7;
        let pubkey = Secp256k1KeyPair::from_bytes(&secret).unwrap().public_key();
        let record = NodeRecord::new_v4(pubkey, IpAddr::V4(Ipv4Addr::new(1, 2, 3, 4)), 0, 30301);
        match network {
            Some(id) => record.with_network(id),
            None => record,
        }
    }

    #[test]
    fn test_known_tags() {
        assert_eq!(NodeFilter::new("bsc").unwrap().network().chain_id(), 56);
        assert_eq!(NodeFilter::new("chapel").unwrap().network().chain_id(), 97);
        assert_eq!(NodeFilter::new("rialto").unwrap().network().chain_id(), 1417);
        assert_eq!(
            NodeFilter::new("yolo").unwrap().network().chain_id(),
            133519467574834
        );
    }

    #[test]
    fn test_unknown_tag() {
        let err = NodeFilter::new("bogus").unwrap_err();
        assert_eq!(err, FilterError::UnknownNetwork("bogus".into()));
        assert!(err.to_string().contains("bogus"));
    }

    #[test]
    fn test_matches_only_same_network() {
        let filter = NodeFilter::new("chapel").unwrap();
        assert!(filter.matches(&record(Some(97))));
        assert!(!filter.matches(&record(Some(56))));
        assert!(!filter.matches(&record(None)));
    }
}
