//! # Node Records
//!
//! v4-style node records: a public key plus the IP and ports a peer is
//! reachable on, optionally carrying the network tag the peer advertises.
//!
//! Records parsed from `enode://` URLs have sequence number 0 and no
//! network entry.

mod url;

pub use url::ENODE_SCHEME;

use std::fmt;
use std::net::{IpAddr, SocketAddr};

use shared_crypto::Secp256k1PublicKey;

use super::errors::RecordError;

/// 256-bit node identifier: Keccak-256 of the 64-byte public key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub [u8; 32]);

impl NodeId {
    /// Derive the ID of a public key.
    pub fn from_pubkey(pubkey: &Secp256k1PublicKey) -> Self {
        Self(pubkey.to_node_id())
    }

    /// Get the underlying bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Abbreviated hex form for log lines.
    pub fn terminal_string(&self) -> String {
        hex::encode(&self.0[..8])
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.terminal_string())
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// A peer record (v4 style).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRecord {
    /// Sequence number (0 for records built from URLs)
    pub seq: u64,
    /// Node's public key
    pub pubkey: Secp256k1PublicKey,
    /// IP address
    pub ip: IpAddr,
    /// UDP port for discovery
    pub udp_port: u16,
    /// TCP port for the wire protocol (0 if none)
    pub tcp_port: u16,
    /// Self-advertised network tag (chain id), if any
    pub network: Option<u64>,
}

impl NodeRecord {
    /// Create a record without sequence number or metadata.
    pub fn new_v4(pubkey: Secp256k1PublicKey, ip: IpAddr, tcp_port: u16, udp_port: u16) -> Self {
        Self {
            seq: 0,
            pubkey,
            ip,
            udp_port,
            tcp_port,
            network: None,
        }
    }

    /// Attach a network tag entry.
    #[must_use]
    pub fn with_network(mut self, chain_id: u64) -> Self {
        self.network = Some(chain_id);
        self
    }

    /// Attach a sequence number.
    #[must_use]
    pub fn with_seq(mut self, seq: u64) -> Self {
        self.seq = seq;
        self
    }

    /// Get the Node ID derived from public key.
    pub fn node_id(&self) -> NodeId {
        NodeId::from_pubkey(&self.pubkey)
    }

    /// Discovery (UDP) endpoint.
    pub fn udp_addr(&self) -> SocketAddr {
        SocketAddr::new(self.ip, self.udp_port)
    }

    /// Check that the record can be contacted over discovery.
    pub fn validate_complete(&self) -> Result<(), RecordError> {
        if self.ip.is_unspecified() {
            return Err(RecordError::MissingIp);
        }
        if self.udp_port == 0 {
            return Err(RecordError::MissingUdpPort);
        }
        Ok(())
    }

    /// Render as an `enode://` URL.
    pub fn url_v4(&self) -> String {
        url::format_v4(self)
    }
}

impl std::str::FromStr for NodeRecord {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        url::parse_v4(s)
    }
}

impl fmt::Display for NodeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url_v4())
    }
}

#[cfg(test)]
mod tests;
