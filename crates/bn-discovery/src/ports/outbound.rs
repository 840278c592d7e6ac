//! # Driven Ports (Outbound SPI)
//!
//! Interfaces implemented by the adapters layer.

use std::fmt;
use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::NodeId;

/// Transport protocol of a port mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MappingProtocol {
    Udp,
}

impl fmt::Display for MappingProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MappingProtocol::Udp => f.write_str("UDP"),
        }
    }
}

/// A NAT traversal mechanism.
///
/// Implementations must be cheap to share across tasks: the bootnode hands
/// one instance to the background mapping task and awaits `external_ip` on
/// the main task concurrently.
#[async_trait]
pub trait NatDevice: fmt::Display + Send + Sync {
    /// Map `ext_port` on the gateway to `int_port` on this host.
    async fn add_mapping(
        &self,
        protocol: MappingProtocol,
        ext_port: u16,
        int_port: u16,
        description: &str,
        lifetime: Duration,
    ) -> Result<(), NatError>;

    /// Discover the gateway's external address.
    async fn external_ip(&self) -> Result<IpAddr, NatError>;
}

/// Errors from NAT descriptors and devices.
#[derive(Debug, Error)]
pub enum NatError {
    /// Descriptor names no known mechanism
    #[error("unknown mechanism {0:?}")]
    UnknownMechanism(String),
    /// Descriptor carries an unparsable address
    #[error("invalid IP address {0:?}")]
    InvalidIp(String),
    /// `extip` given without an address
    #[error("missing IP address")]
    MissingIp,
    /// No gateway answered discovery
    #[error("no NAT device found")]
    NoDevice,
    /// UPnP IGD request failed
    #[error("UPnP: {0}")]
    Upnp(String),
    /// NAT-PMP protocol violation
    #[error("NAT-PMP: {0}")]
    Pmp(String),
    /// NAT-PMP gateway returned a non-zero result code
    #[error("NAT-PMP result code {0}")]
    PmpResult(u16),
    /// Timed out waiting for the gateway
    #[error("timed out waiting for NAT device")]
    Timeout,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors from the node database.
#[derive(Debug, Error)]
pub enum NodeDbError {
    #[error("node database I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("corrupt node database: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("local record sequence number exhausted")]
    SeqOverflow,
}

/// Persistent store for local node metadata.
pub trait NodeStore: Send + Sync {
    /// Last stored sequence number of the local record, or 0.
    fn local_seq(&self, id: &NodeId) -> Result<u64, NodeDbError>;

    /// Store the sequence number of the local record.
    fn store_local_seq(&self, id: &NodeId, seq: u64) -> Result<(), NodeDbError>;
}
