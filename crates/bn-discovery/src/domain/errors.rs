//! Domain Errors for node records and restriction policy parsing.

use thiserror::Error;

/// Errors produced while parsing or validating a node record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// The descriptor does not start with `enode://`
    #[error("invalid URL scheme, want \"enode\"")]
    InvalidScheme,
    /// The descriptor has no `<pubkey>@<host>` separator
    #[error("does not contain node ID and address separated by '@'")]
    MissingAddress,
    /// The embedded key is not 64 bytes of hex or not a curve point
    #[error("invalid public key ({0})")]
    InvalidPublicKey(String),
    /// The host part is not a literal `ip:port`
    #[error("invalid address {0:?}")]
    InvalidAddress(String),
    /// The `discport` query parameter is not a port number
    #[error("invalid discport in query: {0:?}")]
    InvalidDiscPort(String),
    /// Record has no usable IP (unspecified address)
    #[error("missing IP address")]
    MissingIp,
    /// Record has no UDP endpoint
    #[error("missing UDP port")]
    MissingUdpPort,
}

/// Errors produced while parsing a CIDR netlist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetlistError {
    /// Entry is not of the form `<ip>/<prefix>`
    #[error("invalid CIDR address: {0}")]
    InvalidCidr(String),
    /// Prefix length exceeds the address width
    #[error("invalid prefix length in {0}")]
    InvalidPrefix(String),
}

/// Errors produced while compiling a network-tag filter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// Tag does not name a known network
    #[error("unknown network {0:?}")]
    UnknownNetwork(String),
}
