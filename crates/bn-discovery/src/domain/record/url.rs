//! `enode://` URL parser.
//!
//! Format: `enode://<128 hex pubkey>@<ip>:<tcp port>[?discport=<udp port>]`

use std::net::SocketAddr;

use shared_crypto::Secp256k1PublicKey;

use super::NodeRecord;
use crate::domain::errors::RecordError;

/// URL scheme for discovery nodes.
pub const ENODE_SCHEME: &str = "enode://";

/// Parse an `enode://` URL into a record.
pub(super) fn parse_v4(s: &str) -> Result<NodeRecord, RecordError> {
    let rest = s
        .strip_prefix(ENODE_SCHEME)
        .ok_or(RecordError::InvalidScheme)?;
    let (id_hex, host) = rest.split_once('@').ok_or(RecordError::MissingAddress)?;

    let key_bytes =
        hex::decode(id_hex).map_err(|e| RecordError::InvalidPublicKey(e.to_string()))?;
    let pubkey = Secp256k1PublicKey::from_slice(&key_bytes)
        .map_err(|e| RecordError::InvalidPublicKey(e.to_string()))?;

    let (address, query) = match host.split_once('?') {
        Some((address, query)) => (address, Some(query)),
        None => (host, None),
    };
    let addr: SocketAddr = address
        .parse()
        .map_err(|_| RecordError::InvalidAddress(address.to_string()))?;

    let udp_port = match query {
        Some(query) => parse_discport(query)?.unwrap_or(addr.port()),
        None => addr.port(),
    };

    Ok(NodeRecord::new_v4(pubkey, addr.ip(), addr.port(), udp_port))
}

/// Extract `discport` from a query string. Unknown keys are ignored.
fn parse_discport(query: &str) -> Result<Option<u16>, RecordError> {
    let mut discport = None;
    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        if key == "discport" {
            let port = value
                .parse::<u16>()
                .map_err(|_| RecordError::InvalidDiscPort(value.to_string()))?;
            discport = Some(port);
        }
    }
    Ok(discport)
}

/// Format a record as an `enode://` URL.
pub(super) fn format_v4(record: &NodeRecord) -> String {
    let addr = SocketAddr::new(record.ip, record.tcp_port);
    let mut url = format!("{}{}@{}", ENODE_SCHEME, record.pubkey.to_hex(), addr);
    if record.udp_port != record.tcp_port {
        url.push_str(&format!("?discport={}", record.udp_port));
    }
    url
}
