//! The node's own record.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use shared_crypto::Secp256k1PublicKey;

use super::record::{NodeId, NodeRecord};
use crate::ports::{NodeDbError, NodeStore};

/// Identity plus advertised endpoint of this node.
///
/// Every instantiation bumps the stored sequence number, so records
/// published after a restart always supersede earlier ones.
pub struct LocalNode {
    id: NodeId,
    pubkey: Secp256k1PublicKey,
    endpoint: SocketAddr,
    seq: u64,
}

impl LocalNode {
    pub fn new(
        db: Arc<dyn NodeStore>,
        pubkey: Secp256k1PublicKey,
        endpoint: SocketAddr,
    ) -> Result<Self, NodeDbError> {
        let id = NodeId::from_pubkey(&pubkey);
        let stored = db.local_seq(&id)?;
        // Fresh databases start from the clock.
        let base = if stored == 0 { unix_millis() } else { stored };
        let seq = base.checked_add(1).ok_or(NodeDbError::SeqOverflow)?;
        db.store_local_seq(&id, seq)?;

        Ok(Self {
            id,
            pubkey,
            endpoint,
            seq,
        })
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn pubkey(&self) -> &Secp256k1PublicKey {
        &self.pubkey
    }

    /// Advertised UDP endpoint.
    pub fn endpoint(&self) -> SocketAddr {
        self.endpoint
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Current record. The TCP port is always 0.
    pub fn record(&self) -> NodeRecord {
        NodeRecord::new_v4(self.pubkey, self.endpoint.ip(), 0, self.endpoint.port())
            .with_seq(self.seq)
    }

}

impl std::fmt::Debug for LocalNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalNode")
            .field("id", &self.id)
            .field("endpoint", &self.endpoint)
            .field("seq", &self.seq)
            .finish()
    }
}

fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryNodeDb;
    use shared_crypto::Secp256k1KeyPair;

    fn pubkey() -> Secp256k1PublicKey {
        let mut secret = [0u8; 32];
        secret[31] = 9;
        Secp256k1KeyPair::from_bytes(&secret).unwrap().public_key()
    }

    #[test]
    fn test_seq_starts_from_clock_and_increments() {
        let db = Arc::new(MemoryNodeDb::new());
        let endpoint: SocketAddr = "127.0.0.1:30301".parse().unwrap();

        let first = LocalNode::new(db.clone(), pubkey(), endpoint).unwrap();
        assert!(first.seq() > 1);

        let second = LocalNode::new(db.clone(), pubkey(), endpoint).unwrap();
        assert_eq!(second.seq(), first.seq() + 1);
    }

    #[test]
    fn test_record_has_zero_tcp_port() {
        let db = Arc::new(MemoryNodeDb::new());
        let endpoint: SocketAddr = "10.1.2.3:30301".parse().unwrap();
        let node = LocalNode::new(db, pubkey(), endpoint).unwrap();

        let record = node.record();
        assert_eq!(record.tcp_port, 0);
        assert_eq!(record.udp_port, 30301);
        assert_eq!(record.udp_addr(), endpoint);
        assert_eq!(record.seq, node.seq());
        assert_eq!(record.node_id(), node.id());
    }

    #[test]
    fn test_exhausted_seq_is_an_error() {
        let db = Arc::new(MemoryNodeDb::new());
        let id = NodeId::from_pubkey(&pubkey());
        db.store_local_seq(&id, u64::MAX).unwrap();

        let result = LocalNode::new(db.clone(), pubkey(), "10.0.0.1:30301".parse().unwrap());
        assert!(matches!(result, Err(NodeDbError::SeqOverflow)));
        assert_eq!(db.local_seq(&id).unwrap(), u64::MAX);
    }
}
