use std::sync::Arc;

use shared_crypto::Secp256k1KeyPair;

use crate::domain::{NodeRecord, RestrictionPolicy};

/// Everything an engine needs besides the socket and the local record.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Node identity
    pub private_key: Arc<Secp256k1KeyPair>,
    /// Netlist and network filter
    pub restrictions: RestrictionPolicy,
    /// Rendezvous peers seeded into the node table
    pub bootnodes: Vec<NodeRecord>,
}

impl EngineConfig {
    pub fn new(private_key: Arc<Secp256k1KeyPair>) -> Self {
        Self {
            private_key,
            restrictions: RestrictionPolicy::unrestricted(),
            bootnodes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_restrictions(mut self, restrictions: RestrictionPolicy) -> Self {
        self.restrictions = restrictions;
        self
    }

    #[must_use]
    pub fn with_bootnodes(mut self, bootnodes: Vec<NodeRecord>) -> Self {
        self.bootnodes = bootnodes;
        self
    }
}
