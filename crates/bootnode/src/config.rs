use bn_discovery::{DiscoveryMode, EngineConfig, NodeRecord, RestrictionPolicy};

use crate::identity::NodeIdentity;

/// Validated startup configuration handed to the dispatcher.
#[derive(Debug, Clone)]
pub struct Configuration {
    pub identity: NodeIdentity,
    pub restrictions: RestrictionPolicy,
    pub bootnodes: Vec<NodeRecord>,
    pub mode: DiscoveryMode,
}

impl Configuration {
    /// Split into the selected mode and the engine configuration.
    pub fn into_engine_config(self) -> (DiscoveryMode, EngineConfig) {
        let config = EngineConfig::new(self.identity.keypair())
            .with_restrictions(self.restrictions)
            .with_bootnodes(self.bootnodes);
        (self.mode, config)
    }
}
