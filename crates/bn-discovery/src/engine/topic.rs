use tokio::net::UdpSocket;

use super::{DiscoveryMode, EngineConfig, EngineCore, EngineError, TopicGate};
use crate::domain::LocalNode;

/// Topic-based discovery engine.
#[derive(Debug)]
pub struct TopicEngine {
    core: EngineCore,
}

impl TopicEngine {
    /// Start the engine on an already bound socket.
    pub fn listen(
        socket: UdpSocket,
        local: &LocalNode,
        config: EngineConfig,
    ) -> Result<Self, EngineError> {
        let core = EngineCore::start(DiscoveryMode::Topic, socket, local, config, TopicGate)?;
        Ok(Self { core })
    }

    pub fn core(&self) -> &EngineCore {
        &self.core
    }

    pub async fn close(&self) {
        self.core.close().await;
    }
}
