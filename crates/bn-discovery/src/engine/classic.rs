use tokio::net::UdpSocket;

use super::{ClassicGate, DiscoveryMode, EngineConfig, EngineCore, EngineError};
use crate::domain::LocalNode;

/// Legacy find-node discovery engine.
#[derive(Debug)]
pub struct ClassicEngine {
    core: EngineCore,
}

impl ClassicEngine {
    /// Start the engine on an already bound socket.
    pub fn listen(
        socket: UdpSocket,
        local: &LocalNode,
        config: EngineConfig,
    ) -> Result<Self, EngineError> {
        let core = EngineCore::start(DiscoveryMode::Classic, socket, local, config, ClassicGate)?;
        Ok(Self { core })
    }

    pub fn core(&self) -> &EngineCore {
        &self.core
    }

    pub async fn close(&self) {
        self.core.close().await;
    }
}
