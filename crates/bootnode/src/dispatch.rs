//! # Mode Dispatcher
//!
//! Starts exactly one engine variant and keeps it alive until interrupted.

use bn_discovery::{ClassicEngine, DiscoveryMode, EngineCore, EngineError, LocalNode, TopicEngine};
use tokio::net::UdpSocket;
use tracing::{info, warn};

use crate::config::Configuration;

/// The engine selected at startup.
#[derive(Debug)]
pub enum RunningEngine {
    Classic(ClassicEngine),
    Topic(TopicEngine),
}

impl RunningEngine {
    pub fn core(&self) -> &EngineCore {
        match self {
            RunningEngine::Classic(engine) => engine.core(),
            RunningEngine::Topic(engine) => engine.core(),
        }
    }

    pub fn mode(&self) -> DiscoveryMode {
        self.core().mode()
    }

    pub async fn close(&self) {
        match self {
            RunningEngine::Classic(engine) => engine.close().await,
            RunningEngine::Topic(engine) => engine.close().await,
        }
    }
}

/// Start the engine the configuration asks for on `socket`.
pub fn dispatch(
    socket: UdpSocket,
    local: &LocalNode,
    config: Configuration,
) -> Result<RunningEngine, EngineError> {
    let (mode, engine_config) = config.into_engine_config();
    Ok(match mode {
        DiscoveryMode::Classic => {
            RunningEngine::Classic(ClassicEngine::listen(socket, local, engine_config)?)
        }
        DiscoveryMode::Topic => {
            RunningEngine::Topic(TopicEngine::listen(socket, local, engine_config)?)
        }
    })
}

/// Serve until Ctrl-C, then close the engine.
///
/// If the signal handler cannot be installed this never returns.
pub async fn park(engine: RunningEngine) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            info!(mode = %engine.mode(), "Got interrupt, shutting down");
            engine.close().await;
        }
        Err(e) => {
            warn!(error = %e, "Cannot listen for interrupts, running until killed");
            std::future::pending::<()>().await;
        }
    }
}
