//! Engine core shared by both protocol variants.

use std::io::ErrorKind;
use std::net::SocketAddr;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::net::UdpSocket;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, trace, warn};

use super::{DiscoveryMode, EngineConfig, EngineError, EngineStats, NodeTable, PacketGate};
use crate::domain::{LocalNode, NodeRecord, RestrictionPolicy};

/// Receive buffer, larger than any valid packet so oversized datagrams are
/// seen whole and rejected.
const RECV_BUFFER_SIZE: usize = 2048;

/// Socket ownership, node table and receive task of a running engine.
pub struct EngineCore {
    mode: DiscoveryMode,
    local_record: NodeRecord,
    local_addr: SocketAddr,
    table: Arc<NodeTable>,
    stats: Arc<EngineStats>,
    shutdown: watch::Sender<bool>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl EngineCore {
    /// Validate the configuration and start the receive loop.
    ///
    /// Must be called from within a Tokio runtime.
    pub(crate) fn start<G: PacketGate>(
        mode: DiscoveryMode,
        socket: UdpSocket,
        local: &LocalNode,
        config: EngineConfig,
        gate: G,
    ) -> Result<Self, EngineError> {
        for bootnode in &config.bootnodes {
            bootnode
                .validate_complete()
                .map_err(|reason| EngineError::BadBootnode {
                    url: bootnode.url_v4(),
                    reason,
                })?;
        }
        if config.private_key.public_key() != *local.pubkey() {
            return Err(EngineError::IdentityMismatch);
        }

        let local_addr = socket.local_addr()?;
        let local_record = local.record();

        let table = Arc::new(NodeTable::new(local.id(), config.restrictions.clone()));
        let mut seeded = 0;
        for bootnode in config.bootnodes {
            if table.add_bootnode(bootnode) {
                seeded += 1;
            }
        }

        let stats = Arc::new(EngineStats::default());
        let (shutdown, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(receive_loop(
            socket,
            config.restrictions,
            gate,
            Arc::clone(&stats),
            shutdown_rx,
        ));

        info!(
            mode = %mode,
            self_record = %local_record,
            addr = %local_addr,
            bootnodes = seeded,
            "Started discovery engine"
        );

        Ok(Self {
            mode,
            local_record,
            local_addr,
            table,
            stats,
            shutdown,
            task: Mutex::new(Some(task)),
        })
    }

    pub fn mode(&self) -> DiscoveryMode {
        self.mode
    }

    /// The record this engine advertises.
    pub fn self_record(&self) -> &NodeRecord {
        &self.local_record
    }

    /// Bound socket address.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn table(&self) -> &NodeTable {
        &self.table
    }

    pub fn stats(&self) -> &EngineStats {
        &self.stats
    }

    /// Whether the receive loop is still running.
    pub fn is_running(&self) -> bool {
        self.task
            .lock()
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }

    /// Stop the receive loop and release the socket. Idempotent.
    pub async fn close(&self) {
        let _ = self.shutdown.send(true);
        let task = self.task.lock().take();
        if let Some(task) = task {
            if let Err(e) = task.await {
                warn!(error = %e, "Discovery receive task failed");
            }
            info!(mode = %self.mode, "Discovery engine closed");
        }
    }
}

impl std::fmt::Debug for EngineCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineCore")
            .field("mode", &self.mode)
            .field("local_addr", &self.local_addr)
            .field("table_len", &self.table.len())
            .finish()
    }
}

async fn receive_loop<G: PacketGate>(
    socket: UdpSocket,
    policy: RestrictionPolicy,
    gate: G,
    stats: Arc<EngineStats>,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut buf = vec![0u8; RECV_BUFFER_SIZE];
    loop {
        let (len, from) = tokio::select! {
            _ = shutdown.changed() => break,
            result = socket.recv_from(&mut buf) => match result {
                Ok(received) => received,
                Err(e) if is_transient(e.kind()) => {
                    trace!(error = %e, "Temporary UDP read error");
                    continue;
                }
                Err(e) => {
                    warn!(error = %e, "UDP read error, stopping receive loop");
                    break;
                }
            },
        };

        stats.record_received();
        if !policy.allows_ip(&from.ip()) {
            stats.record_restricted();
            trace!(%from, "Packet from address outside netlist");
            continue;
        }
        if !gate.admit(&buf[..len]) {
            stats.record_malformed();
            debug!(proto = gate.name(), %from, len, "Dropped malformed packet");
            continue;
        }
        trace!(proto = gate.name(), %from, len, "Accepted packet");
    }
}

fn is_transient(kind: ErrorKind) -> bool {
    matches!(
        kind,
        ErrorKind::ConnectionReset | ErrorKind::Interrupted | ErrorKind::WouldBlock
    )
}
