use std::sync::atomic::{AtomicU64, Ordering};

/// Receive-loop counters.
#[derive(Debug, Default)]
pub struct EngineStats {
    received: AtomicU64,
    restricted: AtomicU64,
    malformed: AtomicU64,
}

/// Point-in-time copy of [`EngineStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    /// Datagrams read from the socket
    pub received: u64,
    /// Dropped because the source is outside the netlist
    pub restricted: u64,
    /// Dropped by the packet gate
    pub malformed: u64,
}

impl EngineStats {
    pub(crate) fn record_received(&self) {
        self.received.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_restricted(&self) {
        self.restricted.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_malformed(&self) {
        self.malformed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            received: self.received.load(Ordering::Relaxed),
            restricted: self.restricted.load(Ordering::Relaxed),
            malformed: self.malformed.load(Ordering::Relaxed),
        }
    }
}
