//! # Discovery Engines
//!
//! Two interchangeable engine variants sharing one core:
//! - [`ClassicEngine`] - the legacy find-node protocol
//! - [`TopicEngine`] - the topic-based protocol
//!
//! Each engine takes ownership of the bound UDP socket, seeds its node table
//! with the bootstrap records and runs a receive loop that enforces the
//! restriction policy and the variant's structural packet checks.

mod classic;
mod config;
mod gate;
mod runner;
mod stats;
mod table;
mod topic;

pub use classic::ClassicEngine;
pub use config::EngineConfig;
pub use gate::{ClassicGate, PacketGate, TopicGate};
pub use runner::EngineCore;
pub use stats::{EngineStats, StatsSnapshot};
pub use table::{NodeTable, TableRejection};
pub use topic::TopicEngine;

use std::fmt;

use thiserror::Error;

use crate::domain::RecordError;

/// Largest datagram either protocol accepts.
pub const MAX_PACKET_SIZE: usize = 1280;

/// Protocol variant selected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiscoveryMode {
    #[default]
    Classic,
    Topic,
}

impl DiscoveryMode {
    /// `--v5` selects the topic-based engine.
    pub fn from_v5_flag(v5: bool) -> Self {
        if v5 {
            Self::Topic
        } else {
            Self::Classic
        }
    }
}

impl fmt::Display for DiscoveryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscoveryMode::Classic => f.write_str("classic"),
            DiscoveryMode::Topic => f.write_str("topic"),
        }
    }
}

/// Engine startup failures.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A bootstrap record cannot be contacted
    #[error("invalid bootstrap node {url}: {reason}")]
    BadBootnode { url: String, reason: RecordError },
    /// The local record was built for a different key
    #[error("local node record does not match the private key")]
    IdentityMismatch,
    #[error("socket error: {0}")]
    Io(#[from] std::io::Error),
}
