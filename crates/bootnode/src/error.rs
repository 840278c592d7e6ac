//! Fatal startup errors.
//!
//! Every variant aborts the process with `Fatal: <message>` and exit status 1.
//! NAT mapping and external IP discovery never appear here: their failures
//! are logged and startup continues.

use std::net::SocketAddr;

use bn_discovery::{EngineError, FilterError, NatError, NetlistError, NodeDbError, RecordError};
use thiserror::Error;

use crate::identity::KeyError;

#[derive(Debug, Error)]
pub enum BootnodeError {
    /// Flag combination is invalid
    #[error("{0}")]
    Configuration(String),

    /// Key generation, loading or persisting failed
    #[error("{flag}: {source}")]
    Key {
        flag: &'static str,
        #[source]
        source: KeyError,
    },

    #[error("--netrestrict: {0}")]
    Netlist(#[from] NetlistError),

    #[error("--network: {0}")]
    Filter(#[from] FilterError),

    #[error("--nat: {0}")]
    NatParse(#[from] NatError),

    #[error("--addr: cannot resolve {addr:?}: {reason}")]
    AddressResolution { addr: String, reason: String },

    #[error("--addr: cannot listen on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// A baked-in bootstrap descriptor is malformed
    #[error("invalid bootstrap node #{index} ({descriptor}): {reason}")]
    PeerRecordParse {
        index: usize,
        descriptor: String,
        #[source]
        reason: RecordError,
    },

    #[error("{0}")]
    EngineStart(#[from] EngineError),

    #[error("--nodedb: {0}")]
    NodeDb(#[from] NodeDbError),

    #[error("cannot initialise logging: {0}")]
    Logging(String),
}

impl BootnodeError {
    pub(crate) fn key(flag: &'static str) -> impl FnOnce(KeyError) -> Self {
        move |source| Self::Key { flag, source }
    }
}
