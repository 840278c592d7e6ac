//! Node table holding the peers an engine knows about.

use std::collections::HashMap;

use parking_lot::RwLock;
use thiserror::Error;

use crate::domain::{NodeId, NodeRecord, RestrictionPolicy};

/// Why a record was not added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TableRejection {
    #[error("record is the local node")]
    SelfNode,
    #[error("address outside the netlist")]
    Restricted,
    #[error("record rejected by the network filter")]
    Filtered,
}

/// Known peers keyed by node ID.
///
/// Bootstrap records bypass the network filter. Records added through
/// [`NodeTable::add_seen`] must satisfy the full restriction policy.
#[derive(Debug)]
pub struct NodeTable {
    self_id: NodeId,
    policy: RestrictionPolicy,
    nodes: RwLock<HashMap<NodeId, NodeRecord>>,
}

impl NodeTable {
    pub fn new(self_id: NodeId, policy: RestrictionPolicy) -> Self {
        Self {
            self_id,
            policy,
            nodes: RwLock::new(HashMap::new()),
        }
    }

    /// Seed a bootstrap record. Returns false for the local node.
    pub fn add_bootnode(&self, record: NodeRecord) -> bool {
        let id = record.node_id();
        if id == self.self_id {
            return false;
        }
        self.nodes.write().insert(id, record);
        true
    }

    /// Add a record learned from the network.
    ///
    /// The receive loop screens raw datagrams only and does not decode
    /// neighbour records, so nothing in this crate calls this yet.
    pub fn add_seen(&self, record: NodeRecord) -> Result<(), TableRejection> {
        let id = record.node_id();
        if id == self.self_id {
            return Err(TableRejection::SelfNode);
        }
        if !self.policy.allows_ip(&record.ip) {
            return Err(TableRejection::Restricted);
        }
        if !self.policy.accepts(&record) {
            return Err(TableRejection::Filtered);
        }
        self.nodes.write().insert(id, record);
        Ok(())
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.read().contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.read().is_empty()
    }
}
