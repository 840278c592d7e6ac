//! Domain Layer - Pure logic with no I/O
//!
//! This module contains:
//! - Node identifiers and v4-style node records
//! - `enode://` URL parsing and formatting
//! - CIDR netlists and network-tag filters (the restriction policy)
//! - The local node record

pub mod errors;
pub mod filter;
pub mod local_node;
pub mod netlist;
pub mod policy;
pub mod record;

pub use errors::{FilterError, NetlistError, RecordError};
pub use filter::{KnownNetwork, NodeFilter};
pub use local_node::LocalNode;
pub use netlist::{Cidr, Netlist};
pub use policy::RestrictionPolicy;
pub use record::{NodeId, NodeRecord, ENODE_SCHEME};
