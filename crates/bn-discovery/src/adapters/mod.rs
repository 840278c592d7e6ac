//! # Adapters
//!
//! Concrete implementations of the outbound ports.
//!
//! - `nat` - NAT traversal mechanisms and the background port mapper
//! - `node_db` - In-memory and JSON-file node stores

pub mod nat;
pub mod node_db;

pub use nat::{
    parse_nat, spawn_port_mapping, AutoNat, ExtIp, NatPmp, Upnp, MAPPING_LIFETIME,
    MAPPING_REFRESH_INTERVAL,
};
pub use node_db::{open_node_db, FileNodeDb, MemoryNodeDb};
