//! # Bootnode Discovery Building Blocks
//!
//! Everything the bootnode hands to, or needs from, a discovery engine:
//! node records, the restriction policy, NAT traversal, the local node
//! record store and the two engine variants.
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture with:
//! - **Domain Layer:** Node records, `enode://` URLs, CIDR netlists, network filters
//! - **Ports Layer:** Trait definitions for NAT devices and record stores
//! - **Adapters Layer:** UPnP, NAT-PMP, static external IP, node databases
//! - **Engine Layer:** Classic and topic-based engines sharing one receive loop
//!
//! ## Example
//!
//! ```rust
//! use bn_discovery::{NodeRecord, Netlist, RestrictionPolicy};
//!
//! let url = "enode://1cc4534b14cfe351ab740a1418ab944a234ca2f702915eadb7e558a02010cb7c\
//!            5a8c295a3b56bcefa7701c07752acd5539cb13df2aab8ae2d98934d712611443\
//!            @52.71.43.172:30311";
//! let record: NodeRecord = url.parse().unwrap();
//! assert_eq!(record.udp_port, 30311);
//!
//! let policy = RestrictionPolicy::new(Some(Netlist::parse("52.0.0.0/8").unwrap()), None);
//! assert!(policy.accepts(&record));
//! ```

// =============================================================================
// CORE MODULES
// =============================================================================

pub mod domain;
pub mod ports;

// =============================================================================
// ADAPTERS & ENGINES (tokio-based)
// =============================================================================

pub mod adapters;
pub mod engine;

// =============================================================================
// RE-EXPORTS
// =============================================================================

// Domain
pub use domain::{
    FilterError, KnownNetwork, LocalNode, Netlist, NetlistError, NodeFilter, NodeId, NodeRecord,
    RecordError, RestrictionPolicy, ENODE_SCHEME,
};

// Port traits
pub use ports::{MappingProtocol, NatDevice, NatError, NodeDbError, NodeStore};

// Adapters
pub use adapters::{
    open_node_db, parse_nat, spawn_port_mapping, AutoNat, ExtIp, FileNodeDb, MemoryNodeDb,
    NatPmp, Upnp, MAPPING_LIFETIME, MAPPING_REFRESH_INTERVAL,
};

// Engines
pub use engine::{
    ClassicEngine, DiscoveryMode, EngineConfig, EngineCore, EngineError, EngineStats, NodeTable,
    TableRejection, TopicEngine, MAX_PACKET_SIZE,
};
