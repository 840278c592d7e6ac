//! # Ports Layer - Hexagonal Architecture Boundaries
//!
//! Driven ports (outbound SPIs) the bootnode needs from its environment:
//! - **NAT devices:** port mapping and external IP discovery
//! - **Node stores:** persistence of the local record's sequence number

pub mod outbound;

pub use outbound::{MappingProtocol, NatDevice, NatError, NodeDbError, NodeStore};
