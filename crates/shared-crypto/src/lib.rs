//! # Shared Crypto - Node Identity Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `ecdsa` | secp256k1 | Node identity keys |
//! | `hashing` | Keccak-256 | Node IDs, packet hashes |
//!
//! ## Security Properties
//!
//! - Keys are generated from the operating system CSPRNG
//! - Secret scalars are zeroized on drop and never printed by `Debug`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ecdsa;
pub mod errors;
pub mod hashing;

// Re-exports
pub use ecdsa::{Secp256k1KeyPair, Secp256k1PublicKey, PUBLIC_KEY_LEN, SECRET_KEY_LEN};
pub use errors::CryptoError;
pub use hashing::{keccak256, Hash};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
