//! Crypto error types.

use thiserror::Error;

/// Cryptographic operation errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Invalid key length
    #[error("invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength {
        /// Expected key length in bytes
        expected: usize,
        /// Actual key length in bytes
        actual: usize,
    },

    /// Public key is not a point on secp256k1
    #[error("invalid public key")]
    InvalidPublicKey,

    /// Secret scalar is zero or not below the curve order
    #[error("invalid private key")]
    InvalidPrivateKey,

    /// Key generation failed
    #[error("key generation failed: {0}")]
    KeyGenerationFailed(String),
}
