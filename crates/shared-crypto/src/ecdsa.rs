//! # secp256k1 Node Keys
//!
//! Long-term node identity keys on the secp256k1 curve.
//!
//! ## Security Properties
//!
//! - Generation draws from `OsRng`; an entropy failure is reported, not panicked
//! - The signing key zeroizes its scalar on drop
//! - `Debug` never prints secret material
//!
//! ## Public Key Encoding
//!
//! Discovery identifies nodes by the 64-byte uncompressed point without the
//! SEC1 `0x04` prefix. The node ID is the Keccak-256 of those 64 bytes.

use std::fmt;

use crate::{keccak256, CryptoError};
use k256::ecdsa::SigningKey;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroizing;

/// Length of a secret scalar in bytes.
pub const SECRET_KEY_LEN: usize = 32;

/// Length of an uncompressed public key without the SEC1 prefix.
pub const PUBLIC_KEY_LEN: usize = 64;

/// Upper bound on rejection sampling rounds during generation.
///
/// The chance of a uniformly random 32-byte string being an invalid scalar
/// is about 2^-128, so hitting this bound means the RNG is broken.
const MAX_GENERATION_ATTEMPTS: usize = 8;

/// Uncompressed secp256k1 public key (64 bytes, no prefix).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Secp256k1PublicKey([u8; PUBLIC_KEY_LEN]);

impl Secp256k1PublicKey {
    /// Create from raw 64-byte `X || Y` coordinates.
    ///
    /// Fails if the coordinates are not a point on the curve.
    pub fn from_bytes(bytes: [u8; PUBLIC_KEY_LEN]) -> Result<Self, CryptoError> {
        let mut sec1 = [0u8; PUBLIC_KEY_LEN + 1];
        sec1[0] = 0x04;
        sec1[1..].copy_from_slice(&bytes);
        k256::PublicKey::from_sec1_bytes(&sec1).map_err(|_| CryptoError::InvalidPublicKey)?;
        Ok(Self(bytes))
    }

    /// Create from a slice, checking length and curve membership.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let array: [u8; PUBLIC_KEY_LEN] =
            bytes
                .try_into()
                .map_err(|_| CryptoError::InvalidKeyLength {
                    expected: PUBLIC_KEY_LEN,
                    actual: bytes.len(),
                })?;
        Self::from_bytes(array)
    }

    /// Get raw 64 bytes.
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LEN] {
        &self.0
    }

    /// Lowercase hex encoding (128 characters).
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Derive the node ID (Keccak-256 of the 64-byte key).
    pub fn to_node_id(&self) -> [u8; 32] {
        keccak256(&self.0)
    }
}

impl fmt::Debug for Secp256k1PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secp256k1PublicKey({})", self.to_hex())
    }
}

impl fmt::Display for Secp256k1PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// secp256k1 keypair.
pub struct Secp256k1KeyPair {
    signing_key: SigningKey,
    public_key: Secp256k1PublicKey,
}

impl Secp256k1KeyPair {
    /// Generate a random keypair from the OS entropy source.
    pub fn generate() -> Result<Self, CryptoError> {
        let mut secret = Zeroizing::new([0u8; SECRET_KEY_LEN]);
        for _ in 0..MAX_GENERATION_ATTEMPTS {
            OsRng
                .try_fill_bytes(&mut secret[..])
                .map_err(|e| CryptoError::KeyGenerationFailed(e.to_string()))?;
            if let Ok(keypair) = Self::from_bytes(&secret) {
                return Ok(keypair);
            }
        }
        Err(CryptoError::KeyGenerationFailed(
            "entropy source produced no valid scalar".to_string(),
        ))
    }

    /// Create from secret key bytes (32 bytes, big-endian scalar).
    pub fn from_bytes(bytes: &[u8; SECRET_KEY_LEN]) -> Result<Self, CryptoError> {
        let signing_key =
            SigningKey::from_bytes(bytes.into()).map_err(|_| CryptoError::InvalidPrivateKey)?;
        let public_key = derive_public_key(&signing_key);
        Ok(Self {
            signing_key,
            public_key,
        })
    }

    /// Create from a secret key slice, checking its length.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != SECRET_KEY_LEN {
            return Err(CryptoError::InvalidKeyLength {
                expected: SECRET_KEY_LEN,
                actual: bytes.len(),
            });
        }
        let mut secret = Zeroizing::new([0u8; SECRET_KEY_LEN]);
        secret.copy_from_slice(bytes);
        Self::from_bytes(&secret)
    }

    /// Get the public key.
    pub fn public_key(&self) -> Secp256k1PublicKey {
        self.public_key
    }

    /// Get secret key bytes (for serialization).
    ///
    /// The returned buffer is wiped when dropped.
    pub fn secret_bytes(&self) -> Zeroizing<[u8; SECRET_KEY_LEN]> {
        Zeroizing::new(self.signing_key.to_bytes().into())
    }
}

impl fmt::Debug for Secp256k1KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secp256k1KeyPair")
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}

fn derive_public_key(signing_key: &SigningKey) -> Secp256k1PublicKey {
    let point = k256::PublicKey::from(signing_key.verifying_key()).to_encoded_point(false);
    // Uncompressed SEC1 encoding is always 0x04 || X || Y (65 bytes)
    let mut bytes = [0u8; PUBLIC_KEY_LEN];
    bytes.copy_from_slice(&point.as_bytes()[1..]);
    Secp256k1PublicKey(bytes)
}
