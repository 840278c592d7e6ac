//! # Identity Manager
//!
//! The node's secp256k1 key: generation, hex key files and the public
//! identifier printed by `--writeaddress`.
//!
//! Key files hold the 32-byte secret as 64 hex characters without a trailing
//! newline. Trailing whitespace is tolerated when loading.

use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use shared_crypto::{CryptoError, Secp256k1KeyPair, Secp256k1PublicKey, SECRET_KEY_LEN};
use thiserror::Error;
use zeroize::Zeroizing;

#[derive(Debug, Error)]
pub enum KeyError {
    #[error("could not generate key: {0}")]
    Generation(#[source] CryptoError),

    #[error("could not load key from {}: {reason}", path.display())]
    Load { path: PathBuf, reason: String },

    #[error("invalid private key: {0}")]
    Decode(String),

    #[error("could not write key to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The process-wide node identity. Cheap to clone.
#[derive(Clone)]
pub struct NodeIdentity {
    keypair: Arc<Secp256k1KeyPair>,
}

impl NodeIdentity {
    /// Fresh key from the OS random source.
    pub fn generate() -> Result<Self, KeyError> {
        let keypair = Secp256k1KeyPair::generate().map_err(KeyError::Generation)?;
        Ok(Self::from_keypair(keypair))
    }

    /// Load a hex key file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, KeyError> {
        let path = path.as_ref();
        let load_err = |reason: String| KeyError::Load {
            path: path.to_path_buf(),
            reason,
        };

        let contents =
            Zeroizing::new(fs::read_to_string(path).map_err(|e| load_err(e.to_string()))?);
        let hex_key = contents.trim_end();
        if hex_key.len() != SECRET_KEY_LEN * 2 {
            return Err(load_err(format!(
                "expected {} hex characters, found {}",
                SECRET_KEY_LEN * 2,
                hex_key.len()
            )));
        }
        Self::load_from_hex(hex_key).map_err(|e| load_err(e.to_string()))
    }

    /// Decode a hex-encoded secret.
    pub fn load_from_hex(hex_key: &str) -> Result<Self, KeyError> {
        let bytes =
            Zeroizing::new(hex::decode(hex_key).map_err(|e| KeyError::Decode(e.to_string()))?);
        let keypair =
            Secp256k1KeyPair::from_slice(&bytes).map_err(|e| KeyError::Decode(e.to_string()))?;
        Ok(Self::from_keypair(keypair))
    }

    /// Write the secret to `path` with owner-only permissions.
    pub fn persist(&self, path: impl AsRef<Path>) -> Result<(), KeyError> {
        let path = path.as_ref();
        let write_err = |source| KeyError::Write {
            path: path.to_path_buf(),
            source,
        };
        let secret = self.keypair.secret_bytes();
        let encoded = Zeroizing::new(hex::encode(&*secret));

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(path).map_err(write_err)?;
        file.write_all(encoded.as_bytes()).map_err(write_err)?;
        Ok(())
    }

    pub fn from_keypair(keypair: Secp256k1KeyPair) -> Self {
        Self {
            keypair: Arc::new(keypair),
        }
    }

    pub fn keypair(&self) -> Arc<Secp256k1KeyPair> {
        Arc::clone(&self.keypair)
    }

    pub fn public_key(&self) -> Secp256k1PublicKey {
        self.keypair.public_key()
    }

    /// 64-byte uncompressed public key, without the SEC1 prefix, as hex.
    pub fn public_id_hex(&self) -> String {
        self.public_key().to_hex()
    }
}

impl fmt::Debug for NodeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeIdentity")
            .field("public_key", &self.public_key())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_ONE: &str = "0000000000000000000000000000000000000000000000000000000000000001";
    const GENERATOR: &str = "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798\
                             483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8";

    #[test]
    fn test_load_from_hex_derives_public_id() {
        let identity = NodeIdentity::load_from_hex(KEY_ONE).unwrap();
        assert_eq!(identity.public_id_hex(), GENERATOR);
        assert_eq!(identity.public_id_hex().len(), 128);
    }

    #[test]
    fn test_load_from_hex_rejects_bad_input() {
        assert!(matches!(
            NodeIdentity::load_from_hex("zz"),
            Err(KeyError::Decode(_))
        ));
        assert!(matches!(
            NodeIdentity::load_from_hex("0102"),
            Err(KeyError::Decode(_))
        ));
        assert!(matches!(
            NodeIdentity::load_from_hex(&"00".repeat(32)),
            Err(KeyError::Decode(_))
        ));
    }

    #[test]
    fn test_persist_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("boot.key");

        let identity = NodeIdentity::generate().unwrap();
        identity.persist(&path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents.len(), 64);
        assert!(!contents.ends_with('\n'));

        let loaded = NodeIdentity::load_from_file(&path).unwrap();
        assert_eq!(loaded.public_key(), identity.public_key());
    }

    #[cfg(unix)]
    #[test]
    fn test_persist_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("boot.key");
        NodeIdentity::generate().unwrap().persist(&path).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_load_tolerates_trailing_whitespace() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("boot.key");
        fs::write(&path, format!("{KEY_ONE}\n")).unwrap();

        let identity = NodeIdentity::load_from_file(&path).unwrap();
        assert_eq!(identity.public_id_hex(), GENERATOR);
    }

    #[test]
    fn test_load_rejects_missing_and_garbage() {
        let dir = tempfile::tempdir().unwrap();

        assert!(matches!(
            NodeIdentity::load_from_file(dir.path().join("absent.key")),
            Err(KeyError::Load { .. })
        ));

        let path = dir.path().join("bad.key");
        fs::write(&path, format!("{KEY_ONE}trailing")).unwrap();
        assert!(matches!(
            NodeIdentity::load_from_file(&path),
            Err(KeyError::Load { .. })
        ));

        fs::write(&path, "g".repeat(64)).unwrap();
        assert!(matches!(
            NodeIdentity::load_from_file(&path),
            Err(KeyError::Load { .. })
        ));
    }

    #[test]
    fn test_debug_hides_secret() {
        let identity = NodeIdentity::load_from_hex(KEY_ONE).unwrap();
        let debug = format!("{identity:?}");
        assert!(!debug.contains(KEY_ONE));
    }
}
