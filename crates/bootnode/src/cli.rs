//! Command-line flags.

use std::path::PathBuf;

use bn_discovery::DiscoveryMode;
use clap::Parser;

use crate::error::BootnodeError;
use crate::logging::LogConfig;

/// Bootstrap node for the peer discovery protocol
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "bootnode")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Listen address
    #[arg(long, default_value = ":30301")]
    pub addr: String,

    /// Generate a node key into this file
    #[arg(long, value_name = "PATH")]
    pub genkey: Option<PathBuf>,

    /// Write out the node's public key and quit
    #[arg(long)]
    pub writeaddress: bool,

    /// Private key filename
    #[arg(long, value_name = "PATH")]
    pub nodekey: Option<PathBuf>,

    /// Private key as hex (for testing)
    #[arg(long, value_name = "HEX")]
    pub nodekeyhex: Option<String>,

    /// Port mapping mechanism (any|none|upnp|pmp|extip:<IP>)
    #[arg(long, default_value = "none")]
    pub nat: String,

    /// Restrict network communication to the given IP networks (CIDR masks)
    #[arg(long, default_value = "")]
    pub netrestrict: String,

    /// Run a topic-based discovery bootnode
    #[arg(long)]
    pub v5: bool,

    /// Log verbosity (0-5)
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(0..=5))]
    pub verbosity: u8,

    /// Log verbosity pattern
    #[arg(long, default_value = "")]
    pub vmodule: String,

    /// <bsc|chapel|rialto|yolo> filters nodes by their network entry
    #[arg(long, default_value = "")]
    pub network: String,

    /// Node database path (empty for an in-memory database)
    #[arg(long, default_value = "")]
    pub nodedb: String,
}

/// Where the node key comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySource {
    /// Generate a fresh key and save it here
    Generate(PathBuf),
    /// Load from a hex key file
    File(PathBuf),
    /// Decode from a hex string
    Hex(String),
}

impl KeySource {
    /// Flag name used in diagnostics.
    pub fn flag(&self) -> &'static str {
        match self {
            KeySource::Generate(_) => "--genkey",
            KeySource::File(_) => "--nodekey",
            KeySource::Hex(_) => "--nodekeyhex",
        }
    }
}

impl Cli {
    /// Exactly one of `--genkey`, `--nodekey` and `--nodekeyhex` must be set.
    pub fn key_source(&self) -> Result<KeySource, BootnodeError> {
        let genkey = self.genkey.clone().filter(|p| !p.as_os_str().is_empty());
        let nodekey = self.nodekey.clone().filter(|p| !p.as_os_str().is_empty());
        let nodekeyhex = self.nodekeyhex.clone().filter(|h| !h.is_empty());

        match (genkey, nodekey, nodekeyhex) {
            (Some(path), None, None) => Ok(KeySource::Generate(path)),
            (None, Some(path), None) => Ok(KeySource::File(path)),
            (None, None, Some(hex)) => Ok(KeySource::Hex(hex)),
            (None, None, None) => Err(BootnodeError::Configuration(
                "Use --nodekey or --nodekeyhex to specify a private key".into(),
            )),
            (None, Some(_), Some(_)) => Err(BootnodeError::Configuration(
                "Options --nodekey and --nodekeyhex are mutually exclusive".into(),
            )),
            (Some(_), _, _) => Err(BootnodeError::Configuration(
                "Option --genkey cannot be combined with --nodekey or --nodekeyhex".into(),
            )),
        }
    }

    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            verbosity: self.verbosity,
            vmodule: self.vmodule.clone(),
        }
    }

    pub fn mode(&self) -> DiscoveryMode {
        DiscoveryMode::from_v5_flag(self.v5)
    }
}
