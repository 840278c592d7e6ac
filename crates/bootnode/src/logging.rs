//! Log output setup.
//!
//! Verbosity follows the classic 0-5 scale: 0 silences everything, 5 is
//! trace. `--vmodule` adds per-target overrides as `pattern=level` pairs,
//! e.g. `bn_discovery/engine=5,bootnode=2`.

use tracing_subscriber::EnvFilter;

use crate::error::BootnodeError;

/// Logging options taken from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub verbosity: u8,
    pub vmodule: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            verbosity: 3,
            vmodule: String::new(),
        }
    }
}

impl LogConfig {
    /// Render the filter directives.
    pub fn directives(&self) -> Result<String, BootnodeError> {
        let mut global = level_name(self.verbosity)?;
        let mut targeted = Vec::new();
        for entry in self.vmodule.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (pattern, level) = entry.split_once('=').ok_or_else(|| {
                BootnodeError::Logging(format!("invalid --vmodule entry {entry:?}"))
            })?;
            let level = match level.parse::<u8>() {
                Ok(n) => level_name(n)?,
                Err(_) => {
                    return Err(BootnodeError::Logging(format!(
                        "invalid level in --vmodule entry {entry:?}"
                    )))
                }
            };
            // A pattern matching every module sets the global level.
            match target_for(pattern) {
                target if target.is_empty() => global = level,
                target => targeted.push(format!("{target}={level}")),
            }
        }
        Ok(std::iter::once(global.to_string())
            .chain(targeted)
            .collect::<Vec<_>>()
            .join(","))
    }

    pub fn env_filter(&self) -> Result<EnvFilter, BootnodeError> {
        EnvFilter::try_new(self.directives()?).map_err(|e| BootnodeError::Logging(e.to_string()))
    }
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init(config: &LogConfig) -> Result<(), BootnodeError> {
    tracing_subscriber::fmt()
        .with_env_filter(config.env_filter()?)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init()
        .map_err(|e| BootnodeError::Logging(e.to_string()))
}

fn level_name(verbosity: u8) -> Result<&'static str, BootnodeError> {
    Ok(match verbosity {
        0 => "off",
        1 => "error",
        2 => "warn",
        3 => "info",
        4 => "debug",
        5 => "trace",
        n => {
            return Err(BootnodeError::Logging(format!(
                "verbosity {n} out of range 0-5"
            )))
        }
    })
}

/// File-style patterns become module targets: `p2p/discover/*.rs` turns
/// into `p2p::discover`.
fn target_for(pattern: &str) -> String {
    let pattern = pattern.trim_end_matches(".rs").replace('*', "");
    pattern
        .trim_matches('/')
        .replace('/', "::")
        .replace('-', "_")
}
