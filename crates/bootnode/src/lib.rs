//! # Bootnode
//!
//! A standalone bootstrap node for the peer discovery protocol.
//!
//! ## Startup Sequence
//!
//! 1. Initialise logging
//! 2. Parse the NAT descriptor
//! 3. Obtain the node key (generate, load from file or from hex)
//! 4. Compile the network filter
//! 5. `--writeaddress`: print the public key and stop
//! 6. Compile the netlist
//! 7. Bind the UDP socket and resolve the advertised endpoint
//! 8. Print the self URL
//! 9. Parse the bootstrap records
//! 10. Start the selected engine and serve until interrupted
//!
//! Every configuration error surfaces before the socket is bound.

pub mod cli;
pub mod config;
pub mod dispatch;
pub mod endpoint;
pub mod error;
pub mod identity;
pub mod logging;
pub mod policy;
pub mod registry;

pub use cli::{Cli, KeySource};
pub use config::Configuration;
pub use dispatch::{dispatch, park, RunningEngine};
pub use error::BootnodeError;
pub use identity::{KeyError, NodeIdentity};
pub use logging::LogConfig;

use bn_discovery::{open_node_db, LocalNode, RestrictionPolicy};
use tracing::{debug, info};

/// Run the bootnode until interrupted.
///
/// Returns early without error for `--genkey` alone and `--writeaddress`.
pub async fn run(cli: Cli) -> Result<(), BootnodeError> {
    logging::init(&cli.log_config())?;

    let nat = endpoint::parse_nat(&cli.nat)?;

    let key_source = cli.key_source()?;
    let flag = key_source.flag();
    let identity = match key_source {
        KeySource::Generate(path) => {
            let identity = NodeIdentity::generate().map_err(BootnodeError::key(flag))?;
            identity.persist(&path).map_err(BootnodeError::key(flag))?;
            debug!(path = %path.display(), "Generated node key");
            if !cli.writeaddress {
                return Ok(());
            }
            identity
        }
        KeySource::File(path) => {
            NodeIdentity::load_from_file(&path).map_err(BootnodeError::key(flag))?
        }
        KeySource::Hex(hex) => {
            NodeIdentity::load_from_hex(&hex).map_err(BootnodeError::key(flag))?
        }
    };

    let filter = policy::compile_filter(&cli.network)?;

    if cli.writeaddress {
        println!("{}", identity.public_id_hex());
        return Ok(());
    }

    let netlist = policy::compile_netlist(&cli.netrestrict)?;

    let (socket, local_addr) = endpoint::bind(&cli.addr).await?;
    let advertised = endpoint::resolve_nat(nat.as_ref(), local_addr).await;
    endpoint::print_notice(identity.public_key(), advertised);

    let bootnodes = registry::parse_all(registry::BSC_BOOTNODES)?;

    let db = open_node_db(&cli.nodedb)?;
    let local = LocalNode::new(db, identity.public_key(), advertised)?;
    info!(
        id = %local.id().terminal_string(),
        seq = local.seq(),
        %local_addr,
        %advertised,
        "Local node ready"
    );

    let config = Configuration {
        identity,
        restrictions: RestrictionPolicy::new(netlist, filter),
        bootnodes,
        mode: cli.mode(),
    };
    let engine = dispatch(socket, &local, config)?;
    park(engine).await;
    Ok(())
}
