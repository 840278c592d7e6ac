use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};

use crate::ports::{MappingProtocol, NatDevice};

/// Lease requested for each mapping.
pub const MAPPING_LIFETIME: Duration = Duration::from_secs(20 * 60);

/// Mappings are renewed well before the lease runs out.
pub const MAPPING_REFRESH_INTERVAL: Duration = Duration::from_secs(15 * 60);

/// Keep a port mapping alive in the background.
///
/// The first attempt is made immediately. Failures are logged and retried on
/// the next refresh; they never stop the task.
pub fn spawn_port_mapping(
    nat: Arc<dyn NatDevice>,
    protocol: MappingProtocol,
    ext_port: u16,
    int_port: u16,
    description: impl Into<String>,
) -> JoinHandle<()> {
    let description = description.into();
    tokio::spawn(async move {
        let mut refresh = interval(MAPPING_REFRESH_INTERVAL);
        refresh.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            refresh.tick().await;
            match nat
                .add_mapping(protocol, ext_port, int_port, &description, MAPPING_LIFETIME)
                .await
            {
                Ok(()) => info!(
                    proto = %protocol,
                    extport = ext_port,
                    intport = int_port,
                    interface = %nat,
                    "Mapped network port"
                ),
                Err(e) => debug!(
                    proto = %protocol,
                    extport = ext_port,
                    intport = int_port,
                    interface = %nat,
                    error = %e,
                    "Couldn't add port mapping"
                ),
            }
        }
    })
}
