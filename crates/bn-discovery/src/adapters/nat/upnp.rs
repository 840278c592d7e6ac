//! UPnP IGD via `igd-next`.

use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use async_trait::async_trait;
use igd_next::aio::tokio::{search_gateway, Tokio};
use igd_next::aio::Gateway;
use igd_next::{PortMappingProtocol, SearchOptions};
use tokio::sync::OnceCell;
use tracing::debug;

use super::local_ipv4_towards;
use crate::ports::{MappingProtocol, NatDevice, NatError};

const SEARCH_TIMEOUT: Duration = Duration::from_secs(3);

/// UPnP gateway. Discovery runs once, on first use.
#[derive(Default)]
pub struct Upnp {
    gateway: OnceCell<Option<Gateway<Tokio>>>,
}

impl Upnp {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discovered gateway, searching on the first call.
    pub(super) async fn gateway(&self) -> Result<&Gateway<Tokio>, NatError> {
        self.gateway
            .get_or_init(|| async {
                let options = SearchOptions {
                    timeout: Some(SEARCH_TIMEOUT),
                    ..Default::default()
                };
                match search_gateway(options).await {
                    Ok(gateway) => {
                        debug!(addr = %gateway.addr, "Found UPnP gateway");
                        Some(gateway)
                    }
                    Err(e) => {
                        debug!(error = %e, "UPnP gateway search failed");
                        None
                    }
                }
            })
            .await
            .as_ref()
            .ok_or(NatError::NoDevice)
    }
}

impl fmt::Display for Upnp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.gateway.get() {
            Some(Some(gateway)) => write!(f, "UPnP({})", gateway.addr),
            _ => f.write_str("UPnP"),
        }
    }
}

#[async_trait]
impl NatDevice for Upnp {
    async fn add_mapping(
        &self,
        protocol: MappingProtocol,
        ext_port: u16,
        int_port: u16,
        description: &str,
        lifetime: Duration,
    ) -> Result<(), NatError> {
        let gateway = self.gateway().await?;
        let SocketAddr::V4(gateway_addr) = gateway.addr else {
            return Err(NatError::Upnp("IPv6 gateways are not supported".into()));
        };
        let local_ip = local_ipv4_towards((*gateway_addr.ip(), gateway_addr.port())).await?;
        let protocol = match protocol {
            MappingProtocol::Udp => PortMappingProtocol::UDP,
        };
        let lease = u32::try_from(lifetime.as_secs()).unwrap_or(u32::MAX);

        gateway
            .add_port(
                protocol,
                ext_port,
                SocketAddr::new(IpAddr::V4(local_ip), int_port),
                lease,
                description,
            )
            .await
            .map_err(|e| NatError::Upnp(e.to_string()))
    }

    async fn external_ip(&self) -> Result<IpAddr, NatError> {
        self.gateway()
            .await?
            .get_external_ip()
            .await
            .map_err(|e| NatError::Upnp(e.to_string()))
    }
}
