use std::fmt;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::{select_ok, BoxFuture, FutureExt};
use tokio::sync::OnceCell;
use tracing::{debug, info};

use super::{NatPmp, Upnp};
use crate::ports::{MappingProtocol, NatDevice, NatError};

/// Auto-discovery: UPnP and NAT-PMP are probed concurrently and the first
/// device to answer is used for the life of the process.
#[derive(Default)]
pub struct AutoNat {
    found: OnceCell<Option<Arc<dyn NatDevice>>>,
}

impl AutoNat {
    pub fn new() -> Self {
        Self::default()
    }

    async fn device(&self) -> Result<&Arc<dyn NatDevice>, NatError> {
        self.found
            .get_or_init(|| async {
                match discover().await {
                    Ok(device) => {
                        info!(device = %device, "NAT device discovered");
                        Some(device)
                    }
                    Err(e) => {
                        debug!(error = %e, "No NAT device found");
                        None
                    }
                }
            })
            .await
            .as_ref()
            .ok_or(NatError::NoDevice)
    }
}

async fn discover() -> Result<Arc<dyn NatDevice>, NatError> {
    let probes: Vec<BoxFuture<'static, Result<Arc<dyn NatDevice>, NatError>>> = vec![
        async {
            let upnp = Upnp::new();
            upnp.gateway().await?;
            Ok(Arc::new(upnp) as Arc<dyn NatDevice>)
        }
        .boxed(),
        async {
            let pmp = NatPmp::new(None);
            pmp.external_ip().await?;
            Ok(Arc::new(pmp) as Arc<dyn NatDevice>)
        }
        .boxed(),
    ];
    let (device, _rest) = select_ok(probes).await?;
    Ok(device)
}

impl fmt::Display for AutoNat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.found.get() {
            Some(Some(device)) => write!(f, "{device}"),
            _ => f.write_str("any"),
        }
    }
}

#[async_trait]
impl NatDevice for AutoNat {
    async fn add_mapping(
        &self,
        protocol: MappingProtocol,
        ext_port: u16,
        int_port: u16,
        description: &str,
        lifetime: Duration,
    ) -> Result<(), NatError> {
        self.device()
            .await?
            .add_mapping(protocol, ext_port, int_port, description, lifetime)
            .await
    }

    async fn external_ip(&self) -> Result<IpAddr, NatError> {
        self.device().await?.external_ip().await
    }
}
