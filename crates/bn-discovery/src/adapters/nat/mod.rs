//! # NAT Traversal
//!
//! Mechanisms for discovering the external address and mapping the
//! discovery port on the gateway.
//!
//! Descriptor grammar accepted by [`parse_nat`]:
//!
//! | Descriptor | Mechanism |
//! |------------|-----------|
//! | `""`, `none`, `off` | none |
//! | `any`, `auto`, `on` | first of UPnP / NAT-PMP to answer |
//! | `extip:<IP>`, `ip:<IP>` | static external address |
//! | `upnp` | UPnP IGD |
//! | `pmp`, `natpmp`, `nat-pmp` | NAT-PMP, optionally `:<gateway IP>` |

mod auto;
mod extip;
mod map;
mod pmp;
mod upnp;

pub use auto::AutoNat;
pub use extip::ExtIp;
pub use map::{spawn_port_mapping, MAPPING_LIFETIME, MAPPING_REFRESH_INTERVAL};
pub use pmp::NatPmp;
pub use upnp::Upnp;

use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;

use crate::ports::{NatDevice, NatError};

/// Parse a NAT descriptor. `Ok(None)` means no mechanism.
pub fn parse_nat(descriptor: &str) -> Result<Option<Arc<dyn NatDevice>>, NatError> {
    let (mechanism, arg) = match descriptor.split_once(':') {
        Some((mechanism, arg)) => (mechanism, Some(arg)),
        None => (descriptor, None),
    };

    let device: Arc<dyn NatDevice> = match mechanism.to_ascii_lowercase().as_str() {
        "" | "none" | "off" => return Ok(None),
        "any" | "auto" | "on" => Arc::new(AutoNat::new()),
        "extip" | "ip" => {
            let ip = match arg {
                None | Some("") => return Err(NatError::MissingIp),
                Some(ip) => parse_ip(ip)?,
            };
            Arc::new(ExtIp::new(ip))
        }
        "upnp" => Arc::new(Upnp::new()),
        "pmp" | "natpmp" | "nat-pmp" => {
            let gateway = match arg {
                None | Some("") => None,
                Some(ip) => match parse_ip(ip)? {
                    IpAddr::V4(v4) => Some(v4),
                    IpAddr::V6(_) => return Err(NatError::InvalidIp(ip.to_string())),
                },
            };
            Arc::new(NatPmp::new(gateway))
        }
        _ => return Err(NatError::UnknownMechanism(mechanism.to_string())),
    };
    Ok(Some(device))
}

fn parse_ip(s: &str) -> Result<IpAddr, NatError> {
    s.parse().map_err(|_| NatError::InvalidIp(s.to_string()))
}

/// Private IPv4 address this host uses for outbound traffic.
///
/// Connecting a UDP socket sends no packets; it only selects a route.
pub(crate) async fn local_ipv4_towards(target: (Ipv4Addr, u16)) -> Result<Ipv4Addr, NatError> {
    let socket = tokio::net::UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0)).await?;
    socket.connect(target).await?;
    match socket.local_addr()?.ip() {
        IpAddr::V4(ip) => Ok(ip),
        IpAddr::V6(_) => Err(NatError::NoDevice),
    }
}
