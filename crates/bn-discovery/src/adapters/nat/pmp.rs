//! NAT-PMP client (RFC 6886).
//!
//! Only the two requests the bootnode needs: external address (opcode 0)
//! and UDP port mapping (opcode 1).

use std::fmt;
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use async_trait::async_trait;
use tokio::net::UdpSocket;
use tokio::time::timeout;
use tracing::trace;

use super::local_ipv4_towards;
use crate::ports::{MappingProtocol, NatDevice, NatError};

/// Gateway port for NAT-PMP requests.
pub const PMP_PORT: u16 = 5351;

const VERSION: u8 = 0;
const OP_EXTERNAL_ADDRESS: u8 = 0;
const OP_MAP_UDP: u8 = 1;
const RESPONSE_BIT: u8 = 128;

const ATTEMPTS: u32 = 3;
const INITIAL_TIMEOUT: Duration = Duration::from_millis(250);

/// Any routable address works: only the route lookup matters.
const ROUTE_PROBE: (Ipv4Addr, u16) = (Ipv4Addr::new(8, 8, 8, 8), 53);

/// NAT-PMP gateway client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NatPmp {
    gateway: Option<Ipv4Addr>,
    port: u16,
}

impl NatPmp {
    /// `None` guesses the gateway from the host's private address.
    pub fn new(gateway: Option<Ipv4Addr>) -> Self {
        Self {
            gateway,
            port: PMP_PORT,
        }
    }

    #[cfg(test)]
    pub(super) fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    async fn resolve_gateway(&self) -> Result<Ipv4Addr, NatError> {
        match self.gateway {
            Some(gw) => Ok(gw),
            None => guess_gateway(local_ipv4_towards(ROUTE_PROBE).await?),
        }
    }

    async fn request(&self, msg: &[u8], response_len: usize) -> Result<Vec<u8>, NatError> {
        let gateway = self.resolve_gateway().await?;
        let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0)).await?;
        socket.connect((gateway, self.port)).await?;

        let mut wait = INITIAL_TIMEOUT;
        let mut buf = [0u8; 16];
        for attempt in 1..=ATTEMPTS {
            socket.send(msg).await?;
            match timeout(wait, socket.recv(&mut buf)).await {
                Ok(Ok(n)) if n >= response_len => return Ok(buf[..n].to_vec()),
                Ok(Ok(n)) => {
                    return Err(NatError::Pmp(format!("short response ({n} bytes)")));
                }
                Ok(Err(e)) => return Err(e.into()),
                Err(_) => {
                    trace!(%gateway, attempt, ?wait, "NAT-PMP request timed out");
                    wait *= 2;
                }
            }
        }
        Err(NatError::Timeout)
    }
}

impl fmt::Display for NatPmp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.gateway {
            Some(gw) => write!(f, "NAT-PMP({gw})"),
            None => f.write_str("NAT-PMP"),
        }
    }
}

#[async_trait]
impl NatDevice for NatPmp {
    async fn add_mapping(
        &self,
        protocol: MappingProtocol,
        ext_port: u16,
        int_port: u16,
        _description: &str,
        lifetime: Duration,
    ) -> Result<(), NatError> {
        let op = match protocol {
            MappingProtocol::Udp => OP_MAP_UDP,
        };
        let msg = encode_map_request(op, int_port, ext_port, lifetime);
        let response = self.request(&msg, 16).await?;
        check_header(&response, op)?;
        Ok(())
    }

    async fn external_ip(&self) -> Result<IpAddr, NatError> {
        let response = self.request(&[VERSION, OP_EXTERNAL_ADDRESS], 12).await?;
        check_header(&response, OP_EXTERNAL_ADDRESS)?;
        Ok(IpAddr::V4(Ipv4Addr::new(
            response[8],
            response[9],
            response[10],
            response[11],
        )))
    }
}

/// Map request: version, opcode, reserved, internal port, external port,
/// lifetime in seconds. All big-endian.
pub(super) fn encode_map_request(
    op: u8,
    int_port: u16,
    ext_port: u16,
    lifetime: Duration,
) -> [u8; 12] {
    let lifetime = u32::try_from(lifetime.as_secs()).unwrap_or(u32::MAX);
    let mut msg = [0u8; 12];
    msg[0] = VERSION;
    msg[1] = op;
    msg[4..6].copy_from_slice(&int_port.to_be_bytes());
    msg[6..8].copy_from_slice(&ext_port.to_be_bytes());
    msg[8..12].copy_from_slice(&lifetime.to_be_bytes());
    msg
}

pub(super) fn check_header(response: &[u8], op: u8) -> Result<(), NatError> {
    if response.len() < 4 {
        return Err(NatError::Pmp("short response".into()));
    }
    if response[0] != VERSION {
        return Err(NatError::Pmp(format!("unsupported version {}", response[0])));
    }
    if response[1] != RESPONSE_BIT | op {
        return Err(NatError::Pmp(format!("unexpected opcode {}", response[1])));
    }
    let result = u16::from_be_bytes([response[2], response[3]]);
    if result != 0 {
        return Err(NatError::PmpResult(result));
    }
    Ok(())
}

/// Guess the gateway as the `.1` host of a private subnet.
pub(super) fn guess_gateway(local: Ipv4Addr) -> Result<Ipv4Addr, NatError> {
    if !local.is_private() {
        return Err(NatError::NoDevice);
    }
    let [a, b, c, _] = local.octets();
    Ok(Ipv4Addr::new(a, b, c, 1))
}
