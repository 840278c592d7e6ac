use std::fmt;
use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;

use crate::ports::{MappingProtocol, NatDevice, NatError};

/// Statically configured external address. Mapping is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtIp(IpAddr);

impl ExtIp {
    pub fn new(ip: IpAddr) -> Self {
        Self(ip)
    }
}

impl fmt::Display for ExtIp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExtIP({})", self.0)
    }
}

#[async_trait]
impl NatDevice for ExtIp {
    async fn add_mapping(
        &self,
        _protocol: MappingProtocol,
        _ext_port: u16,
        _int_port: u16,
        _description: &str,
        _lifetime: Duration,
    ) -> Result<(), NatError> {
        Ok(())
    }

    async fn external_ip(&self) -> Result<IpAddr, NatError> {
        Ok(self.0)
    }
}
