//! # Endpoint Resolver
//!
//! Binds the discovery socket and works out the address other nodes should
//! use to reach it.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use bn_discovery::{spawn_port_mapping, MappingProtocol, NatDevice, NodeRecord};
use shared_crypto::Secp256k1PublicKey;
use tokio::net::{lookup_host, UdpSocket};
use tracing::{debug, info};

use crate::error::BootnodeError;

/// Description attached to gateway port mappings.
pub const MAPPING_DESCRIPTION: &str = "ethereum discovery";

/// Parse the `--nat` descriptor.
pub fn parse_nat(descriptor: &str) -> Result<Option<Arc<dyn NatDevice>>, BootnodeError> {
    Ok(bn_discovery::parse_nat(descriptor)?)
}

/// Resolve and bind the listen address.
///
/// An empty host (`:30301`) binds all IPv4 interfaces.
pub async fn bind(listen_addr: &str) -> Result<(UdpSocket, SocketAddr), BootnodeError> {
    let host_port = if listen_addr.starts_with(':') {
        format!("0.0.0.0{listen_addr}")
    } else {
        listen_addr.to_string()
    };
    let resolution_err = |reason: String| BootnodeError::AddressResolution {
        addr: listen_addr.to_string(),
        reason,
    };

    let addr = lookup_host(host_port.as_str())
        .await
        .map_err(|e| resolution_err(e.to_string()))?
        .next()
        .ok_or_else(|| resolution_err("no addresses found".into()))?;

    let socket = UdpSocket::bind(addr)
        .await
        .map_err(|source| BootnodeError::Bind { addr, source })?;
    let local = socket
        .local_addr()
        .map_err(|source| BootnodeError::Bind { addr, source })?;
    debug!(%local, "Bound discovery socket");
    Ok((socket, local))
}

/// Work out the advertised endpoint.
///
/// With a NAT mechanism configured, a background mapping task is started
/// unless the socket is on loopback. The external IP replaces the local one
/// when the mechanism can report it; otherwise the local address is kept.
pub async fn resolve_nat(nat: Option<&Arc<dyn NatDevice>>, local: SocketAddr) -> SocketAddr {
    let Some(nat) = nat else {
        return local;
    };

    if !local.ip().is_loopback() {
        spawn_port_mapping(
            Arc::clone(nat),
            MappingProtocol::Udp,
            local.port(),
            local.port(),
            MAPPING_DESCRIPTION,
        );
    }

    match nat.external_ip().await {
        Ok(ip) => {
            info!(%ip, interface = %nat, "Resolved external address");
            SocketAddr::new(ip, local.port())
        }
        Err(e) => {
            debug!(error = %e, interface = %nat, "Couldn't get external IP");
            local
        }
    }
}

/// Address shown in the banner: unspecified becomes loopback.
pub fn banner_addr(addr: SocketAddr) -> SocketAddr {
    if addr.ip().is_unspecified() {
        SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), addr.port())
    } else {
        addr
    }
}

/// Startup banner: the self URL and an advisory.
pub fn notice(pubkey: Secp256k1PublicKey, advertised: SocketAddr) -> String {
    let addr = banner_addr(advertised);
    let record = NodeRecord::new_v4(pubkey, addr.ip(), 0, addr.port());
    format!(
        "{}\n\
         Note: you're running a bootnode, which is a developer tool.\n\
         We recommend using a regular node as bootstrap node for production deployments.",
        record.url_v4()
    )
}

pub fn print_notice(pubkey: Secp256k1PublicKey, advertised: SocketAddr) {
    println!("{}", notice(pubkey, advertised));
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bn_discovery::NatError;
    use shared_crypto::Secp256k1KeyPair;
    use std::fmt;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn pubkey() -> Secp256k1PublicKey {
        let mut secret = [0u8; 32];
        secret[31] = 1;
        Secp256k1KeyPair::from_bytes(&secret).unwrap().public_key()
    }

    #[test]
    fn test_banner_addr() {
        assert_eq!(
            banner_addr("0.0.0.0:30301".parse().unwrap()),
            "127.0.0.1:30301".parse().unwrap()
        );
        assert_eq!(
            banner_addr("[::]:30301".parse().unwrap()),
            "127.0.0.1:30301".parse().unwrap()
        );
        assert_eq!(
            banner_addr("1.2.3.4:30301".parse().unwrap()),
            "1.2.3.4:30301".parse().unwrap()
        );
    }

    #[test]
    fn test_notice_format() {
        let text = notice(pubkey(), "0.0.0.0:30301".parse().unwrap());
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            format!("enode://{}@127.0.0.1:0?discport=30301", pubkey().to_hex())
        );
        assert!(lines.next().unwrap().starts_with("Note:"));
        assert!(lines.next().unwrap().contains("production"));
        assert!(lines.next().is_none());
    }

    #[tokio::test]
    async fn test_bind_empty_host() {
        let (socket, local) = bind(":0").await.unwrap();
        assert!(local.ip().is_unspecified());
        assert_ne!(local.port(), 0);
        assert_eq!(socket.local_addr().unwrap(), local);
    }

    #[tokio::test]
    async fn test_bind_errors() {
        assert!(matches!(
            bind("not an address").await,
            Err(BootnodeError::AddressResolution { .. })
        ));

        let (_held, local) = bind("127.0.0.1:0").await.unwrap();
        assert!(matches!(
            bind(&local.to_string()).await,
            Err(BootnodeError::Bind { .. })
        ));
    }

    #[tokio::test]
    async fn test_resolve_without_nat_keeps_local() {
        let local: SocketAddr = "127.0.0.1:30301".parse().unwrap();
        assert_eq!(resolve_nat(None, local).await, local);
    }

    #[tokio::test]
    async fn test_resolve_extip_keeps_port() {
        let nat = parse_nat("extip:203.0.113.9").unwrap().unwrap();
        let local: SocketAddr = "127.0.0.1:30301".parse().unwrap();
        assert_eq!(
            resolve_nat(Some(&nat), local).await,
            "203.0.113.9:30301".parse().unwrap()
        );
    }

    /// Mechanism whose every request fails.
    #[derive(Default)]
    struct UnreachableNat {
        mappings: AtomicUsize,
    }

    impl fmt::Display for UnreachableNat {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("unreachable")
        }
    }

    #[async_trait]
    impl NatDevice for UnreachableNat {
        async fn add_mapping(
            &self,
            _protocol: MappingProtocol,
            _ext_port: u16,
            _int_port: u16,
            _description: &str,
            _lifetime: Duration,
        ) -> Result<(), NatError> {
            self.mappings.fetch_add(1, Ordering::SeqCst);
            Err(NatError::NoDevice)
        }

        async fn external_ip(&self) -> Result<IpAddr, NatError> {
            Err(NatError::NoDevice)
        }
    }

    #[tokio::test]
    async fn test_nat_failure_falls_back_and_loopback_skips_mapping() {
        let recorder = Arc::new(UnreachableNat::default());
        let nat: Arc<dyn NatDevice> = recorder.clone();

        let loopback: SocketAddr = "127.0.0.1:30301".parse().unwrap();
        assert_eq!(resolve_nat(Some(&nat), loopback).await, loopback);
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(recorder.mappings.load(Ordering::SeqCst), 0);

        let unspecified: SocketAddr = "0.0.0.0:30301".parse().unwrap();
        assert_eq!(resolve_nat(Some(&nat), unspecified).await, unspecified);
        for _ in 0..50 {
            if recorder.mappings.load(Ordering::SeqCst) > 0 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(recorder.mappings.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_parse_nat_error() {
        let Err(err) = parse_nat("carrier-pigeon") else {
            panic!("unknown mechanism accepted");
        };
        assert!(matches!(err, BootnodeError::NatParse(_)));
        assert!(err.to_string().starts_with("--nat:"));
    }
}
