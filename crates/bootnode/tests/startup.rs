//! Library-level startup flow: identity, policy, endpoint and dispatch.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use bn_discovery::{DiscoveryMode, LocalNode, MemoryNodeDb, RestrictionPolicy};
use bootnode::endpoint::{banner_addr, bind, notice, parse_nat, resolve_nat};
use bootnode::policy::{compile_filter, compile_netlist};
use bootnode::registry::{parse_all, BSC_BOOTNODES};
use bootnode::{dispatch, Configuration, NodeIdentity, RunningEngine};
use tokio::net::UdpSocket;

#[tokio::test]
async fn test_unspecified_bind_shows_loopback_in_banner() {
    let identity = NodeIdentity::generate().unwrap();
    let (_socket, local) = bind(":0").await.unwrap();
    let advertised = resolve_nat(None, local).await;

    assert_eq!(advertised, local);
    assert_eq!(banner_addr(advertised).ip(), IpAddr::from([127, 0, 0, 1]));

    let banner = notice(identity.public_key(), advertised);
    let first = banner.lines().next().unwrap();
    assert_eq!(
        first,
        format!(
            "enode://{}@127.0.0.1:0?discport={}",
            identity.public_id_hex(),
            local.port()
        )
    );
}

#[tokio::test]
async fn test_extip_replaces_ip_and_keeps_port() {
    let nat = parse_nat("extip:198.51.100.20").unwrap();
    let (_socket, local) = bind("127.0.0.1:0").await.unwrap();

    let advertised = resolve_nat(nat.as_ref(), local).await;
    assert_eq!(
        advertised,
        SocketAddr::new("198.51.100.20".parse().unwrap(), local.port())
    );
}

#[test]
fn test_identity_round_trip_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("node.key");

    let identity = NodeIdentity::generate().unwrap();
    identity.persist(&path).unwrap();
    let loaded = NodeIdentity::load_from_file(&path).unwrap();

    assert_eq!(loaded.public_id_hex(), identity.public_id_hex());
}

#[tokio::test]
async fn test_full_assembly_with_restrictions() {
    let identity = NodeIdentity::generate().unwrap();
    let netlist = compile_netlist("52.0.0.0/8, 127.0.0.0/8").unwrap();
    let filter = compile_filter("bsc").unwrap();
    let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let local = LocalNode::new(
        Arc::new(MemoryNodeDb::new()),
        identity.public_key(),
        socket.local_addr().unwrap(),
    )
    .unwrap();

    let config = Configuration {
        identity,
        restrictions: RestrictionPolicy::new(netlist, filter),
        bootnodes: parse_all(BSC_BOOTNODES).unwrap(),
        mode: DiscoveryMode::Topic,
    };
    let engine = dispatch(socket, &local, config).unwrap();

    assert!(matches!(engine, RunningEngine::Topic(_)));
    // Bootnodes are seeded regardless of the filter
    assert_eq!(engine.core().table().len(), BSC_BOOTNODES.len());
    engine.close().await;
}
