use super::*;
use shared_crypto::Secp256k1KeyPair;
use std::net::{Ipv4Addr, Ipv6Addr};

const BSC_KEY: &str = "1cc4534b14cfe351ab740a1418ab944a234ca2f702915eadb7e558a02010cb7c\
                       5a8c295a3b56bcefa7701c07752acd5539cb13df2aab8ae2d98934d712611443";

fn test_pubkey() -> Secp256k1PublicKey {
    let mut secret = [0u8; 32];
    secret[31] = 1;
    Secp256k1KeyPair::from_bytes(&secret).unwrap().public_key()
}

#[test]
fn test_parse_plain_enode() {
    let url = format!("enode://{BSC_KEY}@52.71.43.172:30311");
    let record: NodeRecord = url.parse().unwrap();

    assert_eq!(record.pubkey.to_hex(), BSC_KEY);
    assert_eq!(record.ip, IpAddr::V4(Ipv4Addr::new(52, 71, 43, 172)));
    assert_eq!(record.tcp_port, 30311);
    assert_eq!(record.udp_port, 30311);
    assert_eq!(record.seq, 0);
    assert_eq!(record.network, None);
}

#[test]
fn test_parse_discport() {
    let url = format!("enode://{BSC_KEY}@10.0.0.1:30303?discport=30301");
    let record: NodeRecord = url.parse().unwrap();

    assert_eq!(record.tcp_port, 30303);
    assert_eq!(record.udp_port, 30301);
    assert_eq!(record.url_v4(), url);
}

#[test]
fn test_parse_ipv6() {
    let url = format!("enode://{BSC_KEY}@[::1]:30303");
    let record: NodeRecord = url.parse().unwrap();

    assert_eq!(record.ip, IpAddr::V6(Ipv6Addr::LOCALHOST));
    assert_eq!(record.to_string(), url);
}

#[test]
fn test_parse_rejects_bad_input() {
    assert_eq!(
        "http://abc@1.2.3.4:1".parse::<NodeRecord>(),
        Err(RecordError::InvalidScheme)
    );
    assert_eq!(
        format!("enode://{BSC_KEY}").parse::<NodeRecord>(),
        Err(RecordError::MissingAddress)
    );
    assert!(matches!(
        "enode://abcd@1.2.3.4:30303".parse::<NodeRecord>(),
        Err(RecordError::InvalidPublicKey(_))
    ));
    assert!(matches!(
        format!("enode://{BSC_KEY}@bootnode.example.org:30303").parse::<NodeRecord>(),
        Err(RecordError::InvalidAddress(_))
    ));
    assert!(matches!(
        format!("enode://{BSC_KEY}@1.2.3.4:30303?discport=x").parse::<NodeRecord>(),
        Err(RecordError::InvalidDiscPort(_))
    ));
}

#[test]
fn test_not_on_curve_key_rejected() {
    let bogus = "ff".repeat(64);
    assert!(matches!(
        format!("enode://{bogus}@1.2.3.4:30303").parse::<NodeRecord>(),
        Err(RecordError::InvalidPublicKey(_))
    ));
}

#[test]
fn test_validate_complete() {
    let pubkey = test_pubkey();

    let ok = NodeRecord::new_v4(pubkey, IpAddr::V4(Ipv4Addr::new(1, 2, 3, 4)), 0, 30301);
    assert_eq!(ok.validate_complete(), Ok(()));

    let no_ip = NodeRecord::new_v4(pubkey, IpAddr::V4(Ipv4Addr::UNSPECIFIED), 0, 30301);
    assert_eq!(no_ip.validate_complete(), Err(RecordError::MissingIp));

    let no_udp = NodeRecord::new_v4(pubkey, IpAddr::V4(Ipv4Addr::new(1, 2, 3, 4)), 30303, 0);
    assert_eq!(no_udp.validate_complete(), Err(RecordError::MissingUdpPort));
}

#[test]
fn test_banner_style_url() {
    let pubkey = test_pubkey();
    let record = NodeRecord::new_v4(pubkey, IpAddr::V4(Ipv4Addr::LOCALHOST), 0, 30301);

    assert_eq!(
        record.url_v4(),
        format!("enode://{}@127.0.0.1:0?discport=30301", pubkey.to_hex())
    );
}

#[test]
fn test_node_id_matches_key() {
    let record: NodeRecord = format!("enode://{BSC_KEY}@52.71.43.172:30311")
        .parse()
        .unwrap();
    let id = record.node_id();

    assert_eq!(id.0, record.pubkey.to_node_id());
    assert_eq!(id.to_string().len(), 64);
    assert_eq!(id.terminal_string(), id.to_string()[..16]);
}

#[test]
fn test_with_network_and_seq() {
    let record = NodeRecord::new_v4(test_pubkey(), IpAddr::V4(Ipv4Addr::LOCALHOST), 0, 1)
        .with_network(56)
        .with_seq(7);

    assert_eq!(record.network, Some(56));
    assert_eq!(record.seq, 7);
}
