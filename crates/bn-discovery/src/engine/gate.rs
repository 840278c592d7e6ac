//! Structural packet checks applied before any decoding.

use shared_crypto::keccak256;

use super::MAX_PACKET_SIZE;

/// Cheap admission check for inbound datagrams.
pub trait PacketGate: Send + Sync + 'static {
    /// Protocol name for logs.
    fn name(&self) -> &'static str;

    /// Whether the datagram is worth handing to the decoder.
    fn admit(&self, packet: &[u8]) -> bool;
}

/// Classic packets: `hash(32) || signature(65) || type(1) || data`, where the
/// hash covers everything after it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassicGate;

impl ClassicGate {
    pub const HEADER_SIZE: usize = 32 + 65 + 1;
}

impl PacketGate for ClassicGate {
    fn name(&self) -> &'static str {
        "classic"
    }

    fn admit(&self, packet: &[u8]) -> bool {
        if packet.len() < Self::HEADER_SIZE || packet.len() > MAX_PACKET_SIZE {
            return false;
        }
        let (hash, rest) = packet.split_at(32);
        hash == keccak256(rest)
    }
}

/// Topic-protocol packets are masked, so only the size bounds can be
/// checked before the header is unmasked.
#[derive(Debug, Clone, Copy, Default)]
pub struct TopicGate;

impl TopicGate {
    /// Masking IV, static header and the smallest authdata.
    pub const MIN_PACKET_SIZE: usize = 63;
}

impl PacketGate for TopicGate {
    fn name(&self) -> &'static str {
        "topic"
    }

    fn admit(&self, packet: &[u8]) -> bool {
        (Self::MIN_PACKET_SIZE..=MAX_PACKET_SIZE).contains(&packet.len())
    }
}
