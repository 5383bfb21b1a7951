//! IPv4 packet decoding.
//!
//! Follows the RFC 791 header layout. Only the fields needed to identify the
//! conversation are exposed; options are accounted for in the header-length
//! arithmetic but not parsed.

use crate::error::Error;
use crate::link::{EthernetFrame, ETHERTYPE_IPV4};
use std::net::Ipv4Addr;

/// Minimum IPv4 header length in bytes (IHL of 5, no options)
pub const IPV4_MIN_HEADER_LEN: usize = 20;

/// Zero-copy view over an IPv4 packet.
///
/// The constructor validates the length fields declared by the header against
/// the bytes actually available. An out-of-range IHL or total length means the
/// packet is truncated or corrupt and fails loudly, it is never clamped to the
/// buffer: clamping would turn corruption into valid-looking data.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Ipv4Packet<'a> {
    bytes: &'a [u8],
}

impl<'a> Ipv4Packet<'a> {
    /// Create a new packet view over a frame payload.
    ///
    /// Fails with [`Error::MalformedPacket`] when the buffer is shorter than
    /// the minimum header, when the IHL field encodes less than the minimum
    /// header, or when the total length is smaller than the header or larger
    /// than the available bytes.
    pub fn new(bytes: &'a [u8]) -> Result<Ipv4Packet<'a>, Error> {
        if bytes.len() < IPV4_MIN_HEADER_LEN {
            return Err(Error::MalformedPacket(
                "buffer shorter than minimum IPv4 header",
            ));
        }
        let packet = Ipv4Packet { bytes };
        let header_len = packet.header_len();
        let total_len = packet.total_len();
        if header_len < IPV4_MIN_HEADER_LEN {
            return Err(Error::MalformedPacket("header length field below minimum"));
        }
        if total_len < header_len {
            return Err(Error::MalformedPacket(
                "total length smaller than header length",
            ));
        }
        if total_len > bytes.len() {
            return Err(Error::MalformedPacket(
                "total length exceeds captured bytes",
            ));
        }
        Ok(packet)
    }

    /// IP version, top nibble of byte 0. Expected to be 4.
    pub fn version(&self) -> u8 {
        self.bytes[0] >> 4
    }

    /// Header length in bytes: the IHL field counts 32-bit words.
    pub fn header_len(&self) -> usize {
        ((self.bytes[0] & 0x0f) as usize) * 4
    }

    /// Total packet length (header + data), bytes [2,4), network byte order
    pub fn total_len(&self) -> usize {
        u16::from_be_bytes([self.bytes[2], self.bytes[3]]) as usize
    }

    /// Transport-layer protocol number, byte 9
    pub fn protocol(&self) -> u8 {
        self.bytes[9]
    }

    /// Source address, bytes [12,16)
    pub fn source(&self) -> Ipv4Addr {
        let mut addr = [0u8; 4];
        addr.copy_from_slice(&self.bytes[12..16]);
        Ipv4Addr::from(addr)
    }

    /// Destination address, bytes [16,20)
    pub fn dest(&self) -> Ipv4Addr {
        let mut addr = [0u8; 4];
        addr.copy_from_slice(&self.bytes[16..20]);
        Ipv4Addr::from(addr)
    }

    /// Header bytes, including options when the IHL is above the minimum
    pub fn header(&self) -> &'a [u8] {
        &self.bytes[..self.header_len()]
    }

    /// Packet data, bounded by the declared total length. Slicing to the
    /// total length discards any link-layer padding present in the capture.
    pub fn payload(&self) -> &'a [u8] {
        &self.bytes[self.header_len()..self.total_len()]
    }
}

/// Network-layer dispatch result.
///
/// A frame carrying anything but IPv4 is `Unsupported` with the EtherType it
/// carried: a normal filtering outcome, not an error.
pub enum NetworkLayer<'a> {
    Ipv4(Ipv4Packet<'a>),
    Unsupported(u16),
}

/// Decode the network-layer packet carried by an Ethernet frame.
///
/// This is the single authoritative EtherType check of the pipeline: callers
/// do not need to re-check the frame type.
pub fn decode_ipv4_packet<'a>(frame: &EthernetFrame<'a>) -> Result<NetworkLayer<'a>, Error> {
    let ether_type = frame.ether_type();
    if ether_type != ETHERTYPE_IPV4 {
        return Ok(NetworkLayer::Unsupported(ether_type));
    }
    Ok(NetworkLayer::Ipv4(Ipv4Packet::new(frame.payload())?))
}

#[cfg(test)]
mod tests {
    use super::*;

    // 20-byte header, 4 bytes of data, protocol 17 (UDP)
    fn sample_packet() -> Vec<u8> {
        let mut bytes = vec![
            0x45, 0x00, 0x00, 0x18, // version/IHL, DSCP/ECN, total length 24
            0x00, 0x00, 0x40, 0x00, // id, flags/fragment offset
            0x40, 0x11, 0x00, 0x00, // TTL, protocol, checksum
            10, 0, 53, 7, // source
            104, 17, 239, 159, // destination
        ];
        bytes.extend_from_slice(&[0xca, 0xfe, 0xba, 0xbe]);
        bytes
    }

    fn wrap_in_frame(ether_type: u16, payload: &[u8]) -> Vec<u8> {
        let mut frame = vec![0u8; 12];
        frame.extend_from_slice(&ether_type.to_be_bytes());
        frame.extend_from_slice(payload);
        frame
    }

    #[test]
    fn packet_fields_match_header() {
        let bytes = sample_packet();
        let packet = Ipv4Packet::new(&bytes).unwrap();
        assert_eq!(packet.version(), 4);
        assert_eq!(packet.header_len(), 20);
        assert_eq!(packet.total_len(), 24);
        assert_eq!(packet.protocol(), 17);
        assert_eq!(packet.source(), Ipv4Addr::new(10, 0, 53, 7));
        assert_eq!(packet.dest(), Ipv4Addr::new(104, 17, 239, 159));
        assert_eq!(packet.header(), &bytes[..20]);
        assert_eq!(packet.payload(), &[0xca, 0xfe, 0xba, 0xbe]);
    }

    #[test]
    fn addresses_round_trip() {
        let mut bytes = sample_packet();
        bytes[12..16].copy_from_slice(&[192, 168, 1, 42]);
        bytes[16..20].copy_from_slice(&[192, 168, 1, 1]);
        let packet = Ipv4Packet::new(&bytes).unwrap();
        assert_eq!(packet.source().octets(), [192, 168, 1, 42]);
        assert_eq!(packet.dest().octets(), [192, 168, 1, 1]);
    }

    #[test]
    fn payload_slicing_drops_link_padding() {
        let mut bytes = sample_packet();
        // Ethernet pads short frames; the declared total length wins
        bytes.extend_from_slice(&[0u8; 20]);
        let packet = Ipv4Packet::new(&bytes).unwrap();
        assert_eq!(packet.payload(), &[0xca, 0xfe, 0xba, 0xbe]);
    }

    #[test]
    fn short_buffer_is_malformed() {
        let bytes = sample_packet();
        let res = Ipv4Packet::new(&bytes[..19]);
        assert!(matches!(res, Err(Error::MalformedPacket(_))));
    }

    #[test]
    fn header_length_below_minimum_is_malformed() {
        let mut bytes = sample_packet();
        bytes[0] = 0x44; // IHL 4 -> 16-byte header
        let res = Ipv4Packet::new(&bytes);
        assert!(matches!(res, Err(Error::MalformedPacket(_))));
    }

    #[test]
    fn total_length_below_header_length_is_malformed() {
        let mut bytes = sample_packet();
        bytes[2..4].copy_from_slice(&16u16.to_be_bytes());
        let res = Ipv4Packet::new(&bytes);
        assert!(matches!(res, Err(Error::MalformedPacket(_))));
    }

    #[test]
    fn total_length_beyond_buffer_is_malformed_not_truncated() {
        let mut bytes = sample_packet();
        bytes[2..4].copy_from_slice(&1000u16.to_be_bytes());
        let res = Ipv4Packet::new(&bytes);
        assert!(matches!(res, Err(Error::MalformedPacket(_))));
    }

    #[test]
    fn non_ipv4_ether_type_is_filtered_not_parsed() {
        // ARP payload much shorter than an IPv4 header: must not be touched
        let frame_bytes = wrap_in_frame(0x0806, &[0, 1]);
        let frame = EthernetFrame::new(&frame_bytes).unwrap();
        let res = decode_ipv4_packet(&frame).unwrap();
        assert!(matches!(res, NetworkLayer::Unsupported(0x0806)));
    }

    #[test]
    fn ipv4_frame_decodes_through_dispatch() {
        let payload = sample_packet();
        let frame_bytes = wrap_in_frame(ETHERTYPE_IPV4, &payload);
        let frame = EthernetFrame::new(&frame_bytes).unwrap();
        match decode_ipv4_packet(&frame).unwrap() {
            NetworkLayer::Ipv4(packet) => {
                assert_eq!(packet.source(), Ipv4Addr::new(10, 0, 53, 7));
            }
            NetworkLayer::Unsupported(_) => panic!("expected IPv4"),
        }
    }

    #[test]
    fn truncated_ipv4_payload_is_malformed() {
        let frame_bytes = wrap_in_frame(ETHERTYPE_IPV4, &[0x45, 0x00]);
        let frame = EthernetFrame::new(&frame_bytes).unwrap();
        let res = decode_ipv4_packet(&frame);
        assert!(matches!(res, Err(Error::MalformedPacket(_))));
    }
}
