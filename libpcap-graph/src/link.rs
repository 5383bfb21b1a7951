//! Link-layer frame decoding.
//!
//! Ethernet II only. The decoder is a zero-copy view: field accessors slice
//! directly into the captured bytes, and the payload aliases the remainder of
//! the buffer instead of copying it.

use crate::error::Error;
use pcap_parser::Linktype;

/// Length of the fixed Ethernet header: destination, source, EtherType.
pub const ETHERNET_HEADER_LEN: usize = 14;

/// EtherType for IPv4
pub const ETHERTYPE_IPV4: u16 = 0x0800;

/// Zero-copy view over an Ethernet frame.
///
/// The constructor enforces the 14-byte minimum so the accessors can index
/// the fixed header without further checks.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct EthernetFrame<'a> {
    bytes: &'a [u8],
}

impl<'a> EthernetFrame<'a> {
    /// Create a new frame view.
    ///
    /// Fails with [`Error::MalformedFrame`] when the buffer is shorter than
    /// the fixed header. A truncated frame is invalid input, not something to
    /// paper over with short slices.
    pub fn new(bytes: &'a [u8]) -> Result<EthernetFrame<'a>, Error> {
        if bytes.len() < ETHERNET_HEADER_LEN {
            return Err(Error::MalformedFrame {
                len: bytes.len(),
                min: ETHERNET_HEADER_LEN,
            });
        }
        Ok(EthernetFrame { bytes })
    }

    /// Destination MAC address, bytes [0,6)
    pub fn dest(&self) -> [u8; 6] {
        let mut mac = [0u8; 6];
        mac.copy_from_slice(&self.bytes[0..6]);
        mac
    }

    /// Source MAC address, bytes [6,12)
    pub fn src(&self) -> [u8; 6] {
        let mut mac = [0u8; 6];
        mac.copy_from_slice(&self.bytes[6..12]);
        mac
    }

    /// EtherType field, bytes [12,14), network byte order
    pub fn ether_type(&self) -> u16 {
        u16::from_be_bytes([self.bytes[12], self.bytes[13]])
    }

    /// Encapsulated data, everything after the fixed header.
    /// Aliases the underlying buffer.
    pub fn payload(&self) -> &'a [u8] {
        &self.bytes[ETHERNET_HEADER_LEN..]
    }
}

/// Link-layer dispatch result.
///
/// `Unsupported` is a normal filtering outcome (the capture interface uses a
/// link type this tool does not decode), not an error.
pub enum LinkLayer<'a> {
    Ethernet(EthernetFrame<'a>),
    Unsupported(Linktype),
}

/// Decode the link-layer frame of one capture entry.
///
/// `link_type` is the tag supplied by the capture container for the entry's
/// interface. Only [`Linktype::ETHERNET`] is decoded; everything else yields
/// [`LinkLayer::Unsupported`].
pub fn decode_link_frame(raw: &[u8], link_type: Linktype) -> Result<LinkLayer<'_>, Error> {
    match link_type {
        Linktype::ETHERNET => Ok(LinkLayer::Ethernet(EthernetFrame::new(raw)?)),
        other => Ok(LinkLayer::Unsupported(other)),
    }
}
