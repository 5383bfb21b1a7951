use libpcap_graph::ip::{decode_ipv4_packet, NetworkLayer};
use libpcap_graph::link::{decode_link_frame, LinkLayer};
use libpcap_graph::{AddressPair, Error, Packet, ParseContext, PcapAnalyzer};
use log::{debug, info, warn};

/// Counters for one run, reported at teardown
#[derive(Debug, Default, Clone, Copy)]
pub struct RunStats {
    /// Captured frames seen
    pub packets: usize,
    /// Address pairs emitted
    pub pairs: usize,
    /// Frames skipped: link type not Ethernet
    pub non_ethernet: usize,
    /// Frames skipped: EtherType not IPv4
    pub non_ipv4: usize,
    /// Entries skipped: truncated or corrupt headers
    pub malformed: usize,
}

/// Pipeline driver: decodes each captured frame down to the IPv4 header and
/// collects the (source, destination) pairs in capture order.
///
/// A malformed entry is logged with its capture index, counted, and skipped.
/// It never aborts the run: the remaining entries still produce output.
#[derive(Default)]
pub struct EdgeListAnalyzer {
    pairs: Vec<AddressPair>,
    stats: RunStats,
}

impl EdgeListAnalyzer {
    /// Emitted pairs, in capture order
    pub fn pairs(&self) -> &[AddressPair] {
        &self.pairs
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    fn extract_pair(&mut self, packet: &Packet) -> Result<Option<AddressPair>, Error> {
        let frame = match decode_link_frame(packet.data, packet.link_type)? {
            LinkLayer::Ethernet(frame) => frame,
            LinkLayer::Unsupported(link_type) => {
                debug!("ignoring frame with link type {}", link_type);
                self.stats.non_ethernet += 1;
                return Ok(None);
            }
        };
        match decode_ipv4_packet(&frame)? {
            NetworkLayer::Ipv4(ip) => Ok(Some(AddressPair {
                src: ip.source(),
                dst: ip.dest(),
            })),
            NetworkLayer::Unsupported(ether_type) => {
                debug!("ignoring frame with EtherType 0x{ether_type:04x}");
                self.stats.non_ipv4 += 1;
                Ok(None)
            }
        }
    }
}

impl PcapAnalyzer for EdgeListAnalyzer {
    fn handle_packet(&mut self, packet: &Packet, ctx: &ParseContext) -> Result<(), Error> {
        self.stats.packets += 1;
        match self.extract_pair(packet) {
            Ok(Some(pair)) => {
                self.pairs.push(pair);
                self.stats.pairs += 1;
            }
            Ok(None) => (),
            Err(e) if e.is_per_packet() => {
                warn!("skipping malformed entry (index {}): {}", ctx.pcap_index, e);
                self.stats.malformed += 1;
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    fn teardown(&mut self) {
        let s = &self.stats;
        info!("frames seen: {}", s.packets);
        info!("address pairs emitted: {}", s.pairs);
        if s.non_ethernet > 0 {
            info!("skipped (non-Ethernet link type): {}", s.non_ethernet);
        }
        if s.non_ipv4 > 0 {
            info!("skipped (non-IPv4 EtherType): {}", s.non_ipv4);
        }
        if s.malformed > 0 {
            info!("skipped (malformed): {}", s.malformed);
        }
    }
}
