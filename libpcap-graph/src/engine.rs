use crate::analyzer::PcapAnalyzer;
use crate::config::Config;
use crate::context::{InterfaceInfo, ParseContext};
use crate::error::Error;
use crate::packet::Packet;
use pcap_parser::{Block, PcapBlockOwned, PcapError};
use std::io::Read;

/// Common trait for pcap/pcap-ng engines
pub trait PcapEngine {
    /// Read all pcap data from the reader, calling the analyzer for each packet
    fn run(&mut self, reader: &mut (dyn Read + Send)) -> Result<(), Error>;
}

/// pcap/pcap-ng capture engine
///
/// `PcapDataEngine` iterates over a pcap input and abstracts the container
/// format (block types, interface descriptions, endianness) for the analysis:
/// the stored [`PcapAnalyzer`] receives each captured frame as raw link-layer
/// bytes plus the interface's link type, in capture order.
pub struct PcapDataEngine<A: PcapAnalyzer> {
    analyzer: A,
    ctx: ParseContext,
    interfaces: Vec<InterfaceInfo>,
    buffer_initial_capacity: usize,
}

impl<A: PcapAnalyzer> PcapDataEngine<A> {
    /// Build a new engine, taking ownership of the analyzer
    pub fn new(analyzer: A, config: &Config) -> Self {
        let buffer_initial_capacity = config
            .get_usize("buffer_initial_capacity")
            .unwrap_or(128 * 1024);
        PcapDataEngine {
            analyzer,
            ctx: ParseContext::default(),
            interfaces: Vec::new(),
            buffer_initial_capacity,
        }
    }

    pub fn data_analyzer(&self) -> &A {
        &self.analyzer
    }

    pub fn data_analyzer_mut(&mut self) -> &mut A {
        &mut self.analyzer
    }

    fn handle_block(&mut self, block: &PcapBlockOwned) -> Result<(), Error> {
        let packet = match block {
            PcapBlockOwned::NG(Block::SectionHeader(_)) => {
                trace!("pcap-ng: new section");
                self.interfaces.clear();
                return Ok(());
            }
            PcapBlockOwned::NG(Block::InterfaceDescription(idb)) => {
                trace!("pcap-ng: new interface, link type {}", idb.linktype);
                self.interfaces.push(InterfaceInfo {
                    link_type: idb.linktype,
                    snaplen: idb.snaplen,
                });
                return Ok(());
            }
            PcapBlockOwned::NG(Block::EnhancedPacket(epb)) => {
                self.ctx.pcap_index += 1;
                let if_info = self
                    .interfaces
                    .get(epb.if_id as usize)
                    .ok_or(Error::Generic("EnhancedPacket for unknown interface"))?;
                let data = epb
                    .data
                    .get(..epb.caplen as usize)
                    .ok_or(Error::Generic("EnhancedPacket data shorter than caplen"))?;
                Packet {
                    interface: epb.if_id,
                    link_type: if_info.link_type,
                    data,
                    caplen: epb.caplen,
                    origlen: epb.origlen,
                    pcap_index: self.ctx.pcap_index,
                }
            }
            PcapBlockOwned::NG(Block::SimplePacket(spb)) => {
                self.ctx.pcap_index += 1;
                let if_info = self
                    .interfaces
                    .first()
                    .ok_or(Error::Generic("SimplePacket without interface description"))?;
                // the block carries no caplen, only the original length
                let caplen = spb.data.len().min(spb.origlen as usize);
                let data = &spb.data[..caplen];
                Packet {
                    interface: 0,
                    link_type: if_info.link_type,
                    data,
                    caplen: caplen as u32,
                    origlen: spb.origlen,
                    pcap_index: self.ctx.pcap_index,
                }
            }
            PcapBlockOwned::NG(Block::InterfaceStatistics(_))
            | PcapBlockOwned::NG(Block::NameResolution(_)) => return Ok(()),
            PcapBlockOwned::NG(_) => {
                warn!("unsupported pcap-ng block");
                return Ok(());
            }
            PcapBlockOwned::LegacyHeader(hdr) => {
                trace!("legacy pcap, link type {}", hdr.network);
                self.interfaces.push(InterfaceInfo {
                    link_type: hdr.network,
                    snaplen: hdr.snaplen,
                });
                return Ok(());
            }
            PcapBlockOwned::Legacy(b) => {
                self.ctx.pcap_index += 1;
                let if_info = self
                    .interfaces
                    .first()
                    .ok_or(Error::Generic("packet block before pcap header"))?;
                let data = b
                    .data
                    .get(..b.caplen as usize)
                    .ok_or(Error::Generic("packet data shorter than caplen"))?;
                Packet {
                    interface: 0,
                    link_type: if_info.link_type,
                    data,
                    caplen: b.caplen,
                    origlen: b.origlen,
                    pcap_index: self.ctx.pcap_index,
                }
            }
        };
        self.analyzer.handle_packet(&packet, &self.ctx)
    }
}

impl<A: PcapAnalyzer> PcapEngine for PcapDataEngine<A> {
    fn run(&mut self, reader: &mut (dyn Read + Send)) -> Result<(), Error> {
        let mut reader = pcap_parser::create_reader(self.buffer_initial_capacity, reader)?;

        self.analyzer.init()?;
        self.ctx = ParseContext::default();
        self.interfaces.clear();

        // index of the packet preceding the last refill, to detect lack of progress
        let mut last_incomplete_index = usize::MAX;
        loop {
            match reader.next() {
                Ok((offset, block)) => {
                    self.handle_block(&block)?;
                    reader.consume(offset);
                }
                Err(PcapError::Eof) => break,
                Err(PcapError::Incomplete(_)) => {
                    if last_incomplete_index == self.ctx.pcap_index {
                        warn!("could not read complete data block");
                        warn!("hint: the reader buffer size may be too small, or the input file may be truncated");
                        break;
                    }
                    last_incomplete_index = self.ctx.pcap_index;
                    reader.refill()?;
                }
                Err(e) => return Err(e.into()),
            }
        }

        self.analyzer.teardown();
        Ok(())
    }
}
