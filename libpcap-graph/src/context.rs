use pcap_parser::Linktype;

/// pcap parsing context
#[derive(Clone, Default)]
pub struct ParseContext {
    /// Index of current packet in pcap file, starting at 1
    pub pcap_index: usize,
}

/// Information related to a network interface used for capture
#[derive(Clone, Copy)]
pub struct InterfaceInfo {
    /// The `Linktype` used for data format
    pub link_type: Linktype,
    /// Maximum number of bytes stored per packet
    pub snaplen: u32,
}

impl Default for InterfaceInfo {
    fn default() -> Self {
        InterfaceInfo {
            link_type: Linktype(0),
            snaplen: 0,
        }
    }
}
