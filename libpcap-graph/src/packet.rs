use pcap_parser::Linktype;

/// One captured frame, abstracted from the container format.
///
/// `data` is the raw link-layer frame truncated to the capture length; the
/// link-layer headers are not decoded here. Decoding is the job of
/// [`crate::link::decode_link_frame`], which needs the `link_type` tag to know
/// what the bytes are.
pub struct Packet<'a> {
    pub interface: u32,
    pub link_type: Linktype,
    pub data: &'a [u8],
    pub caplen: u32,
    pub origlen: u32,
    pub pcap_index: usize,
}
