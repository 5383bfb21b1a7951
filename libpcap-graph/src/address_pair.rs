use std::fmt;
use std::net::Ipv4Addr;

/// The (source, destination) host pair extracted from one IPv4 packet.
///
/// Displays in the two-token, whitespace-separated edge-list form consumed by
/// the graph builder: `"<src> <dst>"` in dotted decimal.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct AddressPair {
    pub src: Ipv4Addr,
    pub dst: Ipv4Addr,
}

impl fmt::Display for AddressPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.src, self.dst)
    }
}
