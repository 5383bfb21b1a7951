use pcap_parser::PcapError;
use std::convert::From;
use std::fmt::Debug;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Generic(&'static str),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Capture container could not be read. Aborts the run, unlike the
    /// per-packet decode errors below.
    #[error("pcap parsing error: {0}")]
    Pcap(String),

    /// Link-layer buffer shorter than the fixed Ethernet header.
    #[error("truncated link-layer frame: {len} bytes, need {min}")]
    MalformedFrame { len: usize, min: usize },

    /// Network-layer header inconsistent with the available bytes.
    #[error("malformed IPv4 packet: {0}")]
    MalformedPacket(&'static str),
}

impl From<&'static str> for Error {
    fn from(s: &'static str) -> Self {
        Error::Generic(s)
    }
}

// `PcapError` borrows the input buffer, so keep the rendered form only.
impl<I: Debug> From<PcapError<I>> for Error {
    fn from(e: PcapError<I>) -> Self {
        Error::Pcap(format!("{e:?}"))
    }
}

impl Error {
    /// True for errors scoped to a single capture entry. The pipeline skips
    /// the entry and continues; anything else aborts the run.
    pub fn is_per_packet(&self) -> bool {
        matches!(
            self,
            Error::MalformedFrame { .. } | Error::MalformedPacket(_)
        )
    }
}
