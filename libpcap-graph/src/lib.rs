#[macro_use]
extern crate log;

mod address_pair;
mod analyzer;
mod config;
mod context;
mod engine;
mod error;
pub mod ip;
pub mod link;
mod packet;

pub use address_pair::AddressPair;
pub use analyzer::*;
pub use config::Config;
pub use context::*;
pub use engine::*;
pub use error::*;
pub use packet::Packet;

pub use pcap_parser::Linktype;
