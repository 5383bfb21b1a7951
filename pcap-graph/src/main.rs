#![warn(clippy::all)]

#[macro_use]
extern crate log;

use clap::{crate_version, Parser};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use std::fs::File;
use std::io;
use std::path::Path;

use libpcap_graph::Config;
use pcap_graph::{pcap_graph_file, GraphOptions};

/// Render the host conversation graph of a capture file
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<String>,

    /// Be verbose
    #[arg(short, long)]
    verbose: bool,

    /// Input capture file (pcap or pcap-ng; '-' for stdin)
    input: String,

    /// Output basename: writes <basename>.txt and <basename>.svg
    output: String,
}

fn load_config(config: &mut Config, filename: &str) -> Result<(), io::Error> {
    debug!("Loading configuration {filename}");
    let path = Path::new(&filename);
    let file = File::open(path)?;
    config.load_config(file)
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let env_filter = EnvFilter::try_from_env("PCAP_GRAPH_LOG")
        .unwrap_or_else(|_| EnvFilter::from_default_env().add_directive(default_level.into()));
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .compact()
        .init();

    info!("pcap-graph {}", crate_version!());

    let mut config = Config::default();
    if let Some(filename) = args.config.as_ref() {
        load_config(&mut config, filename)?;
    }

    let options = GraphOptions { config };
    let stats = pcap_graph_file(&args.input, &args.output, &options)?;

    info!(
        "pcap-graph: done ({} pairs from {} frames), exiting",
        stats.pairs, stats.packets
    );
    Ok(())
}
