use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use flate2::read::GzDecoder;
use libpcap_graph::{Config, PcapDataEngine, PcapEngine};
use log::{error, info};

pub mod analyzer;
pub mod graph;

use analyzer::{EdgeListAnalyzer, RunStats};
use graph::HostGraph;

pub struct GraphOptions {
    pub config: Config,
}

/// Extract host conversation pairs from a capture file and render the graph
///
/// - `input_filename` must be a pcap or pcap-ng file. `.gz` inputs are
///   decompressed; the special value "-" reads standard input
/// - two artifacts are written: `<output_basename>.txt`, the edge list (one
///   `"<src> <dst>"` line per IPv4-over-Ethernet packet, capture order), and
///   `<output_basename>.svg`, the rendered undirected host graph
///
/// The graph is rebuilt from the edge-list file rather than from in-memory
/// state: the text format is the contract between extraction and rendering.
pub fn pcap_graph_file<S1: AsRef<str>, S2: AsRef<str>>(
    input_filename: S1,
    output_basename: S2,
    options: &GraphOptions,
) -> Result<RunStats, io::Error> {
    let input_filename = input_filename.as_ref();
    let basename = output_basename.as_ref();
    let mut input_reader = get_reader(input_filename)?;

    let analyzer = EdgeListAnalyzer::default();
    let mut engine = PcapDataEngine::new(analyzer, &options.config);
    engine
        .run(&mut input_reader)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;
    let analyzer = engine.data_analyzer();

    let edge_list_filename = format!("{basename}.txt");
    let outfile = File::create(Path::new(&edge_list_filename))?;
    let mut writer = BufWriter::new(outfile);
    graph::write_edge_list(analyzer.pairs(), &mut writer)?;
    writer.flush()?;

    let infile = File::open(Path::new(&edge_list_filename))?;
    let host_graph = HostGraph::from_edge_list(BufReader::new(infile))?;
    info!(
        "host graph: {} nodes, {} edges",
        host_graph.node_count(),
        host_graph.edge_count()
    );

    let svg_filename = format!("{basename}.svg");
    graph::export_svg(&host_graph, Path::new(&svg_filename))?;

    Ok(*analyzer.stats())
}

fn get_reader(input_filename: &str) -> io::Result<Box<dyn Read + Send>> {
    let input_reader = if input_filename == "-" {
        Box::new(io::stdin()) as Box<dyn Read + Send>
    } else {
        let path = Path::new(input_filename);
        let file = File::open(path).map_err(|e| {
            error!("could not open input file '{}'", input_filename);
            e
        })?;
        if input_filename.ends_with(".gz") {
            Box::new(GzDecoder::new(file))
        } else {
            Box::new(file) as Box<dyn Read + Send>
        }
    };
    Ok(input_reader)
}
