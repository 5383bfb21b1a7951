//! Edge-list output and host graph rendering.
//!
//! The edge list is the interface between extraction and rendering: one
//! `"<src> <dst>"` line per packet, whitespace separated. The graph builder
//! consumes exactly that format, so the renderer works equally on a file
//! produced by an earlier run.

use std::collections::{BTreeSet, HashMap};
use std::fmt::Write as _;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

use libpcap_graph::AddressPair;
use log::debug;

/// Write the edge list, one pair per line, capture order preserved
pub fn write_edge_list<W: Write>(pairs: &[AddressPair], writer: &mut W) -> io::Result<()> {
    for pair in pairs {
        writeln!(writer, "{pair}")?;
    }
    Ok(())
}

/// Undirected host graph.
///
/// Nodes are kept in first-appearance order so the rendering is deterministic
/// for a given capture. Edges are deduplicated and direction-insensitive;
/// a pair whose two addresses are equal registers the node but no edge.
#[derive(Default)]
pub struct HostGraph {
    nodes: Vec<String>,
    index: HashMap<String, usize>,
    edges: BTreeSet<(usize, usize)>,
}

impl HostGraph {
    fn node_id(&mut self, name: &str) -> usize {
        if let Some(&id) = self.index.get(name) {
            return id;
        }
        let id = self.nodes.len();
        self.nodes.push(name.to_string());
        self.index.insert(name.to_string(), id);
        id
    }

    pub fn add_edge(&mut self, a: &str, b: &str) {
        let ia = self.node_id(a);
        let ib = self.node_id(b);
        if ia != ib {
            self.edges.insert((ia.min(ib), ia.max(ib)));
        }
    }

    /// Build a graph from edge-list text: two whitespace-separated tokens per
    /// line. Empty lines are ignored; anything else is malformed input.
    pub fn from_edge_list<R: BufRead>(reader: R) -> io::Result<HostGraph> {
        let mut graph = HostGraph::default();
        for (lineno, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let mut tokens = line.split_whitespace();
            match (tokens.next(), tokens.next(), tokens.next()) {
                (Some(a), Some(b), None) => graph.add_edge(a, b),
                _ => {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidData,
                        format!("edge list line {}: expected two tokens", lineno + 1),
                    ))
                }
            }
        }
        Ok(graph)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Render the graph as an SVG document: nodes on a circle, labeled,
    /// straight edges. Layout depends only on insertion order.
    pub fn to_svg(&self) -> String {
        const SIZE: f64 = 1000.0;
        const MARGIN: f64 = 80.0;
        let center = SIZE / 2.0;
        let radius = center - MARGIN;
        let n = self.nodes.len();

        let pos = |id: usize| -> (f64, f64) {
            if n == 1 {
                return (center, center);
            }
            let angle = 2.0 * std::f64::consts::PI * (id as f64) / (n as f64);
            (center + radius * angle.cos(), center + radius * angle.sin())
        };

        let mut svg = String::new();
        let _ = writeln!(svg, r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{SIZE}" height="{SIZE}" viewBox="0 0 {SIZE} {SIZE}">"#
        );
        for &(a, b) in &self.edges {
            let (x1, y1) = pos(a);
            let (x2, y2) = pos(b);
            let _ = writeln!(
                svg,
                r##"  <line x1="{x1:.1}" y1="{y1:.1}" x2="{x2:.1}" y2="{y2:.1}" stroke="#888888" stroke-width="1"/>"##
            );
        }
        for (id, name) in self.nodes.iter().enumerate() {
            let (x, y) = pos(id);
            let _ = writeln!(
                svg,
                r##"  <circle cx="{x:.1}" cy="{y:.1}" r="16" fill="#7fb3d5" stroke="#34495e"/>"##
            );
            let label_y = y - 22.0;
            let _ = writeln!(
                svg,
                r#"  <text x="{x:.1}" y="{label_y:.1}" text-anchor="middle" font-family="monospace" font-size="12">{name}</text>"#
            );
        }
        svg.push_str("</svg>\n");
        svg
    }
}

/// Write the rendered graph to `path`
pub fn export_svg(graph: &HostGraph, path: &Path) -> io::Result<()> {
    debug!(
        "exporting graph ({} nodes, {} edges) to {}",
        graph.node_count(),
        graph.edge_count(),
        path.display()
    );
    fs::write(path, graph.to_svg())
}
