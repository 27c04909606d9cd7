use std::io::Read;
use std::path::Path;

use csv::{ByteRecord, ReaderBuilder, Trim};
use log::{info, warn};

use super::raw_types::{RawEdgeRow, RawNodeRow};
use crate::Error;
use crate::loading::builder::open;
use crate::model::streets::legacy::LegacyEdge;
use crate::model::{LegacyGraph, Node};

/// Loads `nodes.csv` and `edges.csv` into a [`LegacyGraph`].
///
/// Malformed rows are skipped with a warning; only unreadable files abort the load.
/// Fields are decoded as UTF-8 with invalid bytes replaced.
pub fn read_legacy_graph(nodes_path: &Path, edges_path: &Path) -> Result<LegacyGraph, Error> {
    let nodes = parse_nodes_csv(open(nodes_path, "nodes CSV")?)?;
    let edges = parse_edges_csv(open(edges_path, "edges CSV")?)?;
    let graph = LegacyGraph::new(nodes, edges);
    info!(
        "Loaded legacy graph: {} nodes, {} edges",
        graph.nodes().len(),
        crate::model::RoadNetwork::edge_count(&graph)
    );
    Ok(graph)
}

pub fn parse_nodes_csv<R: Read>(reader: R) -> Result<Vec<Node>, Error> {
    let mut nodes = Vec::new();
    for (line, record) in records(reader) {
        match RawNodeRow::from(&record?).into_node() {
            Ok(node) => nodes.push(node),
            Err(reason) => warn!("Line {line}: invalid node row ({reason}), skipping"),
        }
    }
    Ok(nodes)
}

pub fn parse_edges_csv<R: Read>(reader: R) -> Result<Vec<LegacyEdge>, Error> {
    let mut edges = Vec::new();
    for (line, record) in records(reader) {
        let record = record?;
        if record.iter().all(<[u8]>::is_empty) {
            continue;
        }
        match RawEdgeRow::from(&record).into_edge() {
            Ok(edge) => edges.push(edge),
            Err(reason) => warn!("Line {line}: {reason}, skipping"),
        }
    }
    info!("Successfully parsed {} valid edges", edges.len());
    Ok(edges)
}

/// Header-skipping, ragged-row tolerant record iterator with 1-based line numbers.
///
/// Only I/O failures are yielded as errors.
fn records<R: Read>(reader: R) -> impl Iterator<Item = (u64, Result<ByteRecord, Error>)> {
    ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader)
        .into_byte_records()
        .map(|record| match record {
            Ok(r) => (r.position().map_or(0, csv::Position::line), Ok(r)),
            Err(e) => (
                e.position().map_or(0, csv::Position::line),
                Err(Error::CsvError(e).logged()),
            ),
        })
}
