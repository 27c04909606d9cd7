//! Delimited-text ingestion into a [`LegacyGraph`](crate::model::LegacyGraph)

mod parser;
mod raw_types;

pub use parser::{parse_edges_csv, parse_nodes_csv, read_legacy_graph};
pub use raw_types::{RawEdgeRow, RawNodeRow};
