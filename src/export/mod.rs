//! Route export to GPX tracks and GeoJSON features.

mod to_geojson;
mod to_gpx;

use roadroute_core::{Node, PathResult, RoadNetwork};

use crate::error::CliError;

pub use to_geojson::{export_geojson, route_feature};
pub use to_gpx::{export_gpx, write_gpx};

/// Nodes along the found path, source first
pub fn path_nodes<G: RoadNetwork + ?Sized>(
    graph: &G,
    result: &PathResult,
) -> Result<Vec<Node>, CliError> {
    result
        .path()?
        .into_iter()
        .map(|index| {
            graph
                .node(index)
                .copied()
                .ok_or_else(|| roadroute_core::Error::InvalidNodeIndex(index).into())
        })
        .collect()
}
