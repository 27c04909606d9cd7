use std::fs;
use std::path::Path;

use geo::{Coord, LineString};
use geojson::{Feature, Geometry, Value as GeoJsonValue};
use roadroute_core::Node;
use serde_json::{Map, Value as JsonValue, json};

use crate::error::CliError;
use crate::report::RouteSummary;

/// `LineString` feature of the path with the query summary as properties
pub fn route_feature(nodes: &[Node], summary: &RouteSummary) -> Feature {
    let line: LineString<f64> = nodes
        .iter()
        .map(|node| Coord {
            x: node.longitude,
            y: node.latitude,
        })
        .collect();

    let mut properties = Map::new();
    properties.insert("mode".to_string(), json!(summary.mode));
    properties.insert("unit".to_string(), json!(summary.unit));
    properties.insert("cost".to_string(), json!(summary.cost));
    properties.insert("source".to_string(), json!(summary.source.id));
    properties.insert("target".to_string(), json!(summary.target.id));
    properties.insert("node_ids".to_string(), JsonValue::from(summary.path.clone()));

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(GeoJsonValue::from(&line))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

pub fn export_geojson(path: &Path, nodes: &[Node], summary: &RouteSummary) -> Result<(), CliError> {
    let feature = route_feature(nodes, summary);
    let text = serde_json::to_string_pretty(&feature).map_err(|source| CliError::Encode {
        what: "GeoJSON feature",
        source,
    })?;
    fs::write(path, text).map_err(|source| CliError::FileWrite {
        what: "GeoJSON feature",
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!("Exported route geometry to {}", path.display());
    Ok(())
}
