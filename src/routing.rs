use std::path::PathBuf;

use roadroute_core::{CostMode, PathFinder, RoadNetwork};

use crate::error::CliError;
use crate::export::{export_geojson, export_gpx, path_nodes};
use crate::report::{ReachSummary, RouteSummary};
use crate::selection::{Endpoint, NodeLocator, select};

#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    pub from: Endpoint,
    pub to: Endpoint,
    pub mode: CostMode,
    pub gpx: Option<PathBuf>,
    pub geojson: Option<PathBuf>,
}

/// Runs one point-to-point query and writes the requested exports.
///
/// An unreachable target is a normal outcome; exports are then skipped.
pub fn route<G: RoadNetwork + ?Sized>(
    graph: &G,
    request: &RouteRequest,
) -> Result<RouteSummary, CliError> {
    let mut locator: Option<NodeLocator> = None;
    let source = select(graph, &mut locator, request.from)?;
    let target = select(graph, &mut locator, request.to)?;

    let result = PathFinder::new(graph).find(source.id, target.id, request.mode)?;
    let summary = RouteSummary::new(graph, &result, source, target)?;

    if request.gpx.is_some() || request.geojson.is_some() {
        if result.target_found() {
            let nodes = path_nodes(graph, &result)?;
            if let Some(path) = &request.gpx {
                export_gpx(path, &nodes)?;
            }
            if let Some(path) = &request.geojson {
                export_geojson(path, &nodes, &summary)?;
            }
        } else {
            tracing::warn!("No path from {} to {}, nothing exported", source.id, target.id);
        }
    }
    Ok(summary)
}

/// Costs from one node to everything reachable from it
pub fn reach<G: RoadNetwork + ?Sized>(
    graph: &G,
    from: Endpoint,
    mode: CostMode,
) -> Result<ReachSummary, CliError> {
    let source = select(graph, &mut None, from)?;
    let result = PathFinder::new(graph).explore(source.id, mode)?;
    ReachSummary::new(graph, &result, source)
}

#[cfg(test)]
mod tests {
    use roadroute_core::{Edge, ErrorKind, GraphStore, Node};

    use super::*;
    use crate::selection::Coordinate;

    fn graph() -> GraphStore {
        let nodes = vec![
            Node::new(1, 46.000, 7.000),
            Node::new(2, 46.001, 7.000),
            Node::new(3, 46.001, 7.001),
            Node::new(4, 46.100, 7.100),
        ];
        let edges = vec![
            Edge::new(1, 2, 111, 30),
            Edge::new(2, 3, 77, 50),
            Edge::new(1, 3, 300, 90).one_way(),
        ];
        GraphStore::from_tables(nodes, edges).unwrap()
    }

    fn request(from: Endpoint, to: Endpoint, mode: CostMode) -> RouteRequest {
        RouteRequest {
            from,
            to,
            mode,
            gpx: None,
            geojson: None,
        }
    }

    #[test]
    fn routes_between_ids_in_both_modes() {
        let graph = graph();
        let by_distance =
            route(&graph, &request(Endpoint::Id(1), Endpoint::Id(3), CostMode::Distance)).unwrap();
        assert_eq!(by_distance.path, vec![1, 2, 3]);
        assert_eq!(by_distance.cost, Some(188.0));

        // 300 m at 90 km/h beats 111 m at 30 plus 77 m at 50
        let by_time =
            route(&graph, &request(Endpoint::Id(1), Endpoint::Id(3), CostMode::Time)).unwrap();
        assert_eq!(by_time.path, vec![1, 3]);
    }

    #[test]
    fn coordinates_snap_before_routing() {
        let graph = graph();
        let from = Endpoint::Coordinate(Coordinate {
            latitude: 46.0001,
            longitude: 7.0001,
        });
        let summary = route(&graph, &request(from, Endpoint::Id(2), CostMode::Distance)).unwrap();
        assert_eq!(summary.source.id, 1);
        assert!(summary.source.snap_distance_m.is_some());
        assert_eq!(summary.path, vec![1, 2]);
    }

    #[test]
    fn exports_only_found_paths() {
        let graph = graph();
        let dir = tempfile::tempdir().unwrap();
        let gpx = dir.path().join("route.gpx");
        let geojson = dir.path().join("route.geojson");
        let mut req = request(Endpoint::Id(3), Endpoint::Id(1), CostMode::Distance);
        req.gpx = Some(gpx.clone());
        req.geojson = Some(geojson.clone());

        route(&graph, &req).unwrap();
        assert!(gpx.exists() && geojson.exists());

        req.to = Endpoint::Id(4);
        let unreachable = route(&graph, &req);
        assert!(!unreachable.unwrap().found);
    }

    #[test]
    fn reach_lists_component() {
        let summary = reach(&graph(), Endpoint::Id(3), CostMode::Distance).unwrap();
        let ids: Vec<_> = summary.reachable.iter().map(|node| node.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(summary.total_nodes, 4);
        let err = reach(&graph(), Endpoint::Id(99), CostMode::Time).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
