//! Picking query endpoints by node id or by coordinate.

use std::fmt;
use std::str::FromStr;

use geo::{Distance, Haversine, Point};
use roadroute_core::{NodeId, RoadNetwork};
use rstar::RTree;
use rstar::primitives::GeomWithData;

use crate::error::CliError;

/// Node position in `[lon, lat]` order with its node index
pub type IndexedPoint = GeomWithData<[f64; 2], usize>;

/// WGS84 position given as `LAT,LON`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn point(self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6},{:.6}", self.latitude, self.longitude)
    }
}

impl FromStr for Coordinate {
    type Err = CliError;

    /// Unparsable text is an input error, values outside the WGS84 ranges an
    /// invalid argument
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lon) = s
            .split_once(',')
            .ok_or_else(|| CliError::Input(format!("expected LAT,LON, got '{s}'")))?;
        let parse = |value: &str, what: &str| {
            value
                .trim()
                .parse::<f64>()
                .map_err(|_| CliError::Input(format!("invalid {what} '{}'", value.trim())))
        };
        let latitude = parse(lat, "latitude")?;
        let longitude = parse(lon, "longitude")?;

        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(roadroute_core::Error::InvalidArgument(format!(
                "coordinate {latitude},{longitude} is outside [-90,90]x[-180,180]"
            ))
            .into());
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// A query endpoint as given on the command line
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Endpoint {
    Id(NodeId),
    Coordinate(Coordinate),
}

/// Endpoint resolved to a node, with the snap distance for coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selected {
    pub id: NodeId,
    pub index: usize,
    pub snap_distance_m: Option<f64>,
}

/// Nearest-node lookup over all node positions
pub struct NodeLocator {
    tree: RTree<IndexedPoint>,
}

impl NodeLocator {
    pub fn new<G: RoadNetwork + ?Sized>(graph: &G) -> Self {
        let points = (0..graph.node_count())
            .filter_map(|index| {
                graph
                    .node(index)
                    .map(|node| IndexedPoint::new([node.longitude, node.latitude], index))
            })
            .collect();
        Self {
            tree: RTree::bulk_load(points),
        }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Index of the closest node in degree space, `None` for an empty graph
    pub fn nearest(&self, coordinate: Coordinate) -> Option<usize> {
        self.tree
            .nearest_neighbor(&[coordinate.longitude, coordinate.latitude])
            .map(|point| point.data)
    }
}

/// Resolves `endpoint` against `graph`, building the locator on first use
pub fn select<G: RoadNetwork + ?Sized>(
    graph: &G,
    locator: &mut Option<NodeLocator>,
    endpoint: Endpoint,
) -> Result<Selected, CliError> {
    match endpoint {
        Endpoint::Id(id) => Ok(Selected {
            id,
            index: graph.resolve_index(id)?,
            snap_distance_m: None,
        }),
        Endpoint::Coordinate(coordinate) => {
            let locator = locator.get_or_insert_with(|| NodeLocator::new(graph));
            let index = locator.nearest(coordinate).ok_or_else(|| {
                roadroute_core::Error::PathNotFound(format!(
                    "no node to snap {coordinate} to, the graph is empty"
                ))
            })?;
            let node = graph
                .node(index)
                .ok_or(roadroute_core::Error::InvalidNodeIndex(index))?;
            let distance = Haversine.distance(coordinate.point(), node.geometry());
            tracing::info!(
                "Snapped {coordinate} to node {} ({distance:.1} m away)",
                node.id
            );
            Ok(Selected {
                id: node.id,
                index,
                snap_distance_m: Some(distance),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use roadroute_core::{Edge, ErrorKind, GraphStore, Node};

    use super::*;

    fn graph() -> GraphStore {
        let nodes = vec![
            Node::new(11, 48.8566, 2.3522),
            Node::new(22, 48.8606, 2.3376),
            Node::new(33, 48.8530, 2.3499),
        ];
        GraphStore::from_tables(nodes, vec![Edge::new(11, 22, 1200, 50)]).unwrap()
    }

    #[test]
    fn parses_coordinates() {
        let c: Coordinate = " 48.85 , 2.35 ".parse().unwrap();
        assert_eq!(c.latitude, 48.85);
        assert_eq!(c.longitude, 2.35);
    }

    #[test]
    fn rejects_malformed_and_out_of_range_coordinates() {
        let malformed = "48.85".parse::<Coordinate>().unwrap_err();
        assert_eq!(malformed.kind(), ErrorKind::Input);
        let text = "north,2.0".parse::<Coordinate>().unwrap_err();
        assert_eq!(text.kind(), ErrorKind::Input);
        let range = "91.0,2.0".parse::<Coordinate>().unwrap_err();
        assert_eq!(range.kind(), ErrorKind::InvalidArgument);
        let range = "10.0,-180.5".parse::<Coordinate>().unwrap_err();
        assert_eq!(range.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn snaps_to_nearest_node() {
        let graph = graph();
        let mut locator = None;
        let target = Coordinate {
            latitude: 48.8605,
            longitude: 2.3378,
        };
        let selected = select(&graph, &mut locator, Endpoint::Coordinate(target)).unwrap();
        assert_eq!(selected.id, 22);
        assert_eq!(selected.index, 1);
        let snap = selected.snap_distance_m.unwrap();
        assert!(snap > 0.0 && snap < 50.0, "{snap}");
        assert_eq!(locator.as_ref().map(NodeLocator::len), Some(3));
    }

    #[test]
    fn id_endpoints_skip_the_locator() {
        let graph = graph();
        let mut locator = None;
        let selected = select(&graph, &mut locator, Endpoint::Id(33)).unwrap();
        assert_eq!(selected.index, 2);
        assert_eq!(selected.snap_distance_m, None);
        assert!(locator.is_none());
        let err = select(&graph, &mut locator, Endpoint::Id(44)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
