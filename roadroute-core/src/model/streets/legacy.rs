//! List-backed road network produced by the CSV loader.
//!
//! Node lookup is a linear scan and adjacency is a per-node list. Kept as a
//! simple reference implementation alongside [`GraphStore`](super::GraphStore).

use log::warn;

use super::components::{Node, Segment};
use super::network::RoadNetwork;
use crate::{Error, NodeId};

/// Street segment as described by the CSV edge table
#[derive(Debug, Clone, PartialEq)]
pub struct LegacyEdge {
    pub from_id: NodeId,
    pub to_id: NodeId,
    pub name: String,
    pub speed_limit_kph: u16,
    pub highway: String,
    pub length_m: f64,
    pub one_way: bool,
}

#[derive(Debug, Clone)]
struct Resolved {
    edge: LegacyEdge,
    from: usize,
    to: usize,
}

#[derive(Debug, Clone, Default)]
pub struct LegacyGraph {
    nodes: Vec<Node>,
    edges: Vec<Resolved>,
    adjacency: Vec<Vec<u32>>,
}

impl LegacyGraph {
    /// Builds the graph, skipping edges that reference unknown nodes.
    pub fn new(nodes: Vec<Node>, edges: Vec<LegacyEdge>) -> Self {
        let mut graph = Self {
            adjacency: vec![Vec::new(); nodes.len()],
            edges: Vec::with_capacity(edges.len()),
            nodes,
        };

        for (pos, edge) in edges.into_iter().enumerate() {
            let (Some(from), Some(to)) = (graph.find(edge.from_id), graph.find(edge.to_id)) else {
                warn!(
                    "Edge {pos} references non-existent nodes ({} -> {}), skipping",
                    edge.from_id, edge.to_id
                );
                continue;
            };
            let edge_idx = graph.edges.len() as u32;
            graph.adjacency[from].push(edge_idx);
            if !edge.one_way {
                graph.adjacency[to].push(edge_idx);
            }
            graph.edges.push(Resolved { edge, from, to });
        }

        graph
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edge(&self, index: usize) -> Option<&LegacyEdge> {
        self.edges.get(index).map(|resolved| &resolved.edge)
    }

    fn find(&self, id: NodeId) -> Option<usize> {
        self.nodes.iter().position(|node| node.id == id)
    }
}

impl RoadNetwork for LegacyGraph {
    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn node(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    fn resolve_index(&self, id: NodeId) -> Result<usize, Error> {
        self.find(id).ok_or_else(|| Error::NodeNotFound(id).logged())
    }

    fn incident_edges(&self, index: usize) -> Result<&[u32], Error> {
        self.adjacency
            .get(index)
            .map(Vec::as_slice)
            .ok_or_else(|| Error::InvalidNodeIndex(index).logged())
    }

    fn segment(&self, edge: u32) -> Segment {
        let resolved = &self.edges[edge as usize];
        Segment {
            from: resolved.from,
            to: resolved.to,
            length_m: resolved.edge.length_m,
            speed_limit_kph: f64::from(resolved.edge.speed_limit_kph),
            one_way: resolved.edge.one_way,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(from_id: NodeId, to_id: NodeId, one_way: bool) -> LegacyEdge {
        LegacyEdge {
            from_id,
            to_id,
            name: String::new(),
            speed_limit_kph: 50,
            highway: "residential".to_string(),
            length_m: 12.5,
            one_way,
        }
    }

    #[test]
    fn unknown_endpoints_are_skipped() {
        let nodes = vec![Node::new(5, 0.0, 0.0), Node::new(6, 0.0, 0.0)];
        let graph = LegacyGraph::new(nodes, vec![edge(5, 6, false), edge(5, 99, false)]);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.incident_edges(0).unwrap(), &[0]);
        assert_eq!(graph.incident_edges(1).unwrap(), &[0]);
    }

    #[test]
    fn linear_lookup_finds_first_match() {
        let nodes = vec![Node::new(5, 0.0, 0.0), Node::new(5, 1.0, 1.0)];
        let graph = LegacyGraph::new(nodes, Vec::new());
        assert_eq!(graph.resolve_index(5).unwrap(), 0);
        assert!(matches!(graph.resolve_index(1), Err(Error::NodeNotFound(1))));
    }

    #[test]
    fn one_way_edges_listed_at_source_only() {
        let nodes = vec![Node::new(1, 0.0, 0.0), Node::new(2, 0.0, 0.0)];
        let graph = LegacyGraph::new(nodes, vec![edge(2, 1, true)]);
        assert!(graph.incident_edges(0).unwrap().is_empty());
        assert_eq!(graph.incident_edges(1).unwrap(), &[0]);
        assert_eq!(graph.segment(0).length_m, 12.5);
    }
}
