//! CSR-backed road network, the performance path for routing queries

use log::info;

use super::components::{Edge, Node, Segment};
use super::csr::{CsrAdjacency, EdgeEnds};
use super::network::RoadNetwork;
use super::node_index::NodeIndex;
use crate::{Error, NodeId};

/// Immutable road network: node and edge tables, resolved edge endpoints,
/// CSR adjacency and the id index. Built once, read-only afterwards.
#[derive(Debug, Clone)]
pub struct GraphStore {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    ends: Vec<EdgeEnds>,
    adjacency: CsrAdjacency,
    node_index: NodeIndex,
}

impl GraphStore {
    /// Builds a store from in-memory tables.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DanglingReference`] if an edge names a node id that is
    /// not in `nodes`.
    pub fn from_tables(nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Self, Error> {
        let node_index = index_nodes(&nodes);
        let ends = edges
            .iter()
            .enumerate()
            .map(|(pos, edge)| resolve_edge(&node_index, pos, edge))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::assemble(nodes, edges, ends, node_index))
    }

    /// Final construction step once every edge is resolved: builds the CSR arrays.
    pub(crate) fn assemble(
        nodes: Vec<Node>,
        edges: Vec<Edge>,
        ends: Vec<EdgeEnds>,
        node_index: NodeIndex,
    ) -> Self {
        let adjacency = CsrAdjacency::build(nodes.len(), &ends);
        let graph = Self {
            nodes,
            edges,
            ends,
            adjacency,
            node_index,
        };
        info!(
            "Built CSR adjacency: {} nodes, {} edges, {} adjacency slots",
            graph.nodes.len(),
            graph.edges.len(),
            graph.adjacency.indices().len()
        );
        info!(
            "Node index: {} buckets, load factor {:.2}, {} bytes total graph memory",
            graph.node_index.bucket_count(),
            graph.node_index.load_factor(),
            graph.memory_usage()
        );
        graph
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_index(&self) -> &NodeIndex {
        &self.node_index
    }

    pub fn adjacency(&self) -> &CsrAdjacency {
        &self.adjacency
    }

    /// `(start, end)` bounds of node `index` in the adjacency index array
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `index` is out of bounds.
    pub fn adjacency_range(&self, index: usize) -> Result<(usize, usize), Error> {
        self.adjacency
            .range(index)
            .map(|range| (range.start, range.end))
            .ok_or_else(|| {
                Error::InvalidArgument(format!(
                    "node index {index} out of bounds ({} nodes)",
                    self.nodes.len()
                ))
                .logged()
            })
    }

    /// Edge indices referenced by adjacency ranges
    pub fn adjacency_indices(&self) -> &[u32] {
        self.adjacency.indices()
    }

    /// Bytes held by all owned tables
    pub fn memory_usage(&self) -> usize {
        self.nodes.capacity() * size_of::<Node>()
            + self.edges.capacity() * size_of::<Edge>()
            + self.ends.capacity() * size_of::<EdgeEnds>()
            + self.adjacency.memory_usage()
            + self.node_index.memory_usage()
    }
}

impl RoadNetwork for GraphStore {
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
        self.node_index.lookup(id).map_err(|e| e.logged())
    }

    fn incident_edges(&self, index: usize) -> Result<&[u32], Error> {
        self.adjacency
            .neighbors(index)
            .ok_or_else(|| Error::InvalidNodeIndex(index).logged())
    }

    fn segment(&self, edge: u32) -> Segment {
        let ends = self.ends[edge as usize];
        let record = &self.edges[edge as usize];
        Segment {
            from: ends.from as usize,
            to: ends.to as usize,
            length_m: f64::from(record.length_m),
            speed_limit_kph: f64::from(record.speed_limit_kph),
            one_way: ends.one_way,
        }
    }
}

pub(crate) fn index_nodes(nodes: &[Node]) -> NodeIndex {
    let mut index = NodeIndex::with_expected_nodes(nodes.len());
    for (pos, node) in nodes.iter().enumerate() {
        index.insert(node.id, pos);
    }
    index
}

/// Resolves both endpoints of the edge at table position `pos`
pub(crate) fn resolve_edge(index: &NodeIndex, pos: usize, edge: &Edge) -> Result<EdgeEnds, Error> {
    let lookup = |id: NodeId| {
        index
            .lookup(id)
            .map(|found| found as u32)
            .map_err(|_| {
                Error::DanglingReference {
                    edge: pos,
                    node_id: id,
                }
                .logged()
            })
    };
    Ok(EdgeEnds {
        from: lookup(edge.from_id)?,
        to: lookup(edge.to_id)?,
        one_way: edge.one_way,
    })
}
