//! Shared query surface of the graph representations

use super::components::{Node, Segment};
use crate::{Error, NodeId};

/// Read-only road network that the path finder can search.
///
/// Implemented by the CSR-backed [`GraphStore`](super::GraphStore) and by the
/// list-backed [`LegacyGraph`](super::LegacyGraph). Implementations must not
/// mutate state during queries, so a built network can be shared across threads.
pub trait RoadNetwork {
    fn node_count(&self) -> usize;

    fn edge_count(&self) -> usize;

    fn node(&self, index: usize) -> Option<&Node>;

    /// Maps an external node id to its array position
    fn resolve_index(&self, id: NodeId) -> Result<usize, Error>;

    /// Edge indices that can be left from node `index`
    fn incident_edges(&self, index: usize) -> Result<&[u32], Error>;

    /// Edge `edge` with endpoints resolved to node indices
    fn segment(&self, edge: u32) -> Segment;

    /// External id of the node at `index`
    fn node_id(&self, index: usize) -> Result<NodeId, Error> {
        self.node(index)
            .map(|node| node.id)
            .ok_or_else(|| Error::InvalidNodeIndex(index).logged())
    }
}
