//! Data model for road network routing
//!
//! Contains node/edge records, the id index and both graph representations.

pub mod streets;

pub use streets::components::{Edge, Node, Segment};
pub use streets::csr::CsrAdjacency;
pub use streets::graph_store::GraphStore;
pub use streets::legacy::{LegacyEdge, LegacyGraph};
pub use streets::network::RoadNetwork;
pub use streets::node_index::NodeIndex;
