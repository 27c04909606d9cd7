//! Road network model: records, id index, CSR adjacency and graph stores

pub mod components;
pub mod csr;
pub mod graph_store;
pub mod legacy;
pub mod network;
pub mod node_index;

pub use components::{Edge, Node, Segment};
pub use graph_store::GraphStore;
pub use legacy::LegacyGraph;
pub use network::RoadNetwork;
pub use node_index::NodeIndex;
