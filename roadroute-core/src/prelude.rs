// Re-export the loading and query surface used by presentation layers
pub use crate::loading::{
    GraphSourceConfig, LoadedGraph, SourceFormat, load, load_legacy, load_network,
};
pub use crate::routing::{CostMode, PathFinder, PathResult, find_path};

// Graph storage
pub use crate::model::{Edge, GraphStore, LegacyGraph, Node, NodeIndex, RoadNetwork, Segment};

// Core types
pub use crate::NodeId;
pub use crate::{Error, ErrorKind};
