//! Shortest-path routing over large static road networks.
//!
//! The network is ingested from a compact binary format into a CSR
//! (compressed sparse row) adjacency layout with an integer hash index
//! from external node ids to array positions, then queried with
//! Dijkstra's algorithm under a distance or travel-time cost model.

pub mod error;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;

pub use error::{Error, ErrorKind};
pub use loading::{GraphSourceConfig, LoadedGraph, SourceFormat, load, load_legacy, load_network};
pub use model::{Edge, GraphStore, LegacyGraph, Node, NodeIndex, RoadNetwork, Segment};
pub use routing::{CostMode, PathFinder, PathResult, find_path};

/// Externally assigned node identifier, as read from the input streams
pub type NodeId = u32;

/// Minimum number of buckets in a [`NodeIndex`]
pub const DEFAULT_INDEX_BUCKETS: usize = 1024;

/// Speed substituted for missing or invalid speed limits in the CSV path (km/h)
pub const DEFAULT_SPEED_KPH: u16 = 50;
