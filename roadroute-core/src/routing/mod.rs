//! Shortest-path queries over a [`RoadNetwork`](crate::model::RoadNetwork)

pub mod dijkstra;
mod mode;

pub use dijkstra::{PathFinder, PathResult, find_path};
pub use mode::CostMode;
