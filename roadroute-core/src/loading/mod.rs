//! This module is responsible for loading road network data from the binary
//! node/edge streams (or the legacy CSV tables) and building a routable graph.

pub mod binary;
mod builder;
mod config;
pub mod legacy;

pub use builder::{LoadedGraph, load, load_legacy, load_network};
pub use config::{GraphSourceConfig, SourceFormat};
