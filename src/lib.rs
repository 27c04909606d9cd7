//! Command-line front end for `roadroute_core`.
//!
//! Loads a road network from a configuration file and/or flags, resolves
//! query endpoints by node id or coordinate, runs shortest-path queries
//! and renders or exports the results.

pub mod config;
pub mod error;
pub mod export;
pub mod model;
pub mod report;
pub mod routing;
pub mod selection;

pub use config::{AppConfig, GraphOverrides};
pub use error::CliError;
pub use model::LoadedNetwork;
pub use routing::{RouteRequest, reach, route};
pub use selection::{Coordinate, Endpoint};
