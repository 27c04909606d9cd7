use roadroute_core::{GraphSourceConfig, LoadedGraph, RoadNetwork, load_network};

use crate::error::CliError;
use crate::report::GraphSummary;

/// A network loaded through either ingestion path
#[derive(Debug)]
pub struct LoadedNetwork(LoadedGraph);

impl LoadedNetwork {
    pub fn open(source: &GraphSourceConfig) -> Result<Self, CliError> {
        let network = Self(load_network(source)?);
        let graph = network.graph();
        tracing::info!(
            "Road network ready: {} nodes, {} edges",
            graph.node_count(),
            graph.edge_count()
        );
        Ok(network)
    }

    pub fn graph(&self) -> &(dyn RoadNetwork + Send + Sync) {
        self.0.graph()
    }

    pub fn loaded(&self) -> &LoadedGraph {
        &self.0
    }

    pub fn summary(&self) -> GraphSummary {
        match &self.0 {
            LoadedGraph::Csr(store) => GraphSummary::of_store(store),
            LoadedGraph::Lists(lists) => GraphSummary::of_network(lists),
        }
    }
}
