//! Human-readable and JSON summaries of queries and graphs.

use std::fmt;

use roadroute_core::{CostMode, GraphStore, NodeId, PathResult, RoadNetwork};
use serde::Serialize;

use crate::error::CliError;
use crate::selection::Selected;

/// `X.XX km` from 1000 m upwards, whole meters below
pub fn format_distance(meters: f64) -> String {
    if meters >= 1000.0 {
        format!("{:.2} km", meters / 1000.0)
    } else {
        format!("{meters:.0} m")
    }
}

pub fn format_duration(minutes: f64) -> String {
    format!("{minutes:.2} min")
}

pub fn format_cost(cost: f64, mode: CostMode) -> String {
    match mode {
        CostMode::Distance => format_distance(cost),
        CostMode::Time => format_duration(cost),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EndpointSummary {
    pub id: NodeId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snap_distance_m: Option<f64>,
}

impl From<Selected> for EndpointSummary {
    fn from(selected: Selected) -> Self {
        Self {
            id: selected.id,
            snap_distance_m: selected.snap_distance_m,
        }
    }
}

/// Outcome of a `route` query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSummary {
    pub mode: CostMode,
    pub unit: &'static str,
    pub source: EndpointSummary,
    pub target: EndpointSummary,
    pub found: bool,
    pub cost: Option<f64>,
    pub path: Vec<NodeId>,
    pub settled_nodes: usize,
}

impl RouteSummary {
    pub fn new<G: RoadNetwork + ?Sized>(
        graph: &G,
        result: &PathResult,
        source: Selected,
        target: Selected,
    ) -> Result<Self, CliError> {
        let path = if result.target_found() {
            result.path_ids(graph)?
        } else {
            Vec::new()
        };
        Ok(Self {
            mode: result.mode(),
            unit: result.mode().unit(),
            source: source.into(),
            target: target.into(),
            found: result.target_found(),
            cost: result.cost(),
            path,
            settled_nodes: result.settled_count(),
        })
    }
}

impl fmt::Display for RouteSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (from, to) = (self.source.id, self.target.id);
        for (label, endpoint) in [("Source", &self.source), ("Target", &self.target)] {
            if let Some(snap) = endpoint.snap_distance_m {
                writeln!(f, "{label} snapped to node {} ({snap:.1} m)", endpoint.id)?;
            }
        }
        match self.cost {
            Some(cost) if self.found => {
                writeln!(f, "Shortest path to node {to} ({} mode):", self.mode)?;
                let hops: Vec<String> = self.path.iter().map(ToString::to_string).collect();
                writeln!(f, "  {}", hops.join(" -> "))?;
                writeln!(
                    f,
                    "Total {}: {} over {} nodes ({} settled)",
                    self.mode,
                    format_cost(cost, self.mode),
                    self.path.len(),
                    self.settled_nodes
                )
            }
            _ => writeln!(
                f,
                "No path from node {from} to node {to} ({} nodes settled)",
                self.settled_nodes
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReachedNode {
    pub id: NodeId,
    pub cost: f64,
}

/// Outcome of a `reach` exploration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReachSummary {
    pub mode: CostMode,
    pub unit: &'static str,
    pub source: EndpointSummary,
    pub total_nodes: usize,
    pub reachable: Vec<ReachedNode>,
}

impl ReachSummary {
    pub fn new<G: RoadNetwork + ?Sized>(
        graph: &G,
        result: &PathResult,
        source: Selected,
    ) -> Result<Self, CliError> {
        let reachable = result
            .reachable()
            .map(|(index, cost)| graph.node_id(index).map(|id| ReachedNode { id, cost }))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            mode: result.mode(),
            unit: result.mode().unit(),
            source: source.into(),
            total_nodes: graph.node_count(),
            reachable,
        })
    }
}

impl fmt::Display for ReachSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Costs from node {} to all reachable nodes ({} mode):",
            self.source.id, self.mode
        )?;
        for node in &self.reachable {
            writeln!(f, "Node {}: {}", node.id, format_cost(node.cost, self.mode))?;
        }
        writeln!(
            f,
            "Total reachable nodes: {} out of {}",
            self.reachable.len(),
            self.total_nodes
        )
    }
}

/// Size and layout figures of a loaded network
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphSummary {
    pub layout: &'static str,
    pub nodes: usize,
    pub edges: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub csr: Option<CsrSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CsrSummary {
    pub adjacency_len: usize,
    pub index_buckets: usize,
    pub index_load_factor: f64,
    pub index_longest_chain: usize,
    pub memory_bytes: usize,
}

impl GraphSummary {
    pub fn of_network<G: RoadNetwork + ?Sized>(graph: &G) -> Self {
        Self {
            layout: "adjacency lists",
            nodes: graph.node_count(),
            edges: graph.edge_count(),
            csr: None,
        }
    }

    pub fn of_store(graph: &GraphStore) -> Self {
        let index = graph.node_index();
        Self {
            layout: "csr",
            nodes: graph.node_count(),
            edges: graph.edge_count(),
            csr: Some(CsrSummary {
                adjacency_len: graph.adjacency_indices().len(),
                index_buckets: index.bucket_count(),
                index_load_factor: index.load_factor(),
                index_longest_chain: index.longest_chain(),
                memory_bytes: graph.memory_usage(),
            }),
        }
    }
}

impl fmt::Display for GraphSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Graph ({}):", self.layout)?;
        writeln!(f, "- Nodes: {}", self.nodes)?;
        writeln!(f, "- Edges: {}", self.edges)?;
        if let Some(csr) = &self.csr {
            writeln!(f, "- Adjacency entries: {}", csr.adjacency_len)?;
            writeln!(
                f,
                "- Node index: {} buckets, load factor {:.2}, longest chain {}",
                csr.index_buckets, csr.index_load_factor, csr.index_longest_chain
            )?;
            writeln!(f, "- Memory: {:.2} MiB", csr.memory_bytes as f64 / (1024.0 * 1024.0))?;
        }
        Ok(())
    }
}

/// Serializes any summary for `--json`
pub fn to_json<T: Serialize>(value: &T) -> Result<String, CliError> {
    serde_json::to_string_pretty(value).map_err(|source| CliError::Encode {
        what: "JSON summary",
        source,
    })
}

#[cfg(test)]
mod tests {
    use roadroute_core::{Edge, Node, find_path};

    use super::*;

    fn graph() -> GraphStore {
        let nodes = (1..=4).map(|id| Node::new(id, 0.0, 0.0)).collect();
        let edges = vec![
            Edge::new(1, 2, 700, 50),
            Edge::new(2, 3, 650, 50).one_way(),
        ];
        GraphStore::from_tables(nodes, edges).unwrap()
    }

    fn selected(graph: &GraphStore, id: NodeId) -> Selected {
        Selected {
            id,
            index: graph.resolve_index(id).unwrap(),
            snap_distance_m: None,
        }
    }

    #[test]
    fn formats_distances_and_times() {
        assert_eq!(format_distance(999.4), "999 m");
        assert_eq!(format_distance(1000.0), "1.00 km");
        assert_eq!(format_distance(15342.0), "15.34 km");
        assert_eq!(format_duration(1.0 / 3.0), "0.33 min");
        assert_eq!(format_cost(12.0, CostMode::Distance), "12 m");
    }

    #[test]
    fn route_summary_lists_path() {
        let graph = graph();
        let result = find_path(&graph, 1, 3, CostMode::Distance).unwrap();
        let summary =
            RouteSummary::new(&graph, &result, selected(&graph, 1), selected(&graph, 3)).unwrap();
        assert_eq!(summary.path, vec![1, 2, 3]);
        let text = summary.to_string();
        assert!(text.contains("1 -> 2 -> 3"), "{text}");
        assert!(text.contains("1.35 km"), "{text}");

        let json: serde_json::Value = serde_json::from_str(&to_json(&summary).unwrap()).unwrap();
        assert_eq!(json["mode"], "distance");
        assert_eq!(json["cost"], 1350.0);
        assert!(json["source"].get("snap_distance_m").is_none());
    }

    #[test]
    fn route_summary_reports_missing_path() {
        let graph = graph();
        let result = find_path(&graph, 3, 1, CostMode::Time).unwrap();
        let summary =
            RouteSummary::new(&graph, &result, selected(&graph, 3), selected(&graph, 1)).unwrap();
        assert!(!summary.found);
        assert!(summary.path.is_empty());
        assert!(summary.to_string().starts_with("No path from node 3 to node 1"));
    }

    #[test]
    fn reach_summary_counts_reachable_nodes() {
        let graph = graph();
        let result = roadroute_core::PathFinder::new(&graph)
            .explore(2, CostMode::Distance)
            .unwrap();
        let summary = ReachSummary::new(&graph, &result, selected(&graph, 2)).unwrap();
        assert_eq!(summary.reachable.len(), 3);
        assert!(summary.to_string().ends_with("Total reachable nodes: 3 out of 4\n"));
    }

    #[test]
    fn store_summary_includes_index_figures() {
        let summary = GraphSummary::of_store(&graph());
        let csr = summary.csr.as_ref().unwrap();
        assert_eq!(csr.adjacency_len, 3);
        assert_eq!(csr.index_buckets, 1024);
        assert!(summary.to_string().contains("- Edges: 2"));
    }
}
