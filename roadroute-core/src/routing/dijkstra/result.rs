use fixedbitset::FixedBitSet;

use crate::model::RoadNetwork;
use crate::routing::CostMode;
use crate::{Error, NodeId};

/// Outcome of a single-source, single-target query.
///
/// Owns its per-node arrays independently of the graph it was computed on.
#[derive(Debug, Clone)]
pub struct PathResult {
    pub(super) distances: Vec<f64>,
    pub(super) predecessors: Vec<Option<u32>>,
    pub(super) visited: FixedBitSet,
    pub(super) source_index: usize,
    pub(super) target_index: usize,
    pub(super) target_found: bool,
    pub(super) mode: CostMode,
}

impl PathResult {
    pub(super) fn new(
        num_nodes: usize,
        source_index: usize,
        target_index: usize,
        mode: CostMode,
    ) -> Self {
        let mut distances = vec![f64::INFINITY; num_nodes];
        distances[source_index] = 0.0;
        Self {
            distances,
            predecessors: vec![None; num_nodes],
            visited: FixedBitSet::with_capacity(num_nodes),
            source_index,
            target_index,
            target_found: false,
            mode,
        }
    }

    pub fn source_index(&self) -> usize {
        self.source_index
    }

    pub fn target_index(&self) -> usize {
        self.target_index
    }

    /// Whether the search settled the target before the frontier emptied
    pub fn target_found(&self) -> bool {
        self.target_found
    }

    pub fn mode(&self) -> CostMode {
        self.mode
    }

    /// Tentative or final cost per node index, `f64::INFINITY` if unreached
    pub fn distances(&self) -> &[f64] {
        &self.distances
    }

    pub fn predecessors(&self) -> &[Option<u32>] {
        &self.predecessors
    }

    pub fn is_visited(&self, index: usize) -> bool {
        self.visited.contains(index)
    }

    /// Number of nodes settled by the search
    pub fn settled_count(&self) -> usize {
        self.visited.count_ones(..)
    }

    /// Final cost to the target, meters or minutes depending on the mode
    pub fn cost(&self) -> Option<f64> {
        self.target_found
            .then(|| self.distances[self.target_index])
    }

    pub fn cost_to(&self, index: usize) -> Option<f64> {
        self.distances
            .get(index)
            .copied()
            .filter(|cost| cost.is_finite())
    }

    /// Nodes with a finite cost label, with that cost
    pub fn reachable(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.distances
            .iter()
            .enumerate()
            .filter(|(_, cost)| cost.is_finite())
            .map(|(index, &cost)| (index, cost))
    }

    /// Node indices from source to target.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PathNotFound`] if the target was not reached or the
    /// predecessor chain does not lead back to the source.
    pub fn path(&self) -> Result<Vec<usize>, Error> {
        if !self.target_found {
            return Err(Error::PathNotFound(
                "target node was not reached from the source".to_string(),
            )
            .logged());
        }

        let mut path = vec![self.target_index];
        let mut current = self.target_index;
        while current != self.source_index {
            let Some(prev) = self.predecessors[current] else {
                return Err(Error::PathNotFound(format!(
                    "predecessor chain ends at node index {current} before the source"
                ))
                .logged());
            };
            current = prev as usize;
            path.push(current);
            if path.len() > self.predecessors.len() {
                return Err(Error::PathNotFound(
                    "predecessor chain contains a cycle".to_string(),
                )
                .logged());
            }
        }
        path.reverse();
        Ok(path)
    }

    /// External node ids from source to target
    pub fn path_ids<G: RoadNetwork + ?Sized>(&self, graph: &G) -> Result<Vec<NodeId>, Error> {
        self.path()?
            .into_iter()
            .map(|index| graph.node_id(index))
            .collect()
    }
}
