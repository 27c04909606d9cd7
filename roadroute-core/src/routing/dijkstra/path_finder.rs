use log::debug;

use super::result::PathResult;
use super::state::{MinHeap, State};
use crate::model::RoadNetwork;
use crate::routing::CostMode;
use crate::{Error, NodeId};

/// Dijkstra search over a borrowed, read-only network.
///
/// Holds no per-query state, so one finder (or many) can serve any number
/// of queries against the same graph.
#[derive(Debug)]
pub struct PathFinder<'g, G: RoadNetwork + ?Sized> {
    graph: &'g G,
}

impl<G: RoadNetwork + ?Sized> Clone for PathFinder<'_, G> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<G: RoadNetwork + ?Sized> Copy for PathFinder<'_, G> {}

impl<'g, G: RoadNetwork + ?Sized> PathFinder<'g, G> {
    pub fn new(graph: &'g G) -> Self {
        Self { graph }
    }

    pub fn graph(&self) -> &'g G {
        self.graph
    }

    /// Shortest path from `source` to `target` under `mode`.
    ///
    /// Stops as soon as the target is settled. An unreachable target is not
    /// an error here: the result reports `target_found == false`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] if `source == target`
    /// - [`Error::NodeNotFound`] if either id is unknown
    /// - [`Error::InvalidEdgeData`] in time mode when a considered edge has a
    ///   non-positive speed limit; the whole query is aborted
    pub fn find(&self, source: NodeId, target: NodeId, mode: CostMode) -> Result<PathResult, Error> {
        if source == target {
            return Err(Error::InvalidArgument(format!(
                "source and target node ids must differ (both {source})"
            ))
            .logged());
        }
        let source_index = self.graph.resolve_index(source)?;
        let target_index = self.graph.resolve_index(target)?;

        let mut result = PathResult::new(
            self.graph.node_count(),
            source_index,
            target_index,
            mode,
        );
        self.search(&mut result, Some(target_index))?;
        debug!(
            "{mode} query {source} -> {target}: found={}, settled {} nodes",
            result.target_found,
            result.settled_count(),
        );
        Ok(result)
    }

    /// Settles every node reachable from `source`, without a target.
    ///
    /// The returned result treats the source as its own target, so
    /// [`PathResult::cost`] is zero and the per-node costs are read through
    /// [`PathResult::cost_to`] or [`PathResult::reachable`].
    ///
    /// # Errors
    ///
    /// [`Error::NodeNotFound`] for an unknown source and
    /// [`Error::InvalidEdgeData`] as for [`PathFinder::find`].
    pub fn explore(&self, source: NodeId, mode: CostMode) -> Result<PathResult, Error> {
        let source_index = self.graph.resolve_index(source)?;
        let mut result = PathResult::new(
            self.graph.node_count(),
            source_index,
            source_index,
            mode,
        );
        self.search(&mut result, None)?;
        result.target_found = true;
        debug!(
            "{mode} exploration from {source}: settled {} of {} nodes",
            result.settled_count(),
            self.graph.node_count()
        );
        Ok(result)
    }

    fn search(&self, result: &mut PathResult, stop_at: Option<usize>) -> Result<(), Error> {
        let num_nodes = self.graph.node_count();
        let mode = result.mode;
        let mut heap = MinHeap::with_capacity(num_nodes);
        heap.push(State {
            cost: 0.0,
            node: result.source_index as u32,
        });
        let mut pushes = 1usize;
        let mut peak_heap = 1usize;

        while let Some(State { node, .. }) = heap.pop() {
            let current = node as usize;
            // Stale entry for an already settled node
            if result.visited.contains(current) {
                continue;
            }
            result.visited.insert(current);

            if Some(current) == stop_at {
                result.target_found = true;
                break;
            }

            let current_cost = result.distances[current];
            for &edge in self.graph.incident_edges(current)? {
                let segment = self.graph.segment(edge);
                let Some(neighbor) = segment.neighbor_of(current) else {
                    continue;
                };
                if neighbor >= num_nodes || result.visited.contains(neighbor) {
                    continue;
                }

                let candidate = current_cost + mode.edge_cost(&segment, edge)?;
                if candidate < result.distances[neighbor] {
                    result.distances[neighbor] = candidate;
                    result.predecessors[neighbor] = Some(current as u32);
                    heap.push(State {
                        cost: candidate,
                        node: neighbor as u32,
                    });
                    pushes += 1;
                    peak_heap = peak_heap.max(heap.len());
                }
            }
        }

        debug!("{pushes} heap pushes (peak {peak_heap})");
        Ok(())
    }
}

/// Runs a single query, see [`PathFinder::find`]
pub fn find_path<G: RoadNetwork + ?Sized>(
    graph: &G,
    source: NodeId,
    target: NodeId,
    mode: CostMode,
) -> Result<PathResult, Error> {
    PathFinder::new(graph).find(source, target, mode)
}
