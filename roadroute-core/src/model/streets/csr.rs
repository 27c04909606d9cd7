//! Compressed sparse row adjacency built from a resolved edge table.

use std::ops::Range;

/// Edge endpoints resolved to node array positions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeEnds {
    pub from: u32,
    pub to: u32,
    pub one_way: bool,
}

/// Per-node slices of edge indices, located through a prefix-sum offset table.
///
/// `indices[offsets[i]..offsets[i + 1]]` holds every edge that can be left
/// from node `i`: outgoing one-way edges, and two-way edges at both endpoints.
#[derive(Debug, Clone, Default)]
pub struct CsrAdjacency {
    offsets: Vec<usize>,
    indices: Vec<u32>,
}

impl CsrAdjacency {
    /// Two-pass counting sort over the edge table, O(V + E).
    pub fn build(num_nodes: usize, ends: &[EdgeEnds]) -> Self {
        // Degree pass
        let mut cursor = vec![0usize; num_nodes];
        for edge in ends {
            cursor[edge.from as usize] += 1;
            if !edge.one_way {
                cursor[edge.to as usize] += 1;
            }
        }

        // Prefix sum
        let mut offsets = Vec::with_capacity(num_nodes + 1);
        offsets.push(0);
        for degree in &cursor {
            let last = offsets[offsets.len() - 1];
            offsets.push(last + degree);
        }

        // Scatter pass, reusing the degree table as write cursors
        cursor.fill(0);
        let mut indices = vec![0u32; offsets[num_nodes]];
        for (edge_idx, edge) in ends.iter().enumerate() {
            let from = edge.from as usize;
            indices[offsets[from] + cursor[from]] = edge_idx as u32;
            cursor[from] += 1;
            if !edge.one_way {
                let to = edge.to as usize;
                indices[offsets[to] + cursor[to]] = edge_idx as u32;
                cursor[to] += 1;
            }
        }

        Self { offsets, indices }
    }

    pub fn node_count(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    /// Half-open range into [`Self::indices`] for `node`, or `None` if out of bounds
    pub fn range(&self, node: usize) -> Option<Range<usize>> {
        if node >= self.node_count() {
            return None;
        }
        Some(self.offsets[node]..self.offsets[node + 1])
    }

    pub fn neighbors(&self, node: usize) -> Option<&[u32]> {
        self.range(node).map(|range| &self.indices[range])
    }

    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn memory_usage(&self) -> usize {
        self.offsets.capacity() * size_of::<usize>() + self.indices.capacity() * size_of::<u32>()
    }
}
