//! Integer hash index from external node ids to node array positions.
//!
//! Separate chaining over an entry arena. The bucket count is chosen once at
//! construction (`max(2 * expected_nodes, DEFAULT_INDEX_BUCKETS)`) and never
//! changes, so load factor and memory usage are predictable.

use crate::{DEFAULT_INDEX_BUCKETS, Error, NodeId};

const EMPTY: u32 = u32::MAX;

#[derive(Debug, Clone, Copy)]
struct Entry {
    id: NodeId,
    index: u32,
    next: u32,
}

#[derive(Debug, Clone)]
pub struct NodeIndex {
    heads: Vec<u32>,
    entries: Vec<Entry>,
}

impl NodeIndex {
    /// Creates an index sized for `expected_nodes` entries at a load factor of ~0.5
    pub fn with_expected_nodes(expected_nodes: usize) -> Self {
        let buckets = expected_nodes
            .saturating_mul(2)
            .max(DEFAULT_INDEX_BUCKETS);
        Self {
            heads: vec![EMPTY; buckets],
            entries: Vec::with_capacity(expected_nodes),
        }
    }

    /// Inserts `(id, index)` at the head of its bucket chain.
    ///
    /// Duplicate ids are not rejected: the newest entry shadows older ones on lookup.
    pub fn insert(&mut self, id: NodeId, index: usize) {
        let bucket = self.bucket_of(id);
        let slot = self.entries.len() as u32;
        self.entries.push(Entry {
            id,
            index: index as u32,
            next: self.heads[bucket],
        });
        self.heads[bucket] = slot;
    }

    /// Returns the array position of `id`, scanning from the most recent insert.
    pub fn lookup(&self, id: NodeId) -> Result<usize, Error> {
        let mut cursor = self.heads[self.bucket_of(id)];
        while cursor != EMPTY {
            let entry = &self.entries[cursor as usize];
            if entry.id == id {
                return Ok(entry.index as usize);
            }
            cursor = entry.next;
        }
        Err(Error::NodeNotFound(id))
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.lookup(id).is_ok()
    }

    /// Number of inserted entries, duplicates included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn bucket_count(&self) -> usize {
        self.heads.len()
    }

    #[allow(clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        self.entries.len() as f64 / self.heads.len() as f64
    }

    /// Length of the longest collision chain
    pub fn longest_chain(&self) -> usize {
        self.heads
            .iter()
            .map(|&head| {
                let mut len = 0;
                let mut cursor = head;
                while cursor != EMPTY {
                    len += 1;
                    cursor = self.entries[cursor as usize].next;
                }
                len
            })
            .max()
            .unwrap_or(0)
    }

    /// Bytes held by bucket heads and entries
    pub fn memory_usage(&self) -> usize {
        self.heads.capacity() * size_of::<u32>() + self.entries.capacity() * size_of::<Entry>()
    }

    fn bucket_of(&self, id: NodeId) -> usize {
        hash_id(id) as usize % self.heads.len()
    }
}

/// 32-bit avalanche mix (murmur3 finalizer)
pub fn hash_id(id: NodeId) -> u32 {
    let mut key = id;
    key ^= key >> 16;
    key = key.wrapping_mul(0x85eb_ca6b);
    key ^= key >> 13;
    key = key.wrapping_mul(0xc2b2_ae35);
    key ^= key >> 16;
    key
}
