/// Heap entry: a node and its tentative cost when pushed
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct State {
    pub(crate) cost: f64,
    pub(crate) node: u32,
}

/// Binary min-heap keyed by tentative cost.
///
/// There is no decrease-key: a node may be pushed several times and stale
/// entries are discarded by the caller when popped.
#[derive(Debug, Default)]
pub(crate) struct MinHeap {
    nodes: Vec<State>,
}

impl MinHeap {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn push(&mut self, state: State) {
        self.nodes.push(state);
        let mut i = self.nodes.len() - 1;
        while i != 0 {
            let parent = (i - 1) / 2;
            if self.nodes[parent].cost <= self.nodes[i].cost {
                break;
            }
            self.nodes.swap(i, parent);
            i = parent;
        }
    }

    /// Removes the minimum: the last entry moves to the root and sifts down.
    pub(crate) fn pop(&mut self) -> Option<State> {
        let last = self.nodes.pop()?;
        if self.nodes.is_empty() {
            return Some(last);
        }
        let min = std::mem::replace(&mut self.nodes[0], last);
        self.sift_down(0);
        Some(min)
    }

    fn sift_down(&mut self, mut idx: usize) {
        let size = self.nodes.len();
        loop {
            let left = 2 * idx + 1;
            let right = 2 * idx + 2;
            let mut smallest = idx;
            if left < size && self.nodes[left].cost < self.nodes[smallest].cost {
                smallest = left;
            }
            if right < size && self.nodes[right].cost < self.nodes[smallest].cost {
                smallest = right;
            }
            if smallest == idx {
                break;
            }
            self.nodes.swap(idx, smallest);
            idx = smallest;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(cost: f64, node: u32) -> State {
        State { cost, node }
    }

    #[test]
    fn pops_in_non_decreasing_cost_order() {
        let mut heap = MinHeap::with_capacity(4);
        for (i, cost) in [5.0, 1.0, 8.0, 3.0, 3.0, 0.5, 13.0, 2.0].into_iter().enumerate() {
            heap.push(state(cost, i as u32));
        }
        let mut costs = Vec::new();
        while let Some(s) = heap.pop() {
            costs.push(s.cost);
        }
        assert_eq!(costs, vec![0.5, 1.0, 2.0, 3.0, 3.0, 5.0, 8.0, 13.0]);
        assert!(heap.is_empty());
    }

    #[test]
    fn keeps_duplicate_entries_for_a_node() {
        let mut heap = MinHeap::default();
        heap.push(state(10.0, 7));
        heap.push(state(4.0, 7));
        assert_eq!(heap.len(), 2);
        assert_eq!(heap.pop(), Some(state(4.0, 7)));
        assert_eq!(heap.pop(), Some(state(10.0, 7)));
        assert_eq!(heap.pop(), None);
    }
}
