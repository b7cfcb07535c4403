//! Frontier: nodes awaiting expansion, ordered by `path_objective` descending with a stable
//! tie-break. Float equality is never used for tie-breaking; ties fall back to a stable integer
//! identity. `NodeIndex` itself serves as that identity: within a single frontier, indices are
//! always distinct for live nodes, and the search is deterministic, so ties resolve the same way
//! on every run over the same input.

use std::cmp::{Ordering, Reverse};
use std::collections::BTreeSet;

use petgraph::stable_graph::NodeIndex;

#[derive(Debug, Clone, Copy, PartialEq)]
struct TotalF64(f64);

impl Eq for TotalF64 {}

impl PartialOrd for TotalF64 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TotalF64 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Default)]
pub struct Frontier(BTreeSet<(Reverse<TotalF64>, NodeIndex)>);

impl Frontier {
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    pub fn insert(&mut self, node: NodeIndex, path_objective: f64) {
        self.0.insert((Reverse(TotalF64(path_objective)), node));
    }

    /// `path_objective` must be the same value passed to `insert` for this node. Callers never
    /// mutate a node's state while it sits in the frontier, so recomputing it from the node's
    /// current state at removal time is equivalent.
    pub fn remove(&mut self, node: NodeIndex, path_objective: f64) -> bool {
        self.0.remove(&(Reverse(TotalF64(path_objective)), node))
    }

    pub fn pop_max(&mut self) -> Option<NodeIndex> {
        self.0.pop_first().map(|(_, node)| node)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idx(i: usize) -> NodeIndex {
        NodeIndex::new(i)
    }

    #[test]
    fn pop_max_returns_highest_path_objective_first() {
        let mut frontier = Frontier::new();
        frontier.insert(idx(0), 5.0);
        frontier.insert(idx(1), 50.0);
        frontier.insert(idx(2), 20.0);
        assert_eq!(frontier.pop_max(), Some(idx(1)));
        assert_eq!(frontier.pop_max(), Some(idx(2)));
        assert_eq!(frontier.pop_max(), Some(idx(0)));
        assert!(frontier.is_empty());
    }

    #[test]
    fn ties_break_on_node_index_deterministically() {
        let mut frontier = Frontier::new();
        frontier.insert(idx(3), 10.0);
        frontier.insert(idx(1), 10.0);
        assert_eq!(frontier.pop_max(), Some(idx(1)));
        assert_eq!(frontier.pop_max(), Some(idx(3)));
    }
}
