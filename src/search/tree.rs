//! Search tree: a node graph with parent pointers, a frontier ordered by `path_objective`, a
//! terminal set, and a recycling allocator. `StableDiGraph` is used as the arena specifically
//! because it reuses freed node slots on its own free-list internally, serving as the recycler
//! without a hand-rolled index/generation scheme on top of it.

use std::collections::HashSet;

use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::Direction;

use crate::search::frontier::Frontier;
use crate::state::combat::CombatState;

/// The search tree. Holds the root implicitly as the first node ever created; everything else
/// is reached through parent/child edges.
pub struct Arena {
    graph: StableDiGraph<CombatState, ()>,
    frontier: Frontier,
    terminals: HashSet<NodeIndex>,
    root: NodeIndex,
    nodes_created: u64,
    nodes_reused: u64,
    nodes_expanded: u64,
    freed_slots: u64,
}

impl Arena {
    pub fn new(root: CombatState) -> Self {
        let mut graph = StableDiGraph::new();
        let path_objective = root.path_objective();
        let root = graph.add_node(root);
        let mut frontier = Frontier::new();
        frontier.insert(root, path_objective);
        Self {
            graph,
            frontier,
            terminals: HashSet::new(),
            root,
            nodes_created: 1,
            nodes_reused: 0,
            nodes_expanded: 0,
            freed_slots: 0,
        }
    }

    pub fn root(&self) -> NodeIndex {
        self.root
    }

    pub fn state(&self, node: NodeIndex) -> &CombatState {
        &self.graph[node]
    }

    pub fn state_mut(&mut self, node: NodeIndex) -> &mut CombatState {
        &mut self.graph[node]
    }

    pub fn parent(&self, node: NodeIndex) -> Option<NodeIndex> {
        self.graph.neighbors_directed(node, Direction::Incoming).next()
    }

    pub fn children(&self, node: NodeIndex) -> Vec<NodeIndex> {
        self.graph.neighbors_directed(node, Direction::Outgoing).collect()
    }

    pub fn terminals(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.terminals.iter().copied()
    }

    pub fn is_frontier_empty(&self) -> bool {
        self.frontier.is_empty()
    }

    pub fn counters(&self) -> (u64, u64, u64) {
        (self.nodes_created, self.nodes_reused, self.nodes_expanded)
    }

    pub fn mark_expanded(&mut self) {
        self.nodes_expanded += 1;
    }

    /// `create_child`: copy-constructs a new node from `parent`'s state (depth incremented),
    /// links the edge, and hands back a slot pulled from the free-list when one is available.
    /// The caller is expected to mutate the returned state (applying the chance outcome or
    /// decision) before registering it with `frontier_insert`/`terminal_insert`. `path_objective`
    /// depends on that mutation, so insertion is a separate, later step rather than happening
    /// inside this call.
    pub fn create_child(&mut self, parent: NodeIndex) -> NodeIndex {
        let child_state = self.graph[parent].child();
        if self.freed_slots > 0 {
            self.freed_slots -= 1;
            self.nodes_reused += 1;
        } else {
            self.nodes_created += 1;
        }
        let child = self.graph.add_node(child_state);
        self.graph.add_edge(parent, child, ());
        child
    }

    pub fn frontier_insert(&mut self, node: NodeIndex) {
        let path_objective = self.graph[node].path_objective();
        self.frontier.insert(node, path_objective);
    }

    pub fn terminal_insert(&mut self, node: NodeIndex) {
        self.terminals.insert(node);
    }

    pub fn frontier_pop_max(&mut self) -> Option<NodeIndex> {
        self.frontier.pop_max()
    }

    /// `delete_subtree`: recursively recycles a subtree. `adjust_sets` must be true when pruning
    /// a live subtree (removes contained nodes from the frontier/terminal sets); false is
    /// reserved for whole-tree teardown, where no other code will look at those sets again.
    pub fn delete_subtree(&mut self, node: NodeIndex, adjust_sets: bool) {
        for child in self.children(node) {
            self.delete_subtree(child, adjust_sets);
        }
        if adjust_sets {
            let path_objective = self.graph[node].path_objective();
            self.frontier.remove(node, path_objective);
            self.terminals.remove(&node);
        }
        self.graph.remove_node(node);
        self.freed_slots += 1;
    }

    /// Early-termination collapse: `terminal` (a decision descendant of `top`) has reached
    /// `top.max_possible_objective`. Prunes every sibling along the ancestry chain from
    /// `terminal` up to `top`, marking each ancestor solved with the terminal's objective.
    pub fn select_terminal_path(&mut self, top: NodeIndex, terminal: NodeIndex) {
        self.terminals.insert(terminal);
        let objective = self.graph[terminal].objective;
        let mut current = terminal;
        while current != top {
            let parent = self.parent(current).expect("terminal has an ancestry chain up to top");
            for sibling in self.children(parent) {
                if sibling != current {
                    self.delete_subtree(sibling, true);
                }
            }
            let ancestor = &mut self.graph[parent];
            ancestor.tree_solved = true;
            ancestor.objective = objective;
            current = parent;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RelicSet;
    use crate::piles::PileStore;

    fn root_state() -> CombatState {
        let store = PileStore::new();
        CombatState::new_root(100, 100, store.empty_handle(), store.empty_handle(), RelicSet::empty())
    }

    #[test]
    fn create_child_links_parent_and_increments_depth() {
        let mut arena = Arena::new(root_state());
        let root = arena.root();
        let child = arena.create_child(root);
        assert_eq!(arena.parent(child), Some(root));
        assert_eq!(arena.state(child).depth, 1);
    }

    #[test]
    fn delete_subtree_recycles_slots_for_reuse() {
        let mut arena = Arena::new(root_state());
        let root = arena.root();
        let child = arena.create_child(root);
        arena.delete_subtree(child, true);
        let (created_before, _, _) = arena.counters();
        let _reused = arena.create_child(root);
        let (created_after, reused_after, _) = arena.counters();
        assert_eq!(created_after, created_before);
        assert_eq!(reused_after, 1);
    }

    #[test]
    fn select_terminal_path_prunes_siblings_and_marks_ancestors_solved() {
        let mut arena = Arena::new(root_state());
        let root = arena.root();
        let keep = arena.create_child(root);
        let prune = arena.create_child(root);
        arena.state_mut(keep).objective = 100.0;
        arena.state_mut(keep).tree_solved = true;
        arena.state_mut(keep).battle_done = true;
        arena.select_terminal_path(root, keep);
        assert_eq!(arena.children(root), vec![keep]);
        assert!(arena.state(root).tree_solved);
        assert_eq!(arena.state(root).objective, 100.0);
        let _ = prune;
    }
}
