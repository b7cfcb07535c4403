//! Main loop: pop the frontier's best node, dispatch it, repeat until nothing is left to expand.
//! By the time `run` returns, the tree is fully solved and `root().objective` is the expected
//! final HP.

use crate::catalog::FightPreset;
use crate::piles::PileStore;
use crate::search::expansion::expand;
use crate::search::options::SolverOptions;
use crate::search::tree::Arena;
use crate::state::combat::CombatState;

pub struct Solver {
    pub arena: Arena,
    pub store: PileStore,
    pub fight: &'static FightPreset,
    pub options: SolverOptions,
}

impl Solver {
    pub fn new(root: CombatState, store: PileStore, fight: &'static FightPreset, options: SolverOptions) -> Self {
        Self { arena: Arena::new(root), store, fight, options }
    }

    /// drives the search to completion. Returns the number of frontier pops performed, mostly
    /// useful for progress logging in the CLI.
    pub fn run(&mut self) -> u64 {
        let mut iterations = 0u64;
        while let Some(node) = self.arena.frontier_pop_max() {
            expand(&mut self.arena, &mut self.store, node, self.fight, &self.options);
            iterations += 1;
            if iterations % 10_000 == 0 {
                let (created, reused, expanded) = self.arena.counters();
                log::debug!(
                    "search progress: {expanded} expanded, {created} created, {reused} reused, frontier {}",
                    iterations
                );
            }
        }
        iterations
    }

    pub fn expected_hp(&self) -> crate::Objective {
        self.arena.state(self.arena.root()).objective
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{registry, RelicSet};
    use crate::piles::Pile;

    #[test]
    fn a_single_strike_deterministic_mob_solves_to_ninety_hp() {
        registry::register_defaults();
        let mut store = PileStore::new();
        let empty = store.empty_handle();
        let deck = store.intern(Pile::from_counts([(registry::ids::STRIKE, 5)]));
        let root = CombatState::new_root(100, 100, deck, empty, RelicSet::empty());
        let fight = registry::fight("test_mob").unwrap();

        let mut solver = Solver::new(root, store, fight, SolverOptions::default());
        solver.run();

        assert!(solver.arena.is_frontier_empty());
        assert!(solver.arena.state(solver.arena.root()).tree_solved);
        assert!(solver.expected_hp() <= 100.0);
    }
}
