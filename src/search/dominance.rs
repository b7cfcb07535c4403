//! Dominance pruning of candidate endings: the per-decision-frame cleanup that runs after the
//! worklist in `expansion::find_player_choices` drains.

use petgraph::stable_graph::NodeIndex;

use crate::search::tree::Arena;

/// returns the surviving subset of `endings`, applying (in order): keep only the best
/// player-dead ending, pairwise dominance elimination among survivors, and (when
/// `prefer_survival` is set) dropping every dead ending once a living one survives.
pub fn prune_dominated_endings(
    arena: &Arena,
    endings: &[NodeIndex],
    observes_last_card: bool,
    prefer_survival: bool,
) -> Vec<NodeIndex> {
    let mut alive = vec![true; endings.len()];

    let dead: Vec<usize> = (0..endings.len()).filter(|&i| arena.state(endings[i]).hp == 0).collect();
    if let Some(&best_dead) =
        dead.iter().max_by(|&&a, &&b| arena.state(endings[a]).objective.total_cmp(&arena.state(endings[b]).objective))
    {
        for &i in &dead {
            if i != best_dead {
                alive[i] = false;
            }
        }
    }

    // pairwise elimination: a dominated ending is never used as a benchmark for later pairs.
    for benchmark in 0..endings.len() {
        if !alive[benchmark] {
            continue;
        }
        for candidate in 0..endings.len() {
            if candidate == benchmark || !alive[candidate] {
                continue;
            }
            let a = arena.state(endings[candidate]);
            let b = arena.state(endings[benchmark]);
            if a.worse_or_equal(b, observes_last_card) {
                alive[candidate] = false;
            }
        }
    }

    if prefer_survival {
        let any_living_survivor = (0..endings.len()).any(|i| alive[i] && arena.state(endings[i]).hp > 0);
        if any_living_survivor {
            for &i in &dead {
                alive[i] = false;
            }
        }
    }

    (0..endings.len()).filter(|&i| alive[i]).map(|i| endings[i]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RelicSet;
    use crate::piles::PileStore;
    use crate::state::combat::CombatState;
    use crate::state::pending::PendingQueue;

    fn terminal(arena: &mut Arena, parent: NodeIndex, hp: i32, objective: f64) -> NodeIndex {
        let child = arena.create_child(parent);
        let state = arena.state_mut(child);
        state.pending_actions = PendingQueue::empty();
        state.hp = hp;
        state.battle_done = true;
        state.tree_solved = true;
        state.objective = objective;
        child
    }

    fn arena_with_root() -> Arena {
        let store = PileStore::new();
        Arena::new(CombatState::new_root(100, 100, store.empty_handle(), store.empty_handle(), RelicSet::empty()))
    }

    #[test]
    fn only_the_best_dead_ending_survives_among_dead_endings() {
        let mut arena = arena_with_root();
        let root = arena.root();
        let worse_dead = terminal(&mut arena, root, 0, -0.05);
        let better_dead = terminal(&mut arena, root, 0, -0.01);
        let survivors = prune_dominated_endings(&arena, &[worse_dead, better_dead], false, false);
        assert_eq!(survivors, vec![better_dead]);
    }

    #[test]
    fn prefer_survival_drops_dead_endings_when_a_living_one_remains() {
        let mut arena = arena_with_root();
        let root = arena.root();
        let dead = terminal(&mut arena, root, 0, -0.01);
        let alive = terminal(&mut arena, root, 40, 40.0);
        let survivors = prune_dominated_endings(&arena, &[dead, alive], false, true);
        assert_eq!(survivors, vec![alive]);
    }

    #[test]
    fn default_policy_keeps_the_best_dead_ending_alongside_a_living_one() {
        let mut arena = arena_with_root();
        let root = arena.root();
        let dead = terminal(&mut arena, root, 0, -0.01);
        let alive = terminal(&mut arena, root, 40, 40.0);
        let survivors = prune_dominated_endings(&arena, &[dead, alive], false, false);
        assert_eq!(survivors.len(), 2);
    }
}
