//! Back-propagation: `update_tree` walks from a changed node toward the root, updating
//! `objective`/`tree_solved` at each ancestor and collapsing/pruning children as subtrees solve.

use petgraph::stable_graph::NodeIndex;

use crate::search::tree::Arena;
use crate::PROBABILITY_EPSILON;

/// Walks upward from `start`, stopping either at the root or the first ancestor whose
/// objective/solved-flag did not change. Running this on an already-solved tree is a fixed
/// point.
pub fn update_tree(arena: &mut Arena, start: NodeIndex) {
    let mut current = start;
    loop {
        let Some(parent) = arena.parent(current) else { break };
        let children = arena.children(parent);
        let changed = match children.as_slice() {
            [] => false,
            [only] => inherit_single_child(arena, parent, *only),
            _ => {
                if arena.state(parent).has_pending_action() {
                    update_chance_parent(arena, parent, &children)
                } else {
                    update_decision_parent(arena, parent, &children)
                }
            }
        };
        if !changed {
            break;
        }
        current = parent;
    }
}

fn inherit_single_child(arena: &mut Arena, parent: NodeIndex, child: NodeIndex) -> bool {
    let (objective, solved) = {
        let c = arena.state(child);
        (c.objective, c.tree_solved)
    };
    let p = arena.state_mut(parent);
    let changed = (p.objective - objective).abs() > PROBABILITY_EPSILON || p.tree_solved != solved;
    p.objective = objective;
    p.tree_solved = solved;
    changed
}

/// chance-parent rule: probability-weighted mean, solved iff every child is solved.
fn update_chance_parent(arena: &mut Arena, parent: NodeIndex, children: &[NodeIndex]) -> bool {
    let mut weighted = 0.0;
    let mut total_prob = 0.0;
    let mut all_solved = true;
    for &child in children {
        let c = arena.state(child);
        weighted += c.probability * c.objective;
        total_prob += c.probability;
        all_solved &= c.tree_solved;
    }
    let objective = weighted / total_prob;
    let p = arena.state_mut(parent);
    let changed = (p.objective - objective).abs() > PROBABILITY_EPSILON || p.tree_solved != all_solved;
    p.objective = objective;
    p.tree_solved = all_solved;
    changed
}

/// Decision-parent rule: partitions children by solved status, keeps only the lines that could
/// still matter, and marks the parent solved the moment exactly one survives.
fn update_decision_parent(arena: &mut Arena, parent: NodeIndex, children: &[NodeIndex]) -> bool {
    let mut solved = Vec::new();
    let mut unsolved = Vec::new();
    for &child in children {
        let c = arena.state(child);
        if c.tree_solved {
            solved.push((child, c.objective));
        } else {
            unsolved.push((child, c.objective));
        }
    }
    let best_solved = solved.iter().copied().max_by(|a, b| a.1.total_cmp(&b.1));
    let best_unsolved = unsolved.iter().copied().max_by(|a, b| a.1.total_cmp(&b.1));

    let (objective, solved_now) = if unsolved.is_empty() {
        let (best_node, best_objective) = best_solved.expect("decision parent always has a child");
        for &(child, _) in &solved {
            if child != best_node {
                arena.delete_subtree(child, true);
            }
        }
        (best_objective, true)
    } else if solved.is_empty() {
        (best_unsolved.expect("nonempty unsolved has a best").1, false)
    } else {
        let (best_solved_node, best_solved_objective) = best_solved.unwrap();
        let best_unsolved_objective = best_unsolved.unwrap().1;
        for &(child, _) in &solved {
            if child != best_solved_node {
                arena.delete_subtree(child, true);
            }
        }
        for &(child, objective) in &unsolved {
            if objective <= best_solved_objective {
                arena.delete_subtree(child, true);
            }
        }
        let remaining = arena.children(parent);
        let objective = best_solved_objective.max(best_unsolved_objective);
        (objective, remaining.len() == 1)
    };

    let p = arena.state_mut(parent);
    let changed = (p.objective - objective).abs() > PROBABILITY_EPSILON || p.tree_solved != solved_now;
    p.objective = objective;
    p.tree_solved = solved_now;
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RelicSet;
    use crate::piles::PileStore;
    use crate::state::combat::CombatState;
    use crate::state::pending::{PendingAction, PendingQueue};

    fn root_state() -> CombatState {
        let store = PileStore::new();
        CombatState::new_root(100, 100, store.empty_handle(), store.empty_handle(), RelicSet::empty())
    }

    #[test]
    fn chance_parent_takes_probability_weighted_mean() {
        let mut arena = Arena::new(root_state());
        let root = arena.root();
        arena.state_mut(root).pending_actions = PendingQueue::single(PendingAction::GenerateIntents);
        let a = arena.create_child(root);
        let b = arena.create_child(root);
        arena.state_mut(a).probability = 0.25;
        arena.state_mut(a).objective = 100.0;
        arena.state_mut(a).tree_solved = true;
        arena.state_mut(b).probability = 0.75;
        arena.state_mut(b).objective = 60.0;
        arena.state_mut(b).tree_solved = true;
        update_tree(&mut arena, a);
        assert!((arena.state(root).objective - 70.0).abs() < 1e-9);
        assert!(arena.state(root).tree_solved);
    }

    #[test]
    fn decision_parent_prunes_dominated_unsolved_lines() {
        let mut arena = Arena::new(root_state());
        let root = arena.root();
        arena.state_mut(root).pending_actions = PendingQueue::empty();
        let winner = arena.create_child(root);
        let loser = arena.create_child(root);
        arena.state_mut(winner).objective = 90.0;
        arena.state_mut(winner).tree_solved = true;
        arena.state_mut(loser).objective = 50.0;
        arena.state_mut(loser).tree_solved = false;
        update_tree(&mut arena, winner);
        assert_eq!(arena.children(root), vec![winner]);
        assert!(arena.state(root).tree_solved);
        assert_eq!(arena.state(root).objective, 90.0);
    }

    #[test]
    fn decision_parent_keeps_exploring_a_promising_unsolved_line() {
        let mut arena = Arena::new(root_state());
        let root = arena.root();
        arena.state_mut(root).pending_actions = PendingQueue::empty();
        let solved_low = arena.create_child(root);
        let unsolved_high = arena.create_child(root);
        arena.state_mut(solved_low).objective = 40.0;
        arena.state_mut(solved_low).tree_solved = true;
        arena.state_mut(unsolved_high).objective = 95.0;
        arena.state_mut(unsolved_high).tree_solved = false;
        update_tree(&mut arena, solved_low);
        assert_eq!(arena.children(root).len(), 2);
        assert!(!arena.state(root).tree_solved);
        assert_eq!(arena.state(root).objective, 95.0);
    }
}
