//! A single pass over the solved tree that compiles the Δhp distribution, death statistics,
//! turn-count distribution, and per-turn draw/play frequencies.

use std::collections::{BTreeMap, HashMap};

use petgraph::stable_graph::NodeIndex;

use crate::piles::{PileHandle, PileStore};
use crate::search::tree::Arena;
use crate::state::decision::Decision;
use crate::state::pending::PendingAction;
use crate::{CardId, Hp, Objective, Probability};

#[derive(Debug, Clone)]
pub struct Report {
    pub expected_hp: Objective,
    pub hp_change_distribution: BTreeMap<Hp, Probability>,
    pub min_delta_hp: Hp,
    pub max_delta_hp: Hp,
    pub delta_hp_5th_percentile: Hp,
    pub delta_hp_95th_percentile: Hp,
    pub death_probability: Probability,
    pub expected_remaining_enemy_hp_on_death: Objective,
    pub turn_distribution: BTreeMap<u32, Probability>,
    pub expected_turns: f64,
    /// probability that card `card` is played on turn `turn`, conditioned on reaching that turn.
    pub per_turn_play_frequency: BTreeMap<(u32, CardId), Probability>,
    /// expected number of copies of `card` drawn on turn `turn`, conditioned on reaching it.
    pub per_turn_draw_frequency: BTreeMap<(u32, CardId), f64>,
    /// number of live nodes reachable from the root, used to gate the optional tree dump.
    pub node_count: usize,
}

fn hand_delta(store: &PileStore, before: PileHandle, after: PileHandle) -> Vec<(CardId, u16)> {
    let before_pile = store.pile(before);
    store
        .pile(after)
        .entries()
        .iter()
        .filter_map(|&(id, count)| {
            let prior = before_pile.count(id);
            (count > prior).then_some((id, count - prior))
        })
        .collect()
}

fn remaining_enemy_hp(state: &crate::state::combat::CombatState) -> Objective {
    state.monsters.iter().flatten().filter(|m| !m.is_dead()).map(|m| m.hp as Objective).sum()
}

fn percentile(distribution: &BTreeMap<Hp, Probability>, total: Probability, fraction: f64) -> Hp {
    let mut cumulative = 0.0;
    for (&delta, &mass) in distribution {
        cumulative += mass;
        if total <= 0.0 || cumulative / total >= fraction {
            return delta;
        }
    }
    distribution.keys().next_back().copied().unwrap_or(0)
}

/// walks the whole tree once from the root, computing every node's reach probability (the
/// product of chance-edge probabilities along its unique path from the root) along the way, and
/// folding terminal/play/draw statistics into the running totals as each node is visited.
pub fn compile(arena: &Arena, store: &PileStore) -> Report {
    let root = arena.root();
    let initial_hp = arena.state(root).hp;

    let mut reach: HashMap<NodeIndex, Probability> = HashMap::new();
    reach.insert(root, 1.0);

    let mut hp_change_distribution: BTreeMap<Hp, Probability> = BTreeMap::new();
    let mut death_probability = 0.0;
    let mut death_weighted_remaining_enemy_hp = 0.0;
    let mut turn_distribution: BTreeMap<u32, Probability> = BTreeMap::new();
    let mut turn_reach: BTreeMap<u32, Probability> = BTreeMap::new();
    let mut play_mass: BTreeMap<(u32, CardId), Probability> = BTreeMap::new();
    let mut draw_mass: BTreeMap<(u32, CardId), f64> = BTreeMap::new();

    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        let node_reach = reach[&node];
        let state = arena.state(node);

        if let Some(Decision::PlayCard { card, .. }) = state.parent_decision {
            *play_mass.entry((state.turn, card)).or_insert(0.0) += node_reach;
        }
        if state.pending_actions.head() == Some(PendingAction::GenerateIntents) {
            *turn_reach.entry(state.turn).or_insert(0.0) += node_reach;
        }
        if let Some(parent) = arena.parent(node) {
            let parent_drawing =
                matches!(arena.state(parent).pending_actions.head(), Some(PendingAction::DrawCards(_)));
            if parent_drawing {
                let parent_hand = arena.state(parent).hand;
                for (id, count) in hand_delta(store, parent_hand, state.hand) {
                    *draw_mass.entry((state.turn, id)).or_insert(0.0) += count as f64 * node_reach;
                }
            }
        }

        let parent_has_pending_action = arena.state(node).has_pending_action();
        for child in arena.children(node) {
            let probability = if parent_has_pending_action { arena.state(child).probability } else { 1.0 };
            reach.insert(child, node_reach * probability);
            stack.push(child);
        }
    }

    for terminal in arena.terminals() {
        let probability = reach.get(&terminal).copied().unwrap_or(0.0);
        let state = arena.state(terminal);
        let delta = state.hp - initial_hp;
        *hp_change_distribution.entry(delta).or_insert(0.0) += probability;
        *turn_distribution.entry(state.turn).or_insert(0.0) += probability;
        if state.hp == 0 {
            death_probability += probability;
            death_weighted_remaining_enemy_hp += probability * remaining_enemy_hp(state);
        }
    }

    let total_terminal_mass: Probability = hp_change_distribution.values().sum();
    let min_delta_hp = hp_change_distribution.keys().next().copied().unwrap_or(0);
    let max_delta_hp = hp_change_distribution.keys().next_back().copied().unwrap_or(0);
    let expected_turns = turn_distribution.iter().map(|(&t, &p)| t as f64 * p).sum::<f64>()
        / total_terminal_mass.max(crate::PROBABILITY_EPSILON);

    let per_turn_play_frequency = play_mass
        .into_iter()
        .map(|((turn, card), mass)| {
            let denominator = turn_reach.get(&turn).copied().unwrap_or(1.0).max(crate::PROBABILITY_EPSILON);
            ((turn, card), mass / denominator)
        })
        .collect();
    let per_turn_draw_frequency = draw_mass
        .into_iter()
        .map(|((turn, card), mass)| {
            let denominator = turn_reach.get(&turn).copied().unwrap_or(1.0).max(crate::PROBABILITY_EPSILON);
            ((turn, card), mass / denominator)
        })
        .collect();

    Report {
        expected_hp: arena.state(root).objective,
        delta_hp_5th_percentile: percentile(&hp_change_distribution, total_terminal_mass, 0.05),
        delta_hp_95th_percentile: percentile(&hp_change_distribution, total_terminal_mass, 0.95),
        min_delta_hp,
        max_delta_hp,
        hp_change_distribution,
        death_probability,
        expected_remaining_enemy_hp_on_death: if death_probability > crate::PROBABILITY_EPSILON {
            death_weighted_remaining_enemy_hp / death_probability
        } else {
            0.0
        },
        turn_distribution,
        expected_turns,
        per_turn_play_frequency,
        per_turn_draw_frequency,
        node_count: reach.len(),
    }
}
