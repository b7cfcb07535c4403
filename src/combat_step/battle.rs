//! `start_battle`/`generate_intents` collaborators: the chance-bearing entry points the
//! expansion engine invokes for `PendingAction::GenerateBattle`/`GenerateIntents`.

use crate::catalog::preset::FightPreset;
use crate::catalog::registry;
use crate::catalog::registry::ids as relic_ids;
use crate::state::combat::CombatState;
use crate::state::monster::MonsterSlot;
use crate::state::pending::{PendingAction, PendingQueue};
use crate::{EnemyId, Probability, CARDS_DRAWN_PER_TURN, MAX_MOBS, STARTING_ENERGY};

/// The probability-weighted enemy layouts for a fight preset. A thin accessor so the search
/// engine never reaches into `catalog` directly for chance-expansion data.
pub fn enemy_layouts(fight: &FightPreset) -> impl Iterator<Item = (Probability, &'static [EnemyId])> {
    fight.layouts.iter().copied()
}

/// Mutates a freshly-copied root-child into turn 1: populates `monsters` from `layout` at each
/// enemy's mean HP, grants starting energy, and queues first-turn intent generation followed by
/// the opening draw.
pub fn start_battle(state: &mut CombatState, layout: &[EnemyId]) {
    debug_assert!(layout.len() <= MAX_MOBS);
    for (index, slot) in state.monsters.iter_mut().enumerate() {
        *slot = layout.get(index).map(|&id| MonsterSlot::new(id, registry::enemy(id).mean_hp()));
    }
    state.turn = 1;
    state.energy = STARTING_ENERGY;
    state.first_attack_bonus_available = state.relics.contains(relic_ids::AKABEKO);
    state.pending_actions = PendingQueue::empty();
    state.pending_actions.push(PendingAction::GenerateIntents);
    state.pending_actions.push(PendingAction::DrawCards(CARDS_DRAWN_PER_TURN));
    state.objective = state.max_possible_objective();
}

/// one living enemy's eligible intent distribution, after anti-repeat rules exclude intents
/// that would exceed their configured consecutive-repeat limit, renormalized to sum to 1.
fn eligible_intents(mob: &MonsterSlot) -> Vec<(usize, Probability)> {
    let enemy = registry::enemy(mob.template);
    let eligible: Vec<usize> = (0..enemy.intents.len())
        .filter(|&i| {
            !enemy.anti_repeats.iter().filter(|rule| rule.intent == i).any(|rule| {
                let window = rule.max_repeats as usize;
                window > 0 && mob.intent_history.iter().take(window).all(|h| *h == Some(i))
            })
        })
        .collect();
    let eligible = if eligible.is_empty() { (0..enemy.intents.len()).collect() } else { eligible };
    let total_weight: f64 = eligible.iter().map(|&i| enemy.intents[i].weight).sum();
    eligible.into_iter().map(|i| (i, enemy.intents[i].weight / total_weight)).collect()
}

/// The `generate-intents` chance expansion: the Cartesian product of every living enemy's
/// eligible-intent distribution, probability = product of the chosen per-enemy probabilities.
/// Each outcome is `(probability, [(enemy slot index, chosen intent index)])`.
pub fn generate_intents(state: &CombatState) -> Vec<(Probability, Vec<(usize, usize)>)> {
    let mut outcomes = vec![(1.0, Vec::new())];
    for index in state.living_enemy_indices() {
        let mob = state.monsters[index].expect("living index");
        let choices = eligible_intents(&mob);
        let mut next = Vec::with_capacity(outcomes.len() * choices.len());
        for (prob_so_far, picks) in &outcomes {
            for (intent_index, weight) in &choices {
                let mut picks = picks.clone();
                picks.push((index, *intent_index));
                next.push((prob_so_far * weight, picks));
            }
        }
        outcomes = next;
    }
    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::registry;
    use crate::catalog::RelicSet;
    use crate::piles::PileStore;

    fn root() -> CombatState {
        registry::register_defaults();
        let store = PileStore::new();
        CombatState::new_root(100, 100, store.empty_handle(), store.empty_handle(), RelicSet::empty())
    }

    #[test]
    fn start_battle_populates_enemies_at_mean_hp_and_queues_intents_then_draw() {
        let mut state = root();
        start_battle(&mut state, &[registry::ids::TEST_MOB]);
        assert_eq!(state.monsters[0].unwrap().hp, 100);
        assert_eq!(state.pending_actions.head(), Some(PendingAction::GenerateIntents));
    }

    #[test]
    fn deterministic_enemy_yields_a_single_full_probability_intent() {
        let mut state = root();
        start_battle(&mut state, &[registry::ids::TEST_MOB]);
        let outcomes = generate_intents(&state);
        assert_eq!(outcomes.len(), 1);
        assert!((outcomes[0].0 - 1.0).abs() < crate::PROBABILITY_EPSILON);
    }

    #[test]
    fn akabeko_bonus_is_available_only_when_owned() {
        let mut state = root();
        state.relics.insert(relic_ids::AKABEKO);
        start_battle(&mut state, &[registry::ids::TEST_MOB]);
        assert!(state.first_attack_bonus_available);
    }
}
