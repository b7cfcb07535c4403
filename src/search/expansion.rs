//! Expansion engine: the per-iteration dispatch that turns one popped frontier node into its
//! children, plus the decision-enumeration worklist (`find_player_choices`) that expands an
//! entire same-turn decision frame in one pass.

use petgraph::stable_graph::NodeIndex;

use crate::catalog::registry;
use crate::catalog::FightPreset;
use crate::combat_step::{end_turn, enemy_layouts, generate_intents, play_card, start_battle};
use crate::piles::{select, PileStore};
use crate::search::backprop::update_tree;
use crate::search::dominance::prune_dominated_endings;
use crate::search::options::SolverOptions;
use crate::search::tree::Arena;
use crate::state::decision::{Decision, Target};
use crate::state::pending::PendingAction;
use crate::{CardId, Objective, MAX_HAND_SIZE, PROBABILITY_EPSILON};

/// Dispatches on `node`'s head pending action, falling through to decision enumeration when
/// there is none.
pub fn expand(arena: &mut Arena, store: &mut PileStore, node: NodeIndex, fight: &FightPreset, options: &SolverOptions) {
    arena.mark_expanded();
    match arena.state(node).pending_actions.head() {
        Some(PendingAction::GenerateBattle) => expand_generate_battle(arena, node, fight),
        Some(PendingAction::GenerateIntents) => expand_generate_intents(arena, node),
        Some(PendingAction::DrawCards(k)) => expand_draw_cards(arena, store, node, k),
        None => find_player_choices(arena, store, node, options),
    }
}

fn expand_generate_battle(arena: &mut Arena, node: NodeIndex, fight: &FightPreset) {
    let layouts: Vec<_> = enemy_layouts(fight).collect();
    for (probability, layout) in layouts {
        let child = arena.create_child(node);
        arena.state_mut(child).probability = probability;
        start_battle(arena.state_mut(child), layout);
        arena.frontier_insert(child);
    }
}

fn expand_generate_intents(arena: &mut Arena, node: NodeIndex) {
    let outcomes = generate_intents(arena.state(node));
    for (probability, picks) in outcomes {
        let child = arena.create_child(node);
        let state = arena.state_mut(child);
        state.probability = probability;
        for (mob_index, intent_index) in &picks {
            if let Some(mob) = state.monsters[*mob_index].as_mut() {
                mob.record_intent(*intent_index);
            }
        }
        state.pending_actions.pop();
        arena.frontier_insert(child);
    }
}

fn expand_draw_cards(arena: &mut Arena, store: &mut PileStore, node: NodeIndex, k: u8) {
    let (draw_pile, discard_pile, hand) = {
        let s = arena.state(node);
        (s.draw_pile, s.discard_pile, s.hand)
    };
    let draw_size = store.pile(draw_pile).total();
    let discard_size = store.pile(discard_pile).total();

    if draw_size == 0 && discard_size > 0 {
        let empty = store.empty_handle();
        let child = arena.create_child(node);
        let state = arena.state_mut(child);
        state.probability = 1.0;
        state.draw_pile = discard_pile;
        state.discard_pile = empty;
        arena.frontier_insert(child);
        return;
    }

    let hand_size = store.pile(hand).total();
    let capacity = (MAX_HAND_SIZE as u32).saturating_sub(hand_size);
    let k_prime = (k as u32).min(draw_size).min(capacity);

    if k_prime == 0 {
        let child = arena.create_child(node);
        let state = arena.state_mut(child);
        state.probability = 1.0;
        state.pending_actions.pop();
        arena.frontier_insert(child);
        return;
    }

    for (probability, drawn, remaining) in select(store, draw_pile, k_prime) {
        let drawn_entries = store.pile(drawn).entries().to_vec();
        let child = arena.create_child(node);
        let mut next_hand = arena.state(child).hand;
        for (id, count) in drawn_entries {
            for _ in 0..count {
                next_hand = store.add_card(next_hand, id);
            }
        }
        let state = arena.state_mut(child);
        state.probability = probability;
        state.draw_pile = remaining;
        state.hand = next_hand;
        state.pending_actions.decrement_head_draw(k_prime as u8);
        arena.frontier_insert(child);
    }
}

/// True when `child` is terminal and its objective already matches `top.max_possible_objective`,
/// triggering the early-termination collapse. On a hit, performs the collapse and the backprop
/// continuation above `top`, then tells the caller to stop expanding this decision frame.
fn terminated_early(arena: &mut Arena, top: NodeIndex, child: NodeIndex, max_possible: Objective) -> bool {
    let state = arena.state(child);
    if state.battle_done && (state.objective - max_possible).abs() < PROBABILITY_EPSILON {
        arena.select_terminal_path(top, child);
        update_tree(arena, top);
        true
    } else {
        false
    }
}

/// Enumerates the target choices for playing `card` from `at`'s hand: one per living enemy for
/// a targeted card, one per distinct hand card id plus a null fallback for a card that targets a
/// hand card, otherwise a single untargeted child.
fn card_targets(arena: &Arena, store: &PileStore, at: NodeIndex, card: &crate::catalog::Card) -> Vec<Option<Target>> {
    if card.flags.targeted {
        arena.state(at).living_enemy_indices().map(|i| Some(Target::Enemy(i))).collect()
    } else if card.flags.targets_hand_card {
        let mut targets: Vec<Option<Target>> = store
            .pile(arena.state(at).hand)
            .entries()
            .iter()
            .map(|(id, _)| Some(Target::HandCard(*id as usize)))
            .collect();
        targets.push(None);
        targets
    } else {
        vec![None]
    }
}

/// `find_player_choices`: expands `n` together with every reachable same-decision descendant
/// until each leaf of the sub-expansion is terminal or chance-pending, then prunes dominated
/// candidate endings and registers the survivors.
fn find_player_choices(arena: &mut Arena, store: &mut PileStore, n: NodeIndex, options: &SolverOptions) {
    let max_possible = arena.state(n).max_possible_objective();
    let observes_last_card = registry::catalog_observes_last_card();

    let mut worklist = vec![n];
    let mut endings: Vec<NodeIndex> = Vec::new();

    while let Some(w) = worklist.pop() {
        let end_child = arena.create_child(w);
        arena.state_mut(end_child).parent_decision = Some(Decision::EndTurn);
        end_turn(arena.state_mut(end_child), store);
        if terminated_early(arena, n, end_child, max_possible) {
            return;
        }
        endings.push(end_child);

        let (hand, energy) = {
            let s = arena.state(w);
            (s.hand, s.energy)
        };
        let playable_ids: Vec<CardId> = store
            .pile(hand)
            .entries()
            .iter()
            .map(|(id, _)| *id)
            .filter(|&id| registry::card(id).playable(energy))
            .collect();

        for card_id in playable_ids {
            let card = registry::card(card_id);
            for target in card_targets(arena, store, w, card) {
                let child = arena.create_child(w);
                arena.state_mut(child).parent_decision = Some(Decision::PlayCard { card: card_id, target });
                play_card(arena.state_mut(child), store, card_id, target);
                if terminated_early(arena, n, child, max_possible) {
                    return;
                }
                let is_ending = {
                    let s = arena.state(child);
                    s.battle_done || s.has_pending_action()
                };
                if is_ending {
                    endings.push(child);
                } else {
                    worklist.push(child);
                }
            }
        }
    }

    let survivors = prune_dominated_endings(arena, &endings, observes_last_card, options.prefer_survival);
    for &ending in &endings {
        if !survivors.contains(&ending) {
            prune_toward(arena, n, ending);
        }
    }
    for &ending in &survivors {
        if arena.state(ending).battle_done {
            arena.terminal_insert(ending);
            update_tree(arena, ending);
        } else {
            arena.frontier_insert(ending);
        }
    }
}

/// Walks from a dominated `ending` up toward `top`, detaching and recycling every ancestor that
/// is left with no surviving children. `ending` itself is never a descendant of another
/// dominated ending still awaiting pruning, since dominating it would have already deleted the
/// whole subtree.
fn prune_toward(arena: &mut Arena, top: NodeIndex, ending: NodeIndex) {
    let mut ancestors = Vec::new();
    let mut current = ending;
    while current != top {
        let parent = arena.parent(current).expect("ending has an ancestry chain up to top");
        ancestors.push(parent);
        current = parent;
    }
    arena.delete_subtree(ending, true);
    for ancestor in ancestors {
        if arena.children(ancestor).is_empty() {
            arena.delete_subtree(ancestor, true);
        } else {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{registry, RelicSet};
    use crate::piles::PileStore;
    use crate::state::combat::CombatState;

    fn arena_with_root() -> (Arena, PileStore) {
        registry::register_defaults();
        let store = PileStore::new();
        let arena = Arena::new(CombatState::new_root(
            100,
            100,
            store.empty_handle(),
            store.empty_handle(),
            RelicSet::empty(),
        ));
        (arena, store)
    }

    #[test]
    fn generate_battle_creates_one_child_per_layout_and_starts_it() {
        let (mut arena, mut store) = arena_with_root();
        let root = arena.root();
        let fight = registry::fight("test_mob").unwrap();
        expand(&mut arena, &mut store, root, fight, &SolverOptions::default());
        let children = arena.children(root);
        assert_eq!(children.len(), 1);
        assert_eq!(arena.state(children[0]).turn, 1);
        assert!(arena.state(children[0]).monsters[0].is_some());
    }

    #[test]
    fn draw_cards_with_empty_hand_fills_it_from_the_deck() {
        let (mut arena, mut store) = arena_with_root();
        let root = arena.root();
        let fight = registry::fight("test_mob").unwrap();
        expand(&mut arena, &mut store, root, fight, &SolverOptions::default());
        let battle_child = arena.children(root)[0];
        expand(&mut arena, &mut store, battle_child, fight, &SolverOptions::default());
        let intents_child = arena.children(battle_child)[0];

        let deck = store.intern(crate::piles::Pile::from_counts([(registry::ids::STRIKE, 5)]));
        arena.state_mut(intents_child).draw_pile = deck;
        expand(&mut arena, &mut store, intents_child, fight, &SolverOptions::default());
        let drawn_children = arena.children(intents_child);
        assert_eq!(drawn_children.len(), 1);
        assert_eq!(store.pile(arena.state(drawn_children[0]).hand).total(), 5);
        assert!(arena.state(drawn_children[0]).pending_actions.is_empty());
    }

    #[test]
    fn decision_enumeration_always_offers_at_least_one_surviving_ending() {
        let (mut arena, mut store) = arena_with_root();
        let root = arena.root();
        let fight = registry::fight("test_mob").unwrap();
        expand(&mut arena, &mut store, root, fight, &SolverOptions::default());
        let battle_child = arena.children(root)[0];
        expand(&mut arena, &mut store, battle_child, fight, &SolverOptions::default());
        let intents_child = arena.children(battle_child)[0];
        arena.state_mut(intents_child).pending_actions = crate::state::pending::PendingQueue::empty();
        arena.state_mut(intents_child).hand =
            store.intern(crate::piles::Pile::from_counts([(registry::ids::STRIKE, 1)]));

        find_player_choices(&mut arena, &mut store, intents_child, &SolverOptions::default());
        assert!(!arena.children(intents_child).is_empty());
    }
}
