//! Tagged-action dispatcher: the one place every `ActionKind` variant is executed. Extending
//! the catalog with a new mechanic means adding a variant to `ActionKind` and an arm here,
//! never a new trait or a polymorphic hierarchy.

use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::OnceLock;

use crate::catalog::{Action, ActionKind, BuffKind};
use crate::piles::PileStore;
use crate::state::combat::CombatState;
use crate::state::decision::Target;
use crate::state::pending::PendingAction;
use crate::state::stance::Stance;
use crate::{CardId, Hp};

/// Registry of action names already warned about this process, so `Unimplemented` logs once
/// per kind rather than once per occurrence.
fn warned() -> &'static Mutex<HashSet<&'static str>> {
    static WARNED: OnceLock<Mutex<HashSet<&'static str>>> = OnceLock::new();
    WARNED.get_or_init(|| Mutex::new(HashSet::new()))
}

pub(crate) fn warn_unimplemented_once(name: &'static str) {
    let mut seen = warned().lock().expect("warned-effects lock poisoned");
    if seen.insert(name) {
        log::warn!("unimplemented card action {name:?}, treating as no-op");
    }
}

/// outgoing damage after strength, weak, stance, and the one-shot first-attack relic bonus.
/// Vulnerable is a property of the *target*, applied in `deal_damage_to_enemy` instead.
fn outgoing_damage(state: &mut CombatState, base: Hp) -> Hp {
    let mut amount = base + state.buffs.get(BuffKind::Strength);
    if state.buffs.get(BuffKind::Weak) > 0 {
        amount = ((amount as f64) * 0.75).floor() as Hp;
    }
    amount *= state.stance.damage_multiplier();
    if state.first_attack_bonus_available {
        amount += 8;
        state.first_attack_bonus_available = false;
    }
    amount.max(0)
}

/// apply one hit of `amount` to the enemy at `index`: vulnerable scaling, curl-up's one-shot
/// block grant, then the actual HP reduction, ending the battle if this was the last enemy.
fn deal_damage_to_enemy(state: &mut CombatState, index: usize, amount: Hp) {
    let Some(mob) = state.monsters[index].as_mut() else { return };
    let mut amount = amount;
    if mob.buffs.get(BuffKind::Vulnerable) > 0 {
        amount = ((amount as f64) * 1.5).floor() as Hp;
    }
    if mob.buffs.get(BuffKind::CurlUp) > 0 {
        let stacks = mob.buffs.get(BuffKind::CurlUp);
        mob.block += stacks;
        mob.buffs.set(BuffKind::CurlUp, 0);
    }
    mob.take_damage(amount);
    if !state.mobs_alive() {
        state.finish_battle();
    }
}

pub(crate) fn living_enemy_indices(state: &CombatState) -> Vec<usize> {
    state.living_enemy_indices().collect()
}

/// Executes one card-effect step. `target` is the decision-level target chosen for the card
/// this action belongs to. `x_hits`, when `Some`, overrides an x-cost attack-all card's hit
/// count with the energy actually spent paying for it.
pub fn apply_action(
    state: &mut CombatState,
    store: &mut PileStore,
    action: Action,
    target: Option<Target>,
    x_hits: Option<i16>,
) {
    use ActionKind::*;
    match action.kind {
        Attack => {
            if let Some(Target::Enemy(index)) = target {
                let amount = outgoing_damage(state, action.args[0]);
                for _ in 0..action.args[1].max(1) {
                    if state.monsters[index].is_none_or(|m| m.is_dead()) {
                        break;
                    }
                    deal_damage_to_enemy(state, index, amount);
                    if state.battle_done {
                        break;
                    }
                }
            }
        }
        AttackBodySlam => {
            if let Some(Target::Enemy(index)) = target {
                let amount = outgoing_damage(state, state.block);
                deal_damage_to_enemy(state, index, amount);
            }
        }
        AttackAll => {
            let amount = outgoing_damage(state, action.args[0]);
            let hits = x_hits.unwrap_or(action.args[1]).max(0);
            for _ in 0..hits {
                for index in living_enemy_indices(state) {
                    deal_damage_to_enemy(state, index, amount);
                    if state.battle_done {
                        return;
                    }
                }
            }
        }
        Block => state.block += action.args[0],
        Buff => {
            if let Ok(kind) = BuffKind::try_from(action.args[0]) {
                state.buffs.add(kind, action.args[1]);
            }
        }
        Debuff => {
            if let (Some(Target::Enemy(index)), Ok(kind)) =
                (target, BuffKind::try_from(action.args[0]))
            {
                if let Some(mob) = state.monsters[index].as_mut() {
                    mob.buffs.add(kind, action.args[1]);
                }
            }
        }
        DebuffAll => {
            if let Ok(kind) = BuffKind::try_from(action.args[0]) {
                for index in living_enemy_indices(state) {
                    state.monsters[index].as_mut().expect("living index").buffs.add(kind, action.args[1]);
                }
            }
        }
        LoseHp => state.take_hp_loss(action.args[0]),
        Heal => state.heal(action.args[0]),
        DrawCards => state.pending_actions.push(PendingAction::DrawCards(action.args[0] as u8)),
        GainEnergy => state.energy += action.args[0] as crate::Energy,
        ChangeStance => {
            if let Ok(stance) = Stance::try_from(action.args[0]) {
                state.stance = stance;
            }
        }
        AddCardToHand => add_copies(state, store, action.args[0] as CardId, action.args[1], PileSlot::Hand),
        AddCardToDrawPile => {
            add_copies(state, store, action.args[0] as CardId, action.args[1], PileSlot::Draw)
        }
        AddCardToDiscardPile => {
            add_copies(state, store, action.args[0] as CardId, action.args[1], PileSlot::Discard)
        }
        UpgradeCardInHand => upgrade_hand(state, store, target),
        IfLastCardSkill | IfLastCardAttack | IfInStance => {
            // consumed by the card-resolution loop in `turn::play_card`, never dispatched
            // directly: these tag the *next* action as conditional rather than act themselves.
        }
        Unimplemented(name) => warn_unimplemented_once(name),
        None => {}
    }
}

enum PileSlot {
    Hand,
    Draw,
    Discard,
}

fn add_copies(state: &mut CombatState, store: &mut PileStore, card: CardId, count: i16, slot: PileSlot) {
    let handle = match slot {
        PileSlot::Hand => &mut state.hand,
        PileSlot::Draw => &mut state.draw_pile,
        PileSlot::Discard => &mut state.discard_pile,
    };
    for _ in 0..count.max(0) {
        *handle = store.add_card(*handle, card);
    }
}

/// upgrades the hand card at `target`'s slot, or every upgradeable card in hand when untargeted
/// (the card's own flag decides whether it is single- or all-targeted; this function only
/// receives `target` already resolved to that policy by the caller).
fn upgrade_hand(state: &mut CombatState, store: &mut PileStore, target: Option<Target>) {
    let candidates: Vec<CardId> = match target {
        Some(Target::HandCard(_)) | None => {
            store.pile(state.hand).entries().iter().map(|(id, _)| *id).collect()
        }
        Some(Target::Enemy(_)) => return,
    };
    for card_id in candidates {
        if let Some(card) = crate::catalog::registry::try_card(card_id) {
            if let Some(upgraded) = card.upgraded {
                state.hand = store.remove_card(state.hand, card_id);
                state.hand = store.add_card(state.hand, upgraded);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::registry;
    use crate::piles::Pile;
    use crate::state::monster::MonsterSlot;
    use crate::state::pending::PendingQueue;

    fn fresh(store: &mut PileStore) -> CombatState {
        let empty = store.empty_handle();
        let mut state = CombatState::new_root(100, 100, empty, empty, crate::catalog::RelicSet::empty());
        state.pending_actions = PendingQueue::empty();
        state.monsters[0] = Some(MonsterSlot::new(0, 50));
        state
    }

    #[test]
    fn attack_deals_base_damage_to_the_targeted_enemy() {
        registry::register_defaults();
        let mut store = PileStore::new();
        let mut state = fresh(&mut store);
        apply_action(&mut state, &mut store, Action::attack(6, 1), Some(Target::Enemy(0)), None);
        assert_eq!(state.monsters[0].unwrap().hp, 44);
    }

    #[test]
    fn strength_adds_to_attack_damage() {
        let mut store = PileStore::new();
        let mut state = fresh(&mut store);
        state.buffs.add(BuffKind::Strength, 4);
        apply_action(&mut state, &mut store, Action::attack(6, 1), Some(Target::Enemy(0)), None);
        assert_eq!(state.monsters[0].unwrap().hp, 40);
    }

    #[test]
    fn x_cost_attack_all_uses_energy_spent_as_hit_count() {
        let mut store = PileStore::new();
        let mut state = fresh(&mut store);
        state.monsters[1] = Some(MonsterSlot::new(0, 50));
        apply_action(&mut state, &mut store, Action::new(ActionKind::AttackAll, [5, 0]), None, Some(3));
        assert_eq!(state.monsters[0].unwrap().hp, 35);
        assert_eq!(state.monsters[1].unwrap().hp, 35);
    }

    #[test]
    fn curl_up_grants_block_on_first_hit_only() {
        let mut store = PileStore::new();
        let mut state = fresh(&mut store);
        state.monsters[0].as_mut().unwrap().buffs.add(BuffKind::CurlUp, 9);
        apply_action(&mut state, &mut store, Action::attack(1, 1), Some(Target::Enemy(0)), None);
        assert_eq!(state.monsters[0].unwrap().block, 9);
        assert_eq!(state.monsters[0].unwrap().buffs.get(BuffKind::CurlUp), 0);
    }

    #[test]
    fn draw_cards_action_enqueues_a_pending_draw() {
        let mut store = PileStore::new();
        let mut state = fresh(&mut store);
        apply_action(&mut state, &mut store, Action::draw_cards(3), None, None);
        assert_eq!(state.pending_actions.head(), Some(PendingAction::DrawCards(3)));
    }

    #[test]
    fn upgrade_in_hand_swaps_to_the_upgraded_card_id() {
        registry::register_defaults();
        let mut store = PileStore::new();
        let mut state = fresh(&mut store);
        state.hand = store.intern(Pile::from_counts([(registry::ids::STRIKE, 1)]));
        apply_action(
            &mut state,
            &mut store,
            Action::new(ActionKind::UpgradeCardInHand, [0, 0]),
            Some(Target::HandCard(0)),
            None,
        );
        assert_eq!(store.pile(state.hand).count(registry::ids::STRIKE_PLUS), 1);
        assert_eq!(store.pile(state.hand).count(registry::ids::STRIKE), 0);
    }
}
