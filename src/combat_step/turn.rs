//! `play_card`/`end_turn` collaborators: the two decision-resolving mutators.

use crate::catalog::registry;
use crate::catalog::{Action, ActionKind, BuffKind};
use crate::combat_step::actions::{apply_action, living_enemy_indices, warn_unimplemented_once};
use crate::piles::PileStore;
use crate::state::combat::CombatState;
use crate::state::decision::Target;
use crate::state::pending::{PendingAction, PendingQueue};
use crate::state::stance::Stance;
use crate::{CardId, Hp, CARDS_DRAWN_PER_TURN, MAX_MOBS, STARTING_ENERGY};

/// Deducts energy, runs the card's ordered action list (honoring `IfLastCard*`/`IfInStance`
/// guards, which skip exactly the one action that follows them), applies the Enrage trigger for
/// skills, records the last-card flags, then files the card into discard or exhaust, unless the
/// card or its effects already ended the battle.
pub fn play_card(state: &mut CombatState, store: &mut PileStore, card_id: CardId, target: Option<Target>) {
    let card = registry::card(card_id);
    let cost = if card.flags.x_cost { state.energy } else { card.cost };
    state.energy -= cost;
    let x_hits = card.flags.x_cost.then_some(cost as i16);
    state.hand = store.remove_card(state.hand, card_id);

    let actions: Vec<Action> = card.actions().copied().collect();
    let mut skip_next = false;
    for action in actions {
        if skip_next {
            skip_next = false;
            continue;
        }
        match action.kind {
            ActionKind::IfLastCardSkill => skip_next = !state.last_card_skill,
            ActionKind::IfLastCardAttack => skip_next = !state.last_card_attack,
            ActionKind::IfInStance => {
                skip_next = Stance::try_from(action.args[0]).ok() != Some(state.stance)
            }
            _ => apply_action(state, store, action, target, x_hits),
        }
        if state.battle_done {
            break;
        }
    }

    if !state.battle_done && card.flags.skill {
        for index in living_enemy_indices(state) {
            let mob = state.monsters[index].as_mut().expect("living index");
            let enrage = mob.buffs.get(BuffKind::Enrage);
            if enrage != 0 {
                mob.buffs.add(BuffKind::Strength, enrage);
            }
        }
    }
    if !state.battle_done && card.flags.attack {
        let rage = state.buffs.get(BuffKind::Rage);
        if rage != 0 {
            state.block += rage;
        }
    }

    state.last_card_attack = card.flags.attack;
    state.last_card_skill = card.flags.skill;

    if !state.battle_done {
        if card.flags.exhausts {
            state.exhaust_pile = store.add_card(state.exhaust_pile, card_id);
        } else {
            state.discard_pile = store.add_card(state.discard_pile, card_id);
        }
    }
}

/// Vulnerable scaling then HP loss, followed by player Thorns retaliation against the attacking
/// enemy. Every `Attack` action an enemy intent resolves is treated as melee for this purpose.
fn deal_damage_to_player(state: &mut CombatState, attacker: usize, amount: Hp) {
    let mut amount = amount;
    if state.buffs.get(BuffKind::Vulnerable) > 0 {
        amount = ((amount as f64) * 1.5).floor() as Hp;
    }
    state.take_damage(amount);
    let thorns = state.buffs.get(BuffKind::Thorns);
    if thorns > 0 {
        if let Some(mob) = state.monsters[attacker].as_mut() {
            mob.take_hp_loss(thorns);
        }
        if !state.mobs_alive() {
            state.finish_battle();
        }
    }
}

/// an enemy-intent action dispatcher, symmetric to `actions::apply_action` but mirrored: the
/// targeted side is always the player, and outgoing damage scales off the *mob's* buffs.
fn apply_enemy_action(state: &mut CombatState, mob_index: usize, action: Action) {
    match action.kind {
        ActionKind::Attack => {
            let mob = state.monsters[mob_index].expect("living enemy acting");
            let mut amount = action.args[0] + mob.buffs.get(BuffKind::Strength);
            if mob.buffs.get(BuffKind::Weak) > 0 {
                amount = ((amount as f64) * 0.75).floor() as Hp;
            }
            for _ in 0..action.args[1].max(1) {
                deal_damage_to_player(state, mob_index, amount);
                if state.battle_done {
                    break;
                }
            }
        }
        ActionKind::Block => {
            if let Some(mob) = state.monsters[mob_index].as_mut() {
                mob.block += action.args[0];
            }
        }
        ActionKind::Buff => {
            if let Ok(kind) = BuffKind::try_from(action.args[0]) {
                if let Some(mob) = state.monsters[mob_index].as_mut() {
                    mob.buffs.add(kind, action.args[1]);
                }
            }
        }
        ActionKind::Debuff => {
            if let Ok(kind) = BuffKind::try_from(action.args[0]) {
                state.buffs.add(kind, action.args[1]);
            }
        }
        ActionKind::Heal => {
            if let Some(mob) = state.monsters[mob_index].as_mut() {
                mob.hp = (mob.hp + action.args[0]).min(mob.max_hp);
            }
        }
        ActionKind::Unimplemented(name) => warn_unimplemented_once(name),
        _ => {}
    }
}

fn cycle_hand(state: &mut CombatState, store: &mut PileStore) {
    let entries = store.pile(state.hand).entries().to_vec();
    for (id, count) in entries {
        let card = registry::card(id);
        for _ in 0..count {
            state.hand = store.remove_card(state.hand, id);
            if card.flags.retain {
                state.hand = store.add_card(state.hand, id);
            } else if card.flags.ethereal {
                state.exhaust_pile = store.add_card(state.exhaust_pile, id);
            } else {
                state.discard_pile = store.add_card(state.discard_pile, id);
            }
        }
    }
}

fn enemy_poison_tick(state: &mut CombatState) {
    for index in living_enemy_indices(state) {
        let poison = state.monsters[index].expect("living index").buffs.get(BuffKind::Poison);
        if poison > 0 {
            let mob = state.monsters[index].as_mut().expect("living index");
            mob.take_hp_loss(poison);
            mob.buffs.add(BuffKind::Poison, -1);
        }
    }
    if !state.mobs_alive() {
        state.finish_battle();
    }
}

fn enemy_actions(state: &mut CombatState) {
    for index in 0..MAX_MOBS {
        let Some(mob) = state.monsters[index] else { continue };
        if mob.is_dead() {
            continue;
        }
        let Some(intent_index) = mob.intent_history[0] else { continue };
        let enemy = registry::enemy(mob.template);
        let Some(intent) = enemy.intents.get(intent_index) else { continue };
        for action in intent.actions.iter().copied() {
            apply_enemy_action(state, index, action);
            if state.battle_done {
                return;
            }
        }
    }
}

fn start_next_turn(state: &mut CombatState) {
    state.buffs.cycle();
    state.energy = STARTING_ENERGY;
    if state.buffs.get(BuffKind::Barricade) <= 0 {
        state.block = 0;
    }
    state.turn += 1;
    state.last_card_attack = false;
    state.last_card_skill = false;
    state.pending_actions = PendingQueue::empty();
    state.pending_actions.push(PendingAction::GenerateIntents);
    state.pending_actions.push(PendingAction::DrawCards(CARDS_DRAWN_PER_TURN));
}

/// Resolves end-of-turn effects in order: hand cycling (retain/ethereal/discard), Metallicize
/// block, enemy poison tick, enemy-intent execution in slot order, enemy-buff decay, then
/// next-turn setup (energy/block reset, queued intents and draw). Any step may end the battle,
/// at which point the remaining steps are skipped.
pub fn end_turn(state: &mut CombatState, store: &mut PileStore) {
    cycle_hand(state, store);
    if state.battle_done {
        return;
    }
    state.block += state.buffs.get(BuffKind::Metallicize);

    enemy_poison_tick(state);
    if state.battle_done {
        return;
    }

    enemy_actions(state);
    if state.battle_done {
        return;
    }

    for index in living_enemy_indices(state) {
        state.monsters[index].as_mut().expect("living index").buffs.cycle();
    }

    start_next_turn(state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::registry;
    use crate::catalog::RelicSet;
    use crate::combat_step::battle::start_battle;
    use crate::piles::{Pile, PileStore};
    use crate::state::pending::PendingQueue;

    fn battle_ready() -> (CombatState, PileStore) {
        registry::register_defaults();
        let mut store = PileStore::new();
        let empty = store.empty_handle();
        let mut state = CombatState::new_root(100, 100, empty, empty, RelicSet::empty());
        start_battle(&mut state, &[registry::ids::TEST_MOB]);
        state.pending_actions = PendingQueue::empty();
        state.monsters[0].as_mut().unwrap().record_intent(0);
        (state, store)
    }

    #[test]
    fn scenario_one_simple_strike_end_turn_loses_ten_hp() {
        let (mut state, mut store) = battle_ready();
        end_turn(&mut state, &mut store);
        assert_eq!(state.hp, 90);
    }

    #[test]
    fn scenario_two_metallicize_then_end_turn_nets_93_hp() {
        let (mut state, mut store) = battle_ready();
        state.hand = store.intern(Pile::from_counts([(registry::ids::METALLICIZE, 1)]));
        play_card(&mut state, &mut store, registry::ids::METALLICIZE, None);
        end_turn(&mut state, &mut store);
        assert_eq!(state.hp, 93);
    }

    #[test]
    fn scenario_three_whirlwind_hits_every_energy_point() {
        let (mut state, mut store) = battle_ready();
        state.hand = store.intern(Pile::from_counts([(registry::ids::WHIRLWIND, 1)]));
        play_card(&mut state, &mut store, registry::ids::WHIRLWIND, None);
        assert_eq!(state.monsters[0].unwrap().hp, 85);
        assert_eq!(state.energy, 0);
    }

    #[test]
    fn scenario_four_rage_then_strike_then_cleave_accumulates_block() {
        let (mut state, mut store) = battle_ready();
        state.hand = store.intern(Pile::from_counts([
            (registry::ids::RAGE, 1),
            (registry::ids::STRIKE, 1),
            (registry::ids::CLEAVE, 1),
        ]));
        play_card(&mut state, &mut store, registry::ids::RAGE, None);
        play_card(&mut state, &mut store, registry::ids::STRIKE, Some(Target::Enemy(0)));
        assert_eq!(state.block, 3);
        play_card(&mut state, &mut store, registry::ids::CLEAVE, None);
        assert_eq!(state.block, 6);
    }

    #[test]
    fn thorns_reflects_damage_on_enemy_attack() {
        let (mut state, mut store) = battle_ready();
        state.buffs.add(BuffKind::Thorns, 4);
        end_turn(&mut state, &mut store);
        assert_eq!(state.monsters[0].unwrap().hp, 96);
    }
}
