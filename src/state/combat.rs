use crate::catalog::{BuffVec, RelicSet};
use crate::catalog::registry::ids as relic_ids;
use crate::piles::PileHandle;
use crate::state::decision::Decision;
use crate::state::monster::MonsterSlot;
use crate::state::pending::PendingQueue;
use crate::state::stance::Stance;
use crate::{DEATH_TIEBREAK_DIVISOR, Energy, Hp, MAX_MOBS, Objective, Probability};

/// One combat configuration: the node weight stored at every slot of the search tree.
#[derive(Debug, Clone)]
pub struct CombatState {
    pub hp: Hp,
    pub max_hp: Hp,
    pub block: Hp,
    pub energy: Energy,
    pub turn: u32,
    /// Tree depth from the root; feeds `path_objective` and nothing else.
    pub depth: u32,
    pub stance: Stance,
    pub draw_pile: PileHandle,
    pub hand: PileHandle,
    pub discard_pile: PileHandle,
    pub exhaust_pile: PileHandle,
    pub buffs: BuffVec,
    pub monsters: [Option<MonsterSlot>; MAX_MOBS],
    pub relics: RelicSet,
    pub pending_actions: PendingQueue,
    pub parent_decision: Option<Decision>,
    pub probability: Probability,
    pub objective: Objective,
    pub tree_solved: bool,
    pub battle_done: bool,
    pub last_card_attack: bool,
    pub last_card_skill: bool,
    /// One-shot relic "active" flag: set true by `start_battle` when the player owns a relic
    /// that modifies the first attack played this battle (e.g. Akabeko), cleared the moment
    /// that attack resolves.
    pub first_attack_bonus_available: bool,
}

impl CombatState {
    /// The root state at search start: HP/deck/relics fixed, battle not yet generated. The
    /// pending queue begins with `GenerateBattle`.
    pub fn new_root(hp: Hp, max_hp: Hp, deck: PileHandle, empty: PileHandle, relics: RelicSet) -> Self {
        let mut state = Self {
            hp,
            max_hp,
            block: 0,
            energy: 0,
            turn: 0,
            depth: 0,
            stance: Stance::None,
            draw_pile: deck,
            hand: empty,
            discard_pile: empty,
            exhaust_pile: empty,
            buffs: BuffVec::new(),
            monsters: [None; MAX_MOBS],
            relics,
            pending_actions: PendingQueue::single(crate::state::pending::PendingAction::GenerateBattle),
            parent_decision: None,
            probability: 1.0,
            objective: 0.0,
            tree_solved: false,
            battle_done: false,
            last_card_attack: false,
            last_card_skill: false,
            first_attack_bonus_available: false,
        };
        state.objective = state.max_possible_objective();
        state
    }

    /// copy-construct a child: same configuration, depth incremented, no decision recorded yet
    /// (the caller fills in `parent_decision`/`probability` once it knows them).
    pub fn child(&self) -> Self {
        let mut next = self.clone();
        next.depth += 1;
        next
    }

    pub fn is_terminal(&self) -> bool {
        self.battle_done
    }

    pub fn has_pending_action(&self) -> bool {
        !self.pending_actions.is_empty()
    }

    pub fn is_decision_state(&self) -> bool {
        !self.battle_done && self.pending_actions.is_empty()
    }

    pub fn mobs_alive(&self) -> bool {
        self.monsters.iter().flatten().any(|m| !m.is_dead())
    }

    pub fn living_enemy_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.monsters
            .iter()
            .enumerate()
            .filter_map(|(i, m)| m.filter(|m| !m.is_dead()).map(|_| i))
    }

    /// apply damage through block; marks the battle done if HP reaches zero.
    pub fn take_damage(&mut self, amount: Hp) {
        let absorbed = amount.min(self.block);
        self.block -= absorbed;
        let remaining = amount - absorbed;
        self.hp = (self.hp - remaining).max(0);
        if self.hp == 0 {
            self.finish_battle();
        }
    }

    /// HP loss that bypasses block (e.g. Offering, combust, poison).
    pub fn take_hp_loss(&mut self, amount: Hp) {
        self.hp = (self.hp - amount).max(0);
        if self.hp == 0 {
            self.finish_battle();
        }
    }

    pub fn heal(&mut self, amount: Hp) {
        self.hp = (self.hp + amount).min(self.max_hp);
    }

    /// attack a single enemy slot; returns true if this killed the last living enemy.
    pub fn attack_enemy(&mut self, index: usize, amount: Hp) -> bool {
        let Some(mob) = self.monsters[index].as_mut() else { return false };
        mob.take_damage(amount);
        if mob.is_dead() && !self.mobs_alive() {
            self.finish_battle();
            true
        } else {
            false
        }
    }

    pub fn finish_battle(&mut self) {
        self.battle_done = true;
        self.pending_actions = PendingQueue::empty();
        self.finalize_objective();
    }

    /// Terminal objective: surviving HP, with a tie-break among dead-player terminals that
    /// favors the line that left the least enemy HP standing.
    fn finalize_objective(&mut self) {
        debug_assert!(self.battle_done);
        self.tree_solved = true;
        self.objective = self.hp as Objective;
        if self.hp == 0 {
            let remaining_enemy_hp: Objective =
                self.monsters.iter().flatten().filter(|m| !m.is_dead()).map(|m| m.hp as Objective).sum();
            self.objective -= remaining_enemy_hp / DEATH_TIEBREAK_DIVISOR;
        }
    }

    /// Max-final-objective estimate: an upper bound on any descendant's objective, used to seed
    /// a fresh node and to short-circuit search once a leaf reaches it.
    pub fn max_possible_objective(&self) -> Objective {
        if self.battle_done {
            return self.hp as Objective;
        }
        let mut top = self.hp;
        if self.relics.contains(relic_ids::MEAT_ON_THE_BONE) {
            let meat_floor = self.hp / 2 + 12;
            if top < meat_floor {
                top = meat_floor;
            }
        }
        if self.relics.contains(relic_ids::BURNING_BLOOD) {
            top += 6;
        }
        (top.min(self.max_hp)) as Objective
    }

    /// Frontier ordering key: favors high player HP, high cumulative enemy damage dealt, and
    /// (dominantly, via the 1000x depth term) deeper lines, so the search drives any single line
    /// to completion before broadening.
    pub fn path_objective(&self) -> Objective {
        let mut x = 5.0 * self.hp as Objective;
        for mob in self.monsters.iter().flatten() {
            x += (mob.max_hp - mob.hp) as Objective;
        }
        x += 1000.0 * self.depth as Objective;
        x
    }

    /// Dominance test: `self.worse_or_equal(other)` means any strategy continued from `self`
    /// achieves no more than the same strategy from `other`. Sound but not complete: it never
    /// declares dominance unless it truly holds, and conservative misses are fine. Both states
    /// must share an ancestry step of the same kind for the comparison to be meaningful.
    /// `observes_last_card` should be true iff some card in the active deck has an
    /// `IfLastCardAttack`/`IfLastCardSkill` action, in which case the flags must match exactly.
    pub fn worse_or_equal(&self, other: &CombatState, observes_last_card: bool) -> bool {
        if other.battle_done && other.tree_solved && other.objective >= self.max_possible_objective() {
            return true;
        }
        if self.pending_actions != other.pending_actions {
            return false;
        }
        if self.hand != other.hand
            || self.draw_pile != other.draw_pile
            || self.discard_pile != other.discard_pile
            || self.exhaust_pile != other.exhaust_pile
        {
            return false;
        }
        if self.turn != other.turn || self.stance != other.stance {
            return false;
        }
        if observes_last_card
            && (self.last_card_attack != other.last_card_attack || self.last_card_skill != other.last_card_skill)
        {
            return false;
        }
        if self.hp > other.hp || self.block > other.block || self.energy > other.energy {
            return false;
        }
        for i in 0..MAX_MOBS {
            match (self.monsters[i], other.monsters[i]) {
                (None, None) => {}
                (Some(a), Some(b)) => {
                    if a.hp < b.hp {
                        return false;
                    }
                    if !a.buffs.mob_worse_or_equal(&b.buffs) {
                        return false;
                    }
                }
                _ => return false,
            }
        }
        self.buffs.player_worse_or_equal(&other.buffs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piles::PileStore;

    fn root() -> CombatState {
        let store = PileStore::new();
        CombatState::new_root(100, 100, store.empty_handle(), store.empty_handle(), RelicSet::empty())
    }

    #[test]
    fn fresh_root_awaits_battle_generation() {
        let state = root();
        assert!(!state.battle_done);
        assert!(state.has_pending_action());
        assert!(!state.is_decision_state());
    }

    #[test]
    fn lethal_damage_finishes_the_battle_and_zeroes_hp() {
        let mut state = root();
        state.pending_actions = PendingQueue::empty();
        state.take_damage(150);
        assert_eq!(state.hp, 0);
        assert!(state.battle_done);
        assert!(state.tree_solved);
    }

    #[test]
    fn death_tiebreak_favors_more_damage_dealt() {
        let mut low_damage = root();
        low_damage.monsters[0] = Some(MonsterSlot::new(0, 80));
        low_damage.pending_actions = PendingQueue::empty();
        low_damage.take_damage(150);

        let mut high_damage = root();
        high_damage.monsters[0] = Some(MonsterSlot::new(0, 20));
        high_damage.pending_actions = PendingQueue::empty();
        high_damage.take_damage(150);

        assert!(high_damage.objective > low_damage.objective);
    }

    #[test]
    fn max_possible_objective_collapses_to_hp_without_relics() {
        let state = root();
        assert_eq!(state.max_possible_objective(), 100.0);
    }

    #[test]
    fn higher_hp_dominates_otherwise_identical_state() {
        let mut worse = root();
        worse.pending_actions = PendingQueue::empty();
        worse.hp = 50;
        let mut better = root();
        better.pending_actions = PendingQueue::empty();
        better.hp = 80;
        assert!(worse.worse_or_equal(&better, false));
        assert!(!better.worse_or_equal(&worse, false));
    }

    #[test]
    fn mismatched_pending_actions_are_never_comparable() {
        let a = root();
        let mut b = root();
        b.pending_actions = PendingQueue::empty();
        assert!(!a.worse_or_equal(&b, false));
        assert!(!b.worse_or_equal(&a, false));
    }

    #[test]
    fn a_dominated_terminal_short_circuits_via_max_possible_objective() {
        let mut a = root();
        a.hp = 40;
        let mut b = root();
        b.pending_actions = PendingQueue::empty();
        b.hp = 90;
        b.battle_done = true;
        b.tree_solved = true;
        b.objective = 90.0;
        assert!(a.worse_or_equal(&b, false));
    }
}
