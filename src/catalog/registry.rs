use std::collections::HashMap;
use std::sync::OnceLock;

use crate::catalog::action::Action;
use crate::catalog::buff::BuffKind;
use crate::catalog::card::{Card, CardFlags};
use crate::catalog::enemy::{Enemy, Intent};
use crate::catalog::preset::{CharacterPreset, FightPreset};
use crate::catalog::relic::{Relic, RelicHook};
use crate::{CardId, EnemyId, RelicId};

/// well-known catalog ids, the way the source game's headers define `card_strike`,
/// `card_wound`, etc. as named constants rather than magic numbers.
pub mod ids {
    use crate::{CardId, EnemyId, RelicId};

    pub const STRIKE: CardId = 0;
    pub const STRIKE_PLUS: CardId = 1;
    pub const DEFEND: CardId = 2;
    pub const DEFEND_PLUS: CardId = 3;
    pub const METALLICIZE: CardId = 4;
    pub const METALLICIZE_PLUS: CardId = 5;
    pub const WHIRLWIND: CardId = 6;
    pub const WHIRLWIND_PLUS: CardId = 7;
    pub const RAGE: CardId = 8;
    pub const RAGE_PLUS: CardId = 9;
    pub const CLEAVE: CardId = 10;
    pub const CLEAVE_PLUS: CardId = 11;
    pub const OFFERING: CardId = 12;
    pub const OFFERING_PLUS: CardId = 13;
    pub const WOUND: CardId = 14;

    pub const BURNING_BLOOD: RelicId = 0;
    pub const MEAT_ON_THE_BONE: RelicId = 1;
    pub const AKABEKO: RelicId = 2;

    pub const TEST_MOB: EnemyId = 0;
}

fn cards_table() -> HashMap<CardId, Card> {
    use ids::*;
    let attack = CardFlags { attack: true, targeted: true, ..Default::default() };
    let attack_all = CardFlags { attack: true, ..Default::default() };
    let skill = CardFlags { skill: true, ..Default::default() };
    let skill_exhausts = CardFlags { skill: true, exhausts: true, ..Default::default() };
    let status = CardFlags { status: true, unplayable: true, ..Default::default() };

    let mut m = HashMap::new();
    m.insert(
        STRIKE,
        Card {
            name: "Strike",
            cost: 1,
            upgraded: Some(STRIKE_PLUS),
            flags: CardFlags { strike: true, ..attack },
            actions: [Action::attack(6, 1), Action::NONE, Action::NONE, Action::NONE],
        },
    );
    m.insert(
        STRIKE_PLUS,
        Card {
            name: "Strike+",
            cost: 1,
            upgraded: None,
            flags: CardFlags { strike: true, ..attack },
            actions: [Action::attack(9, 1), Action::NONE, Action::NONE, Action::NONE],
        },
    );
    m.insert(
        DEFEND,
        Card {
            name: "Defend",
            cost: 1,
            upgraded: Some(DEFEND_PLUS),
            flags: skill,
            actions: [Action::block(5), Action::NONE, Action::NONE, Action::NONE],
        },
    );
    m.insert(
        DEFEND_PLUS,
        Card {
            name: "Defend+",
            cost: 1,
            upgraded: None,
            flags: skill,
            actions: [Action::block(8), Action::NONE, Action::NONE, Action::NONE],
        },
    );
    m.insert(
        METALLICIZE,
        Card {
            name: "Metallicize",
            cost: 1,
            upgraded: Some(METALLICIZE_PLUS),
            flags: skill,
            actions: [
                Action::buff(BuffKind::Metallicize as i16, 3),
                Action::NONE,
                Action::NONE,
                Action::NONE,
            ],
        },
    );
    m.insert(
        METALLICIZE_PLUS,
        Card {
            name: "Metallicize+",
            cost: 1,
            upgraded: None,
            flags: skill,
            actions: [
                Action::buff(BuffKind::Metallicize as i16, 4),
                Action::NONE,
                Action::NONE,
                Action::NONE,
            ],
        },
    );
    m.insert(
        WHIRLWIND,
        Card {
            name: "Whirlwind",
            cost: 0,
            upgraded: Some(WHIRLWIND_PLUS),
            flags: CardFlags { x_cost: true, ..attack_all },
            actions: [Action::attack_all(5, 0), Action::NONE, Action::NONE, Action::NONE],
        },
    );
    m.insert(
        WHIRLWIND_PLUS,
        Card {
            name: "Whirlwind+",
            cost: 0,
            upgraded: None,
            flags: CardFlags { x_cost: true, ..attack_all },
            actions: [Action::attack_all(8, 0), Action::NONE, Action::NONE, Action::NONE],
        },
    );
    m.insert(
        RAGE,
        Card {
            name: "Rage",
            cost: 1,
            upgraded: Some(RAGE_PLUS),
            flags: skill,
            actions: [Action::buff(BuffKind::Rage as i16, 3), Action::NONE, Action::NONE, Action::NONE],
        },
    );
    m.insert(
        RAGE_PLUS,
        Card {
            name: "Rage+",
            cost: 1,
            upgraded: None,
            flags: skill,
            actions: [Action::buff(BuffKind::Rage as i16, 5), Action::NONE, Action::NONE, Action::NONE],
        },
    );
    m.insert(
        CLEAVE,
        Card {
            name: "Cleave",
            cost: 1,
            upgraded: Some(CLEAVE_PLUS),
            flags: attack_all,
            actions: [Action::attack_all(8, 1), Action::NONE, Action::NONE, Action::NONE],
        },
    );
    m.insert(
        CLEAVE_PLUS,
        Card {
            name: "Cleave+",
            cost: 1,
            upgraded: None,
            flags: attack_all,
            actions: [Action::attack_all(11, 1), Action::NONE, Action::NONE, Action::NONE],
        },
    );
    m.insert(
        OFFERING,
        Card {
            name: "Offering",
            cost: 0,
            upgraded: Some(OFFERING_PLUS),
            flags: skill_exhausts,
            actions: [Action::lose_hp(6), Action::gain_energy(2), Action::draw_cards(3), Action::NONE],
        },
    );
    m.insert(
        OFFERING_PLUS,
        Card {
            name: "Offering+",
            cost: 0,
            upgraded: None,
            flags: skill_exhausts,
            actions: [Action::lose_hp(6), Action::gain_energy(2), Action::draw_cards(5), Action::NONE],
        },
    );
    m.insert(
        WOUND,
        Card { name: "Wound", cost: 0, upgraded: None, flags: status, actions: [Action::NONE; 4] },
    );
    m
}

fn relics_table() -> HashMap<RelicId, Relic> {
    use ids::*;
    let mut m = HashMap::new();
    m.insert(
        BURNING_BLOOD,
        Relic { id: BURNING_BLOOD, name: "Burning Blood", hooks: &[RelicHook::EndOfBattle] },
    );
    m.insert(
        MEAT_ON_THE_BONE,
        Relic { id: MEAT_ON_THE_BONE, name: "Meat on the Bone", hooks: &[RelicHook::EndOfBattle] },
    );
    m.insert(AKABEKO, Relic { id: AKABEKO, name: "Akabeko", hooks: &[RelicHook::FirstAttack] });
    m
}

fn enemies_table() -> HashMap<EnemyId, Enemy> {
    use ids::*;
    const TEST_MOB_ATTACK: [Action; 1] = [Action::attack(10, 1)];
    const TEST_MOB_INTENTS: [Intent; 1] =
        [Intent { name: "Attack", actions: &TEST_MOB_ATTACK, weight: 1.0 }];
    let mut m = HashMap::new();
    m.insert(
        TEST_MOB,
        Enemy {
            id: TEST_MOB,
            name: "Test Mob",
            hp_min: 100,
            hp_max: 100,
            intents: &TEST_MOB_INTENTS,
            anti_repeats: &[],
        },
    );
    m
}

fn characters_table() -> HashMap<&'static str, CharacterPreset> {
    use ids::*;
    const MINIMAL_DECK: [(CardId, u8); 1] = [(STRIKE, 1)];
    const MINIMAL_RELICS: [RelicId; 0] = [];
    let mut m = HashMap::new();
    m.insert(
        "minimal",
        CharacterPreset { name: "minimal", max_hp: 100, deck: &MINIMAL_DECK, relics: &MINIMAL_RELICS },
    );
    m
}

fn fights_table() -> HashMap<&'static str, FightPreset> {
    use ids::*;
    const TEST_MOB_LAYOUT: [EnemyId; 1] = [TEST_MOB];
    const TEST_MOB_LAYOUTS: [(f64, &[EnemyId]); 1] = [(1.0, &TEST_MOB_LAYOUT)];
    let mut m = HashMap::new();
    m.insert("test_mob", FightPreset { name: "test_mob", layouts: &TEST_MOB_LAYOUTS });
    m
}

static CARDS: OnceLock<HashMap<CardId, Card>> = OnceLock::new();
static RELICS: OnceLock<HashMap<RelicId, Relic>> = OnceLock::new();
static ENEMIES: OnceLock<HashMap<EnemyId, Enemy>> = OnceLock::new();
static CHARACTERS: OnceLock<HashMap<&'static str, CharacterPreset>> = OnceLock::new();
static FIGHTS: OnceLock<HashMap<&'static str, FightPreset>> = OnceLock::new();

/// force initialization of every catalog table. Idempotent; each table is read-only once
/// initialized. Not strictly required (every lookup function lazily initializes its own
/// table), but calling it once at process start documents the "registered once" contract the
/// source system relies on for its process-lifetime lookup tables.
pub fn register_defaults() {
    CARDS.get_or_init(cards_table);
    RELICS.get_or_init(relics_table);
    ENEMIES.get_or_init(enemies_table);
    CHARACTERS.get_or_init(characters_table);
    FIGHTS.get_or_init(fights_table);
}

pub fn card(id: CardId) -> &'static Card {
    CARDS
        .get_or_init(cards_table)
        .get(&id)
        .unwrap_or_else(|| panic!("unregistered card id {id}"))
}

pub fn try_card(id: CardId) -> Option<&'static Card> {
    CARDS.get_or_init(cards_table).get(&id)
}

pub fn relic(id: RelicId) -> &'static Relic {
    RELICS
        .get_or_init(relics_table)
        .get(&id)
        .unwrap_or_else(|| panic!("unregistered relic id {id}"))
}

pub fn enemy(id: EnemyId) -> &'static Enemy {
    ENEMIES
        .get_or_init(enemies_table)
        .get(&id)
        .unwrap_or_else(|| panic!("unregistered enemy id {id}"))
}

pub fn character(name: &str) -> anyhow::Result<&'static CharacterPreset> {
    CHARACTERS
        .get_or_init(characters_table)
        .get(name)
        .ok_or_else(|| anyhow::anyhow!("unknown character preset {name:?}"))
}

pub fn fight(name: &str) -> anyhow::Result<&'static FightPreset> {
    FIGHTS
        .get_or_init(fights_table)
        .get(name)
        .ok_or_else(|| anyhow::anyhow!("unknown fight preset {name:?}"))
}

pub fn card_id_by_name(name: &str) -> anyhow::Result<CardId> {
    let normalized = name.trim().to_lowercase();
    CARDS
        .get_or_init(cards_table)
        .iter()
        .find(|(_, c)| c.name.to_lowercase() == normalized)
        .map(|(id, _)| *id)
        .ok_or_else(|| anyhow::anyhow!("unknown card {name:?}"))
}

pub fn relic_id_by_name(name: &str) -> anyhow::Result<RelicId> {
    let normalized = name.trim().to_lowercase().replace(['_', '-'], " ");
    RELICS
        .get_or_init(relics_table)
        .iter()
        .find(|(_, r)| r.name.to_lowercase() == normalized)
        .map(|(id, _)| *id)
        .ok_or_else(|| anyhow::anyhow!("unknown relic {name:?}"))
}

/// whether any registered card carries an `IfLastCardAttack`/`IfLastCardSkill` guard. When
/// false, `CombatState::worse_or_equal` can ignore `last_card_attack`/`last_card_skill` as a
/// comparison dimension, which widens how often dominance fires for decks that never reference
/// them.
pub fn catalog_observes_last_card() -> bool {
    use crate::catalog::action::ActionKind;
    CARDS.get_or_init(cards_table).values().any(|card| {
        card.actions
            .iter()
            .any(|a| matches!(a.kind, ActionKind::IfLastCardAttack | ActionKind::IfLastCardSkill))
    })
}
