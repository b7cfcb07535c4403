use crate::{CardId, EnemyId, Hp, RelicId};

/// a named starting-deck bundle, analogous to the source game's `character_map`.
#[derive(Debug, Clone, Copy)]
pub struct CharacterPreset {
    pub name: &'static str,
    pub max_hp: Hp,
    pub deck: &'static [(CardId, u8)],
    pub relics: &'static [RelicId],
}

/// a named encounter: one or more enemy-layout outcomes and their probabilities, analogous to
/// the source game's `fight_map` (a `FightStruct` naming either a single base mob or a
/// generation function).
#[derive(Debug, Clone, Copy)]
pub struct FightPreset {
    pub name: &'static str,
    /// (probability, enemy ids in the layout); probabilities must sum to 1.
    pub layouts: &'static [(f64, &'static [EnemyId])],
}
