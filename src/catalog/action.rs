use crate::CardId;

/// Tag for a single card-effect step. A card's effect list is a fixed-length array of these
/// records rather than a trait object: extending the catalog with a new mechanic means adding
/// a variant and a dispatch arm in `combat_step::actions`, never a new trait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    /// deal damage to the targeted enemy; args[0] = base amount, args[1] = hit count
    Attack,
    /// deal damage to every living enemy; args[0] = base amount, args[1] = hit count. On an
    /// x-cost card (e.g. Whirlwind) the dispatcher ignores args[1] and hits once per energy
    /// spent paying for the card.
    AttackAll,
    /// deal damage to the targeted enemy equal to current block
    AttackBodySlam,
    /// gain block; args[0] = amount
    Block,
    /// apply a buff to the player; args[0] = buff index, args[1] = stacks
    Buff,
    /// apply a buff to the targeted enemy; args[0] = buff index, args[1] = stacks
    Debuff,
    /// apply a buff to every living enemy; args[0] = buff index, args[1] = stacks
    DebuffAll,
    /// lose HP directly (bypasses block); args[0] = amount
    LoseHp,
    /// heal the player; args[0] = amount
    Heal,
    /// draw cards; args[0] = count
    DrawCards,
    /// gain energy; args[0] = amount
    GainEnergy,
    /// change stance; args[0] = new `Stance` discriminant
    ChangeStance,
    /// add a copy of a card to hand; args[0] = card id, args[1] = count
    AddCardToHand,
    /// add a copy of a card to the draw pile; args[0] = card id, args[1] = count
    AddCardToDrawPile,
    /// add a copy of a card to the discard pile; args[0] = card id, args[1] = count
    AddCardToDiscardPile,
    /// execute the next action only if the last card played was a skill
    IfLastCardSkill,
    /// execute the next action only if the last card played was an attack
    IfLastCardAttack,
    /// execute the next action only if the player is in the stance named by args[0]
    IfInStance,
    /// upgrade the hand card at the targeted slot (or all hand cards, when card-targeted is off)
    UpgradeCardInHand,
    /// documented simulator gap: logged once, treated as a no-op (see Open Question 4)
    Unimplemented(&'static str),
    /// terminates a card's action list; never executed
    None,
}

/// A single effect step: a tag plus up to two integer arguments, mirroring the source game's
/// `Action { type, arg[2] }` record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Action {
    pub kind: ActionKind,
    pub args: [i16; 2],
}

impl Action {
    pub const NONE: Action = Action { kind: ActionKind::None, args: [0, 0] };

    pub const fn new(kind: ActionKind, args: [i16; 2]) -> Self {
        Self { kind, args }
    }

    pub const fn attack(amount: i16, count: i16) -> Self {
        Self::new(ActionKind::Attack, [amount, count])
    }

    pub const fn attack_all(amount: i16, count: i16) -> Self {
        Self::new(ActionKind::AttackAll, [amount, count])
    }

    pub const fn block(amount: i16) -> Self {
        Self::new(ActionKind::Block, [amount, 0])
    }

    pub const fn buff(kind: i16, stacks: i16) -> Self {
        Self::new(ActionKind::Buff, [kind, stacks])
    }

    pub const fn debuff(kind: i16, stacks: i16) -> Self {
        Self::new(ActionKind::Debuff, [kind, stacks])
    }

    pub const fn draw_cards(count: i16) -> Self {
        Self::new(ActionKind::DrawCards, [count, 0])
    }

    pub const fn gain_energy(amount: i16) -> Self {
        Self::new(ActionKind::GainEnergy, [amount, 0])
    }

    pub const fn lose_hp(amount: i16) -> Self {
        Self::new(ActionKind::LoseHp, [amount, 0])
    }

    pub const fn add_card_to_draw_pile(card: CardId, count: i16) -> Self {
        Self::new(ActionKind::AddCardToDrawPile, [card as i16, count])
    }

    pub const fn add_card_to_hand(card: CardId, count: i16) -> Self {
        Self::new(ActionKind::AddCardToHand, [card as i16, count])
    }
}
