use crate::catalog::action::{Action, ActionKind};
use crate::{CardId, Energy};

/// card-property bitset, mirroring the source game's flag struct: orthogonal booleans that
/// gate how a card is enumerated and played rather than a class hierarchy per card type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CardFlags {
    pub attack: bool,
    pub skill: bool,
    pub power: bool,
    pub curse: bool,
    pub status: bool,
    pub targeted: bool,
    pub targets_hand_card: bool,
    pub x_cost: bool,
    pub unplayable: bool,
    pub ethereal: bool,
    pub exhausts: bool,
    pub retain: bool,
    pub strike: bool,
    pub starting: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct Card {
    pub name: &'static str,
    pub cost: Energy,
    pub upgraded: Option<CardId>,
    pub flags: CardFlags,
    pub actions: [Action; crate::MAX_CARD_ACTIONS],
}

impl Card {
    /// true if playable given the energy on hand: not flagged unplayable, and (unless x-cost)
    /// affordable.
    pub fn playable(&self, energy: Energy) -> bool {
        !self.flags.unplayable && (self.flags.x_cost || self.cost <= energy)
    }

    pub fn actions(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter().take_while(|a| a.kind != ActionKind::None)
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
