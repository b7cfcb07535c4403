use crate::CardId;

/// what a card-play or upgrade targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Enemy(usize),
    HandCard(usize),
}

/// The player decision that produced a node from its parent, valid only when the parent had no
/// pending chance action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    PlayCard { card: CardId, target: Option<Target> },
    EndTurn,
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Decision::PlayCard { card, target: Some(Target::Enemy(i)) } => {
                write!(f, "play {card} -> enemy {i}")
            }
            Decision::PlayCard { card, target: Some(Target::HandCard(i)) } => {
                write!(f, "play {card} -> hand card {i}")
            }
            Decision::PlayCard { card, target: None } => write!(f, "play {card}"),
            Decision::EndTurn => write!(f, "end turn"),
        }
    }
}
