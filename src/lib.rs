pub mod catalog;
pub mod cli;
pub mod combat_step;
pub mod piles;
pub mod report;
pub mod search;
pub mod state;

/// dimensional analysis types
pub type Hp = i32;
pub type Energy = i32;
pub type Probability = f64;
pub type Objective = f64;

/// card/relic/enemy catalog keys
pub type CardId = u16;
pub type RelicId = u16;
pub type EnemyId = u16;

/// combat shape limits
pub const MAX_MOBS: usize = 5;
pub const MAX_PENDING_ACTIONS: usize = 2;
pub const MAX_HAND_SIZE: usize = 10;
pub const MAX_CARD_ACTIONS: usize = 4;

/// starting-turn constants
pub const STARTING_ENERGY: Energy = 3;
pub const STARTING_DRAW: u8 = 5;
pub const CARDS_DRAWN_PER_TURN: u8 = 5;

/// objective tie-break policy constant: among equal-HP terminals (here, equal-zero-HP
/// terminals), the one that leaves the least enemy HP standing ranks (infinitesimally) higher.
pub const DEATH_TIEBREAK_DIVISOR: Objective = 1000.0;

/// epsilon used when comparing probabilities and objectives for equality.
pub const PROBABILITY_EPSILON: f64 = 1e-6;

/// trait for random generation, mainly (strictly) for testing
pub trait Arbitrary {
    fn random() -> Self;
}

/// initialize logging for the `solve` binary
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}
