//! State model: the node weight carried at every search-tree slot, plus the small value types
//! (`Decision`/`Target`, `Stance`, `PendingQueue`, `MonsterSlot`) it is built from.

pub mod combat;
pub mod decision;
pub mod monster;
pub mod pending;
pub mod stance;

pub use combat::CombatState;
pub use decision::{Decision, Target};
pub use monster::MonsterSlot;
pub use pending::{PendingAction, PendingQueue};
pub use stance::Stance;
