//! Static, process-lifetime card/relic/enemy/preset tables, plus the fixed action-tag and
//! buff-alphabet vocabulary shared by the simulator and the state model.

pub mod action;
pub mod buff;
pub mod card;
pub mod enemy;
pub mod preset;
pub mod relic;
pub mod registry;

pub use action::{Action, ActionKind};
pub use buff::{BuffKind, BuffVec};
pub use card::{Card, CardFlags};
pub use enemy::{AntiRepeat, Enemy, Intent};
pub use preset::{CharacterPreset, FightPreset};
pub use relic::{Relic, RelicHook, RelicSet};
