//! Combat step: the opaque collaborator the search core drives. The engine never inspects card
//! effects, buff math, or relic triggers directly. It calls one of the four entry points below
//! (plus the chance-generation helpers in `battle`) and reads the resulting `CombatState`.

pub mod actions;
pub mod battle;
pub mod turn;

pub use actions::apply_action;
pub use battle::{enemy_layouts, generate_intents, start_battle};
pub use turn::{end_turn, play_card};
