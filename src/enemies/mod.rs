//! Enemies module - grunt mechs with a patrol/chase/attack state machine.

mod ai;
mod clips;
mod components;
mod plugin;
mod spawning;

pub use ai::next_state;
pub use components::{AiState, AttackClock, Enemy, Inactive, PatrolAnchor};
pub use plugin::EnemyPlugin;
pub use spawning::spawn_enemy;
