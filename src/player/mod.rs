//! Player module - the player mech, its controls, and its attacks.

mod attack;
mod clips;
mod components;
mod movement;
mod plugin;

pub use components::{Player, Slashing};
pub use movement::spawn_player;
pub use plugin::PlayerPlugin;
