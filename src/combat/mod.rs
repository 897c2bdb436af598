//! Combat module - damage resolution, target tracking, and actor lifecycle.

mod components;
mod plugin;
mod systems;

pub use components::*;
pub use plugin::CombatPlugin;
pub use systems::{knockback_direction, overlaps, strike_region, CombatSet};
