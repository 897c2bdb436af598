//! Player plugin - registers control systems.

use bevy::prelude::*;

use super::attack::{end_slash, player_attack};
use super::movement::{fall_out_of_world, player_movement};
use crate::combat::CombatSet;
use crate::core::GameState;

/// Player plugin - handles input-driven control of the player mech.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        // Death transitions run first each frame (CombatSet::Death), so a
        // mech whose health hit zero never processes another input.
        app.add_systems(
            Update,
            (player_attack, end_slash, player_movement, fall_out_of_world)
                .chain()
                .after(CombatSet::Death)
                .run_if(in_state(GameState::InGame)),
        );
    }
}
