//! Enemy plugin - registers AI and movement systems.

use bevy::prelude::*;

use super::ai::{attack_finish, chase_movement, enemy_ai, patrol_movement};
use crate::combat::CombatSet;
use crate::core::GameState;

/// Enemy plugin - patrol, chase, and attack behavior for grunt mechs.
pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (enemy_ai, patrol_movement, chase_movement, attack_finish)
                .chain()
                .after(CombatSet::Death)
                .run_if(in_state(GameState::InGame)),
        );
    }
}
