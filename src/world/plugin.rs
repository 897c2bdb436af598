//! World plugin - level loading, building, and progression.

use bevy::prelude::*;
use std::path::Path;

use super::builder::{
    camera_follow, check_level_cleared, cleanup_level, handle_level_cleared, setup_level,
};
use super::data::{CurrentLevel, LevelRegistry};
use crate::core::GameState;

/// World plugin - owns level data and the level lifecycle.
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CurrentLevel>()
            .add_systems(OnEnter(GameState::Loading), load_level_registry)
            .add_systems(OnEnter(GameState::InGame), setup_level)
            .add_systems(OnEnter(GameState::TitleScreen), cleanup_level)
            .add_systems(
                Update,
                (camera_follow, check_level_cleared, handle_level_cleared)
                    .run_if(in_state(GameState::InGame)),
            );
    }
}

/// Load every level at startup. Unusable level data is a fatal error - the
/// game cannot run without it.
fn load_level_registry(mut commands: Commands) {
    match LevelRegistry::load(Path::new("assets/data")) {
        Ok(registry) => {
            info!("Loaded {} level(s)", registry.len());
            commands.insert_resource(registry);
        }
        Err(err) => {
            panic!("Level data is unusable: {err}");
        }
    }
}
