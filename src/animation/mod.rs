//! Animation module - frame-list clips, playback, and completion events.

mod components;
mod systems;

pub use components::*;
pub use systems::{advance_clips, sync_sprites};

use bevy::prelude::*;

use crate::core::GameState;

/// Animation plugin - drives clip playback during gameplay.
pub struct AnimationPlugin;

impl Plugin for AnimationPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<AnimationFinished>().add_systems(
            Update,
            (advance_clips, sync_sprites)
                .chain()
                .run_if(in_state(GameState::InGame)),
        );
    }
}
