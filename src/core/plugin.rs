//! Core plugin that sets up game states, events, and fundamental systems.

use bevy::prelude::*;

use super::events::*;
use super::states::*;

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Game states (Loading, TitleScreen, InGame, etc.)
/// - Global events (DamageEvent, DeathEvent, etc.)
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app
            // Initialize game states
            .init_state::<GameState>()
            // Register global events
            .add_event::<DamageEvent>()
            .add_event::<DeathEvent>()
            .add_event::<LevelCleared>()
            .add_event::<SoundEvent>()
            // Loading state - transition to the title screen once the
            // level registry and sounds have been loaded (same frame)
            .add_systems(OnEnter(GameState::Loading), finish_loading);
    }
}

/// Transition from Loading to the title screen.
///
/// Data loading runs in the same OnEnter schedule and is fatal on failure,
/// so reaching the transition means everything loaded.
fn finish_loading(mut next_state: ResMut<NextState<GameState>>) {
    next_state.set(GameState::TitleScreen);
}
