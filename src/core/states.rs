//! Game state definitions that control the overall flow of the game.
//!
//! States determine which systems run at any given time. Gameplay systems
//! only run in the InGame state, while the various screens own the other
//! states.

use bevy::prelude::*;

/// Main game states - controls overall game flow.
///
/// The game moves through these states based on player actions:
/// - Start in `Loading` to load config, level data, and sounds
/// - Move to `TitleScreen` when loading completes
/// - Enter `InGame` when the player starts a sortie
/// - `GameOver` when the player mech is destroyed (retry the level)
/// - `Victory` when a level is cleared and more levels remain
/// - `GameComplete` when the last level is cleared
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Initial state - loading assets and data files
    #[default]
    Loading,
    /// Title screen
    TitleScreen,
    /// Active gameplay
    InGame,
    /// Player has died
    GameOver,
    /// Current level cleared, next level available
    Victory,
    /// All levels cleared
    GameComplete,
}
