//! Saber Strike - a 2D mecha side-scroller in Bevy.
//!
//! Pilot a close-combat mech through occupied areas, clearing out grunt
//! machines with a beam saber while they patrol, chase, and return fire.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, global events, tuning configuration
//! - **Combat**: Hit detection, damage, knockback, death
//! - **Animation**: Frame-list clips and sprite synchronization
//! - **Player**: Movement, jumping, the beam saber attack
//! - **Enemies**: Patrol/chase/attack AI for grunt mechs
//! - **World**: Level data, construction, progression
//! - **UI**: HUD and full-screen menus
//! - **Audio**: Sound effect playback

pub mod animation;
pub mod audio;
pub mod combat;
pub mod core;
pub mod enemies;
pub mod player;
pub mod ui;
pub mod world;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
pub struct SaberStrikePlugin;

impl Plugin for SaberStrikePlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)
            // Animation systems
            .add_plugins(animation::AnimationPlugin)
            // Player systems
            .add_plugins(player::PlayerPlugin)
            // Combat systems
            .add_plugins(combat::CombatPlugin)
            // Enemy systems
            .add_plugins(enemies::EnemyPlugin)
            // World systems
            .add_plugins(world::WorldPlugin)
            // UI systems
            .add_plugins(ui::UiPlugin)
            // Audio systems
            .add_plugins(audio::GameAudioPlugin);
    }
}
