//! Player-related components.

use bevy::prelude::*;

/// Marker component for the player entity.
#[derive(Component)]
pub struct Player;

/// Beam saber attack-active window.
///
/// While present, movement and attack input are locked out and the melee
/// hit-region can register damage. Removed when the slash animation
/// completes.
#[derive(Component)]
pub struct Slashing;
