//! Global events used for cross-system communication.
//!
//! Events allow decoupled systems to communicate. The overlap systems send
//! DamageEvents, and the damage system receives them to apply knockback and
//! health loss. This keeps systems independent and testable.

use bevy::prelude::*;

/// Sent when an overlap check decides an entity should take damage.
///
/// The damage system listens for these and applies the actual knockback and
/// health reduction, after checking the defender's hurt/invulnerable/dead
/// gates.
#[derive(Event)]
pub struct DamageEvent {
    /// Entity receiving damage
    pub target: Entity,
    /// Entity that caused the damage (knockback pushes away from it)
    pub source: Entity,
    /// Damage amount
    pub amount: f32,
    /// Horizontal knockback magnitude for this attack type
    pub knockback: f32,
}

/// Sent once when an entity's health reaches zero.
#[derive(Event)]
pub struct DeathEvent {
    /// Entity that died
    pub entity: Entity,
}

/// Sent exactly once per level when every enemy has been deactivated.
#[derive(Event)]
pub struct LevelCleared;

/// Sound effect requests, consumed by the audio plugin.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEvent {
    BeamSaberSlash,
    MachineGunFire,
    MechaExplosion,
    ThrustersBoost,
}
