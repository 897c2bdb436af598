//! Combat-related components shared by the player and enemies.

use bevy::prelude::*;
use std::collections::HashSet;

/// Component for entities that can take damage.
///
/// Health never goes below zero and is never mutated again once the owner
/// is dead (the damage system guards on the `Dead` marker).
#[derive(Component, Debug)]
pub struct Health {
    pub current: f32,
    pub maximum: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self {
            current: max,
            maximum: max,
        }
    }

    /// Decrease health, floored at zero. Returns the amount actually lost.
    pub fn apply_damage(&mut self, amount: f32) -> f32 {
        let actual = amount.min(self.current);
        self.current -= actual;
        actual
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }

    pub fn percentage(&self) -> f32 {
        self.current / self.maximum
    }
}

/// Horizontal facing direction of an actor.
#[derive(Component, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// +1 for right, -1 for left.
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    /// Facing toward a horizontal delta (no change for zero).
    pub fn from_delta(dx: f32, current: Facing) -> Facing {
        if dx > 0.0 {
            Facing::Right
        } else if dx < 0.0 {
            Facing::Left
        } else {
            current
        }
    }
}

/// Axis-aligned collision box of an actor, independent of whichever
/// animation frame is currently displayed.
#[derive(Component, Clone, Copy, Debug)]
pub struct CollisionBox {
    /// Half-extents (width / 2, height / 2)
    pub half: Vec2,
}

impl CollisionBox {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            half: Vec2::new(width / 2.0, height / 2.0),
        }
    }

    /// World-space rectangle for an actor centered at `center`.
    pub fn rect(&self, center: Vec2) -> Rect {
        Rect::from_center_size(center, self.half * 2.0)
    }
}

/// Per-attack-instance set of targets already hit.
///
/// Cleared when an attack begins and again when it ends, so a single swing
/// or burst damages each opposing actor at most once no matter how many
/// overlap frames the physics reports.
#[derive(Component, Default, Debug)]
pub struct HitTargets(HashSet<Entity>);

impl HitTargets {
    /// Empty the set. Called at attack start and attack end.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Record a target; returns false if it was already hit this attack.
    pub fn try_add(&mut self, target: Entity) -> bool {
        self.0.insert(target)
    }

    pub fn contains(&self, target: Entity) -> bool {
        self.0.contains(&target)
    }
}

/// Hurt-stun: movement and AI are suppressed until the timer expires.
///
/// A defender that is already hurting cannot take further damage, which
/// doubles as the guard against scheduling a second expiry timer.
#[derive(Component, Debug)]
pub struct Hurting(pub Timer);

impl Hurting {
    pub fn new(duration: f32) -> Self {
        Self(Timer::from_seconds(duration, TimerMode::Once))
    }
}

/// Post-hit invulnerability window (player only), with a visibility blink.
///
/// Re-inserting this component replaces any pending window, so exactly one
/// invulnerability timer is ever active per player.
#[derive(Component, Debug)]
pub struct Invulnerable {
    pub timer: Timer,
    pub blink: Timer,
}

impl Invulnerable {
    pub fn new(duration: f32, blink_interval: f32) -> Self {
        Self {
            timer: Timer::from_seconds(duration, TimerMode::Once),
            blink: Timer::from_seconds(blink_interval, TimerMode::Repeating),
        }
    }
}

/// Marker for entities whose health reached zero. Terminal: no further
/// damage, movement, or state transition is permitted once present.
#[derive(Component, Debug)]
pub struct Dead;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_floors_at_zero() {
        let mut health = Health::new(50.0);
        assert_eq!(health.apply_damage(40.0), 40.0);
        assert_eq!(health.current, 10.0);
        // Overkill is clamped
        assert_eq!(health.apply_damage(40.0), 10.0);
        assert_eq!(health.current, 0.0);
        assert!(health.is_dead());
    }

    #[test]
    fn hit_targets_deduplicate_within_one_attack() {
        let mut targets = HitTargets::default();
        let enemy = Entity::from_raw(7);
        assert!(targets.try_add(enemy));
        // Repeated overlap frames against the same target are rejected
        for _ in 0..5 {
            assert!(!targets.try_add(enemy));
        }
        // A new attack clears the set and the target can be hit again
        targets.clear();
        assert!(targets.try_add(enemy));
    }

    #[test]
    fn facing_follows_last_nonzero_delta() {
        assert_eq!(Facing::from_delta(3.0, Facing::Left), Facing::Right);
        assert_eq!(Facing::from_delta(-1.0, Facing::Right), Facing::Left);
        assert_eq!(Facing::from_delta(0.0, Facing::Left), Facing::Left);
    }
}
