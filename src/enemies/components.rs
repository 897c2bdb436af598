//! Enemy-related components.

use bevy::prelude::*;
use std::time::Duration;

/// Marker component for all enemies.
#[derive(Component)]
pub struct Enemy;

/// AI state machine for enemy behavior.
///
/// An explicit tagged state with a pure per-tick transition function - see
/// `ai::next_state`. Attacking is only left through the attack animation's
/// completion, never by the transition function.
#[derive(Component, Default, Clone, Copy, PartialEq, Eq, Debug)]
pub enum AiState {
    /// Standing still, deciding what to do next
    #[default]
    Idle,
    /// Bounded back-and-forth walk around the spawn anchor
    Patrolling,
    /// Moving toward the player's current x position
    Chasing,
    /// Gun burst in progress
    Attacking,
}

/// X position the enemy patrols around - its spawn point.
#[derive(Component, Debug)]
pub struct PatrolAnchor(pub f32);

/// Attack cooldown bookkeeping against the game clock.
#[derive(Component, Default, Debug)]
pub struct AttackClock {
    last_attack: Option<Duration>,
}

impl AttackClock {
    /// True when no attack has happened yet or the cooldown has elapsed.
    pub fn can_attack(&self, now: Duration, cooldown: Duration) -> bool {
        self.last_attack
            .map_or(true, |last| now.saturating_sub(last) >= cooldown)
    }

    pub fn record(&mut self, now: Duration) {
        self.last_attack = Some(now);
    }
}

/// Soft-delete marker: the enemy is hidden and physically inert but the
/// entity is kept so the live-enemy count can observe the kill.
#[derive(Component)]
pub struct Inactive;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attack_clock_enforces_cooldown() {
        let cooldown = Duration::from_secs(2);
        let mut clock = AttackClock::default();

        // Never attacked: allowed immediately.
        assert!(clock.can_attack(Duration::from_secs(0), cooldown));
        clock.record(Duration::from_secs(1));

        // Second attempt inside the cooldown is rejected.
        assert!(!clock.can_attack(Duration::from_millis(2500), cooldown));
        // At or past the cooldown it is accepted again.
        assert!(clock.can_attack(Duration::from_secs(3), cooldown));
    }
}
