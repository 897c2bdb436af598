//! Game tuning configuration loaded from `assets/data/config.ron`.
//!
//! Every tuned constant (speeds, damages, knockback forces, ranges,
//! durations, hysteresis factors) lives here rather than being hard-coded,
//! so balance changes never require touching gameplay code. A missing or
//! malformed config file is a fatal startup error.

use bevy::prelude::*;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading the game configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read.
    #[error("Failed to read config '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    /// RON parsing failed.
    #[error("Parse error in config '{path}': {source}")]
    Parse {
        path: String,
        source: ron::error::SpannedError,
    },

    /// A value is out of its allowed range.
    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// Player mech tuning.
#[derive(Debug, Clone, Deserialize)]
pub struct PlayerTuning {
    pub max_health: f32,
    /// Horizontal movement speed in units per second
    pub walk_speed: f32,
    /// Upward jump impulse velocity
    pub jump_power: f32,
    /// Hurt-stun duration in seconds
    pub hurting_duration: f32,
    /// Invulnerability window after taking damage, in seconds
    pub invulnerable_time: f32,
    /// Collision box size (width, height), independent of animation frames
    pub collision_box: (f32, f32),
}

/// Enemy mech tuning.
#[derive(Debug, Clone, Deserialize)]
pub struct EnemyTuning {
    pub max_health: f32,
    pub walk_speed: f32,
    /// Distance at which an attack may start
    pub attack_range: f32,
    /// Minimum time between attacks, in seconds
    pub attack_cooldown: f32,
    /// Half-width of the back-and-forth patrol around the spawn anchor
    pub patrol_range: f32,
    /// Chasing starts at patrol_range * chase_enter_factor
    pub chase_enter_factor: f32,
    /// Chasing ends beyond patrol_range * chase_exit_factor (hysteresis)
    pub chase_exit_factor: f32,
    /// Hurt-stun duration in seconds
    pub hurting_duration: f32,
    pub collision_box: (f32, f32),
}

/// Damage and knockback for one attack type.
#[derive(Debug, Clone, Deserialize)]
pub struct AttackTuning {
    pub damage: f32,
    /// Horizontal knockback velocity applied to the defender
    pub knockback: f32,
    /// Hit-region size (width, height), centered in front of the attacker
    pub region: (f32, f32),
}

/// Damage for plain body contact (no hit-region, collision boxes touch).
#[derive(Debug, Clone, Deserialize)]
pub struct ContactTuning {
    pub damage: f32,
    pub knockback: f32,
}

/// Combat-wide tuning.
#[derive(Debug, Clone, Deserialize)]
pub struct CombatTuning {
    /// Player body touching an enemy body
    pub body_contact: ContactTuning,
    /// Player melee swing
    pub beam_saber: AttackTuning,
    /// Enemy gun burst
    pub machine_gun: AttackTuning,
    /// Visibility toggle interval while invulnerable, in seconds
    pub blink_interval: f32,
    /// Falling this far below the level floor is instant death
    pub fall_margin: f32,
}

/// Top-level game configuration resource.
#[derive(Resource, Debug, Clone, Deserialize)]
pub struct GameConfig {
    pub player: PlayerTuning,
    pub enemy: EnemyTuning,
    pub combat: CombatTuning,
}

impl GameConfig {
    /// Load and validate the configuration from a RON file.
    pub fn load(path: &Path) -> Result<GameConfig, ConfigError> {
        let display = path.display().to_string();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: display.clone(),
            source,
        })?;
        let config: GameConfig =
            ron::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: display,
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that would break the state machines.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.player.max_health <= 0.0 || self.enemy.max_health <= 0.0 {
            return Err(ConfigError::Invalid("max_health must be positive".into()));
        }
        if self.enemy.patrol_range <= 0.0 {
            return Err(ConfigError::Invalid("patrol_range must be positive".into()));
        }
        if self.enemy.chase_exit_factor <= self.enemy.chase_enter_factor {
            return Err(ConfigError::Invalid(
                "chase_exit_factor must exceed chase_enter_factor".into(),
            ));
        }
        if self.combat.blink_interval <= 0.0 {
            return Err(ConfigError::Invalid("blink_interval must be positive".into()));
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player: PlayerTuning {
                max_health: 100.0,
                walk_speed: 200.0,
                jump_power: 550.0,
                hurting_duration: 0.1,
                invulnerable_time: 2.0,
                collision_box: (48.0, 96.0),
            },
            enemy: EnemyTuning {
                max_health: 80.0,
                walk_speed: 100.0,
                attack_range: 200.0,
                attack_cooldown: 2.0,
                patrol_range: 150.0,
                chase_enter_factor: 2.0,
                chase_exit_factor: 3.0,
                hurting_duration: 0.1,
                collision_box: (44.0, 96.0),
            },
            combat: CombatTuning {
                body_contact: ContactTuning {
                    damage: 20.0,
                    knockback: 200.0,
                },
                beam_saber: AttackTuning {
                    damage: 40.0,
                    knockback: 300.0,
                    region: (150.0, 120.0),
                },
                machine_gun: AttackTuning {
                    damage: 25.0,
                    knockback: 250.0,
                    region: (400.0, 120.0),
                },
                blink_interval: 0.1,
                fall_margin: 100.0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn parses_ron_config() {
        let text = r#"(
            player: (
                max_health: 100.0,
                walk_speed: 200.0,
                jump_power: 550.0,
                hurting_duration: 0.1,
                invulnerable_time: 2.0,
                collision_box: (48.0, 96.0),
            ),
            enemy: (
                max_health: 80.0,
                walk_speed: 100.0,
                attack_range: 200.0,
                attack_cooldown: 2.0,
                patrol_range: 150.0,
                chase_enter_factor: 2.0,
                chase_exit_factor: 3.0,
                hurting_duration: 0.1,
                collision_box: (44.0, 96.0),
            ),
            combat: (
                body_contact: (damage: 20.0, knockback: 200.0),
                beam_saber: (damage: 40.0, knockback: 300.0, region: (150.0, 120.0)),
                machine_gun: (damage: 25.0, knockback: 250.0, region: (400.0, 120.0)),
                blink_interval: 0.1,
                fall_margin: 100.0,
            ),
        )"#;
        let config: GameConfig = ron::from_str(text).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.combat.beam_saber.damage, 40.0);
        assert_eq!(config.enemy.chase_exit_factor, 3.0);
    }

    #[test]
    fn rejects_collapsed_hysteresis_band() {
        let mut config = GameConfig::default();
        config.enemy.chase_exit_factor = config.enemy.chase_enter_factor;
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = GameConfig::load(Path::new("does/not/exist.ron")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
