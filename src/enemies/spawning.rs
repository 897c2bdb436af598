//! Enemy spawning.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::clips::grunt_clip_library;
use super::components::{AiState, AttackClock, Enemy, PatrolAnchor};
use crate::animation::{clips, ActorSprite, ClipPlayer};
use crate::combat::{CollisionBox, Facing, Health, HitTargets};
use crate::core::GameConfig;
use crate::world::LevelEntity;

/// Spawn a grunt mech at a level position. Its spawn x becomes the patrol
/// anchor.
pub fn spawn_enemy(
    commands: &mut Commands,
    config: &GameConfig,
    asset_server: &AssetServer,
    position: Vec2,
) -> Entity {
    let (width, height) = config.enemy.collision_box;
    let collision_box = CollisionBox::new(width, height);

    commands
        .spawn((
            Enemy,
            Health::new(config.enemy.max_health),
            Facing::Right,
            collision_box,
            HitTargets::default(),
            AttackClock::default(),
            AiState::default(),
            PatrolAnchor(position.x),
            grunt_clip_library(asset_server),
            ClipPlayer::new(clips::IDLE),
            Transform::from_xyz(position.x, position.y, 1.0),
            Visibility::default(),
            LevelEntity,
        ))
        .insert((
            RigidBody::Dynamic,
            LockedAxes::ROTATION_LOCKED,
            Collider::cuboid(collision_box.half.x, collision_box.half.y),
            Velocity::zero(),
            Friction::coefficient(0.0),
        ))
        .with_children(|parent| {
            parent.spawn((
                ActorSprite,
                Sprite::default(),
                Transform::from_xyz(0.0, -collision_box.half.y, 0.0),
            ));
        })
        .id()
}
