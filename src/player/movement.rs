//! Player movement, jumping, and fall-out-of-world death.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::clips::mech_clip_library;
use super::components::{Player, Slashing};
use crate::animation::{clips, ActorSprite, ClipPlayer};
use crate::combat::{CollisionBox, Dead, Facing, Health, HitTargets, Hurting};
use crate::core::{GameConfig, GameState, SoundEvent};
use crate::world::LevelEntity;

/// Handle left/right movement, jumping, and the derived display animation.
///
/// Suppressed entirely while dead, hurting, or slashing - those are lockout
/// states and the queries filter them out.
pub fn player_movement(
    keyboard: Res<ButtonInput<KeyCode>>,
    config: Res<GameConfig>,
    rapier_context: Query<&RapierContext>,
    mut player_query: Query<
        (
            Entity,
            &Transform,
            &CollisionBox,
            &mut Velocity,
            &mut Facing,
            &mut ClipPlayer,
        ),
        (With<Player>, Without<Dead>, Without<Hurting>, Without<Slashing>),
    >,
    mut sounds: EventWriter<SoundEvent>,
) {
    let Ok((entity, transform, collision_box, mut velocity, mut facing, mut clip_player)) =
        player_query.get_single_mut()
    else {
        return;
    };

    // Ground check: short downward raycast from just above the feet.
    let grounded = if let Ok(context) = rapier_context.get_single() {
        let origin =
            transform.translation.truncate() - Vec2::new(0.0, collision_box.half.y - 2.0);
        context
            .cast_ray(
                origin,
                Vec2::NEG_Y,
                6.0,
                true,
                QueryFilter::default().exclude_collider(entity),
            )
            .is_some()
    } else {
        // No physics context (headless): assume grounded
        true
    };

    if keyboard.pressed(KeyCode::ArrowLeft) {
        velocity.linvel.x = -config.player.walk_speed;
        *facing = Facing::Left;
    } else if keyboard.pressed(KeyCode::ArrowRight) {
        velocity.linvel.x = config.player.walk_speed;
        *facing = Facing::Right;
    } else {
        velocity.linvel.x = 0.0;
    }

    if keyboard.pressed(KeyCode::ArrowUp) && grounded {
        velocity.linvel.y = config.player.jump_power;
        sounds.send(SoundEvent::ThrustersBoost);
    }

    // Display state is derived from physics, not stored.
    if !grounded {
        if velocity.linvel.y > 0.0 {
            clip_player.request(clips::JUMP_UP);
        } else {
            clip_player.request(clips::JUMP_DOWN);
        }
    } else if velocity.linvel.x != 0.0 {
        clip_player.request(clips::WALK);
    } else {
        clip_player.request(clips::IDLE);
    }
}

/// Falling below the level's lower bound is instant death, even at full
/// health. The level floor sits at y = 0.
pub fn fall_out_of_world(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut next_state: ResMut<NextState<GameState>>,
    mut player_query: Query<
        (Entity, &Transform, &CollisionBox, &mut Health),
        (With<Player>, Without<Dead>),
    >,
) {
    let Ok((entity, transform, collision_box, mut health)) = player_query.get_single_mut()
    else {
        return;
    };
    let feet = transform.translation.y - collision_box.half.y;
    if feet < -config.combat.fall_margin {
        health.current = 0.0;
        commands.entity(entity).insert(Dead);
        next_state.set(GameState::GameOver);
    }
}

/// Spawn the player mech at a level position.
pub fn spawn_player(
    commands: &mut Commands,
    config: &GameConfig,
    asset_server: &AssetServer,
    position: Vec2,
) -> Entity {
    let (width, height) = config.player.collision_box;
    let collision_box = CollisionBox::new(width, height);

    commands
        .spawn((
            Player,
            Health::new(config.player.max_health),
            Facing::Right,
            collision_box,
            HitTargets::default(),
            mech_clip_library(asset_server),
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

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app() -> App {
        let mut app = App::new();
        app.add_plugins(bevy::state::app::StatesPlugin)
            .insert_resource(GameConfig::default())
            .init_state::<GameState>()
            .add_systems(Update, fall_out_of_world);
        app
    }

    #[test]
    fn falling_below_the_level_is_fatal_at_any_health() {
        let mut app = test_app();

        // Feet at -104, below the -100 fall margin.
        let player = app
            .world_mut()
            .spawn((
                Player,
                Health::new(100.0),
                CollisionBox::new(48.0, 96.0),
                Transform::from_xyz(500.0, -56.0, 0.0),
            ))
            .id();

        app.update();

        assert!(app.world().get::<Dead>(player).is_some());
        assert_eq!(app.world().get::<Health>(player).unwrap().current, 0.0);
    }

    #[test]
    fn standing_on_the_floor_is_not_fatal() {
        let mut app = test_app();

        let player = app
            .world_mut()
            .spawn((
                Player,
                Health::new(100.0),
                CollisionBox::new(48.0, 96.0),
                Transform::from_xyz(500.0, 48.0, 0.0),
            ))
            .id();

        app.update();

        assert!(app.world().get::<Dead>(player).is_none());
    }
}
