//! Enemy AI decision and movement systems.
//!
//! The decision logic is a pure transition function over the current state,
//! the distance to the player, and the attack cooldown; the systems wire it
//! to the ECS. Chase detection uses hysteresis: the enter radius is smaller
//! than the exit radius, so an enemy at the boundary never flickers between
//! patrolling and chasing.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::{AiState, AttackClock, Enemy, Inactive, PatrolAnchor};
use crate::animation::{clips, AnimationFinished, ClipPlayer};
use crate::combat::{Dead, Facing, HitTargets, Hurting};
use crate::core::{EnemyTuning, GameConfig, SoundEvent};
use crate::player::Player;

/// Pure AI transition function.
///
/// Attacking takes priority whenever the player is inside `attack_range` and
/// the cooldown allows it. Otherwise detection is hysteretic around the
/// patrol range: chase begins inside `patrol_range * chase_enter_factor` and
/// only ends outside `patrol_range * chase_exit_factor`. An in-progress
/// attack is never interrupted here - only the animation's completion leaves
/// Attacking.
pub fn next_state(
    current: AiState,
    distance: f32,
    can_attack: bool,
    tuning: &EnemyTuning,
) -> AiState {
    if current == AiState::Attacking {
        return AiState::Attacking;
    }
    if distance <= tuning.attack_range && can_attack {
        return AiState::Attacking;
    }
    let enter = tuning.patrol_range * tuning.chase_enter_factor;
    let exit = tuning.patrol_range * tuning.chase_exit_factor;
    match current {
        AiState::Chasing if distance <= exit => AiState::Chasing,
        _ if distance <= enter => AiState::Chasing,
        _ => AiState::Patrolling,
    }
}

/// Re-evaluate each enemy's state against the player's position and apply
/// the side effects of any transition.
pub fn enemy_ai(
    time: Res<Time>,
    config: Res<GameConfig>,
    player_query: Query<&Transform, (With<Player>, Without<Dead>)>,
    mut enemy_query: Query<
        (
            &Transform,
            &mut AiState,
            &mut AttackClock,
            &mut HitTargets,
            &mut Velocity,
            &mut ClipPlayer,
        ),
        (With<Enemy>, Without<Dead>, Without<Hurting>, Without<Inactive>, Without<Player>),
    >,
    mut sounds: EventWriter<SoundEvent>,
) {
    let Ok(player_transform) = player_query.get_single() else {
        return;
    };
    let now = time.elapsed();

    for (transform, mut state, mut clock, mut targets, mut velocity, mut clip_player) in
        &mut enemy_query
    {
        if *state == AiState::Attacking {
            continue;
        }
        let distance = player_transform
            .translation
            .truncate()
            .distance(transform.translation.truncate());
        let cooldown = std::time::Duration::from_secs_f32(config.enemy.attack_cooldown);
        let can_attack = clock.can_attack(now, cooldown);
        let next = next_state(*state, distance, can_attack, &config.enemy);
        if next == *state {
            continue;
        }

        match next {
            AiState::Attacking => {
                velocity.linvel.x = 0.0;
                clock.record(now);
                targets.clear();
                clip_player.request(clips::ATTACK);
                sounds.send(SoundEvent::MachineGunFire);
            }
            AiState::Patrolling | AiState::Chasing => {
                clip_player.request(clips::WALK);
            }
            AiState::Idle => {
                clip_player.request(clips::IDLE);
            }
        }
        *state = next;
    }
}

/// Walk back and forth around the spawn anchor, turning around at the
/// patrol bound.
pub fn patrol_movement(
    config: Res<GameConfig>,
    mut enemy_query: Query<
        (&Transform, &PatrolAnchor, &AiState, &mut Velocity, &mut Facing),
        (With<Enemy>, Without<Dead>, Without<Hurting>, Without<Inactive>),
    >,
) {
    for (transform, anchor, state, mut velocity, mut facing) in &mut enemy_query {
        if *state != AiState::Patrolling {
            continue;
        }
        let offset = transform.translation.x - anchor.0;
        if offset.abs() >= config.enemy.patrol_range {
            // Past the bound: turn back toward the anchor.
            *facing = if offset > 0.0 {
                Facing::Left
            } else {
                Facing::Right
            };
        }
        velocity.linvel.x = facing.sign() * config.enemy.walk_speed;
    }
}

/// Move toward the player's current x position while chasing.
pub fn chase_movement(
    config: Res<GameConfig>,
    player_query: Query<&Transform, (With<Player>, Without<Enemy>)>,
    mut enemy_query: Query<
        (&Transform, &AiState, &mut Velocity, &mut Facing),
        (With<Enemy>, Without<Dead>, Without<Hurting>, Without<Inactive>),
    >,
) {
    let Ok(player_transform) = player_query.get_single() else {
        return;
    };
    for (transform, state, mut velocity, mut facing) in &mut enemy_query {
        if *state != AiState::Chasing {
            continue;
        }
        let dx = player_transform.translation.x - transform.translation.x;
        *facing = Facing::from_delta(dx, *facing);
        velocity.linvel.x = facing.sign() * config.enemy.walk_speed;
    }
}

/// Leave the Attacking state when the gun burst animation completes.
pub fn attack_finish(
    mut finished: EventReader<AnimationFinished>,
    mut enemy_query: Query<
        (&mut AiState, &mut HitTargets, &mut Velocity, &mut ClipPlayer),
        (With<Enemy>, Without<Dead>, Without<Inactive>),
    >,
) {
    for event in finished.read() {
        if event.clip != clips::ATTACK {
            continue;
        }
        let Ok((mut state, mut targets, mut velocity, mut clip_player)) =
            enemy_query.get_mut(event.entity)
        else {
            continue;
        };
        if *state != AiState::Attacking {
            continue;
        }
        *state = AiState::Idle;
        targets.clear();
        velocity.linvel.x = 0.0;
        clip_player.request(clips::IDLE);
    }
}
