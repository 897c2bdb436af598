//! Combat systems - overlap checks, damage resolution, hurt-stun,
//! invulnerability, and death handling.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use std::collections::HashSet;

use super::components::*;
use crate::animation::{clips, AnimationFinished, ClipPlayer};
use crate::core::{DamageEvent, DeathEvent, GameConfig, GameState, SoundEvent};
use crate::enemies::{AiState, Enemy, Inactive};
use crate::player::{Player, Slashing};

/// System set ordering for combat.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum CombatSet {
    /// Body-vs-body and hit-region overlap checks
    Overlap,
    /// Damage application, hurt-stun, invulnerability timers
    Damage,
    /// Death transitions and death-animation completion
    Death,
}

/// Configure combat systems.
pub fn setup_combat_systems(app: &mut App) {
    app.configure_sets(
        Update,
        (CombatSet::Overlap, CombatSet::Damage, CombatSet::Death)
            .chain()
            .run_if(in_state(GameState::InGame)),
    )
    .add_systems(
        Update,
        (body_contact_damage, player_melee_hits, enemy_strikes).in_set(CombatSet::Overlap),
    )
    .add_systems(
        Update,
        (tick_hurt_stun, tick_invulnerability, apply_damage)
            .chain()
            .in_set(CombatSet::Damage),
    )
    .add_systems(
        Update,
        (check_deaths, finish_death_animations)
            .chain()
            .in_set(CombatSet::Death),
    );
}

/// Horizontal knockback sign: push the defender away from the attacker.
pub fn knockback_direction(defender_x: f32, attacker_x: f32) -> f32 {
    if defender_x > attacker_x {
        1.0
    } else {
        -1.0
    }
}

/// Hit-region rectangle extending from the attacker's center in the facing
/// direction. Distinct from the attacker's collision box.
pub fn strike_region(origin: Vec2, facing: Facing, size: (f32, f32)) -> Rect {
    let size = Vec2::new(size.0, size.1);
    let center = Vec2::new(origin.x + facing.sign() * size.x / 2.0, origin.y);
    Rect::from_center_size(center, size)
}

/// Overlap test between two axis-aligned regions.
pub fn overlaps(a: Rect, b: Rect) -> bool {
    !a.intersect(b).is_empty()
}

/// Player body touching an enemy body hurts the player.
///
/// No target tracking here - repeat damage is prevented by the player's
/// invulnerability window instead.
pub fn body_contact_damage(
    config: Res<GameConfig>,
    player_query: Query<
        (
            Entity,
            &Transform,
            &CollisionBox,
            Option<&Hurting>,
            Option<&Invulnerable>,
            Option<&Dead>,
        ),
        With<Player>,
    >,
    enemy_query: Query<
        (Entity, &Transform, &CollisionBox),
        (With<Enemy>, Without<Dead>, Without<Inactive>),
    >,
    mut damage_events: EventWriter<DamageEvent>,
) {
    let Ok((player_entity, transform, collision_box, hurting, invulnerable, dead)) =
        player_query.get_single()
    else {
        return;
    };
    if hurting.is_some() || invulnerable.is_some() || dead.is_some() {
        return;
    }

    let player_rect = collision_box.rect(transform.translation.truncate());
    let contact = &config.combat.body_contact;

    for (enemy_entity, enemy_transform, enemy_box) in enemy_query.iter() {
        let enemy_rect = enemy_box.rect(enemy_transform.translation.truncate());
        if !overlaps(player_rect, enemy_rect) {
            continue;
        }
        damage_events.send(DamageEvent {
            target: player_entity,
            source: enemy_entity,
            amount: contact.damage,
            knockback: contact.knockback,
        });
    }
}

/// Beam saber hit-region vs. enemy collision boxes.
///
/// Only active while the player is slashing; the per-attack target set
/// guarantees one hit per enemy per swing regardless of how many frames
/// the overlap persists.
pub fn player_melee_hits(
    config: Res<GameConfig>,
    mut player_query: Query<
        (Entity, &Transform, &Facing, &mut HitTargets),
        (With<Player>, With<Slashing>, Without<Dead>),
    >,
    enemy_query: Query<
        (
            Entity,
            &Transform,
            &CollisionBox,
            Option<&Hurting>,
            Option<&Dead>,
        ),
        (With<Enemy>, Without<Inactive>),
    >,
    mut damage_events: EventWriter<DamageEvent>,
) {
    let Ok((player_entity, transform, facing, mut targets)) = player_query.get_single_mut()
    else {
        return;
    };

    let saber = &config.combat.beam_saber;
    let region = strike_region(transform.translation.truncate(), *facing, saber.region);

    for (enemy_entity, enemy_transform, enemy_box, hurting, dead) in enemy_query.iter() {
        if hurting.is_some() || dead.is_some() {
            continue;
        }
        let enemy_rect = enemy_box.rect(enemy_transform.translation.truncate());
        if !overlaps(region, enemy_rect) {
            continue;
        }
        if !targets.try_add(enemy_entity) {
            continue;
        }
        damage_events.send(DamageEvent {
            target: enemy_entity,
            source: player_entity,
            amount: saber.damage,
            knockback: saber.knockback,
        });
    }
}

/// Enemy gun hit-region vs. the player's collision box.
///
/// Active while the enemy AI is in its attacking state; deduplicated per
/// burst through the enemy's target set.
pub fn enemy_strikes(
    config: Res<GameConfig>,
    mut enemy_query: Query<
        (Entity, &Transform, &Facing, &AiState, &mut HitTargets),
        (With<Enemy>, Without<Dead>),
    >,
    player_query: Query<
        (
            Entity,
            &Transform,
            &CollisionBox,
            Option<&Hurting>,
            Option<&Invulnerable>,
            Option<&Dead>,
        ),
        With<Player>,
    >,
    mut damage_events: EventWriter<DamageEvent>,
) {
    let Ok((player_entity, player_transform, player_box, hurting, invulnerable, dead)) =
        player_query.get_single()
    else {
        return;
    };
    if hurting.is_some() || invulnerable.is_some() || dead.is_some() {
        return;
    }

    let gun = &config.combat.machine_gun;
    let player_rect = player_box.rect(player_transform.translation.truncate());

    for (enemy_entity, transform, facing, state, mut targets) in enemy_query.iter_mut() {
        if *state != AiState::Attacking {
            continue;
        }
        let region = strike_region(transform.translation.truncate(), *facing, gun.region);
        if !overlaps(region, player_rect) {
            continue;
        }
        if !targets.try_add(player_entity) {
            continue;
        }
        damage_events.send(DamageEvent {
            target: player_entity,
            source: enemy_entity,
            amount: gun.damage,
            knockback: gun.knockback,
        });
    }
}

/// Apply queued damage: knockback away from the attacker, then the health
/// decrement, then the hurt-stun and (player only) invulnerability window.
pub fn apply_damage(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut damage_events: EventReader<DamageEvent>,
    transforms: Query<&Transform>,
    mut defenders: Query<(
        &Transform,
        &mut Health,
        &mut Velocity,
        Option<&Hurting>,
        Option<&Invulnerable>,
        Option<&Dead>,
        Option<&Player>,
    )>,
    mut sounds: EventWriter<SoundEvent>,
) {
    // Multiple overlap systems may queue damage for the same defender in one
    // frame; the Hurting insert is deferred, so track it locally too.
    let mut hit_this_frame = HashSet::new();

    for event in damage_events.read() {
        if hit_this_frame.contains(&event.target) {
            continue;
        }
        let Ok((transform, mut health, mut velocity, hurting, invulnerable, dead, player)) =
            defenders.get_mut(event.target)
        else {
            continue;
        };
        if dead.is_some() || hurting.is_some() || invulnerable.is_some() {
            continue;
        }

        let attacker_x = transforms
            .get(event.source)
            .map(|t| t.translation.x)
            .unwrap_or(transform.translation.x);
        velocity.linvel.x =
            knockback_direction(transform.translation.x, attacker_x) * event.knockback;

        health.apply_damage(event.amount);
        hit_this_frame.insert(event.target);

        if player.is_some() {
            commands.entity(event.target).insert((
                Hurting::new(config.player.hurting_duration),
                Invulnerable::new(
                    config.player.invulnerable_time,
                    config.combat.blink_interval,
                ),
            ));
        } else {
            commands
                .entity(event.target)
                .insert(Hurting::new(config.enemy.hurting_duration));
            sounds.send(SoundEvent::MechaExplosion);
        }
    }
}

/// Expire hurt-stun timers.
pub fn tick_hurt_stun(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut Hurting)>,
) {
    for (entity, mut hurting) in query.iter_mut() {
        if hurting.0.tick(time.delta()).finished() {
            commands.entity(entity).remove::<Hurting>();
        }
    }
}

/// Tick the invulnerability window, blinking visibility until it expires.
pub fn tick_invulnerability(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut Invulnerable, &mut Visibility)>,
) {
    for (entity, mut invulnerable, mut visibility) in query.iter_mut() {
        invulnerable.blink.tick(time.delta());
        for _ in 0..invulnerable.blink.times_finished_this_tick() {
            *visibility = match *visibility {
                Visibility::Hidden => Visibility::Inherited,
                _ => Visibility::Hidden,
            };
        }
        if invulnerable.timer.tick(time.delta()).finished() {
            *visibility = Visibility::Inherited;
            commands.entity(entity).remove::<Invulnerable>();
        }
    }
}

/// Transition actors whose health reached zero into the dead state.
///
/// Sticky: the Dead marker is inserted exactly once, horizontal movement
/// stops, and the death animation starts. Deactivation (enemy) or game over
/// (player) happens when that animation completes.
pub fn check_deaths(
    mut commands: Commands,
    mut death_events: EventWriter<DeathEvent>,
    mut sounds: EventWriter<SoundEvent>,
    mut query: Query<
        (
            Entity,
            &Health,
            &mut Velocity,
            &mut ClipPlayer,
            Option<&Player>,
        ),
        Without<Dead>,
    >,
) {
    for (entity, health, mut velocity, mut clip_player, player) in query.iter_mut() {
        if !health.is_dead() {
            continue;
        }
        velocity.linvel.x = 0.0;
        clip_player.request(clips::DIE);
        commands.entity(entity).insert(Dead);
        if player.is_none() {
            sounds.send(SoundEvent::MechaExplosion);
        }
        death_events.send(DeathEvent { entity });
    }
}

/// React to death animations finishing.
///
/// Enemies are soft-deleted: hidden and physically inert but kept around so
/// the live-enemy count can observe them. The player's death raises game
/// over.
pub fn finish_death_animations(
    mut commands: Commands,
    mut finished: EventReader<AnimationFinished>,
    enemies: Query<(), With<Enemy>>,
    players: Query<(), With<Player>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for event in finished.read() {
        if event.clip != clips::DIE {
            continue;
        }
        if enemies.get(event.entity).is_ok() {
            commands.entity(event.entity).insert((
                Inactive,
                Visibility::Hidden,
                RigidBodyDisabled,
                ColliderDisabled,
            ));
        } else if players.get(event.entity).is_ok() {
            next_state.set(GameState::GameOver);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[derive(Resource, Default)]
    struct DeathCount(usize);

    fn count_deaths(mut events: EventReader<DeathEvent>, mut count: ResMut<DeathCount>) {
        count.0 += events.read().count();
    }

    fn test_app() -> App {
        let mut app = App::new();
        app.insert_resource(GameConfig::default())
            .init_resource::<Time>()
            .add_event::<DamageEvent>()
            .add_event::<DeathEvent>()
            .add_event::<SoundEvent>();
        app
    }

    fn advance(app: &mut App, seconds: f32) {
        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_secs_f32(seconds));
        app.update();
    }

    fn spawn_enemy(app: &mut App, x: f32, health: f32) -> Entity {
        app.world_mut()
            .spawn((
                Enemy,
                Health::new(health),
                Facing::Left,
                CollisionBox::new(44.0, 96.0),
                HitTargets::default(),
                Velocity::zero(),
                Transform::from_xyz(x, 0.0, 0.0),
                Visibility::default(),
            ))
            .id()
    }

    fn spawn_player(app: &mut App, x: f32) -> Entity {
        app.world_mut()
            .spawn((
                Player,
                Health::new(100.0),
                Facing::Right,
                CollisionBox::new(48.0, 96.0),
                HitTargets::default(),
                Velocity::zero(),
                Transform::from_xyz(x, 0.0, 0.0),
                Visibility::default(),
            ))
            .id()
    }

    #[test]
    fn one_slash_damages_each_enemy_at_most_once() {
        let mut app = test_app();
        app.add_systems(
            Update,
            (tick_hurt_stun, player_melee_hits, apply_damage).chain(),
        );

        let player = spawn_player(&mut app, 0.0);
        app.world_mut().entity_mut(player).insert(Slashing);
        let enemy = spawn_enemy(&mut app, 60.0, 80.0);

        // Five overlap frames within one slash, spaced far enough apart
        // that hurt-stun expires between them: only the target set blocks.
        for _ in 0..5 {
            advance(&mut app, 0.2);
        }

        let health = app.world().get::<Health>(enemy).unwrap();
        assert_eq!(health.current, 40.0);
    }

    #[test]
    fn new_slash_can_hit_the_same_enemy_again() {
        let mut app = test_app();
        app.add_systems(
            Update,
            (tick_hurt_stun, player_melee_hits, apply_damage).chain(),
        );

        let player = spawn_player(&mut app, 0.0);
        app.world_mut().entity_mut(player).insert(Slashing);
        let enemy = spawn_enemy(&mut app, 60.0, 200.0);

        advance(&mut app, 0.2);
        // Attack ends: the target set is cleared, a fresh swing begins.
        app.world_mut()
            .get_mut::<HitTargets>(player)
            .unwrap()
            .clear();
        advance(&mut app, 0.2);

        let health = app.world().get::<Health>(enemy).unwrap();
        assert_eq!(health.current, 120.0);
    }

    #[test]
    fn invulnerability_rejects_damage_until_the_window_elapses() {
        let mut app = test_app();
        app.add_systems(
            Update,
            (tick_hurt_stun, tick_invulnerability, apply_damage).chain(),
        );

        let player = spawn_player(&mut app, 100.0);
        let enemy = spawn_enemy(&mut app, 50.0, 80.0);

        app.world_mut().send_event(DamageEvent {
            target: player,
            source: enemy,
            amount: 25.0,
            knockback: 250.0,
        });
        advance(&mut app, 0.016);
        assert_eq!(app.world().get::<Health>(player).unwrap().current, 75.0);
        assert!(app.world().get::<Invulnerable>(player).is_some());

        // Inside the 2s window: rejected.
        app.world_mut().send_event(DamageEvent {
            target: player,
            source: enemy,
            amount: 25.0,
            knockback: 250.0,
        });
        advance(&mut app, 0.5);
        assert_eq!(app.world().get::<Health>(player).unwrap().current, 75.0);

        // Let the window expire, then damage applies again.
        advance(&mut app, 2.1);
        assert!(app.world().get::<Invulnerable>(player).is_none());
        app.world_mut().send_event(DamageEvent {
            target: player,
            source: enemy,
            amount: 25.0,
            knockback: 250.0,
        });
        advance(&mut app, 0.016);
        assert_eq!(app.world().get::<Health>(player).unwrap().current, 50.0);
    }

    #[test]
    fn knockback_pushes_defender_away_from_attacker() {
        let mut app = test_app();
        app.add_systems(Update, apply_damage);

        // Defender at x=100, attacker at x=50: push right at the melee force.
        let defender = spawn_enemy(&mut app, 100.0, 80.0);
        let attacker = spawn_player(&mut app, 50.0);

        app.world_mut().send_event(DamageEvent {
            target: defender,
            source: attacker,
            amount: 40.0,
            knockback: 300.0,
        });
        advance(&mut app, 0.016);

        let velocity = app.world().get::<Velocity>(defender).unwrap();
        assert_eq!(velocity.linvel.x, 300.0);
    }

    #[test]
    fn dead_actors_take_no_further_damage() {
        let mut app = test_app();
        app.add_systems(Update, apply_damage);

        let enemy = spawn_enemy(&mut app, 0.0, 30.0);
        let player = spawn_player(&mut app, 10.0);
        app.world_mut().entity_mut(enemy).insert(Dead);

        app.world_mut().send_event(DamageEvent {
            target: enemy,
            source: player,
            amount: 40.0,
            knockback: 300.0,
        });
        advance(&mut app, 0.016);

        assert_eq!(app.world().get::<Health>(enemy).unwrap().current, 30.0);
    }

    #[test]
    fn death_fires_exactly_once() {
        let mut app = test_app();
        app.init_resource::<DeathCount>()
            .add_systems(Update, (check_deaths, count_deaths).chain());

        let enemy = spawn_enemy(&mut app, 0.0, 80.0);
        app.world_mut()
            .entity_mut(enemy)
            .insert(ClipPlayer::new(clips::IDLE));
        app.world_mut().get_mut::<Health>(enemy).unwrap().current = 0.0;

        advance(&mut app, 0.016);
        advance(&mut app, 0.016);

        assert_eq!(app.world().resource::<DeathCount>().0, 1);
        assert!(app.world().get::<Dead>(enemy).is_some());
        let clip_player = app.world().get::<ClipPlayer>(enemy).unwrap();
        assert_eq!(clip_player.current(), clips::DIE);
    }

    #[test]
    fn strike_region_extends_in_the_facing_direction() {
        let region = strike_region(Vec2::ZERO, Facing::Right, (150.0, 120.0));
        assert_eq!(region.min.x, 0.0);
        assert_eq!(region.max.x, 150.0);

        let region = strike_region(Vec2::ZERO, Facing::Left, (150.0, 120.0));
        assert_eq!(region.min.x, -150.0);
        assert_eq!(region.max.x, 0.0);
    }

    #[test]
    fn knockback_direction_matches_relative_position() {
        assert_eq!(knockback_direction(100.0, 50.0), 1.0);
        assert_eq!(knockback_direction(50.0, 100.0), -1.0);
    }
}
