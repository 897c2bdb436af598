//! Level construction, camera follow, and level-clear detection.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::data::{CurrentLevel, LevelRegistry};
use crate::core::{GameConfig, GameState, LevelCleared};
use crate::enemies::{spawn_enemy, Enemy, Inactive};
use crate::player::{spawn_player, Player};

/// Marker for everything spawned for the current level, so a restart can
/// despawn it wholesale.
#[derive(Component)]
pub struct LevelEntity;

/// World-space extents of the current level's map.
#[derive(Resource, Debug)]
pub struct MapBounds {
    pub width: f32,
    pub height: f32,
}

/// Level-clear bookkeeping. `cleared` latches so the clear event fires
/// exactly once per level.
#[derive(Resource, Debug, Default)]
pub struct LevelProgress {
    pub cleared: bool,
    pub total_enemies: usize,
}

const PLATFORM_COLOR: Color = Color::srgb(0.35, 0.3, 0.4);
const CAMERA_LERP: f32 = 0.1;

/// Build the current level: static geometry, boundary walls, the player,
/// and every enemy, plus the following camera.
pub fn setup_level(
    mut commands: Commands,
    config: Res<GameConfig>,
    asset_server: Res<AssetServer>,
    registry: Res<LevelRegistry>,
    current: Res<CurrentLevel>,
    existing: Query<Entity, With<LevelEntity>>,
) {
    for entity in &existing {
        commands.entity(entity).despawn_recursive();
    }

    let Some(level) = registry.get(current.0) else {
        error!("No level at index {}", current.0);
        return;
    };
    info!("Building level '{}'", level.name);

    commands.insert_resource(MapBounds {
        width: level.map_width,
        height: level.map_height,
    });
    commands.insert_resource(LevelProgress {
        cleared: false,
        total_enemies: level.enemy_spawns.len(),
    });

    for platform in &level.platforms {
        commands.spawn((
            LevelEntity,
            Sprite {
                color: PLATFORM_COLOR,
                custom_size: Some(Vec2::new(platform.width, platform.height)),
                ..default()
            },
            Transform::from_xyz(platform.x, platform.y, 0.0),
            RigidBody::Fixed,
            Collider::cuboid(platform.width / 2.0, platform.height / 2.0),
        ));
    }

    // Boundary walls on the sides and top. The bottom stays open so falling
    // off a platform edge is fatal.
    let walls = [
        (
            Vec2::new(-10.0, level.map_height / 2.0),
            Vec2::new(10.0, level.map_height),
        ),
        (
            Vec2::new(level.map_width + 10.0, level.map_height / 2.0),
            Vec2::new(10.0, level.map_height),
        ),
        (
            Vec2::new(level.map_width / 2.0, level.map_height + 10.0),
            Vec2::new(level.map_width, 10.0),
        ),
    ];
    for (position, size) in walls {
        commands.spawn((
            LevelEntity,
            Transform::from_xyz(position.x, position.y, 0.0),
            RigidBody::Fixed,
            Collider::cuboid(size.x / 2.0, size.y / 2.0),
        ));
    }

    let player_spawn = Vec2::new(level.player_spawn.0, level.player_spawn.1);
    spawn_player(&mut commands, &config, &asset_server, player_spawn);
    for &(x, y) in &level.enemy_spawns {
        spawn_enemy(&mut commands, &config, &asset_server, Vec2::new(x, y));
    }

    commands.spawn((
        LevelEntity,
        Camera2d,
        Transform::from_xyz(player_spawn.x, level.map_height / 2.0, 999.0),
    ));
}

/// Smoothly track the player, clamped to the map bounds.
pub fn camera_follow(
    bounds: Option<Res<MapBounds>>,
    windows: Query<&Window>,
    player_query: Query<&Transform, (With<Player>, Without<Camera2d>)>,
    mut camera_query: Query<&mut Transform, With<Camera2d>>,
) {
    let (Some(bounds), Ok(window)) = (bounds, windows.get_single()) else {
        return;
    };
    let (Ok(player_transform), Ok(mut camera_transform)) =
        (player_query.get_single(), camera_query.get_single_mut())
    else {
        return;
    };

    let half_view = Vec2::new(window.width(), window.height()) / 2.0;
    let target = Vec2::new(
        player_transform
            .translation
            .x
            .clamp(half_view.x, (bounds.width - half_view.x).max(half_view.x)),
        player_transform
            .translation
            .y
            .clamp(half_view.y, (bounds.height - half_view.y).max(half_view.y)),
    );

    let current = camera_transform.translation.truncate();
    let next = current.lerp(target, CAMERA_LERP);
    camera_transform.translation.x = next.x;
    camera_transform.translation.y = next.y;
}

/// Fire `LevelCleared` once when every enemy of the level has been killed.
pub fn check_level_cleared(
    mut progress: ResMut<LevelProgress>,
    enemies: Query<(), (With<Enemy>, Without<Inactive>)>,
    mut cleared: EventWriter<LevelCleared>,
) {
    if progress.cleared || progress.total_enemies == 0 {
        return;
    }
    if enemies.is_empty() {
        progress.cleared = true;
        cleared.send(LevelCleared);
    }
}

/// React to the clear: the last level completes the game, any other level
/// goes to its victory screen.
pub fn handle_level_cleared(
    mut cleared: EventReader<LevelCleared>,
    registry: Res<LevelRegistry>,
    current: Res<CurrentLevel>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if cleared.read().next().is_none() {
        return;
    }
    if current.is_last(&registry) {
        next_state.set(GameState::GameComplete);
    } else {
        next_state.set(GameState::Victory);
    }
}

/// Tear the level down when returning to the title screen.
pub fn cleanup_level(mut commands: Commands, existing: Query<Entity, With<LevelEntity>>) {
    for entity in &existing {
        commands.entity(entity).despawn_recursive();
    }
    commands.remove_resource::<MapBounds>();
    commands.remove_resource::<LevelProgress>();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Resource, Default)]
    struct ClearCount(usize);

    fn count_clears(mut events: EventReader<LevelCleared>, mut count: ResMut<ClearCount>) {
        count.0 += events.read().count();
    }

    #[test]
    fn level_clear_fires_exactly_once() {
        let mut app = App::new();
        app.add_event::<LevelCleared>()
            .insert_resource(LevelProgress {
                cleared: false,
                total_enemies: 3,
            })
            .init_resource::<ClearCount>()
            .add_systems(Update, (check_level_cleared, count_clears).chain());

        let enemies: Vec<Entity> = (0..3)
            .map(|_| app.world_mut().spawn(Enemy).id())
            .collect();

        // Two enemies down: not cleared.
        for &enemy in &enemies[..2] {
            app.world_mut().entity_mut(enemy).insert(Inactive);
        }
        app.update();
        assert_eq!(app.world().resource::<ClearCount>().0, 0);

        // Last one down: cleared, once, and stays latched across frames.
        app.world_mut().entity_mut(enemies[2]).insert(Inactive);
        app.update();
        app.update();
        app.update();
        assert_eq!(app.world().resource::<ClearCount>().0, 1);
        assert!(app.world().resource::<LevelProgress>().cleared);
    }

    #[test]
    fn empty_level_never_reports_clear() {
        let mut app = App::new();
        app.add_event::<LevelCleared>()
            .insert_resource(LevelProgress::default())
            .init_resource::<ClearCount>()
            .add_systems(Update, (check_level_cleared, count_clears).chain());

        app.update();
        assert_eq!(app.world().resource::<ClearCount>().0, 0);
    }
}
