//! UI plugin - menus, HUD, and interface screens.

use bevy::prelude::*;

use super::hud;
use crate::core::GameState;
use crate::world::CurrentLevel;

/// UI plugin - handles all user interface.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        // Setup HUD systems
        hud::setup_hud_systems(app);

        app
            // Title screen
            .add_systems(OnEnter(GameState::TitleScreen), setup_title_screen)
            .add_systems(
                Update,
                title_screen_input.run_if(in_state(GameState::TitleScreen)),
            )
            .add_systems(OnExit(GameState::TitleScreen), cleanup_screen)
            // Game over
            .add_systems(OnEnter(GameState::GameOver), setup_game_over)
            .add_systems(
                Update,
                game_over_input.run_if(in_state(GameState::GameOver)),
            )
            .add_systems(OnExit(GameState::GameOver), cleanup_screen)
            // Level victory
            .add_systems(OnEnter(GameState::Victory), setup_victory)
            .add_systems(Update, victory_input.run_if(in_state(GameState::Victory)))
            .add_systems(OnExit(GameState::Victory), cleanup_screen)
            // Game complete
            .add_systems(OnEnter(GameState::GameComplete), setup_game_complete)
            .add_systems(
                Update,
                game_complete_input.run_if(in_state(GameState::GameComplete)),
            )
            .add_systems(OnExit(GameState::GameComplete), cleanup_screen);
    }
}

/// Marker for full-screen menu UI entities.
#[derive(Component)]
struct ScreenUi;

/// Marker for the menu camera (used when no game camera exists).
#[derive(Component)]
struct MenuCamera;

/// Spawn a full-screen text panel with a title, prompt line, and backdrop.
fn spawn_screen(
    commands: &mut Commands,
    title: &str,
    title_color: Color,
    prompt: &str,
    backdrop: Color,
) {
    commands.spawn((Camera2d, MenuCamera));

    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(backdrop),
            ScreenUi,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(title),
                TextFont {
                    font_size: 72.0,
                    ..default()
                },
                TextColor(title_color),
                Node {
                    margin: UiRect::bottom(Val::Px(50.0)),
                    ..default()
                },
            ));
            parent.spawn((
                Text::new(prompt),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::srgb(0.7, 0.7, 0.75)),
            ));
        });
}

fn setup_title_screen(mut commands: Commands) {
    spawn_screen(
        &mut commands,
        "SABER STRIKE",
        Color::srgb(0.85, 0.85, 0.9),
        "Press Enter to launch",
        Color::srgb(0.05, 0.05, 0.08),
    );
}

/// Enter starts a fresh campaign from the first level.
fn title_screen_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut current: ResMut<CurrentLevel>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if keyboard.just_pressed(KeyCode::Enter) {
        current.0 = 0;
        next_state.set(GameState::InGame);
    }
}

fn setup_game_over(mut commands: Commands) {
    spawn_screen(
        &mut commands,
        "UNIT DESTROYED",
        Color::srgb(0.8, 0.2, 0.2),
        "Press R to retry",
        Color::srgba(0.1, 0.0, 0.0, 0.9),
    );
}

/// R restarts the same level; Escape returns to the title screen.
fn game_over_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if keyboard.just_pressed(KeyCode::KeyR) {
        next_state.set(GameState::InGame);
    } else if keyboard.just_pressed(KeyCode::Escape) {
        next_state.set(GameState::TitleScreen);
    }
}

fn setup_victory(mut commands: Commands) {
    spawn_screen(
        &mut commands,
        "AREA SECURED",
        Color::srgb(0.3, 0.8, 0.4),
        "Press Enter for the next area",
        Color::srgba(0.0, 0.05, 0.0, 0.9),
    );
}

/// Enter advances to the next level.
fn victory_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut current: ResMut<CurrentLevel>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if keyboard.just_pressed(KeyCode::Enter) {
        current.advance();
        next_state.set(GameState::InGame);
    }
}

fn setup_game_complete(mut commands: Commands) {
    spawn_screen(
        &mut commands,
        "MISSION COMPLETE",
        Color::srgb(0.9, 0.8, 0.3),
        "Press Enter to return to title",
        Color::srgb(0.05, 0.05, 0.08),
    );
}

fn game_complete_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if keyboard.just_pressed(KeyCode::Enter) {
        next_state.set(GameState::TitleScreen);
    }
}

/// Clean up screen entities on any state exit.
fn cleanup_screen(
    mut commands: Commands,
    ui_query: Query<Entity, With<ScreenUi>>,
    camera_query: Query<Entity, With<MenuCamera>>,
) {
    for entity in ui_query.iter() {
        commands.entity(entity).despawn_recursive();
    }
    for entity in camera_query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
