//! Saber Strike - Entry Point
//!
//! A 2D mecha side-scroller: clear every area of grunt machines.
//!
//! Controls:
//! - Arrow keys: Move and jump
//! - D: Beam saber slash
//! - Enter / R: Menu navigation

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use std::path::Path;
use std::process;

use saber_strike::core::GameConfig;

fn main() {
    // A missing or invalid tuning file is fatal: nothing sensible can run
    // without it.
    let config = match GameConfig::load(Path::new("assets/data/config.ron")) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    };

    App::new()
        // Bevy default plugins
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Saber Strike".to_string(),
                        resolution: (1280.0, 720.0).into(),
                        ..default()
                    }),
                    ..default()
                })
                .set(ImagePlugin::default_nearest()),
        )
        // Physics
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(100.0))
        // Tuning
        .insert_resource(config)
        // Our game plugin
        .add_plugins(saber_strike::SaberStrikePlugin)
        .run();
}
