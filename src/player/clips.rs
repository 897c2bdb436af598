//! Player mech animation clips.

use bevy::prelude::*;

use crate::animation::{clips, AnimFrame, Clip, ClipLibrary};

fn frame(asset_server: &AssetServer, name: &str, duration: f32) -> AnimFrame {
    AnimFrame {
        image: asset_server.load(format!("sprites/{name}.png")),
        duration,
    }
}

/// Build the player mech's clip set.
///
/// Anchor values keep the feet of each hand-drawn frame on the collision
/// box; the slash frames extend far to the right, hence the offset anchor.
pub fn mech_clip_library(asset_server: &AssetServer) -> ClipLibrary {
    ClipLibrary::default()
        .with(
            clips::IDLE,
            Clip::looping(
                vec![
                    frame(asset_server, "mech_idle_1", 0.8),
                    frame(asset_server, "mech_idle_2", 0.8),
                ],
                0.5,
            ),
        )
        .with(
            clips::WALK,
            Clip::looping(
                vec![
                    frame(asset_server, "mech_walk_1", 0.3),
                    frame(asset_server, "mech_walk_2", 0.3),
                ],
                0.468,
            ),
        )
        .with(
            clips::JUMP_UP,
            Clip::one_shot(vec![frame(asset_server, "mech_jump_1", 0.3)], 0.482),
        )
        .with(
            clips::JUMP_DOWN,
            Clip::one_shot(vec![frame(asset_server, "mech_jump_2", 0.3)], 0.482),
        )
        .with(
            clips::SLASH,
            Clip::one_shot(
                vec![
                    frame(asset_server, "mech_slash_1", 0.05),
                    frame(asset_server, "mech_slash_2", 0.1),
                ],
                0.29,
            ),
        )
        .with(
            clips::DIE,
            Clip::one_shot(
                vec![
                    frame(asset_server, "mech_die_1", 0.8),
                    frame(asset_server, "mech_die_2", 0.8),
                ],
                0.594,
            ),
        )
}
