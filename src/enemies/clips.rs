//! Animation clip set for the grunt mech.

use bevy::prelude::*;

use crate::animation::{clips, AnimFrame, Clip, ClipLibrary};

/// Build the grunt's clip library, loading its frame images.
pub fn grunt_clip_library(asset_server: &AssetServer) -> ClipLibrary {
    let frame = |name: &str, duration: f32| AnimFrame {
        image: asset_server.load(format!("sprites/{name}.png")),
        duration,
    };

    ClipLibrary::default()
        .with(
            clips::IDLE,
            Clip::looping(
                vec![frame("grunt_idle_1", 0.8), frame("grunt_idle_2", 0.8)],
                0.5,
            ),
        )
        .with(
            clips::WALK,
            Clip::looping(
                vec![frame("grunt_walk_1", 0.3), frame("grunt_walk_2", 0.3)],
                0.49,
            ),
        )
        .with(
            clips::ATTACK,
            Clip::one_shot(
                vec![frame("grunt_attack_1", 0.05), frame("grunt_attack_2", 0.1)],
                0.21,
            ),
        )
        .with(
            clips::DIE,
            Clip::one_shot(
                vec![frame("grunt_die_1", 0.8), frame("grunt_die_2", 0.8)],
                0.319,
            ),
        )
}
