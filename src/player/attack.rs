//! Beam saber attack handling.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::{Player, Slashing};
use crate::animation::{clips, AnimationFinished, ClipPlayer};
use crate::combat::{Dead, HitTargets, Hurting};
use crate::core::SoundEvent;

/// Start a slash on a discrete key press ("just pressed", never "held").
///
/// Clears the target set for the new attack instance, stops horizontal
/// movement, and enters the slashing lockout until the animation completes.
pub fn player_attack(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut player_query: Query<
        (Entity, &mut HitTargets, &mut Velocity, &mut ClipPlayer),
        (With<Player>, Without<Dead>, Without<Hurting>, Without<Slashing>),
    >,
    mut sounds: EventWriter<SoundEvent>,
) {
    if !keyboard.just_pressed(KeyCode::KeyD) {
        return;
    }
    let Ok((entity, mut targets, mut velocity, mut clip_player)) = player_query.get_single_mut()
    else {
        return;
    };

    targets.clear();
    velocity.linvel.x = 0.0;
    clip_player.request(clips::SLASH);
    commands.entity(entity).insert(Slashing);
    sounds.send(SoundEvent::BeamSaberSlash);
}

/// Exit the slashing state when its animation completes, clearing the
/// target set a second time so nothing leaks into the next attack.
pub fn end_slash(
    mut commands: Commands,
    mut finished: EventReader<AnimationFinished>,
    mut player_query: Query<(&mut HitTargets, &mut ClipPlayer), (With<Player>, With<Slashing>)>,
) {
    for event in finished.read() {
        if event.clip != clips::SLASH {
            continue;
        }
        let Ok((mut targets, mut clip_player)) = player_query.get_mut(event.entity) else {
            continue;
        };
        targets.clear();
        clip_player.request(clips::IDLE);
        commands.entity(event.entity).remove::<Slashing>();
    }
}
