//! Clip playback and sprite synchronization systems.

use bevy::prelude::*;
use bevy::sprite::Anchor;

use super::components::*;
use crate::combat::Facing;

/// Advance every actor's current clip and emit completion events.
pub fn advance_clips(
    time: Res<Time>,
    mut query: Query<(Entity, &ClipLibrary, &mut ClipPlayer)>,
    mut finished: EventWriter<AnimationFinished>,
) {
    for (entity, library, mut clip_player) in query.iter_mut() {
        let Some(clip) = library.get(clip_player.current()) else {
            continue;
        };
        if clip_player.advance(clip, time.delta_secs()) {
            finished.send(AnimationFinished {
                entity,
                clip: clip_player.current().to_string(),
            });
        }
    }
}

/// Copy the current frame onto the actor's child sprite.
///
/// The anchor is recomputed from the clip's per-animation feet position,
/// mirrored for the facing direction, so the visible mech stays aligned
/// with its fixed collision box whichever frame is showing.
pub fn sync_sprites(
    actors: Query<(&ClipLibrary, &ClipPlayer, &Facing, &Children)>,
    mut sprites: Query<&mut Sprite, With<ActorSprite>>,
) {
    for (library, clip_player, facing, children) in actors.iter() {
        let Some(clip) = library.get(clip_player.current()) else {
            continue;
        };
        let Some(frame) = clip.frames.get(clip_player.frame()) else {
            continue;
        };
        let anchor_x = match facing {
            Facing::Right => clip.anchor_x,
            Facing::Left => 1.0 - clip.anchor_x,
        };
        for child in children.iter() {
            let Ok(mut sprite) = sprites.get_mut(*child) else {
                continue;
            };
            sprite.image = frame.image.clone();
            sprite.flip_x = *facing == Facing::Left;
            // Feet anchor: x from the clip, y at the bottom edge.
            sprite.anchor = Anchor::Custom(Vec2::new(anchor_x - 0.5, -0.5));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[derive(Resource, Default)]
    struct FinishedClips(Vec<String>);

    fn record_finished(
        mut events: EventReader<AnimationFinished>,
        mut record: ResMut<FinishedClips>,
    ) {
        for event in events.read() {
            record.0.push(event.clip.clone());
        }
    }

    fn frames(count: usize, duration: f32) -> Vec<AnimFrame> {
        (0..count)
            .map(|_| AnimFrame {
                image: Handle::default(),
                duration,
            })
            .collect()
    }

    fn test_app() -> App {
        let mut app = App::new();
        app.init_resource::<Time>()
            .init_resource::<FinishedClips>()
            .add_event::<AnimationFinished>()
            .add_systems(Update, (advance_clips, record_finished).chain());
        app
    }

    fn advance(app: &mut App, seconds: f32) {
        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_secs_f32(seconds));
        app.update();
    }

    #[test]
    fn one_shot_clip_finishes_exactly_once() {
        let mut app = test_app();
        let library =
            ClipLibrary::default().with(clips::SLASH, Clip::one_shot(frames(2, 0.05), 0.29));
        app.world_mut()
            .spawn((library, ClipPlayer::new(clips::SLASH)));

        for _ in 0..10 {
            advance(&mut app, 0.05);
        }

        let record = app.world().resource::<FinishedClips>();
        assert_eq!(record.0, vec![clips::SLASH.to_string()]);
    }

    #[test]
    fn looping_clip_never_finishes() {
        let mut app = test_app();
        let library =
            ClipLibrary::default().with(clips::IDLE, Clip::looping(frames(2, 0.8), 0.5));
        let entity = app
            .world_mut()
            .spawn((library, ClipPlayer::new(clips::IDLE)))
            .id();

        for _ in 0..10 {
            advance(&mut app, 0.8);
        }

        assert!(app.world().resource::<FinishedClips>().0.is_empty());
        // Still cycling frames
        let clip_player = app.world().get::<ClipPlayer>(entity).unwrap();
        assert!(!clip_player.is_finished());
    }

    #[test]
    fn requesting_the_playing_clip_does_not_restart_it() {
        let mut app = test_app();
        let library =
            ClipLibrary::default().with(clips::WALK, Clip::looping(frames(2, 0.3), 0.468));
        let entity = app
            .world_mut()
            .spawn((library, ClipPlayer::new(clips::WALK)))
            .id();

        advance(&mut app, 0.3);
        assert_eq!(app.world().get::<ClipPlayer>(entity).unwrap().frame(), 1);

        app.world_mut()
            .get_mut::<ClipPlayer>(entity)
            .unwrap()
            .request(clips::WALK);
        assert_eq!(app.world().get::<ClipPlayer>(entity).unwrap().frame(), 1);
    }

    #[test]
    fn switching_clips_restarts_playback() {
        let mut player = ClipPlayer::new(clips::IDLE);
        let walk = Clip::looping(frames(2, 0.3), 0.468);
        player.request(clips::WALK);
        player.advance(&walk, 0.35);
        assert_eq!(player.frame(), 1);
        player.request(clips::IDLE);
        assert_eq!(player.frame(), 0);
        assert!(!player.is_finished());
    }
}
