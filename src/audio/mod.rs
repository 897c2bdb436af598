//! Audio module - sound effect playback.
//!
//! Gameplay systems stay audio-agnostic: they emit `SoundEvent`s and this
//! module maps each event to a loaded sample.

use bevy::prelude::*;
use bevy_kira_audio::{Audio, AudioControl, AudioPlugin, AudioSource};

use crate::core::SoundEvent;

const SFX_VOLUME: f64 = 0.3;

/// Handles to every sound effect, loaded once at startup.
#[derive(Resource)]
struct SoundLibrary {
    beam_saber: Handle<AudioSource>,
    machine_gun: Handle<AudioSource>,
    explosion: Handle<AudioSource>,
    thrusters: Handle<AudioSource>,
}

impl SoundLibrary {
    fn handle(&self, sound: SoundEvent) -> &Handle<AudioSource> {
        match sound {
            SoundEvent::BeamSaberSlash => &self.beam_saber,
            SoundEvent::MachineGunFire => &self.machine_gun,
            SoundEvent::MechaExplosion => &self.explosion,
            SoundEvent::ThrustersBoost => &self.thrusters,
        }
    }
}

/// Audio plugin - loads the sound library and plays requested effects.
pub struct GameAudioPlugin;

impl Plugin for GameAudioPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(AudioPlugin)
            .add_systems(Startup, load_sounds)
            .add_systems(Update, play_sounds);
    }
}

fn load_sounds(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.insert_resource(SoundLibrary {
        beam_saber: asset_server.load("audio/beam_saber.ogg"),
        machine_gun: asset_server.load("audio/machine_gun.ogg"),
        explosion: asset_server.load("audio/explosion.ogg"),
        thrusters: asset_server.load("audio/thrusters.ogg"),
    });
}

fn play_sounds(
    mut events: EventReader<SoundEvent>,
    library: Option<Res<SoundLibrary>>,
    audio: Res<Audio>,
) {
    let Some(library) = library else {
        return;
    };
    for event in events.read() {
        audio
            .play(library.handle(*event).clone())
            .with_volume(SFX_VOLUME);
    }
}
