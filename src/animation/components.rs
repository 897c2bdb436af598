//! Frame-list sprite animation components.
//!
//! Clips are explicit frame lists with per-frame durations, matching the
//! hand-authored sprite sheets. Non-looping clips report completion through
//! an event, which is the suspension point that ends slashes, gun bursts,
//! and death sequences.

use bevy::prelude::*;
use std::collections::HashMap;

/// Well-known clip names.
pub mod clips {
    pub const IDLE: &str = "idle";
    pub const WALK: &str = "walk";
    pub const JUMP_UP: &str = "jump_up";
    pub const JUMP_DOWN: &str = "jump_down";
    pub const SLASH: &str = "slash";
    pub const ATTACK: &str = "attack";
    pub const DIE: &str = "die";
}

/// One frame of a clip.
#[derive(Clone, Debug)]
pub struct AnimFrame {
    pub image: Handle<Image>,
    /// Display time in seconds
    pub duration: f32,
}

/// A named animation clip.
#[derive(Clone, Debug)]
pub struct Clip {
    pub frames: Vec<AnimFrame>,
    pub looping: bool,
    /// Horizontal anchor of the visual feet within the frame (0..1 from the
    /// left edge, for right-facing art; mirrored when facing left). Keeps
    /// the collision box glued to the sprite's feet across clips.
    pub anchor_x: f32,
}

impl Clip {
    pub fn looping(frames: Vec<AnimFrame>, anchor_x: f32) -> Self {
        Self {
            frames,
            looping: true,
            anchor_x,
        }
    }

    pub fn one_shot(frames: Vec<AnimFrame>, anchor_x: f32) -> Self {
        Self {
            frames,
            looping: false,
            anchor_x,
        }
    }
}

/// The set of clips an actor can play.
#[derive(Component, Default)]
pub struct ClipLibrary {
    clips: HashMap<String, Clip>,
}

impl ClipLibrary {
    pub fn with(mut self, key: &str, clip: Clip) -> Self {
        self.clips.insert(key.to_string(), clip);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Clip> {
        self.clips.get(key)
    }
}

/// Playback state for an actor's current clip.
#[derive(Component, Debug)]
pub struct ClipPlayer {
    current: String,
    frame: usize,
    elapsed: f32,
    finished: bool,
}

impl ClipPlayer {
    pub fn new(initial: &str) -> Self {
        Self {
            current: initial.to_string(),
            frame: 0,
            elapsed: 0.0,
            finished: false,
        }
    }

    /// Switch to a clip. Requesting the clip that is already playing is a
    /// no-op, so per-tick animation selection never restarts a clip.
    pub fn request(&mut self, key: &str) {
        if self.current != key {
            self.current = key.to_string();
            self.frame = 0;
            self.elapsed = 0.0;
            self.finished = false;
        }
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub(crate) fn advance(&mut self, clip: &Clip, delta: f32) -> bool {
        if self.finished || clip.frames.is_empty() {
            return false;
        }
        self.elapsed += delta;
        loop {
            let duration = clip.frames[self.frame].duration;
            if duration <= 0.0 || self.elapsed < duration {
                return false;
            }
            self.elapsed -= duration;
            if self.frame + 1 < clip.frames.len() {
                self.frame += 1;
            } else if clip.looping {
                self.frame = 0;
            } else {
                self.finished = true;
                return true;
            }
        }
    }
}

/// Sent once when a non-looping clip reaches the end of its last frame.
/// Looping clips never fire completion.
#[derive(Event, Debug)]
pub struct AnimationFinished {
    pub entity: Entity,
    pub clip: String,
}

/// Marker for the child entity carrying the actor's visible sprite.
#[derive(Component)]
pub struct ActorSprite;
