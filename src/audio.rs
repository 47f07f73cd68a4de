//! Audio playback
//!
//! Sounds are fire-and-forget: the mixer owns playback timing and the game
//! never waits on it.

use macroquad::audio::{PlaySoundParams, play_sound, stop_sound};

use crate::assets::SoundBank;
use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player fired a laser
    Laser,
    /// A meteor was destroyed
    Explosion,
}

impl SoundEffect {
    /// The sound a simulation event should make, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::LaserFired => Some(SoundEffect::Laser),
            GameEvent::Explosion { .. } => Some(SoundEffect::Explosion),
            GameEvent::RoundStarted
            | GameEvent::MeteorSpawned { .. }
            | GameEvent::PlayerHit { .. } => None,
        }
    }
}

/// Audio manager for the game
pub struct AudioManager {
    sounds: SoundBank,
    sfx_volume: f32,
    music_volume: f32,
    music_playing: bool,
}

impl AudioManager {
    pub fn new(sounds: SoundBank, settings: &Settings) -> Self {
        Self {
            sounds,
            sfx_volume: settings.effective_sfx_volume(),
            music_volume: settings.effective_music_volume(),
            music_playing: false,
        }
    }

    /// Start the background track, looping forever
    pub fn start_music(&mut self) {
        if self.music_playing || self.music_volume <= 0.0 {
            return;
        }
        play_sound(
            &self.sounds.music,
            PlaySoundParams {
                looped: true,
                volume: self.music_volume,
            },
        );
        self.music_playing = true;
        log::debug!("Music started at volume {:.2}", self.music_volume);
    }

    pub fn stop_music(&mut self) {
        if self.music_playing {
            stop_sound(&self.sounds.music);
            self.music_playing = false;
        }
    }

    /// Play a sound effect once
    pub fn play(&self, effect: SoundEffect) {
        if self.sfx_volume <= 0.0 {
            return;
        }
        let sound = match effect {
            SoundEffect::Laser => &self.sounds.laser,
            SoundEffect::Explosion => &self.sounds.explosion,
        };
        play_sound(
            sound,
            PlaySoundParams {
                looped: false,
                volume: self.sfx_volume,
            },
        );
    }

    /// React to a simulation event
    pub fn handle_event(&self, event: &GameEvent) {
        if let Some(effect) = SoundEffect::for_event(event) {
            self.play(effect);
        }
    }
}
