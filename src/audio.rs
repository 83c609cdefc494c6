//! Audio cues
//!
//! The simulation only reports events. This module turns them into named
//! cues and hands them to a playback backend; mixing and decoding live
//! behind the `AudioCue` trait.

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Background loop
    Music,
    /// Ball destroys a brick
    SoftHit,
    /// Ball bounces off a solid brick
    HardHit,
    /// Ball hits paddle
    PaddleHit,
    /// Power-up collected
    PowerUpCollected,
}

impl SoundEffect {
    /// Asset file backing the cue
    pub fn asset(self) -> &'static str {
        match self {
            SoundEffect::Music => "audio/breakout.mp3",
            SoundEffect::SoftHit => "audio/bleep.mp3",
            SoundEffect::HardHit => "audio/solid.wav",
            SoundEffect::PaddleHit => "audio/bleep.wav",
            SoundEffect::PowerUpCollected => "audio/powerup.wav",
        }
    }

    pub fn is_music(self) -> bool {
        self == SoundEffect::Music
    }

    /// Cue for a simulation event, if it makes a sound
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::BrickDestroyed { .. } => Some(SoundEffect::SoftHit),
            GameEvent::SolidBrickHit { .. } => Some(SoundEffect::HardHit),
            GameEvent::PaddleHit => Some(SoundEffect::PaddleHit),
            GameEvent::PowerUpActivated { .. } => Some(SoundEffect::PowerUpCollected),
            _ => None,
        }
    }
}

/// Playback backend. Fire-and-forget: completion is never reported back.
pub trait AudioCue {
    fn play(&mut self, effect: SoundEffect, looping: bool, volume: f32);
}

/// Backend that only logs cues (headless runs)
#[derive(Debug, Default)]
pub struct LogAudio;

impl AudioCue for LogAudio {
    fn play(&mut self, effect: SoundEffect, looping: bool, volume: f32) {
        log::trace!(
            "play {} (loop={}, volume={:.2})",
            effect.asset(),
            looping,
            volume
        );
    }
}

/// Audio manager for the game
pub struct AudioManager<B: AudioCue> {
    backend: B,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl<B: AudioCue> AudioManager<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        }
    }

    /// Manager configured from settings
    pub fn from_settings(backend: B, settings: &Settings) -> Self {
        let mut manager = Self::new(backend);
        manager.set_master_volume(settings.master_volume);
        manager.set_sfx_volume(settings.sfx_volume);
        manager.set_music_volume(settings.music_volume);
        manager.set_muted(settings.muted);
        manager
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    fn effective_volume(&self, effect: SoundEffect) -> f32 {
        if self.muted {
            return 0.0;
        }
        let channel = if effect.is_music() {
            self.music_volume
        } else {
            self.sfx_volume
        };
        self.master_volume * channel
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume(effect);
        if vol <= 0.0 {
            return;
        }
        self.backend.play(effect, effect.is_music(), vol);
    }

    /// Play the cue for every event that has one
    pub fn play_events(&mut self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}
