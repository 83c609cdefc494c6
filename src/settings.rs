//! Game settings and tuning
//!
//! Plain JSON, every field optional (missing fields take their defaults).

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_HEIGHT, DEFAULT_WIDTH, PADDLE_BOUNCE_STRENGTH, STARTING_LIVES};
use crate::sim::PaddleBounce;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Playfield ===
    pub width: f32,
    pub height: f32,
    /// Lives at the start of every run
    pub starting_lives: u32,

    // === Paddle ===
    /// Horizontal deflection factor on paddle hits
    pub paddle_bounce_strength: f32,
    /// Limit the deflection to the paddle edges
    pub clamp_paddle_bounce: bool,

    // === Visual Effects ===
    /// Screen shake on solid brick hits
    pub screen_shake: bool,
    /// Ball particle trail
    pub particles: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,

    // === Accessibility ===
    /// Reduced motion (no shake)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            starting_lives: STARTING_LIVES,

            paddle_bounce_strength: PADDLE_BOUNCE_STRENGTH,
            clamp_paddle_bounce: false,

            screen_shake: true,
            particles: true,

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Parse settings from JSON
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let settings: Settings = serde_json::from_str(json).context("parsing settings JSON")?;
        Ok(settings.sanitized())
    }

    /// Load settings from a JSON file
    pub fn load_from_path(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings file {}", path.display()))?;
        let settings = Self::from_json(&json)
            .with_context(|| format!("loading settings from {}", path.display()))?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self).context("serializing settings")
    }

    /// Clamp out-of-range values instead of rejecting the file
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.width > 0.0) {
            log::warn!("Invalid width {}, using {}", self.width, defaults.width);
            self.width = defaults.width;
        }
        if !(self.height > 0.0) {
            log::warn!("Invalid height {}, using {}", self.height, defaults.height);
            self.height = defaults.height;
        }
        if self.starting_lives == 0 {
            log::warn!("starting_lives must be positive, using {}", defaults.starting_lives);
            self.starting_lives = defaults.starting_lives;
        }
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self.music_volume = self.music_volume.clamp(0.0, 1.0);
        self
    }

    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Paddle deflection parameters for the collision pass
    pub fn paddle_bounce(&self) -> PaddleBounce {
        PaddleBounce {
            strength: self.paddle_bounce_strength,
            clamp_percentage: self.clamp_paddle_bounce,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "starting_lives": 5, "clamp_paddle_bounce": true }"#)
            .unwrap();
        assert_eq!(settings.starting_lives, 5);
        assert!(settings.clamp_paddle_bounce);
        assert_eq!(settings.width, DEFAULT_WIDTH);
        assert_eq!(settings.paddle_bounce().strength, PADDLE_BOUNCE_STRENGTH);
    }

    #[test]
    fn test_invalid_values_are_sanitized() {
        let settings =
            Settings::from_json(r#"{ "width": -3, "starting_lives": 0, "sfx_volume": 4.0 }"#)
                .unwrap();
        assert_eq!(settings.width, DEFAULT_WIDTH);
        assert_eq!(settings.starting_lives, STARTING_LIVES);
        assert_eq!(settings.sfx_volume, 1.0);
    }

    #[test]
    fn test_json_roundtrip_and_errors() {
        let settings = Settings {
            muted: true,
            ..Default::default()
        };
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
        assert!(Settings::from_json("{ not json").is_err());
    }

    #[test]
    fn test_reduced_motion_disables_shake() {
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        assert!(!settings.effective_screen_shake());
    }
}
