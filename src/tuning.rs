//! Data-driven game balance
//!
//! Values that shape gameplay feel. Loaded from JSON so balance can be changed
//! without a rebuild; any missing field falls back to its default.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::PowerUpKind;

/// Errors raised while loading configuration files
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// File contents are not valid JSON for the target type
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Gameplay balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Lives at the start of a run
    pub lives: u32,
    /// How long the screen shakes after a solid brick hit (seconds)
    pub shake_duration: f32,
    /// Horizontal deflection strength of the paddle bounce
    pub paddle_bounce_strength: f32,
    /// Ball velocity multiplier applied by the speed power-up
    pub speed_multiplier: f32,
    /// Paddle width added by the pad-size-increase power-up
    pub pad_size_increase: f32,

    /// 1-in-N spawn chance for speed, sticky, pass-through and pad-size-increase
    pub positive_chance: u32,
    /// 1-in-N spawn chance for confuse and chaos
    pub negative_chance: u32,

    /// Effect durations (seconds, 0 = permanent)
    pub sticky_duration: f32,
    pub pass_through_duration: f32,
    pub confuse_duration: f32,
    pub chaos_duration: f32,

    /// Size of the particle pool trailing the ball
    pub particle_count: usize,
    /// Particles respawned per frame
    pub particles_per_frame: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            lives: 3,
            shake_duration: 0.05,
            paddle_bounce_strength: 2.0,
            speed_multiplier: 1.2,
            pad_size_increase: 50.0,

            positive_chance: 75,
            negative_chance: 15,

            sticky_duration: 20.0,
            pass_through_duration: 10.0,
            confuse_duration: 15.0,
            chaos_duration: 15.0,

            particle_count: 500,
            particles_per_frame: 2,
        }
    }
}

impl Tuning {
    /// Parse tuning from a JSON document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load tuning from a file, falling back to defaults if it is missing or invalid
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No tuning file at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring tuning file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// 1-in-N spawn chance for a power-up kind
    pub fn spawn_chance(&self, kind: PowerUpKind) -> u32 {
        if kind.is_negative() {
            self.negative_chance
        } else {
            self.positive_chance
        }
    }

    /// Effect duration for a power-up kind (0 = permanent, never rolled back)
    pub fn duration(&self, kind: PowerUpKind) -> f32 {
        match kind {
            PowerUpKind::Speed | PowerUpKind::PadSizeIncrease => 0.0,
            PowerUpKind::Sticky => self.sticky_duration,
            PowerUpKind::PassThrough => self.pass_through_duration,
            PowerUpKind::Confuse => self.confuse_duration,
            PowerUpKind::Chaos => self.chaos_duration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "lives": 5, "negative_chance": 30 }"#).unwrap();
        assert_eq!(tuning.lives, 5);
        assert_eq!(tuning.negative_chance, 30);
        assert_eq!(tuning.positive_chance, 75);
        assert!((tuning.shake_duration - 0.05).abs() < f32::EPSILON);
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let err = Tuning::from_json("{ lives: }").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let tuning = Tuning::load_or_default("definitely/not/here.json");
        assert_eq!(tuning, Tuning::default());
    }

    #[test]
    fn test_spawn_chances_and_durations() {
        let tuning = Tuning::default();
        assert_eq!(tuning.spawn_chance(PowerUpKind::Speed), 75);
        assert_eq!(tuning.spawn_chance(PowerUpKind::Chaos), 15);
        assert_eq!(tuning.duration(PowerUpKind::Speed), 0.0);
        assert_eq!(tuning.duration(PowerUpKind::PadSizeIncrease), 0.0);
        assert_eq!(tuning.duration(PowerUpKind::Sticky), 20.0);
        assert_eq!(tuning.duration(PowerUpKind::PassThrough), 10.0);
    }
}
