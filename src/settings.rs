//! Presentation preferences
//!
//! Kept apart from `Tuning`: nothing here changes the simulation, only what the
//! renderer is asked to show.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::tuning::ConfigError;

/// Presentation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Visual Effects ===
    /// Screen shake on solid brick hits
    pub screen_shake: bool,
    /// Particle trail behind the ball
    pub particles: bool,

    // === HUD ===
    /// Show lives and menu prompts
    pub show_hud: bool,

    // === Accessibility ===
    /// Reduced motion (no shake, no chaos/confuse distortion)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_shake: true,
            particles: true,
            show_hud: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Effective confuse/chaos distortion (respects reduced_motion)
    pub fn effective_distortion(&self) -> bool {
        !self.reduced_motion
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Save settings to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduced_motion_disables_shake() {
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        assert!(!settings.effective_screen_shake());
        assert!(!settings.effective_distortion());
        assert!(Settings::default().effective_screen_shake());
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("breakout_settings_{}.json", std::process::id()));
        let settings = Settings {
            particles: false,
            ..Default::default()
        };
        settings.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, settings);
    }
}
