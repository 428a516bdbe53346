//! Controller settings with persistence
//!
//! Settings are saved to `~/.config/firstlook/settings.toml`

use std::fs;
use std::path::{Path, PathBuf};

use firstlook_game::{InputSettings, LookConfig, StanceConfig};
use firstlook_physics::CharacterBodyConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// All controller settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub look: LookConfig,
    pub stance: StanceConfig,
    pub input: InputSettings,
    pub character: CharacterSettings,
}

impl Settings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("firstlook"))
    }

    /// Get the settings file path
    fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.toml"))
    }

    /// Load settings from the config directory, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            warn!("Could not determine config directory");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load settings from a file, or return defaults if missing or invalid
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            info!("No settings file at {:?}, using defaults", path);
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match Self::parse(&content) {
                Ok(settings) => {
                    info!("Loaded settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    warn!("Failed to parse settings: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read settings file: {}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Parse settings from TOML text; missing fields take their defaults
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Save settings to the config directory
    pub fn save(&self) -> anyhow::Result<()> {
        let Some(dir) = Self::config_dir() else {
            anyhow::bail!("Could not determine config directory");
        };

        let path = dir.join("settings.toml");

        // Create config directory if it doesn't exist
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        info!("Saved settings to {:?}", path);
        Ok(())
    }
}

/// Character capsule settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterSettings {
    /// Standing capsule height
    pub height: f32,
    /// Capsule radius
    pub radius: f32,
}

impl Default for CharacterSettings {
    fn default() -> Self {
        let body = CharacterBodyConfig::default();
        Self {
            height: body.height,
            radius: body.radius,
        }
    }
}

impl CharacterSettings {
    /// Physics body configuration for these settings
    pub fn body_config(&self) -> CharacterBodyConfig {
        CharacterBodyConfig {
            height: self.height,
            radius: self.radius,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let settings = Settings::parse("").unwrap();
        assert_eq!(settings.look.interpolation_speed, 25.0);
        assert_eq!(settings.stance.stand_height, 1.6);
        assert!(!settings.input.invert_y);
        assert_eq!(settings.character.height, 1.8);
    }

    #[test]
    fn test_partial_sections() {
        let settings = Settings::parse(
            r#"
            [look]
            smooth = true
            sensitivity = [0.5, 0.25]

            [look.pitch_range]
            min = -80.0
            max = 75.0

            [stance]
            crouch_height = 0.8
            "#,
        )
        .unwrap();
        assert!(settings.look.smooth);
        assert_eq!(settings.look.sensitivity.x, 0.5);
        assert_eq!(settings.look.sensitivity.y, 0.25);
        assert_eq!(settings.look.pitch_range.min, -80.0);
        assert_eq!(settings.look.pitch_range.max, 75.0);
        assert_eq!(settings.stance.crouch_height, 0.8);
        assert_eq!(settings.stance.transition_speed, 10.0);
    }

    #[test]
    fn test_round_trip_through_toml() {
        let mut settings = Settings::default();
        settings.look.smooth = true;
        settings.input.invert_y = true;
        let text = toml::to_string_pretty(&settings).unwrap();
        let back = Settings::parse(&text).unwrap();
        assert!(back.look.smooth);
        assert!(back.input.invert_y);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let settings = Settings::load_from(Path::new("/nonexistent/firstlook/settings.toml"));
        assert_eq!(settings.stance.crouch_collider_height, 1.0);
    }

    #[test]
    fn test_body_config_from_settings() {
        let character = CharacterSettings {
            height: 2.0,
            radius: 0.3,
        };
        let body = character.body_config();
        assert_eq!(body.height, 2.0);
        assert_eq!(body.radius, 0.3);
    }
}
