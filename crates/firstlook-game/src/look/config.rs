//! Look configuration

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, ensure_positive, ConfigError};

/// Camera pitch limits in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PitchRange {
    pub min: f32,
    pub max: f32,
}

impl Default for PitchRange {
    fn default() -> Self {
        Self {
            min: -60.0,
            max: 60.0,
        }
    }
}

/// How rotation is applied each frame, fixed at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookMode {
    /// Apply this frame's deltas directly and clamp pitch
    Instant,
    /// Slerp toward the accumulated rotations; pitch is not clamped
    Smoothed,
}

/// Look configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LookConfig {
    /// Degrees of rotation per unit of look input (x = yaw, y = pitch)
    pub sensitivity: Vec2,
    /// Interpolate toward the accumulated rotation instead of applying it directly
    pub smooth: bool,
    /// Slerp rate per second in smoothed mode
    pub interpolation_speed: f32,
    /// Camera pitch limits, applied in instant mode
    pub pitch_range: PitchRange,
}

impl Default for LookConfig {
    fn default() -> Self {
        Self {
            sensitivity: Vec2::ONE,
            smooth: false,
            interpolation_speed: 25.0,
            pitch_range: PitchRange::default(),
        }
    }
}

impl LookConfig {
    /// Application mode selected by the `smooth` flag
    pub fn mode(&self) -> LookMode {
        if self.smooth {
            LookMode::Smoothed
        } else {
            LookMode::Instant
        }
    }

    /// Check the preconditions the per-frame update relies on.
    ///
    /// The interpolation speed is checked even in instant mode.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_finite("sensitivity.x", self.sensitivity.x)?;
        ensure_finite("sensitivity.y", self.sensitivity.y)?;
        ensure_finite("pitch_range.min", self.pitch_range.min)?;
        ensure_finite("pitch_range.max", self.pitch_range.max)?;

        let PitchRange { min, max } = self.pitch_range;
        if !(min > -180.0 && min < max && max < 180.0) {
            return Err(ConfigError::InvalidPitchRange { min, max });
        }

        ensure_positive("interpolation_speed", self.interpolation_speed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_look_config() {
        let config = LookConfig::default();
        assert_eq!(config.sensitivity, Vec2::new(1.0, 1.0));
        assert_eq!(config.pitch_range, PitchRange { min: -60.0, max: 60.0 });
        assert!(!config.smooth);
        assert_eq!(config.interpolation_speed, 25.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_mode_follows_smooth_flag() {
        let mut config = LookConfig::default();
        assert_eq!(config.mode(), LookMode::Instant);
        config.smooth = true;
        assert_eq!(config.mode(), LookMode::Smoothed);
    }

    #[test]
    fn test_inverted_pitch_range_rejected() {
        let config = LookConfig {
            pitch_range: PitchRange { min: 30.0, max: 30.0 },
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidPitchRange { min: 30.0, max: 30.0 })
        );
    }

    #[test]
    fn test_half_turn_pitch_range_rejected() {
        let config = LookConfig {
            pitch_range: PitchRange { min: -180.0, max: 90.0 },
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPitchRange { .. })
        ));
    }

    #[test]
    fn test_non_positive_interpolation_speed_rejected() {
        let config = LookConfig {
            interpolation_speed: 0.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositive {
                field: "interpolation_speed",
                value: 0.0
            })
        );
    }

    #[test]
    fn test_nan_sensitivity_rejected() {
        let config = LookConfig {
            sensitivity: Vec2::new(f32::NAN, 1.0),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonFinite {
                field: "sensitivity.x"
            })
        );
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: LookConfig = toml::from_str("smooth = true\n").unwrap();
        assert!(config.smooth);
        assert_eq!(config.interpolation_speed, 25.0);
        assert_eq!(config.pitch_range, PitchRange::default());
    }
}
