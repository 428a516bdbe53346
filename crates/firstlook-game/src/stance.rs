//! Crouch stance blending
//!
//! Blends camera height and collider height/center toward the standing or
//! crouched targets. Runs independently of look; the controller drives it
//! after rotation has been written each frame.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ensure_finite, ensure_positive, ConfigError};

/// Stance configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StanceConfig {
    /// Camera local height when crouching
    pub crouch_height: f32,
    /// Camera local height when standing
    pub stand_height: f32,
    /// Collider height when crouching
    pub crouch_collider_height: f32,
    /// Blend rate per second
    pub transition_speed: f32,
}

impl Default for StanceConfig {
    fn default() -> Self {
        Self {
            crouch_height: 0.5,
            stand_height: 1.6,
            crouch_collider_height: 1.0,
            transition_speed: 10.0,
        }
    }
}

impl StanceConfig {
    /// Check the preconditions the blender relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_finite("crouch_height", self.crouch_height)?;
        ensure_finite("stand_height", self.stand_height)?;
        ensure_positive("crouch_collider_height", self.crouch_collider_height)?;
        ensure_positive("transition_speed", self.transition_speed)
    }
}

/// One frame of blended stance output
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StanceSample {
    /// Camera local Y
    pub camera_local_y: f32,
    /// Total collider height
    pub collider_height: f32,
    /// Collider center relative to the body
    pub collider_center: Vec3,
}

/// Blends the current stance toward its target every tick
#[derive(Debug, Clone)]
pub struct StanceBlender {
    config: StanceConfig,
    /// Standing collider height, captured once at activation
    default_collider_height: f32,
    /// Standing collider center, captured once at activation
    default_collider_center: Vec3,
    current: StanceSample,
    crouching: bool,
}

impl StanceBlender {
    /// Create a blender that starts at the standing defaults
    pub fn new(
        config: StanceConfig,
        default_collider_height: f32,
        default_collider_center: Vec3,
    ) -> Self {
        let current = StanceSample {
            camera_local_y: config.stand_height,
            collider_height: default_collider_height,
            collider_center: default_collider_center,
        };
        Self {
            config,
            default_collider_height,
            default_collider_center,
            current,
            crouching: false,
        }
    }

    /// Values written last tick (standing defaults before the first tick)
    pub fn current(&self) -> StanceSample {
        self.current
    }

    /// Crouch input seen on the last tick
    pub fn is_crouching(&self) -> bool {
        self.crouching
    }

    /// Standing collider height
    pub fn default_collider_height(&self) -> f32 {
        self.default_collider_height
    }

    /// Standing collider center
    pub fn default_collider_center(&self) -> Vec3 {
        self.default_collider_center
    }

    /// Collider center while crouched.
    ///
    /// Lowered by half the height reduction so the collider's bottom stays
    /// where it is when standing.
    pub fn crouched_center(&self) -> Vec3 {
        let drop = (self.default_collider_height - self.config.crouch_collider_height) / 2.0;
        self.default_collider_center - Vec3::Y * drop
    }

    /// Values the blender converges to for a stance
    pub fn target(&self, crouching: bool) -> StanceSample {
        if crouching {
            StanceSample {
                camera_local_y: self.config.crouch_height,
                collider_height: self.config.crouch_collider_height,
                collider_center: self.crouched_center(),
            }
        } else {
            StanceSample {
                camera_local_y: self.config.stand_height,
                collider_height: self.default_collider_height,
                collider_center: self.default_collider_center,
            }
        }
    }

    /// Advance one frame.
    ///
    /// Each value moves toward its target by `dt * transition_speed`,
    /// clamped to `[0, 1]`; a factor of 1 or more lands exactly on target.
    /// A negative or non-finite `dt` leaves the values where they are.
    pub fn tick(&mut self, dt: f32, crouching: bool) -> StanceSample {
        if crouching != self.crouching {
            debug!(crouching, "stance changed");
            self.crouching = crouching;
        }

        let target = self.target(crouching);
        let t = blend_factor(dt, self.config.transition_speed);

        self.current = StanceSample {
            camera_local_y: lerp(self.current.camera_local_y, target.camera_local_y, t),
            collider_height: lerp(self.current.collider_height, target.collider_height, t),
            collider_center: if t >= 1.0 {
                target.collider_center
            } else {
                self.current.collider_center.lerp(target.collider_center, t)
            },
        };
        self.current
    }
}

/// Fraction of the remaining distance covered in `dt` at `speed` per second.
///
/// Zero for a non-finite `dt`, so one bad frame cannot poison blended state.
pub(crate) fn blend_factor(dt: f32, speed: f32) -> f32 {
    if dt.is_finite() {
        (dt * speed).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    if t >= 1.0 {
        b
    } else {
        a + (b - a) * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn blender() -> StanceBlender {
        StanceBlender::new(StanceConfig::default(), 2.0, Vec3::new(0.0, 1.0, 0.0))
    }

    #[test]
    fn test_starts_standing() {
        let blender = blender();
        let current = blender.current();
        assert_eq!(current.camera_local_y, 1.6);
        assert_eq!(current.collider_height, 2.0);
        assert_eq!(current.collider_center, Vec3::new(0.0, 1.0, 0.0));
        assert!(!blender.is_crouching());
    }

    #[test]
    fn test_crouched_center_keeps_drop_at_half_height_change() {
        let blender = blender();
        // 2.0 -> 1.0 collider, so the center drops by 0.5
        assert!((blender.crouched_center() - Vec3::new(0.0, 0.5, 0.0)).length() < EPS);

        // The collider's bottom is the same in both stances.
        let standing = blender.target(false);
        let crouched = blender.target(true);
        let bottom = |s: StanceSample| s.collider_center.y - s.collider_height / 2.0;
        assert!((bottom(standing) - bottom(crouched)).abs() < EPS);
    }

    #[test]
    fn test_single_tick_linear_step() {
        let mut blender = blender();
        let sample = blender.tick(0.05, true);
        // factor 0.5
        assert!((sample.camera_local_y - 1.05).abs() < EPS);
        assert!((sample.collider_height - 1.5).abs() < EPS);
        assert!((sample.collider_center.y - 0.75).abs() < EPS);
        assert!(blender.is_crouching());
    }

    #[test]
    fn test_full_factor_snaps_to_target() {
        let config = StanceConfig {
            stand_height: 1.6,
            crouch_height: 0.5,
            transition_speed: 10.0,
            ..Default::default()
        };
        let mut blender = StanceBlender::new(config, 2.0, Vec3::new(0.0, 1.0, 0.0));
        let sample = blender.tick(0.1, true);
        assert_eq!(sample.camera_local_y, 0.5);
        assert_eq!(sample.collider_height, 1.0);
    }

    #[test]
    fn test_oversized_step_is_tolerated() {
        let mut blender = blender();
        let sample = blender.tick(5.0, true);
        assert_eq!(sample, blender.target(true));
    }

    #[test]
    fn test_negative_dt_holds_values() {
        let mut blender = blender();
        let before = blender.current();
        assert_eq!(blender.tick(-0.1, true), before);
    }

    #[test]
    fn test_non_finite_dt_holds_values() {
        let mut blender = blender();
        blender.tick(0.05, true);
        let before = blender.current();
        assert_eq!(blender.tick(f32::NAN, true), before);
        assert_eq!(blender.tick(f32::INFINITY, false), before);

        let after = blender.tick(0.05, true);
        assert!(after.camera_local_y.is_finite());
        assert!(after.camera_local_y < before.camera_local_y);
    }

    #[test]
    fn test_crouch_converges_and_round_trips() {
        let mut blender = blender();
        let standing = blender.current();

        let mut last_y = standing.camera_local_y;
        for _ in 0..200 {
            let sample = blender.tick(1.0 / 60.0, true);
            assert!(sample.camera_local_y <= last_y);
            assert!(sample.camera_local_y >= 0.5);
            last_y = sample.camera_local_y;
        }
        let crouched = blender.current();
        assert!((crouched.camera_local_y - 0.5).abs() < EPS);
        assert!((crouched.collider_height - 1.0).abs() < EPS);
        assert!((crouched.collider_center - blender.crouched_center()).length() < EPS);

        blender.tick(0.2, false);
        assert_eq!(blender.current(), standing);
    }

    #[test]
    fn test_non_positive_transition_speed_rejected() {
        let config = StanceConfig {
            transition_speed: -1.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositive {
                field: "transition_speed",
                value: -1.0
            })
        );
    }
}
