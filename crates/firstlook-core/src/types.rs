//! Core types used throughout firstlook

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Local transform of a camera relative to its character body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Transform {
    /// Create a new transform at the given position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Get the forward direction (negative Z in local space)
    pub fn forward(&self) -> Vec3 {
        self.rotation * -Vec3::Z
    }

    /// Write a rotation, normalizing it first.
    ///
    /// Producers such as the pitch clamp hand over non-unit quaternions.
    pub fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation.normalize();
    }

    /// Set only the height component of the position
    pub fn set_height(&mut self, y: f32) {
        self.position.y = y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_is_negative_z() {
        let mut transform = Transform::default();
        assert_eq!(transform.forward(), -Vec3::Z);

        transform.set_rotation(Quat::from_rotation_x(std::f32::consts::FRAC_PI_2));
        assert!(transform.forward().abs_diff_eq(Vec3::Y, 1e-6));
    }

    #[test]
    fn test_set_rotation_normalizes() {
        let mut transform = Transform::default();
        transform.set_rotation(Quat::from_xyzw(0.5, 0.0, 0.0, 1.0));
        assert!((transform.rotation.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_set_height_keeps_xz() {
        let mut transform = Transform::from_position(Vec3::new(0.2, 1.6, -0.1));
        transform.set_height(0.5);
        assert_eq!(transform.position, Vec3::new(0.2, 0.5, -0.1));
    }
}
