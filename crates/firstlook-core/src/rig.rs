//! Interfaces to the character collaborators driven by the look controller
//!
//! The controller never integrates physics itself. It requests body
//! rotations and writes collider dimensions through these traits, and the
//! implementor decides how they are committed (see `firstlook-physics`).

use glam::{Quat, Vec3};

/// Accepts absolute rotation requests for the character body
pub trait BodyRotationSink {
    /// Current committed rotation of the body
    fn body_rotation(&self) -> Quat;

    /// Request an absolute target rotation.
    ///
    /// The implementor integrates it collision-aware; the new value may not
    /// be visible through [`BodyRotationSink::body_rotation`] until it has
    /// been committed.
    fn request_body_rotation(&mut self, rotation: Quat);
}

/// Mutable height and center of the character's collider
pub trait ColliderGeometry {
    /// Total collider height
    fn collider_height(&self) -> f32;

    /// Collider center relative to the body
    fn collider_center(&self) -> Vec3;

    /// Set the total collider height
    fn set_collider_height(&mut self, height: f32);

    /// Set the collider center relative to the body
    fn set_collider_center(&mut self, center: Vec3);
}
