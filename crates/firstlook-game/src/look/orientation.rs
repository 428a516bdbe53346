//! Accumulated body yaw and camera pitch

use glam::{Quat, Vec2, Vec3};

/// Axis for body yaw.
///
/// World down, so a positive look x turns right in a right-handed Y-up frame.
pub const YAW_AXIS: Vec3 = Vec3::NEG_Y;

/// Local axis for camera pitch
pub const PITCH_AXIS: Vec3 = Vec3::X;

/// Advances between renormalizations of the accumulated rotations
const RENORMALIZE_INTERVAL: u32 = 256;

/// Unclamped target rotations built from every look delta since activation.
///
/// The camera rotation is relative to the body's yaw, so the camera's world
/// orientation is `body_rotation * camera_rotation`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientationAccumulator {
    body: Quat,
    camera: Quat,
    advances: u32,
}

impl OrientationAccumulator {
    /// Start from the body's and camera's rotations at activation
    pub fn new(body_rotation: Quat, camera_rotation: Quat) -> Self {
        Self {
            body: body_rotation,
            camera: camera_rotation,
            advances: 0,
        }
    }

    /// Accumulated body (yaw) rotation
    pub fn body_rotation(&self) -> Quat {
        self.body
    }

    /// Accumulated camera (pitch) rotation, local to the body
    pub fn camera_rotation(&self) -> Quat {
        self.camera
    }

    /// Fold one frame of look input into the targets.
    ///
    /// `input_delta` is expected to already be zero while look capture is
    /// off. Returns this frame's `(yaw, pitch)` delta rotations. Nothing is
    /// clamped here; a target that overshoots the pitch limits keeps its
    /// overshoot so motion back from the limit resumes without a jump.
    pub fn advance(&mut self, input_delta: Vec2, sensitivity: Vec2) -> (Quat, Quat) {
        let yaw = Quat::from_axis_angle(YAW_AXIS, (input_delta.x * sensitivity.x).to_radians());
        let pitch =
            Quat::from_axis_angle(PITCH_AXIS, (-input_delta.y * sensitivity.y).to_radians());

        self.body *= yaw;
        self.camera *= pitch;

        self.advances = self.advances.wrapping_add(1);
        if self.advances % RENORMALIZE_INTERVAL == 0 {
            self.renormalize();
        }

        (yaw, pitch)
    }

    /// Rescale both targets to unit length without changing their angles
    pub fn renormalize(&mut self) {
        self.body = self.body.normalize();
        self.camera = self.camera.normalize();
    }
}
