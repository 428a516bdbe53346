//! Pitch clamp for the camera's local rotation
//!
//! Only meaningful for a pitch-only local rotation, which is what the look
//! controller hands it. Yaw or roll components are carried through but are
//! not accounted for in the pitch extraction.

use glam::Quat;

/// Pitch of a local camera rotation in degrees.
///
/// Uses `2 * atan(x / w)` on the canonical (`w >= 0`) form, which stays
/// well conditioned near ±90° where an `asin` extraction loses precision.
pub fn pitch_degrees(rotation: Quat) -> f32 {
    let q = canonical(rotation);
    (2.0 * q.x.atan2(q.w)).to_degrees()
}

/// Force the pitch of `rotation` into `[pitch_min, pitch_max]` degrees.
///
/// The result is in homogeneous form: `w` is fixed at 1 and `y`, `z` are
/// the input's components divided by `w`. It is NOT unit length. Callers
/// normalize when applying it (see `Transform::set_rotation`); normalizing
/// inside would break the `x = tan(pitch / 2)` reconstruction.
pub fn clamp_pitch(rotation: Quat, pitch_min: f32, pitch_max: f32) -> Quat {
    let q = canonical(rotation);
    let pitch = pitch_degrees(q).max(pitch_min).min(pitch_max);

    // A half turn has no usable y/z ratio.
    let (y, z) = if q.w > f32::EPSILON {
        (q.y / q.w, q.z / q.w)
    } else {
        (0.0, 0.0)
    };

    Quat::from_xyzw((0.5 * pitch.to_radians()).tan(), y, z, 1.0)
}

/// Resolve the double cover so the scalar part is non-negative.
fn canonical(rotation: Quat) -> Quat {
    if rotation.w < 0.0 {
        -rotation
    } else {
        rotation
    }
}
