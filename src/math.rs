//! Vector and rotation helpers shared by the integrator and the cameras.
//!
//! Orientation convention follows Bevy: local -Z is forward, +Y is up,
//! +X is right.

use bevy::math::{DMat3, DQuat, DVec3};

/// Orthonormal basis derived from an orientation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Basis {
    pub forward: DVec3,
    pub up: DVec3,
    pub right: DVec3,
}

impl Basis {
    /// Basis of the given rotation.
    pub fn from_rotation(rotation: DQuat) -> Self {
        Self {
            forward: rotation * DVec3::NEG_Z,
            up: rotation * DVec3::Y,
            right: rotation * DVec3::X,
        }
    }
}

/// Rotation whose forward (-Z) axis points along `forward`.
///
/// `up` is a hint; when it is parallel to `forward` an arbitrary
/// perpendicular is used instead. Returns `None` for a zero `forward`.
pub fn look_rotation(forward: DVec3, up: DVec3) -> Option<DQuat> {
    let f = forward.try_normalize()?;
    let right = f
        .cross(up)
        .try_normalize()
        .unwrap_or_else(|| f.any_orthonormal_vector());
    let true_up = right.cross(f);
    Some(DQuat::from_mat3(&DMat3::from_cols(right, true_up, -f)).normalize())
}

/// Move `current` part of the way toward a heading along `direction`.
///
/// `factor` is the slerp fraction per call, so repeated calls converge
/// smoothly rather than snapping.
pub fn slerp_toward(current: DQuat, direction: DVec3, up: DVec3, factor: f64) -> DQuat {
    match look_rotation(direction, up) {
        Some(target) => current.slerp(target, factor.clamp(0.0, 1.0)).normalize(),
        None => current,
    }
}

/// Sine of the angle between two vectors (0 when either is zero).
pub fn sin_angle_between(a: DVec3, b: DVec3) -> f64 {
    let denom = a.length() * b.length();
    if denom <= f64::EPSILON {
        return 0.0;
    }
    (a.cross(b).length() / denom).clamp(0.0, 1.0)
}

/// Rescale `v` so its length is at least `min_len`.
///
/// A zero vector is replaced by `fallback` scaled to `min_len`.
pub fn enforce_min_length(v: DVec3, min_len: f64, fallback: DVec3) -> DVec3 {
    let len = v.length();
    if len >= min_len {
        v
    } else if len > f64::EPSILON {
        v * (min_len / len)
    } else {
        fallback.normalize_or_zero() * min_len
    }
}
