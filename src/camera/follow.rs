//! Chase camera that follows the spacecraft.
//!
//! The controller only ever receives `&PhysicsState`, so it cannot feed
//! anything back into the integrator. All of its memory (previous velocity,
//! previous heading, smoothed pose) lives in `CameraFollowState`.

use bevy::math::DVec3;
use bevy::prelude::*;

use crate::math::{enforce_min_length, sin_angle_between, Basis};
use crate::types::PhysicsState;

use super::offset::{CameraOffset, OffsetBounds};

/// Tuning for the follow camera.
#[derive(Resource, Clone, Debug)]
pub struct FollowCameraSettings {
    /// Hard floor on the camera-to-spacecraft offset.
    pub min_follow_distance: f64,
    /// Extra chase distance per unit of speed.
    pub velocity_factor: f64,
    /// Extra chase distance per unit of acceleration.
    pub acceleration_factor: f64,
    /// Lateral swing-out while the heading lags the velocity.
    pub turn_spacing_factor: f64,
    /// Trail bias against the direction of travel, per unit of velocity.
    pub anticipation_factor: f64,
    /// Lift along the orbital-plane normal, on the side the craft's up points to.
    pub plane_normal_bias: f64,
    /// Look target leads the craft by `velocity * look_ahead`.
    pub look_ahead: f64,
    /// Nominal per-frame lerp factor.
    pub base_smoothing: f64,
    pub min_smoothing: f64,
    pub max_smoothing: f64,
    /// How strongly speed slows the smoothing.
    pub speed_damping: f64,
    /// How strongly turn rate (rad per time unit) slows the smoothing.
    pub angular_rate_damping: f64,
    /// How strongly the gap to the desired position speeds it up.
    pub distance_gain: f64,
    /// Per-frame lerp factor for the up vector.
    pub up_smoothing: f64,
    /// Limits for the user offset.
    pub offset_bounds: OffsetBounds,
    /// Keyboard step for lateral, vertical and distance adjustments.
    pub offset_step: f64,
    /// Keyboard step for rotation around the craft (radians).
    pub rotate_step: f64,
}

impl Default for FollowCameraSettings {
    fn default() -> Self {
        Self {
            min_follow_distance: 3.0,
            velocity_factor: 0.15,
            acceleration_factor: 0.05,
            turn_spacing_factor: 0.3,
            anticipation_factor: 0.02,
            plane_normal_bias: 1.5,
            look_ahead: 0.1,
            base_smoothing: 0.1,
            min_smoothing: 0.02,
            max_smoothing: 0.3,
            speed_damping: 0.02,
            angular_rate_damping: 0.5,
            distance_gain: 0.05,
            up_smoothing: 0.05,
            offset_bounds: OffsetBounds::default(),
            offset_step: 0.5,
            rotate_step: 0.05,
        }
    }
}

/// Camera placement for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub position: DVec3,
    pub look_at: DVec3,
    pub up: DVec3,
}

impl CameraPose {
    /// Render-space transform looking from `position` at `look_at`.
    pub fn to_transform(&self) -> Transform {
        Transform::from_translation(self.position.as_vec3())
            .looking_at(self.look_at.as_vec3(), self.up.as_vec3())
    }
}

/// Smoothed state owned by the follow camera.
#[derive(Resource, Clone, Debug)]
pub struct CameraFollowState {
    pub position: DVec3,
    pub look_target: DVec3,
    pub up: DVec3,
    /// User offset, adjusted from the keyboard.
    pub offset: CameraOffset,
    previous_velocity: Option<DVec3>,
    previous_forward: Option<DVec3>,
    initialized: bool,
}

impl Default for CameraFollowState {
    fn default() -> Self {
        Self {
            position: DVec3::ZERO,
            look_target: DVec3::ZERO,
            up: DVec3::Y,
            offset: CameraOffset::default(),
            previous_velocity: None,
            previous_forward: None,
            initialized: false,
        }
    }
}

impl CameraFollowState {
    /// Drop the tracking history so the next update snaps into place.
    /// The user offset is kept.
    pub fn reset_tracking(&mut self) {
        self.previous_velocity = None;
        self.previous_forward = None;
        self.initialized = false;
    }

    /// Whether the camera has been placed at least once since the last reset.
    pub fn is_tracking(&self) -> bool {
        self.initialized
    }

    pub fn pose(&self) -> CameraPose {
        CameraPose {
            position: self.position,
            look_at: self.look_target,
            up: self.up,
        }
    }

    /// Advance the camera by one frame of simulated time `dt`.
    ///
    /// The first call after a reset places the camera directly at its
    /// desired pose; later calls ease toward it.
    pub fn update(
        &mut self,
        craft: &PhysicsState,
        settings: &FollowCameraSettings,
        dt: f64,
    ) -> CameraPose {
        let basis = Basis::from_rotation(craft.orientation);
        let has_dt = dt > f64::EPSILON;

        let acceleration = match self.previous_velocity {
            Some(prev) if has_dt => (craft.vel - prev) / dt,
            _ => DVec3::ZERO,
        };
        let angular_rate = match self.previous_forward {
            Some(prev) if has_dt => prev.angle_between(basis.forward) / dt,
            _ => 0.0,
        };
        if has_dt || self.previous_velocity.is_none() {
            self.previous_velocity = Some(craft.vel);
            self.previous_forward = Some(basis.forward);
        }

        let desired = craft.pos + desired_offset(craft, &basis, acceleration, &self.offset, settings);
        let look_target = craft.pos + craft.vel * settings.look_ahead;

        if !self.initialized {
            self.position = desired;
            self.look_target = look_target;
            self.up = basis.up;
            self.initialized = true;
            return self.pose();
        }

        let factor = smoothing_factor(
            settings,
            craft.vel.length(),
            angular_rate,
            self.position.distance(desired),
        );
        self.position = self.position.lerp(desired, factor);
        self.look_target = self.look_target.lerp(look_target, factor);
        self.up = self
            .up
            .lerp(basis.up, settings.up_smoothing)
            .try_normalize()
            .unwrap_or(basis.up);

        self.pose()
    }
}

/// Chase distance behind the craft, growing with speed and acceleration.
pub fn chase_distance(
    offset: &CameraOffset,
    speed: f64,
    acceleration: f64,
    settings: &FollowCameraSettings,
) -> f64 {
    let distance = offset.distance
        + speed * settings.velocity_factor
        + acceleration * settings.acceleration_factor;
    distance.max(settings.min_follow_distance)
}

/// Desired camera position relative to the spacecraft.
///
/// Base offset in the craft frame plus additive biases: a lateral swing-out
/// while the heading lags the velocity, a trail against the velocity, and a
/// lift out of the orbital plane. The result is never shorter than
/// `min_follow_distance`.
pub fn desired_offset(
    craft: &PhysicsState,
    basis: &Basis,
    acceleration: DVec3,
    offset: &CameraOffset,
    settings: &FollowCameraSettings,
) -> DVec3 {
    let speed = craft.vel.length();
    let distance = chase_distance(offset, speed, acceleration.length(), settings);

    let mut result =
        basis.right * offset.lateral + basis.up * offset.vertical - basis.forward * distance;

    // Swing to the outside of the turn
    let vel_dir = craft.vel.normalize_or_zero();
    let lateral_slip = vel_dir - basis.forward * basis.forward.dot(vel_dir);
    let turn = sin_angle_between(basis.forward, craft.vel);
    result -= lateral_slip.normalize_or_zero() * turn * speed * settings.turn_spacing_factor;

    result -= craft.vel * settings.anticipation_factor;

    // Lift toward the side of the orbital plane the craft's up points at
    let mut plane_normal = craft.pos.cross(craft.vel).normalize_or_zero();
    if plane_normal.dot(basis.up) < 0.0 {
        plane_normal = -plane_normal;
    }
    result += plane_normal * settings.plane_normal_bias;

    enforce_min_length(result, settings.min_follow_distance, -basis.forward)
}

/// Per-frame lerp factor.
///
/// Slower while the craft is fast or turning (no jitter), faster while the
/// camera is far from where it should be (no lag), always within
/// `[min_smoothing, max_smoothing]`.
pub fn smoothing_factor(
    settings: &FollowCameraSettings,
    speed: f64,
    angular_rate: f64,
    gap: f64,
) -> f64 {
    let dynamics = 1.0 + speed * settings.speed_damping + angular_rate * settings.angular_rate_damping;
    let catch_up = 1.0 + gap * settings.distance_gain;
    (settings.base_smoothing * catch_up / dynamics)
        .clamp(settings.min_smoothing, settings.max_smoothing)
}
