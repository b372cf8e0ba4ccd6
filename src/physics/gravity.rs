//! Inverse-square gravity of the central body.
//!
//! Shared by the live integrator and the trajectory predictor so both paths
//! apply the same near-singularity guard.

use bevy::math::DVec3;

use crate::types::SimulationConstants;

/// Gravitational force on the spacecraft at `pos` (simulation units).
///
/// The central body sits at the origin. Distances below
/// `min_gravity_distance` are clamped; at exactly zero distance the
/// direction is undefined and the force is zero.
#[inline]
pub fn gravitational_force(pos: DVec3, constants: &SimulationConstants) -> DVec3 {
    let to_center = -pos;
    let min_d = constants.min_gravity_distance;
    let d2 = to_center.length_squared().max(min_d * min_d);

    let magnitude = constants.gravitational_constant
        * constants.central_mass
        * constants.spacecraft_mass
        / d2;

    to_center.normalize_or_zero() * magnitude
}

/// Gravitational acceleration at `pos`.
///
/// Computed as force / mass; the spacecraft mass cancels but goes through
/// the force so mass changes stay visible in the force path.
#[inline]
pub fn gravity_acceleration(pos: DVec3, constants: &SimulationConstants) -> DVec3 {
    debug_assert!(
        constants.spacecraft_mass > 0.0,
        "spacecraft mass must be positive, got {}",
        constants.spacecraft_mass
    );
    gravitational_force(pos, constants) / constants.spacecraft_mass
}
