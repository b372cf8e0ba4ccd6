//! Test utilities for the two-body simulation.
//!
//! Provides fixtures for creating test orbits in simulation units and
//! assertions for verifying physical invariants like energy and angular
//! momentum conservation. Orbits start on the +X axis moving along +Z,
//! matching how initial conditions are seeded.

use bevy::math::DVec3;

use crate::types::{PhysicsState, SimulationConstants};

/// Fixtures for creating test orbital states.
pub mod fixtures {
    use super::*;

    /// Spacecraft on a circular orbit of radius `r`.
    pub fn circular_orbit(constants: &SimulationConstants, r: f64) -> PhysicsState {
        PhysicsState::new(
            DVec3::new(r, 0.0, 0.0),
            DVec3::new(0.0, 0.0, constants.circular_speed(r)),
        )
    }

    /// Spacecraft at periapsis of an ellipse with the given eccentricity.
    pub fn elliptical_orbit(
        constants: &SimulationConstants,
        periapsis: f64,
        eccentricity: f64,
    ) -> PhysicsState {
        assert!(
            (0.0..1.0).contains(&eccentricity),
            "Eccentricity must be in [0, 1) for elliptical orbit"
        );

        let a = periapsis / (1.0 - eccentricity);
        // Vis-viva at periapsis: v = sqrt(GM * (2/r - 1/a))
        let v = (constants.gm() * (2.0 / periapsis - 1.0 / a)).sqrt();

        PhysicsState::new(DVec3::new(periapsis, 0.0, 0.0), DVec3::new(0.0, 0.0, v))
    }

    /// Spacecraft at 1.1x escape speed.
    pub fn escape_trajectory(constants: &SimulationConstants, r: f64) -> PhysicsState {
        let v = assertions::escape_velocity(constants, r) * 1.1;
        PhysicsState::new(DVec3::new(r, 0.0, 0.0), DVec3::new(0.0, 0.0, v))
    }

    /// Spacecraft at rest, falling straight in.
    pub fn radial_fall(r: f64) -> PhysicsState {
        PhysicsState::new(DVec3::new(r, 0.0, 0.0), DVec3::ZERO)
    }
}

/// Assertions for verifying physical invariants.
pub mod assertions {
    use super::*;

    /// Specific orbital energy, `v²/2 - GM/r`.
    pub fn specific_energy(state: &PhysicsState, constants: &SimulationConstants) -> f64 {
        0.5 * state.vel.length_squared() - constants.gm() / state.pos.length()
    }

    /// Specific angular momentum vector `r × v`.
    pub fn angular_momentum(state: &PhysicsState) -> DVec3 {
        state.pos.cross(state.vel)
    }

    /// Assert that energy is conserved within a relative tolerance.
    ///
    /// # Panics
    /// Panics if relative energy drift exceeds tolerance.
    pub fn assert_energy_conserved(initial_energy: f64, final_energy: f64, tolerance: f64) {
        let drift = if initial_energy.abs() > 1e-10 {
            ((final_energy - initial_energy) / initial_energy).abs()
        } else {
            (final_energy - initial_energy).abs()
        };
        assert!(
            drift <= tolerance,
            "Energy not conserved: initial={initial_energy:.6e}, final={final_energy:.6e}, drift={drift:.6e}, tolerance={tolerance:.6e}"
        );
    }

    /// Assert that angular momentum is conserved within a relative tolerance.
    pub fn assert_angular_momentum_conserved(initial: DVec3, current: DVec3, tolerance: f64) {
        let drift = (current - initial).length() / initial.length().max(1e-10);
        assert!(
            drift <= tolerance,
            "Angular momentum not conserved: initial={initial:?}, current={current:?}, drift={drift:.6e}"
        );
    }

    /// Kepler's third law: `T = 2π sqrt(a³/GM)`.
    pub fn orbital_period(constants: &SimulationConstants, semi_major_axis: f64) -> f64 {
        use std::f64::consts::TAU;
        TAU * (semi_major_axis.powi(3) / constants.gm()).sqrt()
    }

    pub fn escape_velocity(constants: &SimulationConstants, distance: f64) -> f64 {
        (2.0 * constants.gm() / distance).sqrt()
    }

    pub fn is_bound(state: &PhysicsState, constants: &SimulationConstants) -> bool {
        specific_energy(state, constants) < 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_circular_orbit_is_bound() {
        let c = SimulationConstants::default();
        let state = fixtures::circular_orbit(&c, 560.0);
        assert!(assertions::is_bound(&state, &c));
        // E = -GM / 2r on a circle
        assert_relative_eq!(
            assertions::specific_energy(&state, &c),
            -c.gm() / (2.0 * 560.0),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_escape_trajectory_is_unbound() {
        let c = SimulationConstants::default();
        assert!(!assertions::is_bound(&fixtures::escape_trajectory(&c, 300.0), &c));
    }

    #[test]
    fn test_elliptical_orbit_energy_matches_axis() {
        let c = SimulationConstants::default();
        let state = fixtures::elliptical_orbit(&c, 200.0, 0.5);
        // a = 400, E = -GM / 2a
        assert_relative_eq!(
            assertions::specific_energy(&state, &c),
            -c.gm() / 800.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_angular_momentum_direction() {
        let c = SimulationConstants::default();
        let l = assertions::angular_momentum(&fixtures::circular_orbit(&c, 560.0));
        // +X cross +Z points along -Y
        assert!(l.y < 0.0);
        assert_relative_eq!(l.x, 0.0);
        assert_relative_eq!(l.z, 0.0);
    }

    #[test]
    fn test_reference_period() {
        let c = SimulationConstants::default();
        // GM = 4e5, r = 560: about 131.65 time units
        assert_relative_eq!(assertions::orbital_period(&c, 560.0), 131.65, max_relative = 1e-3);
    }
}
