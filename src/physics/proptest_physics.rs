//! Property-based tests for physics simulation using proptest.
//!
//! These tests verify physical invariants of the live integrator across a
//! wide range of starting conditions.

use bevy::math::DVec3;
use proptest::prelude::*;

use super::integrator::{advance, advance_frame, StepOutcome};
use crate::orbit::OrbitalHistory;
use crate::test_utils::{assertions, fixtures};
use crate::types::{PhysicsState, SimulationConstants, SimulationTime, MAX_FRAME_DELTA};

fn unit_direction(theta: f64, phi: f64) -> DVec3 {
    DVec3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Symplectic Euler keeps the energy of a bound orbit oscillating
    /// around its true value rather than drifting away.
    #[test]
    fn prop_energy_bounded_over_one_orbit(
        periapsis in 150.0f64..1500.0,
        eccentricity in 0.0f64..0.5,
    ) {
        let c = SimulationConstants::default();
        let mut state = fixtures::elliptical_orbit(&c, periapsis, eccentricity);
        let initial = assertions::specific_energy(&state, &c);

        let a = periapsis / (1.0 - eccentricity);
        let steps = (assertions::orbital_period(&c, a) / c.time_step).ceil() as usize;

        for _ in 0..steps {
            prop_assert_eq!(advance(&mut state, &c, c.time_step), StepOutcome::Advanced);
        }

        let drift = ((assertions::specific_energy(&state, &c) - initial) / initial).abs();
        prop_assert!(
            drift < 0.05,
            "Energy drift {:.3}% (rp={}, e={})",
            drift * 100.0, periapsis, eccentricity
        );
    }

    /// Gravity is central, so every step preserves r × v.
    #[test]
    fn prop_angular_momentum_conserved(
        r in 300.0f64..2000.0,
        speed_factor in 0.7f64..1.3,
        steps in 1usize..500,
    ) {
        let c = SimulationConstants::default();
        let mut state = fixtures::circular_orbit(&c, r);
        state.vel *= speed_factor;
        let initial = assertions::angular_momentum(&state);

        // Periapsis stays above 0.32 r, well clear of the central body
        for _ in 0..steps {
            prop_assert_eq!(advance(&mut state, &c, c.time_step), StepOutcome::Advanced);
        }

        let current = assertions::angular_momentum(&state);
        prop_assert!((current - initial).length() / initial.length() < 1e-9);
    }

    /// Any position inside the threshold lands at exactly the safe
    /// distance, same direction, at rest.
    #[test]
    fn prop_collision_always_recovers(
        depth in 0.001f64..1.0,
        theta in 0.0f64..std::f64::consts::TAU,
        phi in 0.01f64..3.13,
        vx in -50.0f64..50.0,
        vz in -50.0f64..50.0,
    ) {
        let c = SimulationConstants::default();
        let dir = unit_direction(theta, phi);
        let mut state = PhysicsState::new(dir * c.collision_threshold() * depth, DVec3::new(vx, 0.0, vz));

        let outcome = advance(&mut state, &c, c.time_step);

        prop_assert!(matches!(outcome, StepOutcome::Collided(_)));
        prop_assert!((state.distance() - c.safe_distance()).abs() < 1e-9);
        prop_assert!((state.pos.normalize() - dir).length() < 1e-9);
        prop_assert_eq!(state.vel, DVec3::ZERO);
    }

    /// Frames never integrate with a step longer than the fixed step.
    #[test]
    fn prop_frame_substeps_bounded(
        real_delta in 0.0f64..1.0,
        scale in 0.0f64..10.0,
    ) {
        let c = SimulationConstants::default();
        let mut state = fixtures::circular_orbit(&c, 560.0);
        let sim_time = SimulationTime { scale, paused: false };

        let report = advance_frame(&mut state, &c, &sim_time, real_delta);

        prop_assert!(report.dt <= MAX_FRAME_DELTA * scale + 1e-12);
        if report.dt > 0.0 {
            prop_assert!(report.steps >= 1);
            prop_assert!(report.dt / report.steps as f64 <= c.time_step + 1e-12);
            prop_assert!((state.elapsed - report.dt).abs() < 1e-9);
        } else {
            prop_assert_eq!(report.steps, 0);
        }
    }

    /// Running extrema only ever widen.
    #[test]
    fn prop_apsides_monotonic(
        samples in prop::collection::vec((1.0f64..5000.0, -10.0f64..10.0), 1..200),
    ) {
        let mut history = OrbitalHistory::default();
        let mut last = (f64::INFINITY, 0.0);

        for (distance, radial_rate) in samples {
            history.record(distance, radial_rate);
            prop_assert!(history.periapsis <= last.0);
            prop_assert!(history.apoapsis >= last.1);
            prop_assert!(history.periapsis <= history.apoapsis);
            last = (history.periapsis, history.apoapsis);
        }
    }

    /// Distance and speed conversions are exact inverses.
    #[test]
    fn prop_unit_conversion_round_trip(
        km in 0.0f64..1e6,
        km_s in 0.0f64..50.0,
    ) {
        let c = SimulationConstants::default();
        prop_assert!((c.sim_to_km(c.km_to_sim(km)) - km).abs() <= km * 1e-12 + 1e-9);
        prop_assert!((c.sim_to_km_s(c.km_s_to_sim(km_s)) - km_s).abs() <= km_s * 1e-12 + 1e-12);
    }
}

#[test]
fn test_escape_trajectory_stays_unbound() {
    let c = SimulationConstants::default();
    let mut state = fixtures::escape_trajectory(&c, 300.0);

    for _ in 0..5000 {
        advance(&mut state, &c, c.time_step);
    }

    assert!(!assertions::is_bound(&state, &c));
    assert!(state.distance() > 300.0);
}

#[test]
fn test_radial_fall_ends_in_collision() {
    let c = SimulationConstants::default();
    let mut state = fixtures::radial_fall(300.0);

    let collided = (0..100_000).any(|_| matches!(advance(&mut state, &c, c.time_step), StepOutcome::Collided(_)));

    assert!(collided);
    assert!((state.distance() - c.safe_distance()).abs() < 1e-9);
}
