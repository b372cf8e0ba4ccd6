//! Integration tests for physics simulation.

mod common;

use approx::assert_relative_eq;
use bevy::math::DVec3;
use twobody::config::InitialConditions;
use twobody::orbit::{update_metrics, OrbitalElements, OrbitalHistory};
use twobody::physics::{advance, advance_frame, StepOutcome};
use twobody::types::{PhysicsState, SimulationConstants, SimulationTime};

#[test]
fn test_default_orbit_returns_after_one_period() {
    let c = SimulationConstants::default();
    let mut state = InitialConditions::default().seed(&c).unwrap();
    let start = state.pos;
    let r = state.distance();

    let period = common::orbital_period(&c, r);
    let steps = (period / c.time_step).round() as usize;
    assert_eq!(common::simulate(&mut state, &c, steps), steps);

    // Phase error of symplectic Euler is small over one orbit
    let miss = (state.pos - start).length();
    assert!(miss < 0.02 * r, "returned {miss:.2} units from start");
}

#[test]
fn test_default_orbit_apsides_within_five_percent() {
    let c = SimulationConstants::default();
    let mut state = InitialConditions::default().seed(&c).unwrap();
    let mut history = OrbitalHistory::default();

    let steps = (common::orbital_period(&c, state.distance()) / c.time_step) as usize;
    let mut metrics = update_metrics(&state, &mut history, &c);
    for _ in 0..steps {
        assert_eq!(advance(&mut state, &c, c.time_step), StepOutcome::Advanced);
        metrics = update_metrics(&state, &mut history, &c);
    }

    let a = metrics.semi_major_axis;
    assert!((metrics.apoapsis - a).abs() / a < 0.05);
    assert!((metrics.periapsis - a).abs() / a < 0.05);
    assert_relative_eq!(a, c.km_to_sim(42_000.0), max_relative = 0.05);
}

#[test]
fn test_energy_conserved_over_several_orbits() {
    let c = SimulationConstants::default();
    let mut state = common::elliptical_orbit(&c, 250.0, 0.3);
    let initial = common::orbital_energy(&state, &c);

    let a = 250.0 / 0.7;
    let steps = (3.0 * common::orbital_period(&c, a) / c.time_step) as usize;
    assert_eq!(common::simulate(&mut state, &c, steps), steps);

    let drift = ((common::orbital_energy(&state, &c) - initial) / initial).abs();
    assert!(drift < 0.02, "energy drift {:.3}%", drift * 100.0);
}

#[test]
fn test_retrograde_orbit_stable() {
    let c = SimulationConstants::default();
    let mut state = common::circular_orbit(&c, 400.0);
    state.vel = -state.vel;

    let steps = (common::orbital_period(&c, 400.0) / c.time_step) as usize;
    assert_eq!(common::simulate(&mut state, &c, steps), steps);
    assert_relative_eq!(state.distance(), 400.0, max_relative = 0.01);
}

#[test]
fn test_collision_recovery_and_resume() {
    let c = SimulationConstants::default();
    let mut state = PhysicsState::new(DVec3::new(0.0, 150.0, 0.0), DVec3::ZERO);

    let steps = common::simulate(&mut state, &c, 100_000);
    assert!(steps < 100_000, "expected a collision");

    // Repositioned along the impact direction, at rest
    assert_relative_eq!(state.pos.y, c.safe_distance(), max_relative = 1e-12);
    assert_eq!(state.vel, DVec3::ZERO);

    // The next step integrates normally and starts falling again
    assert_eq!(advance(&mut state, &c, c.time_step), StepOutcome::Advanced);
    assert!(state.vel.y < 0.0);
}

#[test]
fn test_time_scale_does_not_change_trajectory_much() {
    // Same simulated time at 1x and 10x: sub-stepping keeps steps at most the
    // fixed step, so both runs land in nearly the same place.
    let c = SimulationConstants::default();
    let start = common::circular_orbit(&c, 560.0);

    let mut slow = start.clone();
    let slow_time = SimulationTime { scale: 1.0, paused: false };
    for _ in 0..1000 {
        advance_frame(&mut slow, &c, &slow_time, 1.0 / 60.0);
    }

    let mut fast = start;
    let fast_time = SimulationTime { scale: 10.0, paused: false };
    for _ in 0..100 {
        advance_frame(&mut fast, &c, &fast_time, 1.0 / 60.0);
    }

    assert_relative_eq!(slow.elapsed, fast.elapsed, max_relative = 1e-9);
    assert!((slow.pos - fast.pos).length() < 0.01 * 560.0);
}

#[test]
fn test_vis_viva_matches_running_extrema() {
    let c = SimulationConstants::default();
    let mut state = common::elliptical_orbit(&c, 300.0, 0.4);
    let elements = OrbitalElements::from_state(&state, &c).unwrap();
    let mut history = OrbitalHistory::default();

    let a = 300.0 / 0.6;
    let steps = (1.1 * common::orbital_period(&c, a) / c.time_step) as usize;
    let mut metrics = update_metrics(&state, &mut history, &c);
    for _ in 0..steps {
        advance(&mut state, &c, c.time_step);
        metrics = update_metrics(&state, &mut history, &c);
    }

    assert!(!metrics.period_is_provisional);
    assert_relative_eq!(metrics.semi_major_axis, elements.semi_major_axis.unwrap(), max_relative = 0.02);
    assert_relative_eq!(elements.eccentricity, 0.4, max_relative = 1e-6);
}
