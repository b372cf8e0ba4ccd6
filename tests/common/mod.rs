//! Common test utilities for integration tests.

#![allow(dead_code)]

use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll};
use bevy::math::DVec3;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use std::time::Duration;

use twobody::camera::{CameraFollowState, CameraPlugin};
use twobody::collision::CollisionPlugin;
use twobody::input::InputPlugin;
use twobody::orbit::OrbitPlugin;
use twobody::physics::{advance, StepOutcome};
use twobody::prediction::PredictionPlugin;
use twobody::spacecraft::SpacecraftPlugin;
use twobody::types::{PhysicsState, SimulationConstants};

/// Create a circular orbit state of radius `r` on the +X axis, moving along +Z.
pub fn circular_orbit(constants: &SimulationConstants, r: f64) -> PhysicsState {
    PhysicsState::new(
        DVec3::new(r, 0.0, 0.0),
        DVec3::new(0.0, 0.0, constants.circular_speed(r)),
    )
}

/// Create an elliptical orbit state at periapsis.
pub fn elliptical_orbit(constants: &SimulationConstants, periapsis: f64, eccentricity: f64) -> PhysicsState {
    let a = periapsis / (1.0 - eccentricity);
    let v = (constants.gm() * (2.0 / periapsis - 1.0 / a)).sqrt();
    PhysicsState::new(DVec3::new(periapsis, 0.0, 0.0), DVec3::new(0.0, 0.0, v))
}

/// Compute specific orbital energy.
pub fn orbital_energy(state: &PhysicsState, constants: &SimulationConstants) -> f64 {
    0.5 * state.vel.length_squared() - constants.gm() / state.pos.length()
}

/// Compute orbital period for elliptical orbit.
pub fn orbital_period(constants: &SimulationConstants, semi_major_axis: f64) -> f64 {
    use std::f64::consts::TAU;
    TAU * (semi_major_axis.powi(3) / constants.gm()).sqrt()
}

/// Run `steps` fixed steps, stopping at the first collision.
///
/// Returns the number of steps that integrated normally.
pub fn simulate(state: &mut PhysicsState, constants: &SimulationConstants, steps: usize) -> usize {
    for i in 0..steps {
        if let StepOutcome::Collided(_) = advance(state, constants, constants.time_step) {
            return i;
        }
    }
    steps
}

/// Headless app with the simulation plugins.
///
/// Only the follow-camera state that reset touches is added; see
/// `interactive_app` for the camera and keyboard plugins. Each `update()`
/// after the first advances real time by `frame`.
pub fn simulation_app(frame: Duration) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(frame))
        .add_plugins((
            twobody::physics::PhysicsPlugin,
            CollisionPlugin,
            OrbitPlugin,
            PredictionPlugin,
            SpacecraftPlugin,
        ))
        .init_resource::<CameraFollowState>();
    app
}

/// `simulation_app` plus the camera and keyboard plugins.
///
/// Input resources are inserted by hand and never cleared between frames,
/// so tests must release keys and zero mouse deltas themselves.
pub fn interactive_app(frame: Duration) -> App {
    let mut app = simulation_app(frame);
    app.init_resource::<ButtonInput<KeyCode>>()
        .init_resource::<ButtonInput<MouseButton>>()
        .init_resource::<AccumulatedMouseMotion>()
        .init_resource::<AccumulatedMouseScroll>()
        .add_plugins((CameraPlugin, InputPlugin));
    app
}
