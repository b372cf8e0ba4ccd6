//! Physics simulation of the spacecraft around the central body.
//!
//! This module provides the integration layer: inverse-square gravity,
//! a semi-implicit Euler integrator and the bounded position trail. The
//! step runs in `Update` because the frame delta drives the simulated time.

mod gravity;
mod integrator;
mod trail;

#[cfg(test)]
mod proptest_physics;

use bevy::prelude::*;

pub use gravity::{gravitational_force, gravity_acceleration};
pub use integrator::{
    advance, advance_frame, update_heading, FrameReport, StepOutcome, HEADING_MIN_SPEED_SQ,
    HEADING_SLERP_FACTOR,
};
pub use trail::{Trail, TRAIL_CAPACITY};

use crate::collision::CollisionEvent;
use crate::types::{
    simulation_running, PhysicsState, SimulationConstants, SimulationSet, SimulationTime,
};

/// Plugin providing physics simulation for the spacecraft.
///
/// Adds:
/// - The simulation resources (constants, state, time, trail)
/// - The frame integration system
/// - The `SimulationSet` ordering every other plugin relies on
pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        SimulationSet::configure(app);

        app.init_resource::<SimulationConstants>()
            .init_resource::<PhysicsState>()
            .init_resource::<SimulationTime>()
            .init_resource::<Trail>()
            .init_resource::<LastFrame>()
            .add_systems(
                Update,
                physics_step
                    .in_set(SimulationSet::Physics)
                    .run_if(simulation_running),
            );
    }
}

/// Outcome of the most recent physics frame.
///
/// Derived consumers (the follow camera) read the simulated `dt` from here
/// instead of recomputing it.
#[derive(Resource, Default, Clone, Copy, Debug)]
pub struct LastFrame(pub FrameReport);

/// Main physics integration system.
///
/// Advances the state by the scaled frame delta, appends the new position
/// to the trail and forwards any collision as a message.
fn physics_step(
    mut state: ResMut<PhysicsState>,
    mut trail: ResMut<Trail>,
    mut last_frame: ResMut<LastFrame>,
    mut collisions: MessageWriter<CollisionEvent>,
    constants: Res<SimulationConstants>,
    sim_time: Res<SimulationTime>,
    time: Res<Time>,
) {
    let report = advance_frame(&mut state, &constants, &sim_time, time.delta_secs_f64());
    last_frame.0 = report;

    if report.dt <= 0.0 {
        return;
    }

    trail.push(state.pos);

    if let Some(collision) = report.collision {
        collisions.write(CollisionEvent(collision));
    }
}
