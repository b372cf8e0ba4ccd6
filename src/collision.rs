//! Collision handling for spacecraft impacts with the central body.
//!
//! A collision is never fatal: the spacecraft is stopped and placed back
//! outside the body at a safe distance, and integration resumes on the next
//! frame. The physics step emits a `CollisionEvent` so the UI and renderer
//! can react.

use bevy::math::DVec3;
use bevy::prelude::*;

use crate::types::{PhysicsState, SimulationConstants, SimulationSet};

/// Snapshot of the spacecraft at the moment of impact.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollisionReport {
    /// Position before the reset, simulation units.
    pub impact_position: DVec3,
    /// Velocity before the reset, simulation units.
    pub impact_velocity: DVec3,
    /// Simulated time of impact.
    pub time: f64,
}

impl CollisionReport {
    /// Impact speed in simulation units.
    pub fn impact_speed(&self) -> f64 {
        self.impact_velocity.length()
    }
}

/// Zero the velocity and move the spacecraft out to the safe distance.
///
/// The spacecraft keeps its direction from the center; a craft sitting
/// exactly at the center is pushed out along +X.
pub fn resolve_collision(state: &mut PhysicsState, constants: &SimulationConstants) -> CollisionReport {
    let report = CollisionReport {
        impact_position: state.pos,
        impact_velocity: state.vel,
        time: state.elapsed,
    };

    let direction = state.pos.try_normalize().unwrap_or(DVec3::X);
    state.pos = direction * constants.safe_distance();
    state.vel = DVec3::ZERO;

    report
}

/// One-shot message fired when the spacecraft hits the central body.
#[derive(Message, Clone, Debug)]
pub struct CollisionEvent(pub CollisionReport);

/// Resource tracking collision state for UI display.
#[derive(Resource, Default)]
pub struct CollisionState {
    /// Most recent collision, if any.
    pub last_collision: Option<CollisionReport>,
    /// Collisions since the last reset.
    pub count: u32,
}

impl CollisionState {
    /// Clear the collision state (e.g., when resetting the simulation).
    pub fn clear(&mut self) {
        self.last_collision = None;
        self.count = 0;
    }

    /// Check if there's been a collision since the last reset.
    pub fn has_collision(&self) -> bool {
        self.last_collision.is_some()
    }
}

/// Record collisions reported by the physics step.
pub fn record_collisions(
    mut events: MessageReader<CollisionEvent>,
    mut collision_state: ResMut<CollisionState>,
    constants: Res<SimulationConstants>,
) {
    for CollisionEvent(report) in events.read() {
        info!(
            "IMPACT at t={:.2}: {:.2} km/s, spacecraft reset to {:.0} km",
            report.time,
            constants.sim_to_km_s(report.impact_speed()),
            constants.sim_to_km(constants.safe_distance()),
        );
        collision_state.last_collision = Some(*report);
        collision_state.count += 1;
    }
}

/// Plugin providing collision bookkeeping.
pub struct CollisionPlugin;

impl Plugin for CollisionPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<CollisionEvent>()
            .init_resource::<CollisionState>()
            .add_systems(Update, record_collisions.in_set(SimulationSet::Collision));
    }
}
