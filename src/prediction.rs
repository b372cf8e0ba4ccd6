//! Trajectory prediction for the spacecraft.
//!
//! Forward-simulates a copy of the current state with the same gravity law
//! as the live integrator but a coarser step. The prediction is recomputed
//! every frame purely for display and never touches `PhysicsState`.

use std::iter::FusedIterator;

use bevy::math::DVec3;
use bevy::prelude::*;

use crate::physics::gravity_acceleration;
use crate::types::{simulation_running, PhysicsState, SimulationConstants, SimulationSet};

/// Plugin providing trajectory prediction functionality.
pub struct PredictionPlugin;

impl Plugin for PredictionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PredictionSettings>()
            .init_resource::<TrajectoryPath>()
            .add_systems(
                Update,
                predict_trajectory
                    .in_set(SimulationSet::Derived)
                    .run_if(simulation_running),
            );
    }
}

/// Configuration for trajectory prediction.
#[derive(Resource, Clone, Debug)]
pub struct PredictionSettings {
    /// Maximum number of integration steps per prediction.
    pub max_steps: usize,
    /// Prediction step as a multiple of the live fixed step.
    pub step_multiplier: f64,
    /// Whether the predicted path is computed and drawn.
    pub enabled: bool,
}

impl Default for PredictionSettings {
    fn default() -> Self {
        Self {
            max_steps: 1000,
            step_multiplier: 2.0,
            enabled: true,
        }
    }
}

/// Lazy, finite sequence of predicted positions.
///
/// Each item is the position after one more prediction step. The sequence
/// ends after `max_steps` items, or right after the first point that lies
/// inside the central body. Cloning yields an independent restartable copy.
#[derive(Clone, Debug)]
pub struct Trajectory<'a> {
    pos: DVec3,
    vel: DVec3,
    dt: f64,
    remaining: usize,
    impacted: bool,
    constants: &'a SimulationConstants,
}

impl<'a> Trajectory<'a> {
    /// Whether the sequence has ended inside the central body.
    ///
    /// Only meaningful once the iterator has been driven to its end.
    pub fn impacted(&self) -> bool {
        self.impacted
    }
}

impl Iterator for Trajectory<'_> {
    type Item = DVec3;

    fn next(&mut self) -> Option<DVec3> {
        if self.impacted || self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let acc = gravity_acceleration(self.pos, self.constants);
        self.vel += acc * self.dt;
        self.pos += self.vel * self.dt;

        if self.pos.length() < self.constants.central_body_radius {
            self.impacted = true;
        }

        Some(self.pos)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.impacted {
            (0, Some(0))
        } else {
            (0, Some(self.remaining))
        }
    }
}

impl FusedIterator for Trajectory<'_> {}

/// Start a prediction from a snapshot of `state`.
pub fn predict<'a>(
    state: &PhysicsState,
    constants: &'a SimulationConstants,
    settings: &PredictionSettings,
) -> Trajectory<'a> {
    Trajectory {
        pos: state.pos,
        vel: state.vel,
        dt: constants.time_step * settings.step_multiplier,
        remaining: settings.max_steps,
        impacted: false,
        constants,
    }
}

/// Predicted path for the current frame.
#[derive(Resource, Default, Clone, Debug)]
pub struct TrajectoryPath {
    /// Predicted positions, nearest first.
    pub points: Vec<DVec3>,
    /// Whether the prediction ends inside the central body.
    pub ends_in_collision: bool,
}

impl TrajectoryPath {
    pub fn clear(&mut self) {
        self.points.clear();
        self.ends_in_collision = false;
    }

    /// Fill from a fresh prediction, reusing the allocation.
    pub fn refill(&mut self, mut trajectory: Trajectory<'_>) {
        self.points.clear();
        self.points.extend(trajectory.by_ref());
        self.ends_in_collision = trajectory.impacted();
    }
}

/// Recompute the predicted path from the post-integration state.
fn predict_trajectory(
    state: Res<PhysicsState>,
    constants: Res<SimulationConstants>,
    settings: Res<PredictionSettings>,
    mut path: ResMut<TrajectoryPath>,
) {
    if !settings.enabled {
        path.clear();
        return;
    }
    path.refill(predict(&state, &constants, &settings));
}
