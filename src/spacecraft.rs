//! Spacecraft entity and simulation reset.
//!
//! The spacecraft's physical state lives in the `PhysicsState` resource;
//! the entity marked with [`Spacecraft`] is only its visual stand-in. A
//! [`ResetSimulation`] message rebuilds the state from `InitialConditions`
//! and clears everything derived from the previous run.

use bevy::prelude::*;

use crate::camera::CameraFollowState;
use crate::collision::CollisionState;
use crate::config::{InitialConditions, InputError};
use crate::orbit::{OrbitalHistory, OrbitalMetrics};
use crate::physics::{update_heading, LastFrame, Trail};
use crate::prediction::TrajectoryPath;
use crate::types::{PhysicsState, SimulationConstants, SimulationSet, SimulationTime};

/// Message to restart the simulation from the current initial conditions.
///
/// When handled, the simulation:
/// - Re-validates the initial conditions (an invalid set is logged and the
///   current run continues untouched)
/// - Seeds a fresh `PhysicsState` with the heading along the velocity
/// - Clears the trail, the orbital history, the predicted path and the
///   collision record
/// - Unpauses and applies the configured time scale
#[derive(Message, Clone, Copy, Debug, Default)]
pub struct ResetSimulation;

/// Marker component for the spacecraft's visual entity.
#[derive(Component, Default)]
pub struct Spacecraft;

/// Plugin providing initial conditions and reset handling.
pub struct SpacecraftPlugin;

impl Plugin for SpacecraftPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InitialConditions>()
            .add_message::<ResetSimulation>()
            .add_systems(Startup, request_initial_reset)
            .add_systems(Update, handle_reset.in_set(SimulationSet::Input))
            .add_systems(Update, sync_spacecraft_transform.in_set(SimulationSet::Render));
    }
}

fn request_initial_reset(mut resets: MessageWriter<ResetSimulation>) {
    resets.write(ResetSimulation);
}

/// Validate `conditions` and build the starting state with its heading
/// already along the velocity.
pub fn seed_from_conditions(
    conditions: &InitialConditions,
    constants: &SimulationConstants,
) -> Result<PhysicsState, InputError> {
    let mut state = conditions.seed(constants)?;
    update_heading(&mut state, 1.0);
    Ok(state)
}

/// Handle reset requests.
pub fn handle_reset(
    mut requests: MessageReader<ResetSimulation>,
    conditions: Res<InitialConditions>,
    mut constants: ResMut<SimulationConstants>,
    mut state: ResMut<PhysicsState>,
    mut sim_time: ResMut<SimulationTime>,
    mut trail: ResMut<Trail>,
    mut history: ResMut<OrbitalHistory>,
    mut metrics: ResMut<OrbitalMetrics>,
    mut path: ResMut<TrajectoryPath>,
    mut collisions: ResMut<CollisionState>,
    mut follow: ResMut<CameraFollowState>,
    mut last_frame: ResMut<LastFrame>,
) {
    if requests.is_empty() {
        return;
    }
    requests.clear();

    let seeded = match seed_from_conditions(&conditions, &constants) {
        Ok(state) => state,
        Err(err) => {
            warn!("Reset rejected: {err}");
            return;
        }
    };

    constants.spacecraft_mass = conditions.spacecraft_mass_sim();
    *state = seeded;
    sim_time.set_scale(conditions.time_scale);
    sim_time.paused = false;

    trail.clear();
    trail.push(state.pos);
    history.reset();
    *metrics = OrbitalMetrics::default();
    path.clear();
    collisions.clear();
    follow.reset_tracking();
    *last_frame = LastFrame::default();

    info!(
        "Simulation reset: {:.0} km, {:.3} km/s, {:.1} t",
        conditions.orbital_distance_km, conditions.initial_velocity_km_s, conditions.spacecraft_mass_tons
    );
}

/// Copy the physics pose onto the visual entity.
pub fn sync_spacecraft_transform(
    state: Res<PhysicsState>,
    mut query: Query<&mut Transform, With<Spacecraft>>,
) {
    for mut transform in &mut query {
        transform.translation = state.pos.as_vec3();
        transform.rotation = state.orientation.as_quat();
    }
}
