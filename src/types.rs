//! Core physics types and constants for the two-body simulation.
//!
//! Two unit systems live side by side: *simulation units* drive the
//! integrator, real SI units feed the telemetry readouts. Conversion between
//! the two is always linear.

use bevy::math::{DQuat, DVec3};
use bevy::prelude::*;

/// Per-frame ordering of simulation systems.
///
/// Integration always runs before anything that derives data from the
/// integrated state, so every consumer sees the same post-step state.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Keyboard shortcuts and reset requests.
    Input,
    /// Integrator (the only writer of `PhysicsState` besides reset).
    Physics,
    /// Collision bookkeeping.
    Collision,
    /// Trajectory prediction and orbital metrics.
    Derived,
    /// Follow camera and orbit controller.
    Camera,
    /// Transform sync and gizmo drawing.
    Render,
}

impl SimulationSet {
    /// Register the set chain on the `Update` schedule.
    pub fn configure(app: &mut App) {
        app.configure_sets(
            Update,
            (
                SimulationSet::Input,
                SimulationSet::Physics,
                SimulationSet::Collision,
                SimulationSet::Derived,
                SimulationSet::Camera,
                SimulationSet::Render,
            )
                .chain(),
        );
    }
}

// Simulation-scaled constants

/// Gravitational constant in simulation units.
pub const G_SIM: f64 = 20.0;

/// Central body mass in simulation units.
pub const CENTRAL_BODY_MASS_SIM: f64 = 20_000.0;

/// Simulation mass units per metric ton of spacecraft.
pub const SIM_MASS_PER_TON: f64 = 1.0;

/// Fixed integration step (simulation time units).
pub const SIMULATION_TIME_STEP: f64 = 0.016;

/// Simulation length units per kilometer (1 unit = 75 km).
pub const DISTANCE_SIM_UNITS_PER_KM: f64 = 1.0 / 75.0;

/// Simulation velocity units per km/s.
pub const VELOCITY_SIM_UNITS_PER_KMS: f64 = 8.5;

/// Visual body length of the spacecraft in simulation units.
pub const SPACECRAFT_LENGTH_SIM: f64 = 1.5;

/// Collisions push the craft out to this multiple of the central radius.
pub const SAFE_DISTANCE_MULTIPLE: f64 = 1.2;

/// Gravity is evaluated no closer than this (simulation units).
pub const MIN_GRAVITY_DISTANCE: f64 = 1e-3;

/// Longest real frame delta fed to the integrator (seconds).
pub const MAX_FRAME_DELTA: f64 = 0.1;

/// Upper bound for the time-scale multiplier.
pub const MAX_TIME_SCALE: f64 = 10.0;

// Real-world constants (SI units)

/// Gravitational constant (m³·kg⁻¹·s⁻²)
pub const G_REAL: f64 = 6.67430e-11;

/// Earth mass in kilograms
pub const EARTH_MASS_KG: f64 = 5.972e24;

/// Earth mean radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Kilograms per metric ton
pub const KG_PER_TON: f64 = 1000.0;

/// Immutable constants for one simulation run.
///
/// The central-body radius is a plain field here so that physics never has
/// to ask the renderer for geometry; the renderer reads the same value.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct SimulationConstants {
    /// Gravitational constant (simulation units).
    pub gravitational_constant: f64,
    /// Central body mass (simulation units).
    pub central_mass: f64,
    /// Spacecraft mass (simulation units).
    pub spacecraft_mass: f64,
    /// Fixed integration step.
    pub time_step: f64,
    /// Simulation length units per km.
    pub distance_units_per_km: f64,
    /// Simulation velocity units per km/s.
    pub velocity_units_per_km_s: f64,
    /// Central body radius in simulation units.
    pub central_body_radius: f64,
    /// Spacecraft effective length in simulation units.
    pub spacecraft_length: f64,
    /// Reposition distance after a collision, as a multiple of the radius.
    pub safe_distance_multiple: f64,
    /// Minimum distance used when evaluating gravity.
    pub min_gravity_distance: f64,
}

impl Default for SimulationConstants {
    fn default() -> Self {
        Self {
            gravitational_constant: G_SIM,
            central_mass: CENTRAL_BODY_MASS_SIM,
            spacecraft_mass: SIM_MASS_PER_TON,
            time_step: SIMULATION_TIME_STEP,
            distance_units_per_km: DISTANCE_SIM_UNITS_PER_KM,
            velocity_units_per_km_s: VELOCITY_SIM_UNITS_PER_KMS,
            central_body_radius: EARTH_RADIUS_KM * DISTANCE_SIM_UNITS_PER_KM,
            spacecraft_length: SPACECRAFT_LENGTH_SIM,
            safe_distance_multiple: SAFE_DISTANCE_MULTIPLE,
            min_gravity_distance: MIN_GRAVITY_DISTANCE,
        }
    }
}

impl SimulationConstants {
    /// Standard gravitational parameter G·M of the central body.
    pub fn gm(&self) -> f64 {
        self.gravitational_constant * self.central_mass
    }

    /// Distance below which the integrator reports a collision.
    pub fn collision_threshold(&self) -> f64 {
        self.central_body_radius + self.spacecraft_length * 0.5
    }

    /// Distance the spacecraft is moved to after a collision.
    pub fn safe_distance(&self) -> f64 {
        self.central_body_radius * self.safe_distance_multiple
    }

    /// Circular orbit speed (simulation units) at distance `r`.
    pub fn circular_speed(&self, r: f64) -> f64 {
        (self.gm() / r).sqrt()
    }

    /// Kilometers to simulation length units.
    pub fn km_to_sim(&self, km: f64) -> f64 {
        km * self.distance_units_per_km
    }

    /// Simulation length units to kilometers.
    pub fn sim_to_km(&self, units: f64) -> f64 {
        units / self.distance_units_per_km
    }

    /// km/s to simulation velocity units.
    pub fn km_s_to_sim(&self, km_s: f64) -> f64 {
        km_s * self.velocity_units_per_km_s
    }

    /// Simulation velocity units to km/s.
    pub fn sim_to_km_s(&self, units: f64) -> f64 {
        units / self.velocity_units_per_km_s
    }
}

/// Live state of the spacecraft.
///
/// Origin is the center of the central body. Mutated only by the integrator
/// and by the reset handler; everything else takes `Res<PhysicsState>`.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct PhysicsState {
    /// Position in simulation units.
    pub pos: DVec3,
    /// Velocity in simulation units per time unit.
    pub vel: DVec3,
    /// Smoothed heading. Local -Z is the nose.
    pub orientation: DQuat,
    /// Simulated time since the last reset.
    pub elapsed: f64,
}

impl Default for PhysicsState {
    fn default() -> Self {
        Self {
            pos: DVec3::ZERO,
            vel: DVec3::ZERO,
            orientation: DQuat::IDENTITY,
            elapsed: 0.0,
        }
    }
}

impl PhysicsState {
    /// Create a state at rest orientation with zero elapsed time.
    pub fn new(pos: DVec3, vel: DVec3) -> Self {
        Self {
            pos,
            vel,
            ..Default::default()
        }
    }

    /// Distance from the central body center.
    pub fn distance(&self) -> f64 {
        self.pos.length()
    }

    /// Speed magnitude.
    pub fn speed(&self) -> f64 {
        self.vel.length()
    }

    /// Rate of change of distance (positive when receding).
    pub fn radial_rate(&self) -> f64 {
        let r = self.distance();
        if r > 0.0 { self.pos.dot(self.vel) / r } else { 0.0 }
    }
}

/// Pause flag and time-scale multiplier.
#[derive(Resource, Clone, Debug)]
pub struct SimulationTime {
    /// Time scale multiplier in `[0, MAX_TIME_SCALE]`.
    pub scale: f64,
    /// Whether simulation is paused
    pub paused: bool,
}

impl Default for SimulationTime {
    fn default() -> Self {
        Self {
            scale: 1.0,
            paused: false,
        }
    }
}

impl SimulationTime {
    /// Set the time scale, clamped to the allowed range.
    pub fn set_scale(&mut self, scale: f64) {
        self.scale = if scale.is_finite() {
            scale.clamp(0.0, MAX_TIME_SCALE)
        } else {
            1.0
        };
    }

    /// Flip the pause flag and return the new value.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    /// Simulated time to advance for a real frame delta.
    ///
    /// Long frames (tab switches, debugger stops) are clamped before scaling.
    pub fn frame_dt(&self, real_delta: f64) -> f64 {
        if self.paused {
            return 0.0;
        }
        real_delta.clamp(0.0, MAX_FRAME_DELTA) * self.scale
    }
}

/// Run condition: simulation is not paused.
pub fn simulation_running(sim_time: Res<SimulationTime>) -> bool {
    !sim_time.paused
}
