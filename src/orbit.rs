//! Orbital parameter estimation from the live spacecraft state.
//!
//! The displayed apoapsis, periapsis, semi-major axis and period come from
//! the *running* distance extrema, so they only settle once a full orbit has
//! been traced. `OrbitalElements` offers the closed-form vis-viva values as a
//! separate diagnostic.

use std::f64::consts::TAU;

use bevy::prelude::*;

use crate::types::{
    simulation_running, PhysicsState, SimulationConstants, SimulationSet,
};

/// Plugin providing per-frame orbital metrics.
pub struct OrbitPlugin;

impl Plugin for OrbitPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OrbitalHistory>()
            .init_resource::<OrbitalMetrics>()
            .add_systems(
                Update,
                update_orbital_metrics
                    .in_set(SimulationSet::Derived)
                    .run_if(simulation_running),
            );
    }
}

/// Running distance extrema since the last reset.
///
/// Also watches the sign of the radial rate to tell when an actual apoapsis
/// (outbound → inbound) and periapsis (inbound → outbound) have been passed.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct OrbitalHistory {
    /// Smallest distance observed (`+∞` before the first sample).
    pub periapsis: f64,
    /// Largest distance observed (`0` before the first sample).
    pub apoapsis: f64,
    /// Number of recorded samples.
    pub samples: u64,
    /// An outbound-to-inbound turn has been seen.
    pub apoapsis_passed: bool,
    /// An inbound-to-outbound turn has been seen.
    pub periapsis_passed: bool,
    last_radial_rate: Option<f64>,
}

impl Default for OrbitalHistory {
    fn default() -> Self {
        Self {
            periapsis: f64::INFINITY,
            apoapsis: 0.0,
            samples: 0,
            apoapsis_passed: false,
            periapsis_passed: false,
            last_radial_rate: None,
        }
    }
}

impl OrbitalHistory {
    /// Forget everything (simulation reset).
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Record one distance sample together with its radial rate.
    pub fn record(&mut self, distance: f64, radial_rate: f64) {
        debug_assert!(distance >= 0.0, "negative distance {distance}");

        self.periapsis = self.periapsis.min(distance);
        self.apoapsis = self.apoapsis.max(distance);
        self.samples += 1;

        if let Some(prev) = self.last_radial_rate {
            if prev > 0.0 && radial_rate <= 0.0 {
                self.apoapsis_passed = true;
            } else if prev < 0.0 && radial_rate >= 0.0 {
                self.periapsis_passed = true;
            }
        }
        self.last_radial_rate = Some(radial_rate);

        debug_assert!(self.periapsis <= distance && distance <= self.apoapsis);
    }

    /// Whether at least one sample has been recorded.
    pub fn has_samples(&self) -> bool {
        self.samples > 0
    }
}

/// Derived orbit figures for the current frame.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq)]
pub struct OrbitalMetrics {
    /// Current distance from the central body.
    pub distance: f64,
    /// Running minimum distance.
    pub periapsis: f64,
    /// Running maximum distance.
    pub apoapsis: f64,
    /// `(apoapsis + periapsis) / 2`.
    pub semi_major_axis: f64,
    /// Kepler period for `semi_major_axis`, simulation time units.
    pub period: f64,
    /// `½·m·|v|²`
    pub kinetic_energy: f64,
    /// `-G·M·m / r`
    pub potential_energy: f64,
    /// True until both an apoapsis and a periapsis passage have been seen.
    pub period_is_provisional: bool,
}

impl OrbitalMetrics {
    /// Total mechanical energy.
    pub fn total_energy(&self) -> f64 {
        self.kinetic_energy + self.potential_energy
    }

    /// Period expressed in fixed integration steps.
    pub fn period_steps(&self, time_step: f64) -> f64 {
        self.period / time_step
    }
}

/// Total mechanical energy of the spacecraft (simulation units).
pub fn mechanical_energy(state: &PhysicsState, constants: &SimulationConstants) -> (f64, f64) {
    let m = constants.spacecraft_mass;
    let r = state.distance().max(constants.min_gravity_distance);
    let kinetic = 0.5 * m * state.vel.length_squared();
    let potential = -constants.gm() * m / r;
    (kinetic, potential)
}

/// Update the running history from the current state and derive the metrics.
pub fn update_metrics(
    state: &PhysicsState,
    history: &mut OrbitalHistory,
    constants: &SimulationConstants,
) -> OrbitalMetrics {
    let distance = state.distance();
    history.record(distance, state.radial_rate());

    let semi_major_axis = (history.apoapsis + history.periapsis) / 2.0;
    let period = TAU * (semi_major_axis.powi(3) / constants.gm()).sqrt();
    let (kinetic_energy, potential_energy) = mechanical_energy(state, constants);

    OrbitalMetrics {
        distance,
        periapsis: history.periapsis,
        apoapsis: history.apoapsis,
        semi_major_axis,
        period,
        kinetic_energy,
        potential_energy,
        period_is_provisional: !(history.apoapsis_passed && history.periapsis_passed),
    }
}

/// Per-frame metrics system.
fn update_orbital_metrics(
    state: Res<PhysicsState>,
    constants: Res<SimulationConstants>,
    mut history: ResMut<OrbitalHistory>,
    mut metrics: ResMut<OrbitalMetrics>,
) {
    let was_provisional = metrics.period_is_provisional || !history.has_samples();
    *metrics = update_metrics(&state, &mut history, &constants);

    if was_provisional && !metrics.period_is_provisional {
        debug!(
            "Orbit traced: periapsis {:.1}, apoapsis {:.1}, period {:.1}",
            metrics.periapsis, metrics.apoapsis, metrics.period
        );
    }
}

/// Closed-form two-body elements from an instantaneous state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitalElements {
    /// Specific orbital energy `v²/2 - GM/r`.
    pub specific_energy: f64,
    /// Eccentricity (magnitude of the eccentricity vector).
    pub eccentricity: f64,
    /// Semi-major axis; `None` for unbound trajectories.
    pub semi_major_axis: Option<f64>,
    /// Orbital period; `None` for unbound trajectories.
    pub period: Option<f64>,
    /// Closest approach `a(1-e)` (or `p/(1+e)` when unbound).
    pub periapsis: f64,
    /// Farthest point `a(1+e)`; `None` for unbound trajectories.
    pub apoapsis: Option<f64>,
}

impl OrbitalElements {
    /// Derive elements from position and velocity using vis-viva.
    ///
    /// Returns `None` at the center of the body, where nothing is defined.
    pub fn from_state(state: &PhysicsState, constants: &SimulationConstants) -> Option<Self> {
        let mu = constants.gm();
        let r = state.distance();
        if r <= constants.min_gravity_distance {
            return None;
        }

        let v2 = state.vel.length_squared();
        let specific_energy = 0.5 * v2 - mu / r;

        let h = state.pos.cross(state.vel);
        let e_vec = state.vel.cross(h) / mu - state.pos / r;
        let eccentricity = e_vec.length();

        let (semi_major_axis, period, apoapsis) = if specific_energy < 0.0 {
            let a = -mu / (2.0 * specific_energy);
            (
                Some(a),
                Some(TAU * (a.powi(3) / mu).sqrt()),
                Some(a * (1.0 + eccentricity)),
            )
        } else {
            (None, None, None)
        };

        let semi_latus_rectum = h.length_squared() / mu;
        let periapsis = semi_latus_rectum / (1.0 + eccentricity);

        Some(Self {
            specific_energy,
            eccentricity,
            semi_major_axis,
            period,
            periapsis,
            apoapsis,
        })
    }

    /// Whether the trajectory is a closed ellipse.
    pub fn is_bound(&self) -> bool {
        self.specific_energy < 0.0
    }
}
