//! Real-unit readouts for the control panel.
//!
//! Distances and speeds are converted back from simulation units. The
//! gravitational force is computed independently from real-world constants
//! (Earth mass, SI gravitational constant) rather than from the scaled
//! simulation constants.

use crate::orbit::OrbitalMetrics;
use crate::types::{
    PhysicsState, SimulationConstants, EARTH_MASS_KG, G_REAL, KG_PER_TON, SIM_MASS_PER_TON,
};

/// Snapshot of everything the display shows.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Telemetry {
    /// Distance from the central body center (km).
    pub distance_km: f64,
    /// Speed (km/s).
    pub speed_km_s: f64,
    /// Real gravitational force on the spacecraft (N); `None` at zero distance.
    pub gravity_force_n: Option<f64>,
    /// Running periapsis (km); `None` before the first sample.
    pub periapsis_km: Option<f64>,
    /// Running apoapsis (km); `None` before the first sample.
    pub apoapsis_km: Option<f64>,
    /// Semi-major axis estimate (km).
    pub semi_major_axis_km: f64,
    /// Period estimate in simulation time units.
    pub period: f64,
    /// Period estimate in fixed integration steps.
    pub period_steps: f64,
    /// See `OrbitalMetrics::period_is_provisional`.
    pub period_is_provisional: bool,
    /// Total mechanical energy (simulation units).
    pub total_energy: f64,
    /// Simulated time since reset.
    pub elapsed: f64,
}

impl Telemetry {
    /// Readouts for the running simulation.
    ///
    /// The force uses the mass applied at the last reset, not the pending
    /// slider value.
    pub fn compute(
        state: &PhysicsState,
        constants: &SimulationConstants,
        metrics: &OrbitalMetrics,
    ) -> Self {
        let distance_km = constants.sim_to_km(state.distance());
        let has_extrema = metrics.periapsis.is_finite() && metrics.apoapsis > 0.0;

        Self {
            distance_km,
            speed_km_s: constants.sim_to_km_s(state.speed()),
            gravity_force_n: real_gravitational_force(distance_km, spacecraft_mass_kg(constants)),
            periapsis_km: has_extrema.then(|| constants.sim_to_km(metrics.periapsis)),
            apoapsis_km: has_extrema.then(|| constants.sim_to_km(metrics.apoapsis)),
            semi_major_axis_km: if has_extrema {
                constants.sim_to_km(metrics.semi_major_axis)
            } else {
                0.0
            },
            period: metrics.period,
            period_steps: metrics.period_steps(constants.time_step),
            period_is_provisional: metrics.period_is_provisional,
            total_energy: metrics.total_energy(),
            elapsed: state.elapsed,
        }
    }
}

/// Mass of the simulated spacecraft in kilograms.
pub fn spacecraft_mass_kg(constants: &SimulationConstants) -> f64 {
    constants.spacecraft_mass / SIM_MASS_PER_TON * KG_PER_TON
}

/// Newtonian force between Earth and a spacecraft of `mass_kg` at
/// `distance_km` from Earth's center, in newtons.
pub fn real_gravitational_force(distance_km: f64, mass_kg: f64) -> Option<f64> {
    let distance_m = distance_km * 1000.0;
    if distance_m > 0.0 {
        Some(G_REAL * EARTH_MASS_KG * mass_kg / (distance_m * distance_m))
    } else {
        None
    }
}
