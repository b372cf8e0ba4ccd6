//! User-supplied initial conditions and their validation.
//!
//! Values arrive in real units (tons, km, km/s) from the control panel and
//! are checked here, at the input boundary, before they seed the physics
//! state. The integrator itself never validates.

use std::ops::RangeInclusive;

use bevy::math::DVec3;
use bevy::prelude::*;

use crate::types::{PhysicsState, SimulationConstants, MAX_TIME_SCALE, SIM_MASS_PER_TON};

/// Spacecraft mass slider range (metric tons).
pub const MASS_RANGE_TONS: RangeInclusive<f64> = 0.1..=100.0;

/// Orbital distance slider range (km from the central body center).
pub const DISTANCE_RANGE_KM: RangeInclusive<f64> = 7000.0..=100_000.0;

/// Initial velocity slider range (km/s).
pub const VELOCITY_RANGE_KM_S: RangeInclusive<f64> = 0.0..=12.0;

/// Time scale slider range.
pub const TIME_SCALE_RANGE: RangeInclusive<f64> = 0.0..=MAX_TIME_SCALE;

/// Default orbital distance, roughly geostationary.
pub const DEFAULT_DISTANCE_KM: f64 = 42_000.0;

/// Starting positions closer than this multiple of the central radius are
/// pushed out on reset.
pub const MIN_START_RADIUS_MULTIPLE: f64 = 1.05;

/// Rejected initial-condition input.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },

    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },

    #[error("{field} = {value} is outside the allowed range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// Initial conditions as entered by the user, in real units.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct InitialConditions {
    /// Spacecraft mass in metric tons.
    pub spacecraft_mass_tons: f64,
    /// Distance from the central body center in km.
    pub orbital_distance_km: f64,
    /// Initial speed in km/s, perpendicular to the radius.
    pub initial_velocity_km_s: f64,
    /// Time scale multiplier.
    pub time_scale: f64,
}

impl Default for InitialConditions {
    fn default() -> Self {
        Self::circular(DEFAULT_DISTANCE_KM, &SimulationConstants::default())
    }
}

impl InitialConditions {
    /// One-ton spacecraft on a circular orbit at `distance_km`.
    pub fn circular(distance_km: f64, constants: &SimulationConstants) -> Self {
        let r = constants.km_to_sim(distance_km);
        Self {
            spacecraft_mass_tons: 1.0,
            orbital_distance_km: distance_km,
            initial_velocity_km_s: constants.sim_to_km_s(constants.circular_speed(r)),
            time_scale: 1.0,
        }
    }

    /// Check every field against its allowed range.
    pub fn validate(&self) -> Result<(), InputError> {
        check("spacecraft mass", self.spacecraft_mass_tons, &MASS_RANGE_TONS)?;
        check("orbital distance", self.orbital_distance_km, &DISTANCE_RANGE_KM)?;
        check("initial velocity", self.initial_velocity_km_s, &VELOCITY_RANGE_KM_S)?;
        check("time scale", self.time_scale, &TIME_SCALE_RANGE)?;
        Ok(())
    }

    /// Copy with every field coerced into range. Non-finite values fall
    /// back to the defaults.
    pub fn clamped(&self) -> Self {
        let defaults = Self::default();
        Self {
            spacecraft_mass_tons: clamp_or(self.spacecraft_mass_tons, &MASS_RANGE_TONS, defaults.spacecraft_mass_tons),
            orbital_distance_km: clamp_or(self.orbital_distance_km, &DISTANCE_RANGE_KM, defaults.orbital_distance_km),
            initial_velocity_km_s: clamp_or(
                self.initial_velocity_km_s,
                &VELOCITY_RANGE_KM_S,
                defaults.initial_velocity_km_s,
            ),
            time_scale: clamp_or(self.time_scale, &TIME_SCALE_RANGE, defaults.time_scale),
        }
    }

    /// Spacecraft mass in simulation units.
    pub fn spacecraft_mass_sim(&self) -> f64 {
        self.spacecraft_mass_tons * SIM_MASS_PER_TON
    }

    /// Build the starting state: on the +X axis, moving along +Z.
    ///
    /// A start inside `MIN_START_RADIUS_MULTIPLE` radii is moved out to it.
    pub fn seed(&self, constants: &SimulationConstants) -> Result<PhysicsState, InputError> {
        self.validate()?;

        let min_start = constants.central_body_radius * MIN_START_RADIUS_MULTIPLE;
        let r = constants.km_to_sim(self.orbital_distance_km).max(min_start);
        let v = constants.km_s_to_sim(self.initial_velocity_km_s);

        Ok(PhysicsState::new(DVec3::new(r, 0.0, 0.0), DVec3::new(0.0, 0.0, v)))
    }
}

fn check(field: &'static str, value: f64, range: &RangeInclusive<f64>) -> Result<(), InputError> {
    if !value.is_finite() {
        return Err(InputError::NonFinite { field });
    }
    if value < 0.0 {
        return Err(InputError::Negative { field, value });
    }
    if !range.contains(&value) {
        return Err(InputError::OutOfRange {
            field,
            value,
            min: *range.start(),
            max: *range.end(),
        });
    }
    Ok(())
}

fn clamp_or(value: f64, range: &RangeInclusive<f64>, fallback: f64) -> f64 {
    if value.is_finite() {
        value.clamp(*range.start(), *range.end())
    } else {
        fallback
    }
}
