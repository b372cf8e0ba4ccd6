//! Semi-implicit (symplectic) Euler integration of the spacecraft.
//!
//! Each step updates velocity from gravity first and then moves the position
//! with the *new* velocity. This ordering keeps bound orbits bounded where
//! explicit Euler would spiral outward.

use bevy::math::DVec3;

use crate::collision::{resolve_collision, CollisionReport};
use crate::math::slerp_toward;
use crate::types::{PhysicsState, SimulationConstants, SimulationTime};

use super::gravity::gravity_acceleration;

/// Heading slerp fraction applied once per frame.
pub const HEADING_SLERP_FACTOR: f64 = 0.1;

/// Heading is only updated above this squared speed.
pub const HEADING_MIN_SPEED_SQ: f64 = 1e-5;

// =============================================================================
// Single step
// =============================================================================

/// Result of one integration step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StepOutcome {
    /// Gravity applied, state moved forward by `dt`.
    Advanced,
    /// Spacecraft was inside the collision threshold and has been repositioned.
    Collided(CollisionReport),
}

/// Advance the state by one semi-implicit Euler step of length `dt`.
///
/// If the spacecraft is closer than the collision threshold, no integration
/// happens and the collision handler resets it instead.
pub fn advance(state: &mut PhysicsState, constants: &SimulationConstants, dt: f64) -> StepOutcome {
    let distance = state.pos.length();
    debug_assert!(distance.is_finite(), "non-finite spacecraft position {:?}", state.pos);

    if distance < constants.collision_threshold() {
        return StepOutcome::Collided(resolve_collision(state, constants));
    }

    let acc = gravity_acceleration(state.pos, constants);

    // Velocity first, then position with the updated velocity
    state.vel += acc * dt;
    state.pos += state.vel * dt;
    state.elapsed += dt;

    debug_assert!(
        state.pos.is_finite() && state.vel.is_finite(),
        "integration produced non-finite state: pos={:?} vel={:?}",
        state.pos,
        state.vel
    );

    StepOutcome::Advanced
}

/// Nudge the spacecraft heading toward its velocity.
pub fn update_heading(state: &mut PhysicsState, factor: f64) {
    if state.vel.length_squared() > HEADING_MIN_SPEED_SQ {
        state.orientation = slerp_toward(state.orientation, state.vel, DVec3::Y, factor);
    }
}

// =============================================================================
// Frame driver
// =============================================================================

/// Summary of one frame of integration.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameReport {
    /// Simulated time requested for this frame.
    pub dt: f64,
    /// Number of sub-steps that integrated normally.
    pub steps: u32,
    /// Collision that ended the frame, if any.
    pub collision: Option<CollisionReport>,
}

/// Advance the state for one rendered frame.
///
/// The real frame delta is clamped and scaled by the time scale, then split
/// into equal sub-steps no longer than the fixed step. A collision ends the
/// frame. The heading is smoothed once per frame.
pub fn advance_frame(
    state: &mut PhysicsState,
    constants: &SimulationConstants,
    sim_time: &SimulationTime,
    real_delta: f64,
) -> FrameReport {
    let dt = sim_time.frame_dt(real_delta);
    let mut report = FrameReport {
        dt,
        ..Default::default()
    };

    if dt <= 0.0 {
        return report;
    }

    let substeps = (dt / constants.time_step).ceil().max(1.0) as u32;
    let h = dt / substeps as f64;

    for _ in 0..substeps {
        match advance(state, constants, h) {
            StepOutcome::Advanced => report.steps += 1,
            StepOutcome::Collided(collision) => {
                report.collision = Some(collision);
                break;
            }
        }
    }

    update_heading(state, HEADING_SLERP_FACTOR);
    report
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Basis;
    use approx::assert_relative_eq;
    use std::f64::consts::TAU;

    fn circular(constants: &SimulationConstants, r: f64) -> PhysicsState {
        PhysicsState::new(
            DVec3::new(r, 0.0, 0.0),
            DVec3::new(0.0, 0.0, constants.circular_speed(r)),
        )
    }

    #[test]
    fn test_velocity_updated_before_position() {
        let c = SimulationConstants::default();
        let mut state = PhysicsState::new(DVec3::new(300.0, 0.0, 0.0), DVec3::ZERO);
        let dt = 0.5;

        advance(&mut state, &c, dt);

        // Explicit Euler would leave the position unchanged on the first step
        let a = c.gm() / (300.0 * 300.0);
        assert_relative_eq!(state.vel.x, -a * dt, max_relative = 1e-12);
        assert_relative_eq!(state.pos.x, 300.0 - a * dt * dt, max_relative = 1e-12);
        assert_relative_eq!(state.elapsed, dt);
    }

    #[test]
    fn test_circular_orbit_one_period() {
        let c = SimulationConstants::default();
        let r = 560.0;
        let mut state = circular(&c, r);
        let period = TAU * (r.powi(3) / c.gm()).sqrt();

        let steps = (period / c.time_step).round() as usize;
        for _ in 0..steps {
            assert_eq!(advance(&mut state, &c, c.time_step), StepOutcome::Advanced);
        }

        let radius_error = (state.distance() - r).abs() / r;
        assert!(radius_error < 0.01, "radius error {:.4}%", radius_error * 100.0);

        let pos_error = (state.pos - DVec3::new(r, 0.0, 0.0)).length() / r;
        assert!(pos_error < 0.05, "position error {:.4}%", pos_error * 100.0);
    }

    #[test]
    fn test_collision_short_circuits_step() {
        let c = SimulationConstants::default();
        let mut state = PhysicsState::new(DVec3::new(50.0, 0.0, 0.0), DVec3::new(1.0, 2.0, 3.0));

        let outcome = advance(&mut state, &c, c.time_step);

        assert!(matches!(outcome, StepOutcome::Collided(_)));
        assert_eq!(state.vel, DVec3::ZERO);
        assert_relative_eq!(state.distance(), c.safe_distance(), max_relative = 1e-12);
        assert_eq!(state.elapsed, 0.0);
    }

    #[test]
    fn test_frame_substeps_respect_fixed_step() {
        let c = SimulationConstants::default();
        let mut time = SimulationTime::default();
        time.set_scale(5.0);
        let mut state = circular(&c, 560.0);

        let report = advance_frame(&mut state, &c, &time, 0.05);

        assert_relative_eq!(report.dt, 0.25);
        assert_eq!(report.steps, (0.25 / c.time_step).ceil() as u32);
        assert_relative_eq!(state.elapsed, 0.25, epsilon = 1e-12);
        assert!(report.collision.is_none());
    }

    #[test]
    fn test_frame_paused_or_zero_scale_does_nothing() {
        let c = SimulationConstants::default();
        let before = circular(&c, 560.0);

        let paused = SimulationTime {
            paused: true,
            ..Default::default()
        };
        let mut state = before.clone();
        let report = advance_frame(&mut state, &c, &paused, 0.016);
        assert_eq!(report.steps, 0);
        assert_eq!(state, before);

        let frozen = SimulationTime {
            scale: 0.0,
            paused: false,
        };
        let mut state = before.clone();
        advance_frame(&mut state, &c, &frozen, 0.016);
        assert_eq!(state, before);
    }

    #[test]
    fn test_frame_stops_at_collision() {
        let c = SimulationConstants::default();
        let time = SimulationTime::default();
        let mut state = PhysicsState::new(DVec3::new(0.0, 10.0, 0.0), DVec3::new(0.0, -5.0, 0.0));

        let report = advance_frame(&mut state, &c, &time, 0.1);

        assert_eq!(report.steps, 0);
        assert!(report.collision.is_some());
        assert_eq!(state.vel, DVec3::ZERO);
    }

    #[test]
    fn test_heading_turns_toward_velocity() {
        let c = SimulationConstants::default();
        let time = SimulationTime::default();
        let mut state = circular(&c, 560.0);

        for _ in 0..300 {
            advance_frame(&mut state, &c, &time, 0.016);
        }

        let forward = Basis::from_rotation(state.orientation).forward;
        let alignment = forward.dot(state.vel.normalize());
        assert!(alignment > 0.99, "heading alignment {alignment}");
    }

    #[test]
    fn test_heading_unchanged_when_nearly_still() {
        let mut state = PhysicsState::new(DVec3::new(500.0, 0.0, 0.0), DVec3::new(1e-3, 0.0, 0.0));
        let before = state.orientation;
        update_heading(&mut state, HEADING_SLERP_FACTOR);
        assert_eq!(state.orientation, before);
    }
}
