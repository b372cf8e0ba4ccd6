//! Trail, trajectory and velocity rendering using Bevy Gizmos.

use bevy::math::DVec3;
use bevy::prelude::*;

use crate::physics::Trail;
use crate::prediction::TrajectoryPath;
use crate::render::scene::SceneColors;
use crate::types::PhysicsState;

/// Settings for path rendering.
#[derive(Resource, Clone, Debug)]
pub struct PathRenderSettings {
    pub show_trail: bool,
    pub show_trajectory: bool,
    pub show_velocity: bool,
    /// Alpha of the oldest trail point; the newest is opaque.
    pub trail_min_alpha: f32,
    /// Velocity arrow length per unit of speed.
    pub velocity_scale: f32,
}

impl Default for PathRenderSettings {
    fn default() -> Self {
        Self {
            show_trail: true,
            show_trajectory: true,
            show_velocity: false,
            trail_min_alpha: 0.05,
            velocity_scale: 0.5,
        }
    }
}

/// Alpha ramp from `min_alpha` (oldest) to 1 (newest).
pub fn trail_alpha(index: usize, len: usize, min_alpha: f32) -> f32 {
    if len <= 1 {
        return 1.0;
    }
    let t = index as f32 / (len - 1) as f32;
    min_alpha + (1.0 - min_alpha) * t
}

/// Fading line strip through the recorded trail.
pub fn draw_trail(
    mut gizmos: Gizmos,
    trail: Res<Trail>,
    settings: Res<PathRenderSettings>,
    colors: Res<SceneColors>,
) {
    if !settings.show_trail || trail.len() < 2 {
        return;
    }

    let len = trail.len();
    gizmos.linestrip_gradient(trail.iter().enumerate().map(|(i, pos)| {
        let alpha = trail_alpha(i, len, settings.trail_min_alpha);
        (pos.as_vec3(), colors.trail.with_alpha(alpha))
    }));
}

/// Predicted path, starting at the spacecraft.
///
/// Drawn in the impact color when the prediction ends inside the central
/// body.
pub fn draw_trajectory(
    mut gizmos: Gizmos,
    state: Res<PhysicsState>,
    path: Res<TrajectoryPath>,
    settings: Res<PathRenderSettings>,
    colors: Res<SceneColors>,
) {
    if !settings.show_trajectory || path.points.is_empty() {
        return;
    }

    let color = if path.ends_in_collision {
        colors.trajectory_impact
    } else {
        colors.trajectory.with_alpha(0.6)
    };

    let points = std::iter::once(state.pos)
        .chain(path.points.iter().copied())
        .map(|p| p.as_vec3());
    gizmos.linestrip(points, color);
}

pub fn draw_velocity_vector(
    mut gizmos: Gizmos,
    state: Res<PhysicsState>,
    settings: Res<PathRenderSettings>,
    colors: Res<SceneColors>,
) {
    if !settings.show_velocity || state.vel == DVec3::ZERO {
        return;
    }

    let start = state.pos.as_vec3();
    let end = start + state.vel.as_vec3() * settings.velocity_scale;
    gizmos.arrow(start, end, colors.velocity);
}
