//! Rendering systems for the two-body visualizer.
//!
//! This module provides the visual scene (central body, spacecraft, light)
//! and the gizmo lines for the trail, the predicted trajectory and the
//! velocity vector. Physics coordinates are used directly as render
//! coordinates after an f64 to f32 conversion.

pub mod paths;
pub mod scene;

use bevy::prelude::*;

use self::paths::{draw_trail, draw_trajectory, draw_velocity_vector};
use self::scene::{setup_scene, SceneColors};
use crate::types::SimulationSet;

pub use self::paths::PathRenderSettings;

/// Plugin aggregating all rendering functionality.
pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        let colors = SceneColors::default();
        app.insert_resource(ClearColor(colors.background))
            .insert_resource(colors)
            .init_resource::<PathRenderSettings>()
            .add_systems(Startup, setup_scene)
            .add_systems(
                Update,
                (draw_trail, draw_trajectory, draw_velocity_vector).in_set(SimulationSet::Render),
            );
    }
}
