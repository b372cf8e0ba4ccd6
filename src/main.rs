//! Twobody - Two-Body Orbit Visualizer
//!
//! A desktop application that flies a spacecraft around a central body
//! with a live trajectory prediction and a chase camera.

use bevy::prelude::*;

use twobody::camera::CameraPlugin;
use twobody::collision::CollisionPlugin;
use twobody::input::InputPlugin;
use twobody::orbit::OrbitPlugin;
use twobody::physics::PhysicsPlugin;
use twobody::prediction::PredictionPlugin;
use twobody::render::RenderPlugin;
use twobody::spacecraft::SpacecraftPlugin;
use twobody::ui::UiPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Twobody".into(),
                ..default()
            }),
            ..default()
        }))
        // Simulation plugins; PhysicsPlugin registers the SimulationSet chain
        .add_plugins((
            PhysicsPlugin,
            CollisionPlugin,
            OrbitPlugin,
            PredictionPlugin,
            SpacecraftPlugin,
        ))
        .add_plugins((CameraPlugin, InputPlugin, RenderPlugin, UiPlugin))
        .run();
}
