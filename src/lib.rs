//! Twobody - Two-Body Orbit Visualizer
//!
//! A library crate providing the spacecraft simulation, camera and
//! rendering components for testing and integration purposes.

pub mod camera;
pub mod collision;
pub mod config;
pub mod input;
pub mod math;
pub mod orbit;
pub mod physics;
pub mod prediction;
pub mod render;
pub mod spacecraft;
pub mod telemetry;
pub mod types;
pub mod ui;

#[cfg(test)]
pub mod test_utils;
