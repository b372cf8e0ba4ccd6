//! Keyboard shortcuts.
//!
//! Simulation control (pause, reset, time scale), camera mode selection and
//! follow-camera offset adjustments. Mouse handling for the free camera
//! lives in the camera module.

use bevy::prelude::*;

use crate::camera::{
    apply_camera_commands, CameraCommand, CameraFollowState, FixedView, FollowCameraSettings,
    OffsetAdjustment,
};
use crate::config::InitialConditions;
use crate::spacecraft::{handle_reset, ResetSimulation};
use crate::types::{SimulationSet, SimulationTime, MAX_TIME_SCALE};

/// Smallest time scale reachable with the `[` key.
pub const MIN_KEY_TIME_SCALE: f64 = 0.125;

/// Plugin providing keyboard input handling.
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (simulation_shortcuts, camera_shortcuts, offset_shortcuts)
                .in_set(SimulationSet::Input)
                .before(handle_reset)
                .before(apply_camera_commands),
        );
    }
}

/// Pause, reset and time scale.
fn simulation_shortcuts(
    keys: Res<ButtonInput<KeyCode>>,
    mut sim_time: ResMut<SimulationTime>,
    mut conditions: ResMut<InitialConditions>,
    mut resets: MessageWriter<ResetSimulation>,
) {
    // Space: toggle pause
    if keys.just_pressed(KeyCode::Space) {
        let paused = sim_time.toggle_pause();
        info!("Simulation {}", if paused { "paused" } else { "running" });
    }

    if keys.just_pressed(KeyCode::Backspace) {
        resets.write(ResetSimulation);
    }

    // Time controls: [ and ] to adjust simulation speed
    let scale = if keys.just_pressed(KeyCode::BracketLeft) {
        Some((sim_time.scale * 0.5).max(MIN_KEY_TIME_SCALE))
    } else if keys.just_pressed(KeyCode::BracketRight) {
        Some(if sim_time.scale <= 0.0 {
            MIN_KEY_TIME_SCALE
        } else {
            (sim_time.scale * 2.0).min(MAX_TIME_SCALE)
        })
    } else {
        None
    };

    if let Some(scale) = scale {
        sim_time.set_scale(scale);
        // Keep the next reset at the chosen speed
        conditions.time_scale = sim_time.scale;
        info!("Time scale: {}x", sim_time.scale);
    }
}

/// Camera mode selection.
fn camera_shortcuts(keys: Res<ButtonInput<KeyCode>>, mut commands: MessageWriter<CameraCommand>) {
    let bindings = [
        (KeyCode::KeyF, CameraCommand::ToggleFollow),
        (KeyCode::Digit1, CameraCommand::Free),
        (KeyCode::Digit2, CameraCommand::Fixed(FixedView::Top)),
        (KeyCode::Digit3, CameraCommand::Fixed(FixedView::Side)),
        (KeyCode::Digit4, CameraCommand::Fixed(FixedView::Front)),
    ];

    for (key, command) in bindings {
        if keys.just_pressed(key) {
            commands.write(command);
        }
    }
}

/// Map the keys pressed this frame to follow-offset adjustments.
pub fn offset_adjustments(
    keys: &ButtonInput<KeyCode>,
    step: f64,
    rotate_step: f64,
) -> Vec<OffsetAdjustment> {
    let bindings = [
        (KeyCode::ArrowLeft, OffsetAdjustment::Lateral(-step)),
        (KeyCode::ArrowRight, OffsetAdjustment::Lateral(step)),
        (KeyCode::ArrowUp, OffsetAdjustment::Vertical(step)),
        (KeyCode::ArrowDown, OffsetAdjustment::Vertical(-step)),
        (KeyCode::Equal, OffsetAdjustment::Distance(-step)),
        (KeyCode::NumpadAdd, OffsetAdjustment::Distance(-step)),
        (KeyCode::Minus, OffsetAdjustment::Distance(step)),
        (KeyCode::NumpadSubtract, OffsetAdjustment::Distance(step)),
        (KeyCode::KeyQ, OffsetAdjustment::Rotate(-rotate_step)),
        (KeyCode::KeyE, OffsetAdjustment::Rotate(rotate_step)),
        (KeyCode::KeyC, OffsetAdjustment::NextPreset),
        (KeyCode::KeyR, OffsetAdjustment::Reset),
        (KeyCode::KeyV, OffsetAdjustment::FlipVertical),
    ];

    bindings
        .into_iter()
        .filter(|(key, _)| keys.just_pressed(*key))
        .map(|(_, adjustment)| adjustment)
        .collect()
}

/// Follow-camera offset adjustments.
fn offset_shortcuts(
    keys: Res<ButtonInput<KeyCode>>,
    settings: Res<FollowCameraSettings>,
    mut follow: ResMut<CameraFollowState>,
) {
    for adjustment in offset_adjustments(&keys, settings.offset_step, settings.rotate_step) {
        if !follow.offset.apply(adjustment, &settings.offset_bounds) {
            debug!("Camera offset adjustment {adjustment:?} out of range");
        }
    }
}
