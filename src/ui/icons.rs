//! Phosphor icon definitions for the UI.
//!
//! Icons are loaded into egui once, from `setup_fonts`, the first time the
//! primary context is available.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

/// Resource to track if fonts have been initialized.
#[derive(Resource, Default)]
pub struct FontsInitialized(pub bool);

/// System to initialize Phosphor icon fonts.
/// Runs in EguiPrimaryContextPass where the egui context is guaranteed to be ready.
pub fn setup_fonts(mut contexts: EguiContexts, mut initialized: ResMut<FontsInitialized>) {
    if initialized.0 {
        return;
    }

    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);

    ctx.set_fonts(fonts);
    initialized.0 = true;

    info!("Phosphor icon fonts initialized");
}

/// Run condition for systems that draw icons.
pub fn fonts_ready(initialized: Res<FontsInitialized>) -> bool {
    initialized.0
}

// Browse all icons at https://phosphoricons.com/

pub const PLAY: &str = egui_phosphor::regular::PLAY;
pub const PAUSE: &str = egui_phosphor::regular::PAUSE;
pub const RESET: &str = egui_phosphor::regular::ARROW_COUNTER_CLOCKWISE;

/// Free orbit camera
pub const ORBIT: &str = egui_phosphor::regular::ARROWS_OUT_CARDINAL;
/// Follow camera
pub const FOLLOW: &str = egui_phosphor::regular::VIDEO_CAMERA;
pub const TOP_VIEW: &str = egui_phosphor::regular::ARROW_FAT_DOWN;
pub const SIDE_VIEW: &str = egui_phosphor::regular::ARROW_FAT_LEFT;
pub const FRONT_VIEW: &str = egui_phosphor::regular::ARROW_FAT_UP;

pub const SPACECRAFT: &str = egui_phosphor::regular::ROCKET;
pub const PLANET: &str = egui_phosphor::regular::GLOBE;
/// Circularize velocity
pub const CIRCLE: &str = egui_phosphor::regular::CIRCLE_DASHED;
pub const WARNING: &str = egui_phosphor::regular::WARNING;
pub const CLOCK: &str = egui_phosphor::regular::CLOCK;
