//! Side panel with initial conditions, simulation controls, camera modes
//! and telemetry readouts.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use super::icons;
use crate::camera::{CameraCommand, CameraMode, FixedView, PointerOverUi};
use crate::collision::CollisionState;
use crate::config::{
    InitialConditions, DISTANCE_RANGE_KM, MASS_RANGE_TONS, TIME_SCALE_RANGE, VELOCITY_RANGE_KM_S,
};
use crate::orbit::OrbitalMetrics;
use crate::prediction::PredictionSettings;
use crate::render::PathRenderSettings;
use crate::spacecraft::ResetSimulation;
use crate::telemetry::Telemetry;
use crate::types::{PhysicsState, SimulationConstants, SimulationTime};

/// Period as `h:mm:ss` of simulated time.
pub fn format_period(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "--".to_string();
    }
    let total = seconds.round() as u64;
    format!("{}:{:02}:{:02}", total / 3600, (total / 60) % 60, total % 60)
}

fn optional_km(value: Option<f64>) -> String {
    value.map_or_else(|| "--".to_string(), |km| format!("{km:.0} km"))
}

/// System that renders the control panel.
pub fn control_panel_system(
    mut contexts: EguiContexts,
    mut sim_time: ResMut<SimulationTime>,
    mut conditions: ResMut<InitialConditions>,
    mut prediction: ResMut<PredictionSettings>,
    mut paths: ResMut<PathRenderSettings>,
    mut pointer_over_ui: ResMut<PointerOverUi>,
    mut resets: MessageWriter<ResetSimulation>,
    mut camera_commands: MessageWriter<CameraCommand>,
    constants: Res<SimulationConstants>,
    state: Res<PhysicsState>,
    metrics: Res<OrbitalMetrics>,
    collisions: Res<CollisionState>,
    mode: Res<CameraMode>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    egui::SidePanel::left("control_panel")
        .resizable(false)
        .default_width(280.0)
        .show(ctx, |ui| {
            ui.heading(format!("{} Two-body orbit", icons::PLANET));
            ui.separator();

            initial_conditions_section(ui, &mut conditions, &constants, &mut resets);
            ui.separator();

            simulation_section(ui, &mut sim_time, &mut conditions, &mut resets);
            ui.separator();

            camera_section(ui, *mode, &mut camera_commands);
            ui.separator();

            ui.collapsing("Display", |ui| {
                ui.checkbox(&mut paths.show_trail, "Trail");
                ui.checkbox(&mut prediction.enabled, "Predicted trajectory");
                paths.show_trajectory = prediction.enabled;
                ui.checkbox(&mut paths.show_velocity, "Velocity vector");
            });
            ui.separator();

            let telemetry = Telemetry::compute(&state, &constants, &metrics);
            telemetry_section(ui, &telemetry);

            if let Some(report) = collisions.last_collision {
                ui.separator();
                ui.colored_label(
                    egui::Color32::from_rgb(255, 110, 90),
                    format!(
                        "{} Impact at t = {:.1} ({:.2} km/s), {} total",
                        icons::WARNING,
                        report.time,
                        constants.sim_to_km_s(report.impact_speed()),
                        collisions.count
                    ),
                );
            }
        });

    pointer_over_ui.0 = ctx.is_pointer_over_area() || ctx.wants_pointer_input();
}

fn initial_conditions_section(
    ui: &mut egui::Ui,
    conditions: &mut InitialConditions,
    constants: &SimulationConstants,
    resets: &mut MessageWriter<ResetSimulation>,
) {
    ui.label(egui::RichText::new(format!("{} Initial conditions", icons::SPACECRAFT)).strong());

    ui.add(
        egui::Slider::new(&mut conditions.spacecraft_mass_tons, MASS_RANGE_TONS)
            .text("Mass")
            .suffix(" t")
            .logarithmic(true),
    );
    ui.add(
        egui::Slider::new(&mut conditions.orbital_distance_km, DISTANCE_RANGE_KM)
            .text("Distance")
            .suffix(" km")
            .fixed_decimals(0),
    );
    ui.add(
        egui::Slider::new(&mut conditions.initial_velocity_km_s, VELOCITY_RANGE_KM_S)
            .text("Velocity")
            .suffix(" km/s")
            .fixed_decimals(3),
    );

    ui.horizontal(|ui| {
        if ui
            .button(format!("{} Circular", icons::CIRCLE))
            .on_hover_text("Set the circular speed for this distance")
            .clicked()
        {
            let time_scale = conditions.time_scale;
            let mass = conditions.spacecraft_mass_tons;
            *conditions = InitialConditions {
                spacecraft_mass_tons: mass,
                time_scale,
                ..InitialConditions::circular(conditions.orbital_distance_km, constants)
            }
            .clamped();
        }

        if ui
            .button(format!("{} Apply", icons::RESET))
            .on_hover_text("Restart with these values (Backspace)")
            .clicked()
        {
            resets.write(ResetSimulation);
        }
    });
}

fn simulation_section(
    ui: &mut egui::Ui,
    sim_time: &mut SimulationTime,
    conditions: &mut InitialConditions,
    resets: &mut MessageWriter<ResetSimulation>,
) {
    ui.label(egui::RichText::new(format!("{} Simulation", icons::CLOCK)).strong());

    ui.horizontal(|ui| {
        let (icon, hover) = if sim_time.paused {
            (icons::PLAY, "Play (Space)")
        } else {
            (icons::PAUSE, "Pause (Space)")
        };
        if ui.button(icon).on_hover_text(hover).clicked() {
            let paused = sim_time.toggle_pause();
            info!("Simulation {}", if paused { "paused" } else { "running" });
        }

        if ui
            .button(format!("{} Reset", icons::RESET))
            .on_hover_text("Reset simulation (Backspace)")
            .clicked()
        {
            resets.write(ResetSimulation);
        }
    });

    let mut scale = sim_time.scale;
    if ui
        .add(
            egui::Slider::new(&mut scale, TIME_SCALE_RANGE)
                .text("Time scale")
                .suffix("x")
                .fixed_decimals(2),
        )
        .changed()
    {
        sim_time.set_scale(scale);
        conditions.time_scale = sim_time.scale;
    }
}

fn camera_section(
    ui: &mut egui::Ui,
    mode: CameraMode,
    commands: &mut MessageWriter<CameraCommand>,
) {
    ui.label(egui::RichText::new("Camera").strong());
    ui.horizontal_wrapped(|ui| {
        let buttons = [
            (icons::ORBIT, "Free (1)", CameraCommand::Free, mode == CameraMode::Free),
            (icons::FOLLOW, "Follow (F)", CameraCommand::Follow, mode == CameraMode::Follow),
            (icons::TOP_VIEW, "Top (2)", CameraCommand::Fixed(FixedView::Top), false),
            (icons::SIDE_VIEW, "Side (3)", CameraCommand::Fixed(FixedView::Side), false),
            (icons::FRONT_VIEW, "Front (4)", CameraCommand::Fixed(FixedView::Front), false),
        ];

        for (icon, hover, command, selected) in buttons {
            if ui.selectable_label(selected, icon).on_hover_text(hover).clicked() {
                commands.write(command);
            }
        }
    });
    if mode == CameraMode::Follow {
        ui.small("Arrows, +/-, Q/E, C, R, V adjust the view");
    }
}

fn telemetry_section(ui: &mut egui::Ui, t: &Telemetry) {
    ui.label(egui::RichText::new("Telemetry").strong());

    egui::Grid::new("telemetry_grid")
        .num_columns(2)
        .spacing([12.0, 4.0])
        .show(ui, |ui| {
            ui.label("Distance");
            ui.monospace(format!("{:.0} km", t.distance_km));
            ui.end_row();

            ui.label("Speed");
            ui.monospace(format!("{:.3} km/s", t.speed_km_s));
            ui.end_row();

            ui.label("Gravity");
            ui.monospace(t.gravity_force_n.map_or_else(|| "--".to_string(), |f| format!("{f:.3} N")));
            ui.end_row();

            ui.label("Periapsis");
            ui.monospace(optional_km(t.periapsis_km));
            ui.end_row();

            ui.label("Apoapsis");
            ui.monospace(optional_km(t.apoapsis_km));
            ui.end_row();

            ui.label("Semi-major axis");
            ui.monospace(format!("{:.0} km", t.semi_major_axis_km));
            ui.end_row();

            ui.label("Period");
            let suffix = if t.period_is_provisional { " (est.)" } else { "" };
            ui.monospace(format!(
                "{} / {:.0} steps{suffix}",
                format_period(t.period),
                t.period_steps
            ));
            ui.end_row();

            ui.label("Energy");
            ui.monospace(format!("{:.1}", t.total_energy));
            ui.end_row();

            ui.label("Elapsed");
            ui.monospace(format_period(t.elapsed));
            ui.end_row();
        });
}
