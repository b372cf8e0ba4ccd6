//! Camera system for the two-body visualizer.
//!
//! Three modes share one camera entity:
//! - `Free`: mouse-driven orbit controller around the central body
//! - `Follow`: chase camera behind the spacecraft (see [`follow`])
//! - `Fixed`: one-shot snap of the orbit controller to a preset view,
//!   after which the mode returns to `Free`

pub mod follow;
pub mod offset;

use bevy::{
    input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll},
    prelude::*,
};

pub use follow::{CameraFollowState, CameraPose, FollowCameraSettings};
pub use offset::{CameraOffset, OffsetAdjustment, OffsetBounds, OFFSET_PRESETS};

use crate::physics::LastFrame;
use crate::types::{PhysicsState, SimulationConstants, SimulationSet, SimulationTime};

/// Largest orbit radius for the free camera.
pub const MAX_ORBIT_RADIUS: f32 = 6000.0;

/// Closest approach of the free camera, as a multiple of the central radius.
pub const MIN_ORBIT_RADIUS_MULTIPLE: f32 = 1.1;

/// Pitch limit, just short of straight up or down.
pub const MAX_PITCH: f32 = 1.55;

/// Default radians of rotation per pixel of mouse drag.
pub const ROTATE_SPEED: f32 = 0.005;

/// Default zoom speed multiplier for scroll wheel.
pub const ZOOM_SPEED: f32 = 0.1;

/// Far clip plane; large enough for the widest orbit view.
pub const CAMERA_FAR: f32 = 10_000.0;

/// Marker component for the main camera.
#[derive(Component)]
pub struct MainCamera;

/// Preset viewing directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FixedView {
    /// Looking down the +Y axis onto the orbital plane.
    Top,
    /// Looking from +X.
    Side,
    /// Looking from +Z.
    Front,
}

impl FixedView {
    pub const ALL: [FixedView; 3] = [FixedView::Top, FixedView::Side, FixedView::Front];

    /// (yaw, pitch) of the orbit controller for this view.
    pub fn angles(self) -> (f32, f32) {
        match self {
            FixedView::Top => (0.0, MAX_PITCH),
            FixedView::Side => (std::f32::consts::FRAC_PI_2, 0.0),
            FixedView::Front => (0.0, 0.0),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FixedView::Top => "Top",
            FixedView::Side => "Side",
            FixedView::Front => "Front",
        }
    }
}

/// Active camera mode.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CameraMode {
    #[default]
    Free,
    Follow,
    Fixed(FixedView),
}

impl CameraMode {
    /// Mode after applying `command`.
    pub fn apply(self, command: CameraCommand) -> CameraMode {
        match command {
            CameraCommand::Free => CameraMode::Free,
            CameraCommand::Follow => CameraMode::Follow,
            CameraCommand::ToggleFollow => {
                if self == CameraMode::Follow {
                    CameraMode::Free
                } else {
                    CameraMode::Follow
                }
            }
            CameraCommand::Fixed(view) => CameraMode::Fixed(view),
        }
    }

    /// The orbit controller is ignored while following.
    pub fn orbit_controls_enabled(self) -> bool {
        self != CameraMode::Follow
    }

    pub fn label(self) -> &'static str {
        match self {
            CameraMode::Free => "Free",
            CameraMode::Follow => "Follow",
            CameraMode::Fixed(view) => view.label(),
        }
    }
}

/// Request to change the camera mode, from the keyboard or the panel.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraCommand {
    Free,
    Follow,
    ToggleFollow,
    Fixed(FixedView),
}

/// Whether the pointer is over an egui panel this frame.
///
/// Set by the UI; mouse dragging and scrolling are ignored while it is true.
#[derive(Resource, Default, Clone, Copy, Debug)]
pub struct PointerOverUi(pub bool);

/// Limits and speeds for the free orbit camera.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct OrbitControllerSettings {
    pub min_radius: f32,
    pub max_radius: f32,
    /// Radians of rotation per pixel of mouse drag.
    pub rotate_speed: f32,
    /// Fractional radius change per scroll line.
    pub zoom_speed: f32,
}

impl Default for OrbitControllerSettings {
    fn default() -> Self {
        let central_radius = SimulationConstants::default().central_body_radius as f32;
        Self {
            min_radius: central_radius * MIN_ORBIT_RADIUS_MULTIPLE,
            max_radius: MAX_ORBIT_RADIUS,
            rotate_speed: ROTATE_SPEED,
            zoom_speed: ZOOM_SPEED,
        }
    }
}

/// Spherical-coordinate orbit camera around a target point.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct OrbitController {
    pub target: Vec3,
    /// Angle around +Y, measured from +Z toward +X.
    pub yaw: f32,
    /// Elevation above the XZ plane.
    pub pitch: f32,
    pub radius: f32,
}

impl Default for OrbitController {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            yaw: std::f32::consts::FRAC_PI_4,
            pitch: 0.5,
            radius: 1200.0,
        }
    }
}

impl OrbitController {
    /// Camera position for the current angles and radius.
    pub fn eye(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.target + self.radius * Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw)
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.eye()).looking_at(self.target, Vec3::Y)
    }

    /// Rotate by a mouse drag in pixels.
    pub fn rotate(&mut self, delta: Vec2, settings: &OrbitControllerSettings) {
        self.yaw -= delta.x * settings.rotate_speed;
        self.pitch = (self.pitch + delta.y * settings.rotate_speed).clamp(-MAX_PITCH, MAX_PITCH);
    }

    /// Logarithmic zoom from scroll lines.
    pub fn zoom(&mut self, scroll: f32, settings: &OrbitControllerSettings) {
        let zoom_factor = 1.0 - scroll * settings.zoom_speed;
        self.radius = (self.radius * zoom_factor).clamp(settings.min_radius, settings.max_radius);
    }

    /// Snap to a preset view, keeping the radius.
    pub fn set_view(&mut self, view: FixedView) {
        (self.yaw, self.pitch) = view.angles();
    }
}

/// Plugin providing camera functionality.
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraMode>()
            .init_resource::<OrbitController>()
            .init_resource::<OrbitControllerSettings>()
            .init_resource::<FollowCameraSettings>()
            .init_resource::<CameraFollowState>()
            .init_resource::<PointerOverUi>()
            .add_message::<CameraCommand>()
            .add_systems(Startup, setup_camera)
            .add_systems(Update, apply_camera_commands.in_set(SimulationSet::Input))
            .add_systems(
                Update,
                (orbit_controller_input, update_camera_transform)
                    .chain()
                    .in_set(SimulationSet::Camera),
            );
    }
}

/// Spawn the main camera with perspective projection.
fn setup_camera(mut commands: Commands, controller: Res<OrbitController>) {
    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: 60.0_f32.to_radians(),
            near: 0.1,
            far: CAMERA_FAR,
            ..default()
        }),
        controller.transform(),
        MainCamera,
    ));
}

/// Handle mode changes requested this frame.
pub fn apply_camera_commands(
    mut commands: MessageReader<CameraCommand>,
    mut mode: ResMut<CameraMode>,
    mut controller: ResMut<OrbitController>,
    mut follow: ResMut<CameraFollowState>,
) {
    for command in commands.read() {
        let next = mode.apply(*command);
        if next == *mode {
            continue;
        }

        match next {
            CameraMode::Follow => follow.reset_tracking(),
            CameraMode::Fixed(view) => controller.set_view(view),
            CameraMode::Free => {}
        }
        info!("Camera mode: {}", next.label());
        *mode = next;
    }
}

/// Mouse drag (left button) rotates and the wheel zooms the orbit controller.
fn orbit_controller_input(
    mode: Res<CameraMode>,
    pointer_over_ui: Res<PointerOverUi>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    mouse_scroll: Res<AccumulatedMouseScroll>,
    settings: Res<OrbitControllerSettings>,
    mut controller: ResMut<OrbitController>,
) {
    if !mode.orbit_controls_enabled() || pointer_over_ui.0 {
        return;
    }

    if mouse_buttons.pressed(MouseButton::Left) && mouse_motion.delta != Vec2::ZERO {
        controller.rotate(mouse_motion.delta, &settings);
    }

    if mouse_scroll.delta.y != 0.0 {
        controller.zoom(mouse_scroll.delta.y, &settings);
    }
}

/// Place the camera for the active mode.
///
/// Fixed views are applied for one frame and then hand control back to the
/// free orbit controller.
pub fn update_camera_transform(
    state: Res<PhysicsState>,
    settings: Res<FollowCameraSettings>,
    sim_time: Res<SimulationTime>,
    last_frame: Res<LastFrame>,
    controller: Res<OrbitController>,
    mut follow: ResMut<CameraFollowState>,
    mut mode: ResMut<CameraMode>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
) {
    let Ok(mut transform) = camera_query.single_mut() else {
        return;
    };

    match *mode {
        CameraMode::Follow => {
            let dt = if sim_time.paused { 0.0 } else { last_frame.0.dt };
            *transform = follow.update(&state, &settings, dt).to_transform();
        }
        CameraMode::Free => *transform = controller.transform(),
        CameraMode::Fixed(_) => {
            *transform = controller.transform();
            *mode = CameraMode::Free;
        }
    }
}
