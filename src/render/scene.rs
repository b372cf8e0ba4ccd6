//! Static scene: central body, spacecraft mesh and lighting.

use bevy::prelude::*;

use crate::spacecraft::Spacecraft;
use crate::types::SimulationConstants;

/// Colors shared by meshes and gizmos.
#[derive(Resource, Clone, Debug)]
pub struct SceneColors {
    pub background: Color,
    pub central_body: Color,
    pub spacecraft_hull: Color,
    pub spacecraft_nose: Color,
    pub trail: Color,
    pub trajectory: Color,
    pub trajectory_impact: Color,
    pub velocity: Color,
}

impl Default for SceneColors {
    fn default() -> Self {
        Self {
            background: Color::srgb(0.01, 0.01, 0.03),
            central_body: Color::srgb(0.15, 0.35, 0.75),
            spacecraft_hull: Color::srgb(0.85, 0.85, 0.9),
            spacecraft_nose: Color::srgb(0.9, 0.3, 0.2),
            trail: Color::srgb(0.3, 0.9, 1.0),
            trajectory: Color::srgb(1.0, 0.85, 0.3),
            trajectory_impact: Color::srgb(1.0, 0.3, 0.25),
            velocity: Color::srgb(0.4, 1.0, 0.4),
        }
    }
}

/// Spawn the central body, the spacecraft and the sun light.
pub fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    constants: Res<SimulationConstants>,
    colors: Res<SceneColors>,
) {
    let radius = constants.central_body_radius as f32;
    commands.spawn((
        Name::new("Central body"),
        Mesh3d(meshes.add(Sphere::new(radius).mesh().uv(64, 32))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: colors.central_body,
            perceptual_roughness: 0.9,
            ..default()
        })),
        Transform::default(),
    ));

    spawn_spacecraft(&mut commands, &mut meshes, &mut materials, &constants, &colors);

    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            ..default()
        },
        Transform::from_xyz(1.0, 0.6, 0.4).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

/// Capsule hull with a cone nose, pointing along local -Z.
fn spawn_spacecraft(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    constants: &SimulationConstants,
    colors: &SceneColors,
) {
    let length = constants.spacecraft_length as f32;
    let hull_radius = length / 6.0;
    let nose_height = length / 3.0;

    let hull = meshes.add(Capsule3d::new(hull_radius, length - 2.0 * hull_radius));
    let nose = meshes.add(Cone {
        radius: hull_radius,
        height: nose_height,
    });
    let hull_material = materials.add(StandardMaterial {
        base_color: colors.spacecraft_hull,
        metallic: 0.6,
        perceptual_roughness: 0.4,
        ..default()
    });
    let nose_material = materials.add(StandardMaterial {
        base_color: colors.spacecraft_nose,
        perceptual_roughness: 0.6,
        ..default()
    });

    // Both primitives are built along +Y; turn +Y to -Z
    let to_forward = Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2);

    commands
        .spawn((
            Spacecraft,
            Name::new("Spacecraft"),
            Transform::default(),
            Visibility::default(),
        ))
        .with_children(|parent| {
            parent.spawn((
                Mesh3d(hull),
                MeshMaterial3d(hull_material),
                Transform::from_rotation(to_forward),
            ));
            parent.spawn((
                Mesh3d(nose),
                MeshMaterial3d(nose_material),
                Transform::from_xyz(0.0, 0.0, -(length + nose_height) / 2.0)
                    .with_rotation(to_forward),
            ));
        });
}
