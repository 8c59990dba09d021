use bevy::prelude::*;
use constants::camera::{CAMERA_POSITION, CAMERA_TARGET, FAR_PLANE, FIELD_OF_VIEW_DEGREES, NEAR_PLANE};
use constants::lighting::{
    AMBIENT_BRIGHTNESS_SCALE, AMBIENT_COLOUR, AMBIENT_INTENSITY, DIRECTIONAL_COLOUR,
    DIRECTIONAL_ILLUMINANCE_SCALE, DIRECTIONAL_INTENSITY, DIRECTIONAL_POSITION, POINT_LIGHTS,
    POINT_LUMENS_SCALE,
};
use constants::render_settings::hex_colour;
use constants::scene::CLEAR_COLOUR;

use crate::engine::camera::orbit_camera::OrbitCamera;

/// Root of everything a viewer session renders. Despawning it releases the
/// camera, the lights and the model. Ambient light is a global resource and
/// is reset separately, see `reset_ambient_light`.
#[derive(Component)]
pub struct ViewerSurface;

#[derive(Component)]
pub struct ViewerCamera;

#[derive(Component)]
pub struct ViewerModel;

/// Spawn the surface root with camera and lights attached.
pub fn spawn_viewer_surface(commands: &mut Commands) -> Entity {
    let root = commands
        .spawn((
            Name::new("Viewer Surface"),
            ViewerSurface,
            Transform::default(),
            Visibility::default(),
        ))
        .id();

    spawn_camera(commands, root);
    spawn_lighting(commands, root);
    root
}

fn spawn_camera(commands: &mut Commands, root: Entity) {
    let orbit = OrbitCamera::from_position(CAMERA_POSITION, CAMERA_TARGET);

    commands.spawn((
        ViewerCamera,
        Camera3d::default(),
        Camera {
            clear_color: ClearColorConfig::Custom(hex_colour(CLEAR_COLOUR)),
            ..default()
        },
        Projection::from(PerspectiveProjection {
            fov: FIELD_OF_VIEW_DEGREES.to_radians(),
            near: NEAR_PLANE,
            far: FAR_PLANE,
            ..default()
        }),
        orbit.transform(),
        orbit,
        ChildOf(root),
    ));
}

/// Put back the engine's default ambient light once the viewer is gone.
pub fn reset_ambient_light(commands: &mut Commands) {
    commands.insert_resource(AmbientLight::default());
}

fn spawn_lighting(commands: &mut Commands, root: Entity) {
    commands.insert_resource(AmbientLight {
        color: hex_colour(AMBIENT_COLOUR),
        brightness: AMBIENT_INTENSITY * AMBIENT_BRIGHTNESS_SCALE,
        ..default()
    });

    commands.spawn((
        DirectionalLight {
            color: hex_colour(DIRECTIONAL_COLOUR),
            illuminance: DIRECTIONAL_INTENSITY * DIRECTIONAL_ILLUMINANCE_SCALE,
            ..default()
        },
        Transform::from_translation(DIRECTIONAL_POSITION.normalize())
            .looking_at(Vec3::ZERO, Vec3::Y),
        ChildOf(root),
    ));

    for light in POINT_LIGHTS {
        commands.spawn((
            PointLight {
                color: hex_colour(light.colour),
                intensity: light.intensity * POINT_LUMENS_SCALE,
                range: light.range,
                ..default()
            },
            Transform::from_translation(light.position),
            ChildOf(root),
        ));
    }
}
