use bevy::math::Vec3;

/// Point light placement, colour as 0xRRGGBB.
pub struct PointLightConfig {
    pub colour: u32,
    pub intensity: f32,
    pub range: f32,
    pub position: Vec3,
}

pub const AMBIENT_COLOUR: u32 = 0x404040;
pub const AMBIENT_INTENSITY: f32 = 1.0;

pub const DIRECTIONAL_COLOUR: u32 = 0xffffff;
pub const DIRECTIONAL_INTENSITY: f32 = 0.8;
/// Normalised before use.
pub const DIRECTIONAL_POSITION: Vec3 = Vec3::new(5.0, 10.0, 7.5);

pub const POINT_LIGHTS: &[PointLightConfig] = &[
    PointLightConfig {
        colour: 0xffffff,
        intensity: 1.0,
        range: 100.0,
        position: Vec3::new(-10.0, 10.0, 10.0),
    },
    PointLightConfig {
        colour: 0xffffff,
        intensity: 0.5,
        range: 100.0,
        position: Vec3::new(10.0, -10.0, -10.0),
    },
];

/// Unit intensities above are scaled into Bevy's photometric units.
pub const AMBIENT_BRIGHTNESS_SCALE: f32 = 400.0;
pub const DIRECTIONAL_ILLUMINANCE_SCALE: f32 = 10_000.0;
pub const POINT_LUMENS_SCALE: f32 = 1_000_000.0;
