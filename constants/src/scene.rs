use bevy::math::Vec3;

/// Uniform scale applied to the loaded model.
pub const MODEL_SCALE: f32 = 0.5;

/// Model translation after load.
pub const MODEL_POSITION: Vec3 = Vec3::new(-200.0, -200.0, 0.0);

/// Initial rotation around the Y axis (radians).
pub const MODEL_INITIAL_ROTATION_Y: f32 = std::f32::consts::FRAC_PI_2;

/// Background behind the model, 0xRRGGBB.
pub const CLEAR_COLOUR: u32 = 0xfffaaa;
