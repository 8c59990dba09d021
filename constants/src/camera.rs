use bevy::math::Vec3;

/// Vertical field of view in degrees.
pub const FIELD_OF_VIEW_DEGREES: f32 = 75.0;
pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 1000.0;

/// Camera start position, looking at the origin.
pub const CAMERA_POSITION: Vec3 = Vec3::new(-300.0, -500.0, -200.0);
pub const CAMERA_TARGET: Vec3 = Vec3::ZERO;

/// Fraction of the queued orbit delta applied per frame.
pub const ORBIT_DAMPING_FACTOR: f32 = 0.05;

/// Orbit radians per pixel of right-button drag.
pub const ORBIT_SENSITIVITY: f32 = 0.005;

pub const ZOOM_SPEED: f32 = 1.2;
pub const MIN_DISTANCE: f32 = 1.0;
pub const MAX_DISTANCE: f32 = 100.0;

/// Keeps the orbit away from the poles where `looking_at` degenerates.
pub const MAX_PITCH: f32 = std::f32::consts::FRAC_PI_2 - 0.01;
