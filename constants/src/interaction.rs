/// Model rotation (radians) per pixel of left-button drag.
pub const ROTATION_PER_PIXEL: f32 = 0.01;

/// Scroll multipliers for line and pixel wheel units.
pub const LINE_SCROLL_SCALE: f32 = 1.0;
pub const PIXEL_SCROLL_SCALE: f32 = 0.05;
