//! Orbit camera for the model viewer.
//!
//! Damped yaw/pitch orbit around the model with wheel zoom clamped to a
//! distance range. No screen-space panning.

/// Orbit camera component and controller system.
pub mod orbit_camera;
