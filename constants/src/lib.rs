//! Shared constants for the plant viewer.
//!
//! Scene placement, camera and lighting values match the catalogue page's
//! web viewer so the model appears the same way in every build.

pub mod camera;
pub mod interaction;
pub mod lighting;
pub mod page;
pub mod path;
pub mod render_settings;
pub mod scene;
pub mod speech;
