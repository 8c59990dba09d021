//! The 3D viewer surface and the systems driving it.
//!
//! Opening the viewer spawns a surface root carrying the camera and lights,
//! then loads the glTF model under it. Everything the session renders hangs
//! off that root, so closing is a single recursive despawn plus a reset of
//! the ambient light resource.
//!
//! ## Frame order
//!
//! ```text
//! Input ──> Page ──> Commands ──> Load ──> Render (only while running)
//!  rpc,     page     open/close,   start,   frame count, orbit camera,
//!  mouse    actions  pointer       poll     model transform
//! ```

use bevy::prelude::*;

use crate::engine::camera::orbit_camera::orbit_camera_controller;
use crate::engine::core::app_state::AppState;
use crate::engine::session::{ViewerSession, render_loop_running};
use crate::engine::systems::viewer_input::{forward_pointer_input, handle_viewer_keyboard_shortcuts};

/// Session open/close and pointer command handling.
pub mod lifecycle;

/// glTF model loading and per-frame transform sync.
pub mod model;

/// Surface root, camera and lighting.
pub mod surface;

use lifecycle::{ViewerCommand, advance_render_loop, apply_viewer_commands};
use model::{ModelAssets, poll_model_load, start_model_load, sync_model_transform};

/// Ordering of viewer work within a frame.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewerSet {
    /// Host page messages and native input become actions and commands.
    Input,
    /// Page actions resolve into viewer commands.
    Page,
    Commands,
    Load,
    Render,
}

pub struct ViewerPlugin;

impl Plugin for ViewerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ViewerSession>()
            .init_resource::<ModelAssets>()
            .add_event::<ViewerCommand>()
            .configure_sets(
                Update,
                (
                    ViewerSet::Input,
                    ViewerSet::Page,
                    ViewerSet::Commands,
                    ViewerSet::Load,
                    ViewerSet::Render,
                )
                    .chain()
                    .run_if(in_state(AppState::Ready)),
            )
            .add_systems(
                Update,
                (
                    (forward_pointer_input, handle_viewer_keyboard_shortcuts)
                        .in_set(ViewerSet::Input),
                    apply_viewer_commands.in_set(ViewerSet::Commands),
                    (start_model_load, poll_model_load)
                        .chain()
                        .in_set(ViewerSet::Load),
                    (advance_render_loop, orbit_camera_controller, sync_model_transform)
                        .chain()
                        .in_set(ViewerSet::Render)
                        .run_if(render_loop_running),
                ),
            );
    }
}
