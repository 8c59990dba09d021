//! Viewer session lifecycle and drag-to-rotation mapping.
//!
//! A `ViewerSession` owns everything that lives between opening and closing
//! the 3D view: the rendering surface entity, the loaded model handle, the
//! pointer drag state and the render loop flag.
//!
//! ## Load race
//!
//! The glTF load is asynchronous and may finish after the user closed (or
//! closed and reopened) the viewer. `open()` hands out a `LoadTicket` stamped
//! with the session generation; `complete_load()` applies a result only when
//! the ticket still matches the active generation.
//!
//! ```text
//! open() ──> ticket(gen N) ──> asset server ... ──> complete_load(ticket)
//!   │                                                  │
//!   └─ close() / open() bumps state ───────────────────┴─> Stale, ignored
//! ```

use bevy::prelude::*;

/// Pointer drag tracking.
pub mod drag;

/// Render loop flag used as a system run condition.
pub mod render_loop;

/// Session resource, load tickets and rotation state.
pub mod viewer_session;

pub use viewer_session::ViewerSession;

/// Run condition: true while the session's render loop is running.
pub fn render_loop_running(session: Res<ViewerSession>) -> bool {
    session.render_loop().is_running()
}
