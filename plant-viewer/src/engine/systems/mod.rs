//! Runtime systems outside the session itself.
//!
//! Input forwarding for native builds and frame rate reporting to the host
//! page.

/// FPS notifications sent to the page via RPC.
pub mod fps_tracking;

/// Mouse and keyboard input mapped onto viewer commands.
///
/// Left drag rotates the model; `O`, `Escape` and `V` are native shortcuts.
pub mod viewer_input;
