//! Core application setup and state management.
//!
//! Builds the app for native and WASM targets and drives the
//! `Loading -> Ready` transition.

/// Application setup and plugin configuration.
///
/// Registers the manifest asset type, the RPC bridge, the page plugin and
/// the viewer plugin.
pub mod app_setup;

/// Application state machine.
pub mod app_state;

/// Platform-specific window configuration for native and WASM builds.
///
/// Configures canvas integration for web targets and vsync settings.
pub mod window_config;
