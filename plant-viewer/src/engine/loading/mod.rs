//! Startup loading of the viewer manifest.
//!
//! The model itself is not loaded here. It is requested per session when
//! the viewer opens, see `engine::scene::model`.

/// Manifest loading and catalogue installation.
pub mod manifest_loader;

/// Loading progress flags driving the `Loading -> Ready` transition.
pub mod progress;
