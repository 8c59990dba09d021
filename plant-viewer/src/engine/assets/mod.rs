//! Viewer configuration assets.

/// JSON manifest with model path, catalogue and narration text.
pub mod viewer_manifest;
