/// Viewer manifest, resolved relative to the asset root.
pub const MANIFEST_PATH: &str = "viewer_manifest.json";

/// glTF model shown when the manifest does not name one.
pub const DEFAULT_MODEL_PATH: &str = "tree.glb";
