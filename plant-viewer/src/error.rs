use thiserror::Error;

/// Failures surfaced by the viewer and its page collaborators.
///
/// Only `MissingDomElement` is fatal, and only at startup. Everything else is
/// logged and reported to the host page while the viewer keeps running.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewerError {
    #[error("failed to load asset '{path}': {reason}")]
    AssetLoad { path: String, reason: String },

    #[error("required page element '#{0}' is missing")]
    MissingDomElement(String),

    #[error("speech synthesis failed: {0}")]
    Speech(String),

    #[error("invalid viewer manifest: {0}")]
    Manifest(String),
}
