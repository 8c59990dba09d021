use bevy::prelude::*;
use constants::path::DEFAULT_MODEL_PATH;
use constants::speech::INSTRUCTION_TEXT;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::ViewerError;
use crate::page::catalog::CatalogEntry;

/// A block of page text read aloud by the voice shortcut.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrationSection {
    pub id: String,
    pub text: String,
}

/// Viewer configuration loaded from JSON. Mirrors the file structure.
#[derive(Asset, Resource, Debug, Clone, PartialEq, Serialize, Deserialize, TypePath)]
pub struct ViewerManifest {
    #[serde(default = "default_model_path")]
    pub model_path: String,
    #[serde(default = "default_instruction_text")]
    pub instruction_text: String,
    #[serde(default)]
    pub catalog: Vec<CatalogEntry>,
    #[serde(default)]
    pub narration: Vec<NarrationSection>,
}

fn default_model_path() -> String {
    DEFAULT_MODEL_PATH.to_string()
}

fn default_instruction_text() -> String {
    INSTRUCTION_TEXT.to_string()
}

impl Default for ViewerManifest {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
            instruction_text: default_instruction_text(),
            catalog: Vec::new(),
            narration: Vec::new(),
        }
    }
}

impl ViewerManifest {
    /// Text of a narration section by page element id.
    pub fn narration_for(&self, id: &str) -> Option<String> {
        self.narration
            .iter()
            .find(|section| section.id == id)
            .map(|section| section.text.clone())
    }

    /// Reject manifests the page could not represent: no model, or two
    /// catalogue cards with the same name.
    pub fn validate(&self) -> Result<(), ViewerError> {
        if self.model_path.trim().is_empty() {
            return Err(ViewerError::Manifest("model_path is empty".to_string()));
        }

        let mut seen = HashSet::new();
        for entry in &self.catalog {
            if !seen.insert(entry.name.to_lowercase()) {
                return Err(ViewerError::Manifest(format!(
                    "duplicate catalogue entry '{}'",
                    entry.name
                )));
            }
        }

        Ok(())
    }
}
