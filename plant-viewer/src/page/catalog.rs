use bevy::prelude::*;
use constants::page::VIEWER_TRIGGER_KEYWORD;
use serde::{Deserialize, Serialize};

/// One plant card on the catalogue page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub alt: String,
    #[serde(default)]
    pub image: String,
}

/// What clicking a catalogue image does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerAction {
    /// Show the modal, open the 3D viewer and announce the voice shortcut.
    OpenViewer,
    HideModal,
}

impl CatalogEntry {
    /// `query` must already be lowercase.
    fn matches(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(query) || self.alt.to_lowercase().contains(query)
    }

    pub fn trigger_action(&self) -> TriggerAction {
        if self.alt.to_lowercase().contains(VIEWER_TRIGGER_KEYWORD) {
            TriggerAction::OpenViewer
        } else {
            TriggerAction::HideModal
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchMatch {
    pub name: String,
    pub visible: bool,
}

/// Result of filtering the catalogue against a search box value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchOutcome {
    pub matches: Vec<SearchMatch>,
    pub found: bool,
}

impl SearchOutcome {
    /// The "not available" notice is shown exactly when nothing matched.
    pub fn not_available(&self) -> bool {
        !self.found
    }

    pub fn visible_names(&self) -> impl Iterator<Item = &str> {
        self.matches
            .iter()
            .filter(|m| m.visible)
            .map(|m| m.name.as_str())
    }
}

/// Catalogue entries in page order.
#[derive(Resource, Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Look an entry up by name, ignoring case.
    pub fn find(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries
            .iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(name))
    }

    /// Case-insensitive substring filter on name and alt text. An empty
    /// query shows everything.
    pub fn filter(&self, query: &str) -> SearchOutcome {
        let query = query.to_lowercase();

        let matches: Vec<SearchMatch> = self
            .entries
            .iter()
            .map(|entry| SearchMatch {
                name: entry.name.clone(),
                visible: entry.matches(&query),
            })
            .collect();
        let found = matches.iter().any(|m| m.visible);

        SearchOutcome { matches, found }
    }
}
