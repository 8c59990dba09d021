//! The catalogue page around the viewer.
//!
//! Plant cards, the search box and the voice shortcut live in the host page.
//! The engine owns their behaviour: which card opens the viewer, what a
//! search shows, and what gets read aloud. Results go back to the page as
//! RPC notifications.

use bevy::prelude::*;
use constants::speech::{INSTRUCTION_TEXT, NARRATION_SECTION_IDS};

use crate::engine::assets::viewer_manifest::ViewerManifest;
use crate::engine::scene::ViewerSet;
use crate::engine::scene::lifecycle::ViewerCommand;
use crate::error::ViewerError;
use crate::rpc::web_rpc::WebRpcInterface;

/// Catalogue entries, search filter and click triggers.
pub mod catalog;

/// Host page element checks.
pub mod elements;

/// Speech synthesis.
pub mod narrator;

use catalog::{Catalog, TriggerAction};
use narrator::{Narrator, is_voice_key, narration_text};

/// User interaction on the catalogue page.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub enum PageAction {
    /// A catalogue image was clicked.
    SelectEntry(String),
    Search(String),
    KeyPressed(String),
}

pub struct PagePlugin;

impl Plugin for PagePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Catalog>()
            .init_resource::<Narrator>()
            .add_event::<PageAction>()
            .add_systems(Update, handle_page_actions.in_set(ViewerSet::Page));

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, elements::check_page_elements);
    }
}

pub fn handle_page_actions(
    mut actions: EventReader<PageAction>,
    catalog: Res<Catalog>,
    manifest: Option<Res<ViewerManifest>>,
    mut narrator: ResMut<Narrator>,
    mut viewer_commands: EventWriter<ViewerCommand>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for action in actions.read() {
        match action {
            PageAction::SelectEntry(name) => {
                let Some(entry) = catalog.find(name) else {
                    warn!("No catalogue entry named '{}'", name);
                    continue;
                };

                match entry.trigger_action() {
                    TriggerAction::OpenViewer => {
                        rpc_interface.send_notification(
                            "modal_visibility",
                            serde_json::json!({ "visible": true, "name": entry.name }),
                        );
                        viewer_commands.write(ViewerCommand::Open);

                        let instruction = manifest
                            .as_ref()
                            .map(|m| m.instruction_text.as_str())
                            .unwrap_or(INSTRUCTION_TEXT);
                        narrator.speak(instruction);
                    }
                    TriggerAction::HideModal => {
                        rpc_interface.send_notification(
                            "modal_visibility",
                            serde_json::json!({ "visible": false, "name": entry.name }),
                        );
                        viewer_commands.write(ViewerCommand::Hide);
                    }
                }
            }
            PageAction::Search(query) => {
                let outcome = catalog.filter(query);
                rpc_interface.send_notification(
                    "search_results",
                    serde_json::json!({
                        "query": query,
                        "matches": outcome.matches,
                        "found": outcome.found,
                        "not_available": outcome.not_available(),
                    }),
                );
            }
            PageAction::KeyPressed(key) => {
                if !is_voice_key(key) {
                    continue;
                }

                match page_narration(manifest.as_deref()) {
                    Ok(text) => narrator.speak(&text),
                    Err(e) => error!("{}", e),
                }
            }
        }
    }
}

/// Narration text read from the page's sections.
#[cfg(target_arch = "wasm32")]
fn page_narration(_manifest: Option<&ViewerManifest>) -> Result<String, ViewerError> {
    narration_text(NARRATION_SECTION_IDS, elements::element_text)
}

/// Without a page, the manifest carries the section texts.
#[cfg(not(target_arch = "wasm32"))]
fn page_narration(manifest: Option<&ViewerManifest>) -> Result<String, ViewerError> {
    narration_text(NARRATION_SECTION_IDS, |id| {
        manifest.and_then(|m| m.narration_for(id))
    })
}
