use bevy::prelude::*;
use constants::path::DEFAULT_MODEL_PATH;

use super::model::ModelAssets;
use super::surface::{reset_ambient_light, spawn_viewer_surface};
use crate::engine::assets::viewer_manifest::ViewerManifest;
use crate::engine::session::ViewerSession;
use crate::page::narrator::Narrator;
use crate::rpc::web_rpc::WebRpcInterface;

/// Ordered input to the viewer session, from native input or the host page.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum ViewerCommand {
    Open,
    /// Close the viewer and stop any speech.
    Close,
    /// Close the viewer, leaving speech playing.
    Hide,
    PointerDown(Vec2),
    PointerMove(Vec2),
    PointerUp,
    PointerLeave,
}

/// Apply viewer commands in arrival order.
pub fn apply_viewer_commands(
    mut commands: Commands,
    mut events: EventReader<ViewerCommand>,
    mut session: ResMut<ViewerSession>,
    mut model_assets: ResMut<ModelAssets>,
    manifest: Option<Res<ViewerManifest>>,
    mut narrator: ResMut<Narrator>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for command in events.read() {
        match *command {
            ViewerCommand::Open => {
                let surface = spawn_viewer_surface(&mut commands);
                let opened = session.open(surface);

                if let Some(previous) = opened.replaced_surface {
                    commands.entity(previous).despawn();
                }

                let model_path = manifest
                    .as_ref()
                    .map(|m| m.model_path.clone())
                    .unwrap_or_else(|| DEFAULT_MODEL_PATH.to_string());
                model_assets.request(opened.ticket, model_path);

                rpc_interface.send_notification(
                    "viewer_opened",
                    serde_json::json!({ "generation": session.generation() }),
                );
            }
            ViewerCommand::Close => {
                close_session(&mut commands, &mut session, &mut model_assets, &mut rpc_interface);
                narrator.cancel();
            }
            ViewerCommand::Hide => {
                close_session(&mut commands, &mut session, &mut model_assets, &mut rpc_interface);
            }
            ViewerCommand::PointerDown(pointer) => session.pointer_down(pointer),
            ViewerCommand::PointerMove(pointer) => {
                session.pointer_move(pointer);
            }
            ViewerCommand::PointerUp => session.pointer_up(),
            ViewerCommand::PointerLeave => session.pointer_leave(),
        }
    }
}

fn close_session(
    commands: &mut Commands,
    session: &mut ViewerSession,
    model_assets: &mut ModelAssets,
    rpc_interface: &mut WebRpcInterface,
) {
    let Some(surface) = session.close() else {
        return;
    };

    commands.entity(surface).despawn();
    reset_ambient_light(commands);
    model_assets.release();

    rpc_interface.send_notification(
        "viewer_closed",
        serde_json::json!({ "generation": session.generation() }),
    );
}

/// Count a frame while the render loop runs.
pub fn advance_render_loop(mut session: ResMut<ViewerSession>) {
    session.render_loop_mut().tick();
}
