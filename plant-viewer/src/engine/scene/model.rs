use bevy::asset::LoadState;
use bevy::prelude::*;

use super::surface::ViewerModel;
use crate::engine::session::ViewerSession;
use crate::engine::session::viewer_session::{LoadOutcome, LoadTicket, RenderedObject};
use crate::error::ViewerError;
use crate::rpc::web_rpc::WebRpcInterface;

/// Model load queued by `open()`, not yet handed to the asset server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRequest {
    pub ticket: LoadTicket,
    pub path: String,
}

#[derive(Debug, Clone)]
struct PendingLoad {
    request: ModelRequest,
    handle: Handle<Scene>,
    reported_loading: bool,
}

/// Strong handles for the session's model. Dropping them lets the asset
/// server free the scene and its GPU buffers.
#[derive(Resource, Default)]
pub struct ModelAssets {
    requested: Option<ModelRequest>,
    pending: Option<PendingLoad>,
    loaded: Option<Handle<Scene>>,
}

impl ModelAssets {
    /// Queue a load for a new session, dropping anything held for the old one.
    pub fn request(&mut self, ticket: LoadTicket, path: String) {
        self.release();
        self.requested = Some(ModelRequest { ticket, path });
    }

    pub fn release(&mut self) {
        self.requested = None;
        self.pending = None;
        self.loaded = None;
    }

    pub fn requested(&self) -> Option<&ModelRequest> {
        self.requested.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn holds_model(&self) -> bool {
        self.loaded.is_some()
    }
}

/// Hand queued model requests to the asset server.
pub fn start_model_load(
    mut model_assets: ResMut<ModelAssets>,
    session: Res<ViewerSession>,
    asset_server: Res<AssetServer>,
) {
    let Some(request) = model_assets.requested.take() else {
        return;
    };

    if !session.is_current(request.ticket) {
        return;
    }

    info!("Loading model {}", request.path);
    let handle = asset_server.load(GltfAssetLabel::Scene(0).from_asset(request.path.clone()));
    model_assets.pending = Some(PendingLoad {
        request,
        handle,
        reported_loading: false,
    });
}

/// Poll the in-flight load. Results for closed or replaced sessions are
/// dropped without touching the world.
pub fn poll_model_load(
    mut commands: Commands,
    mut model_assets: ResMut<ModelAssets>,
    mut session: ResMut<ViewerSession>,
    asset_server: Res<AssetServer>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    let Some(pending) = model_assets.pending.clone() else {
        return;
    };

    if !session.is_current(pending.request.ticket) {
        info!(
            "Discarding model load for session {}",
            pending.request.ticket.generation()
        );
        model_assets.pending = None;
        return;
    }

    let result = match asset_server.get_load_state(&pending.handle) {
        Some(LoadState::Loaded) => match session.surface() {
            Some(surface) => Ok(commands
                .spawn((
                    Name::new("Viewer Model"),
                    ViewerModel,
                    SceneRoot(pending.handle.clone()),
                    RenderedObject::initial_transform(),
                    ChildOf(surface),
                ))
                .id()),
            None => Err(ViewerError::AssetLoad {
                path: pending.request.path.clone(),
                reason: "viewer surface missing".to_string(),
            }),
        },
        Some(LoadState::Failed(err)) => Err(ViewerError::AssetLoad {
            path: pending.request.path.clone(),
            reason: err.to_string(),
        }),
        Some(LoadState::Loading) => {
            if !pending.reported_loading {
                info!("Model {} loading", pending.request.path);
                if let Some(in_flight) = model_assets.pending.as_mut() {
                    in_flight.reported_loading = true;
                }
            }
            return;
        }
        _ => return,
    };

    model_assets.pending = None;

    match session.complete_load(pending.request.ticket, result) {
        LoadOutcome::Applied => {
            info!("Model {} loaded", pending.request.path);
            model_assets.loaded = Some(pending.handle);
            rpc_interface.send_notification(
                "model_loaded",
                serde_json::json!({
                    "generation": session.generation(),
                    "path": pending.request.path,
                }),
            );
        }
        LoadOutcome::Failed(e) => {
            error!("{}", e);
            rpc_interface.send_notification(
                "model_load_failed",
                serde_json::json!({
                    "path": pending.request.path,
                    "reason": e.to_string(),
                }),
            );
        }
        LoadOutcome::Stale => {}
    }
}

/// Write the session's rotation into the model transform.
pub fn sync_model_transform(
    session: Res<ViewerSession>,
    mut models: Query<&mut Transform, With<ViewerModel>>,
) {
    let Some(object) = session.rendered_object() else {
        return;
    };

    if let Ok(mut transform) = models.get_mut(object.entity) {
        *transform = object.transform();
    }
}
