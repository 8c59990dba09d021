use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::scene::ViewerSet;
use crate::engine::scene::lifecycle::ViewerCommand;
use crate::engine::scene::model::ModelAssets;
use crate::engine::session::ViewerSession;
use crate::page::PageAction;
use crate::page::catalog::{Catalog, TriggerAction};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure. Without an `id` it is a notification.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// JSON-RPC 2.0 error object.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Resource managing bidirectional RPC communication between the page and Bevy.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the page without expecting a response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }
}

#[cfg(test)]
impl WebRpcInterface {
    pub fn notification_methods(&self) -> Vec<&str> {
        self.outgoing_notifications
            .iter()
            .map(|n| n.method.as_str())
            .collect()
    }

    pub fn notification_params(&self, index: usize) -> &serde_json::Value {
        &self.outgoing_notifications[index].params
    }

    pub fn responses(&self) -> &[RpcResponse] {
        &self.outgoing_responses
    }
}

/// Plugin establishing the postMessage bridge to the host page.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (process_incoming_messages, handle_rpc_messages)
                    .chain()
                    .in_set(ViewerSet::Input),
            )
            .add_systems(PostUpdate, send_outgoing_messages);

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    match window() {
        Some(window) => {
            if let Err(e) = window
                .add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
            {
                error!("Failed to register message listener: {:?}", e);
                return;
            }
        }
        None => {
            error!("Window object not available, page messages disabled");
            return;
        }
    }

    // JS owns the closure from here on.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Messages pushed by the JS listener, drained once per frame.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Event representing an incoming RPC message from the page.
#[derive(Event)]
struct IncomingRpcMessage {
    content: String,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };

    let messages = if let Ok(mut queue) = queue_res.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

/// World access needed by the RPC methods.
#[derive(SystemParam)]
struct RpcContext<'w> {
    diagnostics: Res<'w, DiagnosticsStore>,
    catalog: Res<'w, Catalog>,
    session: Res<'w, ViewerSession>,
    model_assets: Res<'w, ModelAssets>,
    viewer_commands: EventWriter<'w, ViewerCommand>,
    page_actions: EventWriter<'w, PageAction>,
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut context: RpcContext,
) {
    for event in events.read() {
        match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => {
                if let Some(response) = handle_rpc_request(&request, &mut context) {
                    rpc_interface.queue_response(response);
                }
            }
            Err(parse_error) => {
                warn!("Unparseable RPC message: {}", parse_error);
            }
        }
    }
}

/// Run the method, then answer only if the caller sent an `id`.
fn handle_rpc_request(request: &RpcRequest, context: &mut RpcContext) -> Option<RpcResponse> {
    let result = match request.method.as_str() {
        "select_entry" => handle_select_entry(&request.params, context),
        "open_viewer" => {
            context.viewer_commands.write(ViewerCommand::Open);
            Ok(serde_json::json!({ "success": true }))
        }
        "close_viewer" => {
            context.viewer_commands.write(ViewerCommand::Close);
            Ok(serde_json::json!({ "success": true }))
        }
        "pointer" => handle_pointer(&request.params, context),
        "search" => handle_search(&request.params, context),
        "key_pressed" => handle_key_pressed(&request.params, context),
        "get_session" => handle_get_session(context),
        "get_fps" => handle_get_fps(&context.diagnostics),
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            let id = request.id.clone()?;
            return Some(create_error_response(
                id,
                -32601,
                "Method not found",
                Some(serde_json::json!({"method": request.method})),
            ));
        }
    };

    let id = request.id.clone()?;
    match result {
        Ok(result_value) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        }),
        Err(error) => {
            warn!("RPC {} failed: {}", request.method, error.message);
            Some(RpcResponse {
                jsonrpc: "2.0".to_string(),
                result: None,
                error: Some(error),
                id: Some(id),
            })
        }
    }
}

fn handle_select_entry(
    params: &serde_json::Value,
    context: &mut RpcContext,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct SelectEntryParams {
        name: String,
    }

    let parsed = serde_json::from_value::<SelectEntryParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'name' parameter"))?;

    let action = match context.catalog.find(&parsed.name).map(|e| e.trigger_action()) {
        Some(TriggerAction::OpenViewer) => "open_viewer",
        Some(TriggerAction::HideModal) => "hide_modal",
        None => {
            return Err(RpcError::invalid_params(&format!(
                "Unknown entry: {}",
                parsed.name
            )));
        }
    };

    context.page_actions.write(PageAction::SelectEntry(parsed.name));

    Ok(serde_json::json!({
        "success": true,
        "action": action
    }))
}

fn handle_pointer(
    params: &serde_json::Value,
    context: &mut RpcContext,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct PointerParams {
        kind: String,
        #[serde(default)]
        x: f32,
        #[serde(default)]
        y: f32,
    }

    let parsed = serde_json::from_value::<PointerParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'kind', 'x' and 'y' parameters"))?;
    let position = Vec2::new(parsed.x, parsed.y);

    let command = match parsed.kind.as_str() {
        "down" => ViewerCommand::PointerDown(position),
        "move" => ViewerCommand::PointerMove(position),
        "up" => ViewerCommand::PointerUp,
        "leave" => ViewerCommand::PointerLeave,
        other => {
            return Err(RpcError::invalid_params(&format!(
                "Unknown pointer kind: {}",
                other
            )));
        }
    };
    context.viewer_commands.write(command);

    Ok(serde_json::json!({ "success": true }))
}

fn handle_search(
    params: &serde_json::Value,
    context: &mut RpcContext,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct SearchParams {
        query: String,
    }

    let parsed = serde_json::from_value::<SearchParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'query' parameter"))?;

    let outcome = context.catalog.filter(&parsed.query);
    context.page_actions.write(PageAction::Search(parsed.query));

    serde_json::to_value(&outcome).map_err(|e| RpcError::internal_error(&e.to_string()))
}

fn handle_key_pressed(
    params: &serde_json::Value,
    context: &mut RpcContext,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct KeyParams {
        key: String,
    }

    let parsed = serde_json::from_value::<KeyParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'key' parameter"))?;

    let narrate = crate::page::narrator::is_voice_key(&parsed.key);
    context.page_actions.write(PageAction::KeyPressed(parsed.key));

    Ok(serde_json::json!({
        "success": true,
        "narrate": narrate
    }))
}

fn handle_get_session(context: &RpcContext) -> Result<serde_json::Value, RpcError> {
    let session = &context.session;
    let rotation = session
        .rendered_object()
        .map(|object| serde_json::json!({ "x": object.rotation_x, "y": object.rotation_y }));

    Ok(serde_json::json!({
        "active": session.is_active(),
        "generation": session.generation(),
        "has_model": session.rendered_object().is_some(),
        "loading": context.model_assets.is_pending(),
        "rotation": rotation,
        "dragging": session.drag().is_dragging(),
        "frames": session.render_loop().frames(),
        "load_error": session.load_error().map(|e| e.to_string()),
    }))
}

fn handle_get_fps(diagnostics: &DiagnosticsStore) -> Result<serde_json::Value, RpcError> {
    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|fps_diagnostic| fps_diagnostic.smoothed())
        .unwrap_or(0.0) as f32;

    Ok(serde_json::json!({
        "fps": fps
    }))
}

/// Create standardized error response with optional data payload.
fn create_error_response(
    id: serde_json::Value,
    code: i32,
    message: &str,
    data: Option<serde_json::Value>,
) -> RpcResponse {
    RpcResponse {
        jsonrpc: "2.0".to_string(),
        result: None,
        error: Some(RpcError {
            code,
            message: message.to_string(),
            data,
        }),
        id: Some(id),
    }
}

/// Send queued notifications and responses to the page.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Send serialized message to the parent window.
fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    if let Some(parent) = window.parent().ok().flatten() {
                        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("Failed to send message to parent: {:?}", e);
                        }
                    } else {
                        warn!("No parent window available for message transmission");
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
    }
}

/// Standard RPC error codes and constructors.
impl RpcError {
    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }

    pub fn internal_error(message: &str) -> Self {
        Self {
            code: -32603,
            message: message.to_string(),
            data: None,
        }
    }
}
