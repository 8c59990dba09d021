//! JSON-RPC 2.0 bridge to the catalogue page.
//!
//! The engine runs inside the page (or an iframe of it) and exchanges
//! JSON-RPC 2.0 messages with it through `postMessage`.
//!
//! ## Message Flow
//!
//! ```text
//! Catalogue page          <──postMessage──>  Bevy
//!        │                                     │
//!        ├─ Request (with ID) ───────────────> │
//!        │                                     ├─ Process request
//!        │ <────────────── Response (with ID) ─┤
//!        │                                     │
//!        ├─ Notification (no ID) ────────────> ├─ Process, no reply
//!        │                                     │
//!        │ <──────── Notification (no ID) ─────┤
//! ```
//!
//! Incoming messages are queued by the JS listener and drained once per
//! frame, before the viewer applies its commands. Pointer notifications
//! therefore reach the session in the order the page sent them.
//!
//! ## Calling From the Page
//!
//! ```typescript
//! // Request-response pattern
//! bevyFrame.postMessage(JSON.stringify({
//!   jsonrpc: "2.0",
//!   method: "search",
//!   params: { query: "neem" },
//!   id: 1
//! }), "*");
//!
//! // Notification pattern (no response expected)
//! bevyFrame.postMessage(JSON.stringify({
//!   jsonrpc: "2.0",
//!   method: "pointer",
//!   params: { kind: "move", x: 110, y: 115 }
//! }), "*");
//! ```
//!
//! ## Error Handling
//!
//! Standard JSON-RPC 2.0 error codes:
//! - `-32601`: Method not found
//! - `-32602`: Invalid params
//! - `-32603`: Internal error
//!
//! ## Methods
//!
//! ### Catalogue
//! - `select_entry`: Click on a catalogue image; opens the viewer or hides the modal.
//!   Hiding closes the viewer but leaves speech playing.
//! - `search`: Filter entries, returns visibility per entry and `found`
//! - `key_pressed`: Keyboard shortcut, `v` reads the page aloud
//!
//! ### Viewer
//! - `open_viewer` / `close_viewer`: Session lifecycle
//! - `pointer`: Drag input, `kind` is `down`, `move`, `up` or `leave`
//! - `get_session`: Active flag, generation, model and rotation state
//!
//! ### Diagnostics
//! - `get_fps`: Retrieve current frame rate
//!
//! ## Notifications Sent
//!
//! `modal_visibility`, `viewer_opened`, `viewer_closed`, `model_loaded`,
//! `model_load_failed`, `search_results`, `fps_update`.

/// JSON-RPC 2.0 message types, the message listener and method dispatch.
pub mod web_rpc;
