/// Alt-text keyword marking the catalogue entry that opens the 3D viewer.
pub const VIEWER_TRIGGER_KEYWORD: &str = "neem";

/// Elements the host page must provide. Startup fails without them.
pub const REQUIRED_ELEMENT_IDS: &[&str] = &[
    "modelModal",
    "closeButton",
    "modelContainer",
    "searchBar",
    "searchResults",
    "notAvailable",
    "voiceButton",
];

/// Canvas selector the engine renders into on WASM.
pub const CANVAS_SELECTOR: &str = "#bevy";
