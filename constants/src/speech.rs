pub const LANGUAGE: &str = "en-US";
pub const RATE: f32 = 1.0;
pub const PITCH: f32 = 1.0;

/// Announced when the viewer opens.
pub const INSTRUCTION_TEXT: &str = "Press V for voice";

/// Page sections read aloud by the voice shortcut, in order.
pub const NARRATION_SECTION_IDS: &[&str] = &["speak0", "speak2", "speak3", "speak4", "speak5"];

/// Voice shortcut key, matched case-insensitively.
pub const VOICE_KEY: &str = "v";
