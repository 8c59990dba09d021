use bevy::prelude::*;
use constants::speech::{LANGUAGE, PITCH, RATE, VOICE_KEY};
use serde::Serialize;

use crate::error::ViewerError;

/// A single phrase handed to the speech backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Utterance {
    pub text: String,
    pub lang: String,
    pub rate: f32,
    pub pitch: f32,
}

impl Utterance {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            lang: LANGUAGE.to_string(),
            rate: RATE,
            pitch: PITCH,
        }
    }
}

/// Speech synthesis collaborator.
pub trait SpeechBackend: Send + Sync + 'static {
    fn speak(&mut self, utterance: &Utterance) -> Result<(), ViewerError>;

    /// Stop anything queued or playing.
    fn cancel(&mut self);
}

/// Native fallback: writes utterances to the log.
pub struct LogSpeech;

impl SpeechBackend for LogSpeech {
    fn speak(&mut self, utterance: &Utterance) -> Result<(), ViewerError> {
        info!(
            "Speaking ({}, rate {}, pitch {}): {}",
            utterance.lang, utterance.rate, utterance.pitch, utterance.text
        );
        Ok(())
    }

    fn cancel(&mut self) {
        info!("Speech cancelled");
    }
}

/// Browser `window.speechSynthesis`. Looked up on every call so the backend
/// holds no JS handles.
#[cfg(target_arch = "wasm32")]
pub struct WebSpeech;

#[cfg(target_arch = "wasm32")]
impl WebSpeech {
    fn synthesis() -> Result<web_sys::SpeechSynthesis, ViewerError> {
        web_sys::window()
            .ok_or_else(|| ViewerError::Speech("window object not available".to_string()))?
            .speech_synthesis()
            .map_err(|e| ViewerError::Speech(format!("{:?}", e)))
    }
}

#[cfg(target_arch = "wasm32")]
impl SpeechBackend for WebSpeech {
    fn speak(&mut self, utterance: &Utterance) -> Result<(), ViewerError> {
        let synthesis = Self::synthesis()?;
        let js_utterance = web_sys::SpeechSynthesisUtterance::new_with_text(&utterance.text)
            .map_err(|e| ViewerError::Speech(format!("{:?}", e)))?;
        js_utterance.set_lang(&utterance.lang);
        js_utterance.set_rate(utterance.rate);
        js_utterance.set_pitch(utterance.pitch);
        synthesis.speak(&js_utterance);
        Ok(())
    }

    fn cancel(&mut self) {
        match Self::synthesis() {
            Ok(synthesis) => synthesis.cancel(),
            Err(e) => warn!("{}", e),
        }
    }
}

/// Resource wrapping the active speech backend.
#[derive(Resource)]
pub struct Narrator {
    backend: Box<dyn SpeechBackend>,
}

impl Default for Narrator {
    fn default() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            Self::with_backend(WebSpeech)
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            Self::with_backend(LogSpeech)
        }
    }
}

impl Narrator {
    pub fn with_backend(backend: impl SpeechBackend) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }

    /// Speak `text`. Backend failures are logged, never propagated.
    pub fn speak(&mut self, text: &str) {
        if let Err(e) = self.backend.speak(&Utterance::new(text)) {
            warn!("{}", e);
        }
    }

    pub fn cancel(&mut self) {
        self.backend.cancel();
    }
}

/// Whether a key press is the voice shortcut.
pub fn is_voice_key(key: &str) -> bool {
    key.eq_ignore_ascii_case(VOICE_KEY)
}

/// Join the narration sections, in order, with single spaces. Every section
/// must be present.
pub fn narration_text<F>(section_ids: &[&str], lookup: F) -> Result<String, ViewerError>
where
    F: Fn(&str) -> Option<String>,
{
    let sections = section_ids
        .iter()
        .map(|id| lookup(id).ok_or_else(|| ViewerError::MissingDomElement(id.to_string())))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(sections.join(" "))
}

/// Backend that records utterances, for tests.
#[cfg(test)]
#[derive(Clone, Default)]
pub struct RecordingSpeech {
    pub spoken: std::sync::Arc<std::sync::Mutex<Vec<Utterance>>>,
    pub cancelled: std::sync::Arc<std::sync::atomic::AtomicUsize>,
}

#[cfg(test)]
impl SpeechBackend for RecordingSpeech {
    fn speak(&mut self, utterance: &Utterance) -> Result<(), ViewerError> {
        if let Ok(mut spoken) = self.spoken.lock() {
            spoken.push(utterance.clone());
        }
        Ok(())
    }

    fn cancel(&mut self) {
        self.cancelled
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    }
}

#[cfg(test)]
impl RecordingSpeech {
    pub fn texts(&self) -> Vec<String> {
        self.spoken
            .lock()
            .map(|spoken| spoken.iter().map(|u| u.text.clone()).collect())
            .unwrap_or_default()
    }

    pub fn cancel_count(&self) -> usize {
        self.cancelled.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use constants::speech::NARRATION_SECTION_IDS;
    use std::collections::HashMap;

    #[test]
    fn utterance_uses_fixed_voice_settings() {
        let utterance = Utterance::new("Press V for voice");
        assert_eq!(utterance.lang, "en-US");
        assert_eq!(utterance.rate, 1.0);
        assert_eq!(utterance.pitch, 1.0);
    }

    #[test]
    fn voice_key_matches_either_case() {
        assert!(is_voice_key("v"));
        assert!(is_voice_key("V"));
        assert!(!is_voice_key("b"));
        assert!(!is_voice_key("vv"));
    }

    #[test]
    fn narration_joins_sections_in_order() {
        let page: HashMap<&str, &str> = [
            ("speak0", "Neem."),
            ("speak2", "Azadirachta indica."),
            ("speak3", "Leaves are bitter."),
            ("speak4", "Used for skin care."),
            ("speak5", "Grows in dry climates."),
            ("speak1", "Not read."),
        ]
        .into_iter()
        .collect();

        let text = narration_text(NARRATION_SECTION_IDS, |id| {
            page.get(id).map(|t| t.to_string())
        });

        assert_eq!(
            text,
            Ok("Neem. Azadirachta indica. Leaves are bitter. Used for skin care. Grows in dry climates."
                .to_string())
        );
    }

    #[test]
    fn missing_section_is_reported() {
        let text = narration_text(&["speak0", "speak2"], |id| {
            (id == "speak0").then(|| "Neem.".to_string())
        });
        assert_eq!(text, Err(ViewerError::MissingDomElement("speak2".to_string())));
    }

    #[test]
    fn narrator_forwards_to_backend() {
        let backend = RecordingSpeech::default();
        let mut narrator = Narrator::with_backend(backend.clone());

        narrator.speak("hello");
        narrator.cancel();

        assert_eq!(backend.texts(), vec!["hello".to_string()]);
        assert_eq!(backend.cancel_count(), 1);
    }
}
