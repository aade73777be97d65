//! Speech synthesis types

use serde::{Deserialize, Serialize};

/// Raw speech arguments as received from the tool-calling layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechParams {
    /// Plain text converted into audio.
    pub text: String,
    pub model: Option<String>,
    /// Voice preset; the configured default voice is used when absent.
    pub voice: Option<String>,
    /// Audio container (mp3, wav, flac, opus, ...).
    pub response_format: String,
    /// Playback rate multiplier where 1.0 is real-time.
    pub speed: f64,
}

impl Default for SpeechParams {
    fn default() -> Self {
        Self {
            text: String::new(),
            model: None,
            voice: None,
            response_format: "mp3".to_string(),
            speed: 1.0,
        }
    }
}

impl SpeechParams {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = Some(voice.into());
        self
    }

    pub fn with_response_format(mut self, format: impl Into<String>) -> Self {
        self.response_format = format.into();
        self
    }
}

/// Normalized speech request.
#[derive(Debug, Clone)]
pub struct SpeechRequest {
    pub text: String,
    pub model: Option<String>,
    pub voice: Option<String>,
    /// Format forwarded to the provider as given.
    pub format: String,
    /// Content type resolved from `format`.
    pub content_type: &'static str,
    pub speed: f64,
}

/// Flattened speech synthesis result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechResult {
    pub voice: String,
    pub format: String,
    pub byte_length: usize,
    pub blob_url: String,
}
