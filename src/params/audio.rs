//! Speech parameter normalization.
//!
//! The format is forwarded as given; only the content type is looked up.
//! Unknown formats fall back to a generic binary content type instead of
//! failing validation.

use super::NormalizeParams;
use crate::error::Result;
use crate::types::{DEFAULT_CONTENT_TYPE, SpeechParams, SpeechRequest};

/// Content type for an audio container name (case-insensitive).
pub fn audio_content_type(format: &str) -> &'static str {
    match format.to_ascii_lowercase().as_str() {
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "flac" => "audio/flac",
        "opus" | "ogg" => "audio/ogg",
        "aac" => "audio/aac",
        "m4a" => "audio/mp4",
        _ => DEFAULT_CONTENT_TYPE,
    }
}

impl NormalizeParams for SpeechParams {
    type Output = SpeechRequest;

    fn normalize(self) -> Result<SpeechRequest> {
        let content_type = audio_content_type(&self.response_format);
        Ok(SpeechRequest {
            text: self.text,
            model: self.model,
            voice: self.voice,
            format: self.response_format,
            content_type,
            speed: self.speed,
        })
    }
}
