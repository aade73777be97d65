//! Video parameter normalization.

use std::str::FromStr;

use super::NormalizeParams;
use crate::error::{GatewayError, Result};
use crate::types::{DEFAULT_CONTENT_TYPE, VideoParams, VideoRequest, VideoSeconds, VideoVariant};

impl TryFrom<i64> for VideoSeconds {
    type Error = GatewayError;

    fn try_from(value: i64) -> Result<Self> {
        match value {
            4 => Ok(Self::Four),
            8 => Ok(Self::Eight),
            12 => Ok(Self::Twelve),
            _ => Err(GatewayError::invalid_field(
                "seconds",
                "seconds must be one of 4, 8, or 12",
            )),
        }
    }
}

impl FromStr for VideoVariant {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "video" => Ok(Self::Video),
            "thumbnail" => Ok(Self::Thumbnail),
            "spritesheet" => Ok(Self::Spritesheet),
            _ => Err(GatewayError::invalid_field(
                "variant",
                "variant must be video, thumbnail, or spritesheet",
            )),
        }
    }
}

/// File extension and content type for a downloaded variant.
///
/// Unrecognized variants map to `bin` / `application/octet-stream`.
pub fn video_variant_meta(variant: &str) -> (&'static str, &'static str) {
    match variant.to_ascii_lowercase().as_str() {
        "video" => ("mp4", "video/mp4"),
        "thumbnail" => ("png", "image/png"),
        "spritesheet" => ("json", "application/json"),
        _ => ("bin", DEFAULT_CONTENT_TYPE),
    }
}

impl NormalizeParams for VideoParams {
    type Output = VideoRequest;

    fn normalize(self) -> Result<VideoRequest> {
        let seconds = VideoSeconds::try_from(self.seconds)?;
        let variant = self.variant.parse::<VideoVariant>()?;
        // size is free-form; the provider validates it
        Ok(VideoRequest {
            prompt: self.prompt,
            model: self.model,
            seconds,
            size: self.size,
            variant,
        })
    }
}
