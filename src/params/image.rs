//! Image parameter normalization.

use std::str::FromStr;

use super::NormalizeParams;
use crate::error::{GatewayError, Result};
use crate::types::{ImageParams, ImageQuality, ImageRequest, ImageSize};

pub const MIN_IMAGE_COUNT: i64 = 1;
pub const MAX_IMAGE_COUNT: i64 = 10;

impl FromStr for ImageSize {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "1024x1024" => Ok(Self::Square1024),
            "1024x1536" => Ok(Self::Portrait1024x1536),
            "1536x1024" => Ok(Self::Landscape1536x1024),
            "auto" => Ok(Self::Auto),
            _ => Err(GatewayError::invalid_choice("size", &Self::ACCEPTED, s)),
        }
    }
}

impl FromStr for ImageQuality {
    type Err = GatewayError;

    /// Accepts the legacy `standard` and `hd` presets as `medium` and `high`.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" | "standard" => Ok(Self::Medium),
            "high" | "hd" => Ok(Self::High),
            "auto" => Ok(Self::Auto),
            _ => Err(GatewayError::invalid_choice("quality", &Self::ACCEPTED, s)),
        }
    }
}

impl NormalizeParams for ImageParams {
    type Output = ImageRequest;

    fn normalize(self) -> Result<ImageRequest> {
        if !(MIN_IMAGE_COUNT..=MAX_IMAGE_COUNT).contains(&self.count) {
            return Err(GatewayError::invalid_field(
                "count",
                "count must be between 1 and 10",
            ));
        }
        let quality = self.quality.parse::<ImageQuality>()?;
        let size = self.size.parse::<ImageSize>()?;

        Ok(ImageRequest {
            prompt: self.prompt,
            size,
            quality,
            count: self.count as u8,
            user: self.user,
        })
    }
}
