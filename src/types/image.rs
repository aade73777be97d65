//! Image generation types

use serde::{Deserialize, Serialize};

/// Supported image output resolutions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageSize {
    Square1024,
    Portrait1024x1536,
    Landscape1536x1024,
    Auto,
}

impl ImageSize {
    pub const ACCEPTED: [&'static str; 4] = ["1024x1024", "1024x1536", "1536x1024", "auto"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Square1024 => "1024x1024",
            Self::Portrait1024x1536 => "1024x1536",
            Self::Landscape1536x1024 => "1536x1024",
            Self::Auto => "auto",
        }
    }
}

/// Supported image quality presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageQuality {
    Low,
    Medium,
    High,
    Auto,
}

impl ImageQuality {
    pub const ACCEPTED: [&'static str; 4] = ["low", "medium", "high", "auto"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Auto => "auto",
        }
    }
}

/// Raw image arguments as received from the tool-calling layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageParams {
    /// Natural language description of the image to render.
    pub prompt: String,
    pub size: String,
    pub quality: String,
    /// Number of variations to render (1-10).
    pub count: i64,
    pub user: Option<String>,
}

impl Default for ImageParams {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            size: "1024x1024".to_string(),
            quality: "high".to_string(),
            count: 1,
            user: None,
        }
    }
}

impl ImageParams {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Default::default()
        }
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = size.into();
        self
    }

    pub fn with_quality(mut self, quality: impl Into<String>) -> Self {
        self.quality = quality.into();
        self
    }

    pub fn with_count(mut self, count: i64) -> Self {
        self.count = count;
        self
    }
}

/// Normalized image request.
#[derive(Debug, Clone)]
pub struct ImageRequest {
    pub prompt: String,
    pub size: ImageSize,
    pub quality: ImageQuality,
    pub count: u8,
    pub user: Option<String>,
}

/// A persisted image variation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageEntry {
    pub blob_url: String,
    pub revised_prompt: Option<String>,
}

/// Flattened image generation result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageResult {
    pub model: String,
    #[serde(rename = "created")]
    pub created_timestamp: Option<i64>,
    /// One entry per variation, in provider order.
    pub images: Vec<ImageEntry>,
}
