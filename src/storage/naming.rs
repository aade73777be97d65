//! Blob naming.
//!
//! `{prefix?}/{category_root}/{yyyyMMddTHHmmss}-{32 hex}.{ext}`, empty segments omitted.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::config::StorageConfig;

const FALLBACK_CATEGORY: &str = "media";

/// Builds storage paths for persisted artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobNamer {
    path_prefix: Option<String>,
    image_root: String,
    audio_root: String,
    video_root: String,
}

impl BlobNamer {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            path_prefix: config.path_prefix.clone(),
            image_root: config.image_root.clone(),
            audio_root: config.audio_root.clone(),
            video_root: config.video_root.clone(),
        }
    }

    /// Storage root for a category. Unknown categories are used literally.
    pub fn root_for_category<'a>(&'a self, category: &'a str) -> &'a str {
        let normalized = category.trim_matches('/');
        let normalized = if normalized.is_empty() {
            FALLBACK_CATEGORY
        } else {
            normalized
        };
        match normalized {
            "images" | "image" => &self.image_root,
            "audio" => &self.audio_root,
            "videos" | "video" => &self.video_root,
            other => other,
        }
    }

    /// Fresh name for an artifact, unique per call.
    pub fn blob_name(&self, category: &str, extension: &str) -> String {
        self.blob_name_at(category, extension, Utc::now(), Uuid::new_v4())
    }

    pub fn blob_name_at(
        &self,
        category: &str,
        extension: &str,
        now: DateTime<Utc>,
        unique: Uuid,
    ) -> String {
        let filename = format!(
            "{}-{}.{}",
            now.format("%Y%m%dT%H%M%S"),
            unique.simple(),
            extension
        );
        [
            self.path_prefix.as_deref().unwrap_or(""),
            self.root_for_category(category),
            filename.as_str(),
        ]
        .iter()
        .filter(|segment| !segment.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("/")
    }
}
