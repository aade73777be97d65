//! Object storage configuration.

use secrecy::SecretString;

use super::env::{Lookup, non_empty, normalize_path_segment};

/// Immutable storage settings. Absence disables persistence entirely.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub connection_string: SecretString,
    pub container: String,
    /// Public URL prefix; never ends with `/`.
    pub public_base_url: String,
    pub path_prefix: Option<String>,
    pub image_root: String,
    pub audio_root: String,
    pub video_root: String,
}

impl StorageConfig {
    pub fn new(
        connection_string: impl Into<String>,
        container: impl Into<String>,
        public_base_url: impl Into<String>,
    ) -> Self {
        Self {
            connection_string: SecretString::from(connection_string.into()),
            container: container.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
            path_prefix: None,
            image_root: "images".to_string(),
            audio_root: "audio".to_string(),
            video_root: "videos".to_string(),
        }
    }

    pub fn with_path_prefix(mut self, prefix: &str) -> Self {
        self.path_prefix = normalize_path_segment(Some(prefix));
        self
    }

    /// Override the per-capability roots; blank values keep the defaults.
    pub fn with_roots(mut self, image: &str, audio: &str, video: &str) -> Self {
        if let Some(root) = normalize_path_segment(Some(image)) {
            self.image_root = root;
        }
        if let Some(root) = normalize_path_segment(Some(audio)) {
            self.audio_root = root;
        }
        if let Some(root) = normalize_path_segment(Some(video)) {
            self.video_root = root;
        }
        self
    }

    /// Returns `None` unless connection string, container and public base URL are all set.
    pub fn from_lookup(lookup: Lookup<'_>) -> Option<Self> {
        let connection_string = non_empty(lookup, "AZURE_STORAGE_CONNECTION_STRING")?;
        let container = non_empty(lookup, "AZURE_BLOB_CONTAINER")?;
        let public_base_url = non_empty(lookup, "AZURE_BLOB_PUBLIC_BASE_URL")?;

        let root = |name: &str, default: &str| {
            normalize_path_segment(lookup(name).as_deref()).unwrap_or_else(|| default.to_string())
        };

        Some(Self {
            connection_string: SecretString::from(connection_string),
            container,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
            path_prefix: normalize_path_segment(lookup("AZURE_BLOB_PATH_PREFIX").as_deref()),
            image_root: root("AZURE_BLOB_IMAGE_ROOT", "images"),
            audio_root: root("AZURE_BLOB_AUDIO_ROOT", "audio"),
            video_root: root("AZURE_BLOB_VIDEO_ROOT", "videos"),
        })
    }
}
