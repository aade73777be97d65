//! Artifact persistence
//!
//! All persistence failures collapse into "no URL" here; callers turn that
//! into a single `MissingArtifactUrl` error via [`require_blob_url`].

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::sync::Arc;

use super::{ArtifactStore, BlobNamer};
use crate::config::StorageConfig;
use crate::error::{GatewayError, Result};
use crate::types::{ArtifactPayload, DEFAULT_CONTENT_TYPE, MediaArtifact};

#[derive(Clone)]
struct Target {
    store: Arc<dyn ArtifactStore>,
    namer: BlobNamer,
    public_base_url: String,
}

/// Names, uploads and resolves public URLs for artifacts.
///
/// Without a store every non-empty artifact fails with `StorageNotConfigured`.
#[derive(Clone, Default)]
pub struct ArtifactPersister {
    target: Option<Target>,
}

impl std::fmt::Debug for ArtifactPersister {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArtifactPersister")
            .field("configured", &self.target.is_some())
            .finish()
    }
}

impl ArtifactPersister {
    pub fn new(store: Arc<dyn ArtifactStore>, config: &StorageConfig) -> Self {
        Self {
            target: Some(Target {
                store,
                namer: BlobNamer::new(config),
                public_base_url: config.public_base_url.trim_end_matches('/').to_string(),
            }),
        }
    }

    /// Persister with no store; persistence attempts fail loudly.
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn is_configured(&self) -> bool {
        self.target.is_some()
    }

    /// Persist an artifact and return its public URL.
    ///
    /// Returns `Ok(None)` for empty payloads, undecodable base64 and failed
    /// uploads. Returns `Err(StorageNotConfigured)` when no store exists.
    pub async fn persist(&self, artifact: MediaArtifact) -> Result<Option<String>> {
        let MediaArtifact {
            payload,
            category,
            extension,
            content_type,
        } = artifact;

        let data = match payload {
            ArtifactPayload::Bytes(data) => data,
            ArtifactPayload::Base64(encoded) => {
                if encoded.is_empty() {
                    return Ok(None);
                }
                match STANDARD.decode(encoded.trim()) {
                    Ok(data) => data,
                    Err(e) => {
                        tracing::error!(
                            category = category.as_str(),
                            error = %e,
                            "Received invalid base64 payload for artifact"
                        );
                        return Ok(None);
                    }
                }
            }
        };

        if data.is_empty() {
            return Ok(None);
        }
        let Some(target) = &self.target else {
            return Err(GatewayError::StorageNotConfigured);
        };

        let extension = sanitize_extension(&extension);
        let content_type = if content_type.is_empty() {
            DEFAULT_CONTENT_TYPE.to_string()
        } else {
            content_type
        };
        let path = target.namer.blob_name(category.as_str(), &extension);
        let byte_length = data.len();

        match target.store.upload(data, &path, &content_type).await {
            Ok(()) => {
                tracing::info!(
                    category = category.as_str(),
                    blob_path = %path,
                    byte_length,
                    "Persisted artifact"
                );
                Ok(Some(format!("{}/{}", target.public_base_url, path)))
            }
            Err(e) => {
                tracing::error!(
                    category = category.as_str(),
                    blob_path = %path,
                    error = %e,
                    "Failed to upload artifact"
                );
                Ok(None)
            }
        }
    }

    /// Persist and require a URL, funnelling every failure into one error shape.
    pub async fn persist_required(&self, artifact: MediaArtifact) -> Result<String> {
        let asset_type = artifact.category.asset_type();
        require_blob_url(self.persist(artifact).await?, asset_type)
    }

    pub async fn close(&self) -> Result<()> {
        match &self.target {
            Some(target) => target.store.close().await,
            None => Ok(()),
        }
    }
}

/// Strip leading dots and lowercase; empty becomes `bin`.
fn sanitize_extension(extension: &str) -> String {
    let trimmed = extension.trim_start_matches('.');
    if trimmed.is_empty() {
        "bin".to_string()
    } else {
        trimmed.to_ascii_lowercase()
    }
}

pub fn require_blob_url(blob_url: Option<String>, asset_type: &str) -> Result<String> {
    match blob_url {
        Some(url) if !url.is_empty() => Ok(url),
        _ => Err(GatewayError::MissingArtifactUrl {
            asset_type: asset_type.to_string(),
        }),
    }
}
