//! Media Service
//!
//! Entry point for the four capability operations. Each call normalizes its
//! arguments, goes through the backend adapter (or the video orchestrator),
//! persists binary outputs and returns a flat result. The service is shared
//! by all concurrent calls; nothing in it is mutated per call.

use futures::future::try_join_all;
use serde_json::{Map, Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::backend::ProviderBackend;
use crate::config::{BackendKind, ProviderConfig, StorageConfig};
use crate::error::{GatewayError, Result};
use crate::orchestrator::{PollOptions, VideoJobOrchestrator};
use crate::params::NormalizeParams;
use crate::providers::{ProviderApi, capability_support};
use crate::storage::{ArtifactPersister, AzureBlobStore};
use crate::transformers;
use crate::types::{
    ArtifactCategory, Capability, ChatParams, ChatResult, ImageEntry, ImageParams, ImageResult,
    MediaArtifact, SpeechParams, SpeechResult, VideoParams, VideoResult,
};

pub struct MediaService {
    backend: ProviderBackend,
    videos: VideoJobOrchestrator,
    persister: ArtifactPersister,
    closed: AtomicBool,
}

impl std::fmt::Debug for MediaService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaService")
            .field("backend", &self.backend)
            .field("persister", &self.persister)
            .field("closed", &self.closed.load(Ordering::SeqCst))
            .finish()
    }
}

impl MediaService {
    /// Build the provider client and, when storage is configured, the blob store.
    pub fn new(provider: ProviderConfig, storage: Option<StorageConfig>) -> Result<Self> {
        let backend = ProviderBackend::from_config(provider)?;
        let persister = match storage {
            Some(storage) => {
                let store = AzureBlobStore::from_config(&storage)?;
                ArtifactPersister::new(Arc::new(store), &storage)
            }
            None => {
                tracing::warn!(
                    "Artifact storage is not configured; image, audio and video calls will fail"
                );
                ArtifactPersister::disabled()
            }
        };
        Ok(Self::from_parts(backend, persister))
    }

    /// Assemble from an explicit provider client and persister.
    pub fn with_components(
        provider: ProviderConfig,
        api: Arc<dyn ProviderApi>,
        persister: ArtifactPersister,
    ) -> Self {
        Self::from_parts(ProviderBackend::new(provider, api), persister)
    }

    fn from_parts(backend: ProviderBackend, persister: ArtifactPersister) -> Self {
        Self {
            videos: VideoJobOrchestrator::new(backend.api()),
            backend,
            persister,
            closed: AtomicBool::new(false),
        }
    }

    pub fn with_poll_options(mut self, options: PollOptions) -> Self {
        self.videos = VideoJobOrchestrator::with_options(self.backend.api(), options);
        self
    }

    pub fn backend(&self) -> &ProviderBackend {
        &self.backend
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn ensure_open(&self) -> Result<()> {
        if self.is_closed() {
            return Err(GatewayError::ServiceClosed);
        }
        Ok(())
    }

    pub async fn chat_completion(&self, params: ChatParams) -> Result<ChatResult> {
        self.ensure_open()?;
        let request = params.normalize()?;
        let (model, raw) = self.backend.chat(&request).await?;
        tracing::info!(
            provider = self.backend.provider_id(),
            capability = "chat",
            model = %model,
            "Chat completion finished"
        );
        transformers::chat_result(raw)
    }

    /// Generate images and persist every variation concurrently, keeping provider order.
    pub async fn generate_image(&self, params: ImageParams) -> Result<ImageResult> {
        self.ensure_open()?;
        let request = params.normalize()?;
        let (model, generated) = self.backend.image(&request).await?;

        let entries = generated.images.into_iter().map(|image| async move {
            let artifact = MediaArtifact::base64(
                image.b64_json.unwrap_or_default(),
                ArtifactCategory::Images,
                "png",
                "image/png",
            );
            let blob_url = self.persister.persist_required(artifact).await?;
            Ok::<_, GatewayError>(ImageEntry {
                blob_url,
                revised_prompt: image.revised_prompt,
            })
        });
        let images = try_join_all(entries).await?;

        tracing::info!(
            provider = self.backend.provider_id(),
            capability = "image",
            count = images.len(),
            "Image generation finished"
        );
        Ok(transformers::image_result(model, generated.created, images))
    }

    pub async fn synthesize_speech(&self, params: SpeechParams) -> Result<SpeechResult> {
        self.ensure_open()?;
        let request = params.normalize()?;
        let (voice, audio) = self.backend.speech(&request).await?;
        let byte_length = audio.len();

        let artifact = MediaArtifact::bytes(
            audio,
            ArtifactCategory::Audio,
            request.format.clone(),
            request.content_type,
        );
        let blob_url = self.persister.persist_required(artifact).await?;

        tracing::info!(
            provider = self.backend.provider_id(),
            capability = "audio",
            byte_length,
            "Speech synthesis finished"
        );
        Ok(transformers::speech_result(voice, request.format, byte_length, blob_url))
    }

    pub async fn generate_video(&self, params: VideoParams) -> Result<VideoResult> {
        self.ensure_open()?;
        let request = params.normalize()?;
        self.backend.ensure_supported(Capability::Video)?;

        let model = self
            .backend
            .resolve_model(Capability::Video, request.model.as_deref());
        let completed = self.videos.run(&model, &request).await?;
        let blob_url = self.persister.persist_required(completed.artifact).await?;

        tracing::info!(
            provider = self.backend.provider_id(),
            capability = "video",
            video_id = %completed.job.id,
            "Video generation finished"
        );
        Ok(transformers::video_result(
            completed.job,
            request.variant.as_str(),
            completed.byte_length,
            blob_url,
        ))
    }

    /// Configured model per capability, optionally with provider endpoints.
    pub fn list_supported_models(
        &self,
        capability: Option<&str>,
        include_provider_metadata: bool,
    ) -> Result<Value> {
        let filter = capability
            .map(|raw| raw.parse::<Capability>())
            .transpose()?;

        let config = self.backend.config();
        let provider = config.provider_id();
        let mut payload = Map::new();
        for cap in Capability::ALL {
            if filter.is_some_and(|f| f != cap) {
                continue;
            }
            let model = config.model_for(cap);
            if model.is_empty() {
                continue;
            }
            let support = capability_support(cap);
            let mut entry = json!({
                "configured_model": model,
                "provider": provider,
                "azure_supported": config.kind() == BackendKind::Managed && support.managed,
            });
            if let (Some(obj), Some(notes)) = (entry.as_object_mut(), support.notes) {
                obj.insert("notes".to_string(), json!(notes));
            }
            payload.insert(cap.as_str().to_string(), entry);
        }

        if include_provider_metadata {
            payload.insert(
                "_provider".to_string(),
                json!({
                    "provider": provider,
                    "base_url": config.base_url(),
                    "azure_endpoint": config.managed_endpoint(),
                }),
            );
        }
        Ok(Value::Object(payload))
    }

    /// Close the provider client and the blob store. Runs once; later calls are no-ops.
    pub async fn close(&self) -> Result<()> {
        if self.closed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        tracing::info!(provider = self.backend.provider_id(), "Closing media service");
        let backend = self.backend.close().await;
        let storage = self.persister.close().await;
        backend.and(storage)
    }
}
