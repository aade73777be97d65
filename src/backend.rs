//! Provider Backend Adapter
//!
//! Owns the single provider client for the configured backend variant,
//! fills in configured model defaults, and refuses capabilities the variant
//! cannot serve before any network call is made.

use std::sync::Arc;

use crate::config::{BackendKind, ProviderConfig};
use crate::error::{GatewayError, Result};
use crate::providers::{GeneratedImages, OpenAiClient, ProviderApi, supports};
use crate::types::{Capability, ChatRequest, ImageRequest, SpeechRequest};

/// Capability front for one provider client.
#[derive(Clone)]
pub struct ProviderBackend {
    config: Arc<ProviderConfig>,
    api: Arc<dyn ProviderApi>,
}

impl std::fmt::Debug for ProviderBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderBackend")
            .field("provider", &self.provider_id())
            .finish()
    }
}

impl ProviderBackend {
    /// Build the HTTP client for the configured variant.
    pub fn from_config(config: ProviderConfig) -> Result<Self> {
        let api = OpenAiClient::new(&config)?;
        Ok(Self::new(config, Arc::new(api)))
    }

    pub fn new(config: ProviderConfig, api: Arc<dyn ProviderApi>) -> Self {
        Self {
            config: Arc::new(config),
            api,
        }
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    pub fn kind(&self) -> BackendKind {
        self.config.kind()
    }

    pub fn provider_id(&self) -> &'static str {
        self.config.provider_id()
    }

    pub fn api(&self) -> Arc<dyn ProviderApi> {
        Arc::clone(&self.api)
    }

    /// Fail fast when the active variant cannot serve `capability`.
    pub fn ensure_supported(&self, capability: Capability) -> Result<()> {
        if supports(self.kind(), capability) {
            return Ok(());
        }
        tracing::warn!(
            provider = self.provider_id(),
            capability = capability.as_str(),
            "Capability not supported by backend"
        );
        Err(GatewayError::UnsupportedCapability {
            capability: capability.as_str().to_string(),
            backend: self.kind().display_name().to_string(),
        })
    }

    /// Explicit override or the configured model for `capability`.
    pub fn resolve_model(&self, capability: Capability, requested: Option<&str>) -> String {
        requested
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| self.config.model_for(capability))
            .to_string()
    }

    /// Returns the model used and the raw completion payload.
    pub async fn chat(&self, request: &ChatRequest) -> Result<(String, serde_json::Value)> {
        self.ensure_supported(Capability::Chat)?;
        let model = self.resolve_model(Capability::Chat, request.model.as_deref());
        let raw = self.api.create_chat_completion(&model, request).await?;
        Ok((model, raw))
    }

    /// Image generation always uses the configured image model.
    pub async fn image(&self, request: &ImageRequest) -> Result<(String, GeneratedImages)> {
        self.ensure_supported(Capability::Image)?;
        let model = self.config.image_model.clone();
        let images = self.api.generate_images(&model, request).await?;
        Ok((model, images))
    }

    /// Returns the voice used and the audio bytes.
    pub async fn speech(&self, request: &SpeechRequest) -> Result<(String, Vec<u8>)> {
        self.ensure_supported(Capability::Audio)?;
        let model = self.resolve_model(Capability::Audio, request.model.as_deref());
        let voice = request
            .voice
            .clone()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| self.config.default_voice.clone());
        let audio = self.api.create_speech(&model, &voice, request).await?;
        Ok((voice, audio))
    }

    pub async fn close(&self) -> Result<()> {
        self.api.close().await
    }
}
