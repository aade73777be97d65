//! Provider configuration
//!
//! The backend variant is chosen once at startup and never switches.

use secrecy::SecretString;

use super::env::{Lookup, non_empty, require, value_with_fallback};
use crate::error::GatewayError;
use crate::types::Capability;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_AZURE_API_VERSION: &str = "2024-10-21";
pub const DEFAULT_VOICE: &str = "alloy";

/// Direct endpoint of the provider API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectEndpoint {
    /// Overrides `https://api.openai.com/v1` when set.
    pub base_url: Option<String>,
    pub organization: Option<String>,
}

/// Managed-deployment endpoint (Azure OpenAI).
#[derive(Debug, Clone)]
pub struct ManagedDeployment {
    pub endpoint: String,
    pub api_version: String,
    /// Entra ID token; replaces the `api-key` header when present.
    pub ad_token: Option<SecretString>,
}

/// Deployment style of the provider API.
#[derive(Debug, Clone)]
pub enum BackendVariant {
    Direct(DirectEndpoint),
    Managed(ManagedDeployment),
}

/// Discriminant of [`BackendVariant`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    Direct,
    Managed,
}

impl BackendKind {
    /// Provider label used in results and logs.
    pub fn provider_id(&self) -> &'static str {
        match self {
            Self::Direct => "openai",
            Self::Managed => "azure",
        }
    }

    /// Human-readable backend name used in unsupported-capability errors.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Direct => "OpenAI",
            Self::Managed => "Azure OpenAI",
        }
    }
}

/// Immutable provider settings shared by the backend adapter.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub variant: BackendVariant,
    pub api_key: SecretString,
    pub chat_model: String,
    pub image_model: String,
    pub audio_model: String,
    pub video_model: String,
    pub default_voice: String,
}

impl ProviderConfig {
    /// Direct configuration with the stock model defaults.
    pub fn direct(api_key: impl Into<String>) -> Self {
        Self {
            variant: BackendVariant::Direct(DirectEndpoint {
                base_url: None,
                organization: None,
            }),
            api_key: SecretString::from(api_key.into()),
            chat_model: "gpt-4.1-mini".to_string(),
            image_model: "gpt-image-1".to_string(),
            audio_model: "gpt-4o-mini-tts".to_string(),
            video_model: "sora-2".to_string(),
            default_voice: DEFAULT_VOICE.to_string(),
        }
    }

    /// Managed-deployment configuration with the stock deployment names.
    pub fn managed(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            variant: BackendVariant::Managed(ManagedDeployment {
                endpoint: endpoint.into(),
                api_version: DEFAULT_AZURE_API_VERSION.to_string(),
                ad_token: None,
            }),
            api_key: SecretString::from(api_key.into()),
            chat_model: "gpt-4o-mini".to_string(),
            image_model: "gpt-image-1".to_string(),
            audio_model: "gpt-4o-mini-tts".to_string(),
            video_model: "sora-2".to_string(),
            default_voice: DEFAULT_VOICE.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        if let BackendVariant::Direct(direct) = &mut self.variant {
            direct.base_url = Some(base_url.into());
        }
        self
    }

    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        if let BackendVariant::Direct(direct) = &mut self.variant {
            direct.organization = Some(organization.into());
        }
        self
    }

    pub fn with_ad_token(mut self, token: impl Into<String>) -> Self {
        if let BackendVariant::Managed(managed) = &mut self.variant {
            managed.ad_token = Some(SecretString::from(token.into()));
        }
        self
    }

    pub fn with_model(mut self, capability: Capability, model: impl Into<String>) -> Self {
        let model = model.into();
        match capability {
            Capability::Chat => self.chat_model = model,
            Capability::Image => self.image_model = model,
            Capability::Audio => self.audio_model = model,
            Capability::Video => self.video_model = model,
        }
        self
    }

    pub fn kind(&self) -> BackendKind {
        match self.variant {
            BackendVariant::Direct(_) => BackendKind::Direct,
            BackendVariant::Managed(_) => BackendKind::Managed,
        }
    }

    pub fn provider_id(&self) -> &'static str {
        self.kind().provider_id()
    }

    /// Configured model (or deployment name) for a capability.
    pub fn model_for(&self, capability: Capability) -> &str {
        match capability {
            Capability::Chat => &self.chat_model,
            Capability::Image => &self.image_model,
            Capability::Audio => &self.audio_model,
            Capability::Video => &self.video_model,
        }
    }

    /// Base URL reported by model listings (direct variant only).
    pub fn base_url(&self) -> Option<&str> {
        match &self.variant {
            BackendVariant::Direct(direct) => direct.base_url.as_deref(),
            BackendVariant::Managed(_) => None,
        }
    }

    /// Endpoint reported by model listings (managed variant only).
    pub fn managed_endpoint(&self) -> Option<&str> {
        match &self.variant {
            BackendVariant::Managed(managed) => Some(managed.endpoint.as_str()),
            BackendVariant::Direct(_) => None,
        }
    }

    /// Load from environment variables; `AZURE_OPENAI_ENDPOINT` selects the managed variant.
    pub fn from_lookup(lookup: Lookup<'_>) -> Result<Self, GatewayError> {
        let default_voice =
            value_with_fallback(lookup, "OPENAI_DEFAULT_VOICE", None, DEFAULT_VOICE);

        if let Some(endpoint) = non_empty(lookup, "AZURE_OPENAI_ENDPOINT") {
            let api_key = require(lookup, "AZURE_OPENAI_API_KEY")?;
            let api_version = value_with_fallback(
                lookup,
                "AZURE_OPENAI_API_VERSION",
                non_empty(lookup, "OPENAI_API_VERSION"),
                DEFAULT_AZURE_API_VERSION,
            );
            let shared = non_empty(lookup, "AZURE_OPENAI_DEPLOYMENT");
            let deployment = |azure_var: &str, openai_var: &str, default: &str| {
                let fallback = shared.clone().or_else(|| non_empty(lookup, openai_var));
                value_with_fallback(lookup, azure_var, fallback, default)
            };

            return Ok(Self {
                variant: BackendVariant::Managed(ManagedDeployment {
                    endpoint,
                    api_version,
                    ad_token: non_empty(lookup, "AZURE_OPENAI_AD_TOKEN").map(SecretString::from),
                }),
                api_key: SecretString::from(api_key),
                chat_model: deployment(
                    "AZURE_OPENAI_CHAT_DEPLOYMENT",
                    "OPENAI_CHAT_MODEL",
                    "gpt-4o-mini",
                ),
                image_model: deployment(
                    "AZURE_OPENAI_IMAGE_DEPLOYMENT",
                    "OPENAI_IMAGE_MODEL",
                    "gpt-image-1",
                ),
                audio_model: deployment(
                    "AZURE_OPENAI_AUDIO_DEPLOYMENT",
                    "OPENAI_AUDIO_MODEL",
                    "gpt-4o-mini-tts",
                ),
                video_model: deployment(
                    "AZURE_OPENAI_VIDEO_DEPLOYMENT",
                    "OPENAI_VIDEO_MODEL",
                    "sora-2",
                ),
                default_voice,
            });
        }

        let api_key = require(lookup, "OPENAI_API_KEY")?;
        Ok(Self {
            variant: BackendVariant::Direct(DirectEndpoint {
                base_url: non_empty(lookup, "OPENAI_BASE_URL"),
                organization: non_empty(lookup, "OPENAI_ORG"),
            }),
            api_key: SecretString::from(api_key),
            chat_model: value_with_fallback(lookup, "OPENAI_CHAT_MODEL", None, "gpt-4.1-mini"),
            image_model: value_with_fallback(lookup, "OPENAI_IMAGE_MODEL", None, "gpt-image-1"),
            audio_model: value_with_fallback(lookup, "OPENAI_AUDIO_MODEL", None, "gpt-4o-mini-tts"),
            video_model: value_with_fallback(lookup, "OPENAI_VIDEO_MODEL", None, "sora-2"),
            default_voice,
        })
    }
}
