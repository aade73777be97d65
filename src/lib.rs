//! # Siumai Media Gateway
//!
//! Media generation gateway over `OpenAI` and Azure `OpenAI`. Exposes four
//! capabilities (chat, image, speech, video) behind one service, validates
//! caller parameters against closed sets before any network call, and
//! persists binary outputs to Azure Blob Storage so callers always receive
//! public URLs instead of raw bytes.
//!
#![deny(unsafe_code)]

//! ## Quick Start
//!
//! ```rust,no_run
//! use siumai_media_gateway::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), GatewayError> {
//!     let settings = Settings::from_env()?;
//!     let service = MediaService::new(settings.provider, settings.storage)?;
//!
//!     let result = service.chat_completion(ChatParams::new("Hello!")).await?;
//!     println!("{}", result.text);
//!
//!     let images = service
//!         .generate_image(ImageParams::new("a lighthouse at dusk"))
//!         .await?;
//!     println!("{}", images.images[0].blob_url);
//!
//!     service.close().await
//! }
//! ```
//!
//! ## Backends
//!
//! - **Direct**: `api.openai.com` (or a compatible base URL) with bearer auth.
//! - **Managed**: Azure `OpenAI` deployments with `api-key` or AD token auth.
//!   Video generation is refused on this variant before any request is sent.

pub mod backend;
pub mod config;
pub mod error;
pub mod observability;
pub mod orchestrator;
pub mod params;
pub mod providers;
#[cfg(feature = "server")]
pub mod server;
pub mod service;
pub mod storage;
pub mod transformers;
pub mod types;
pub mod utils;

pub use error::{GatewayError, Result};
pub use service::MediaService;

/// Commonly used types.
pub mod prelude {
    pub use crate::backend::ProviderBackend;
    pub use crate::config::{ProviderConfig, ServerConfig, Settings, StorageConfig};
    pub use crate::error::{ErrorCategory, GatewayError};
    pub use crate::orchestrator::PollOptions;
    pub use crate::service::MediaService;
    pub use crate::storage::{ArtifactStore, AzureBlobStore, MemoryArtifactStore};
    pub use crate::types::{
        Capability, ChatParams, ChatResult, ImageParams, ImageResult, SpeechParams, SpeechResult,
        VideoParams, VideoResult,
    };
}
