//! Provider Module
//!
//! The [`ProviderApi`] port is the seam between the backend adapter and the
//! wire client. Both backend variants are served by one implementation,
//! [`openai::OpenAiClient`]; tests substitute their own.

pub mod capabilities;
pub mod openai;
pub mod types;

pub use capabilities::{CapabilitySupport, capability_support, supports};
pub use openai::OpenAiClient;
pub use types::{GeneratedImage, GeneratedImages, VideoPoll};

use async_trait::async_trait;

use crate::config::BackendKind;
use crate::error::Result;
use crate::types::{ChatRequest, ImageRequest, SpeechRequest, VideoRequest, VideoVariant};

/// Capability operations of the provider API.
///
/// Implementations hold one long-lived HTTP client and are shared by every
/// concurrent call.
#[async_trait]
pub trait ProviderApi: Send + Sync {
    /// Backend variant this client is bound to.
    fn kind(&self) -> BackendKind;

    /// `chat.create`; returns the raw completion payload.
    async fn create_chat_completion(
        &self,
        model: &str,
        request: &ChatRequest,
    ) -> Result<serde_json::Value>;

    /// `images.generate`
    async fn generate_images(&self, model: &str, request: &ImageRequest) -> Result<GeneratedImages>;

    /// `audio.speech.create`; returns the rendered audio bytes.
    async fn create_speech(
        &self,
        model: &str,
        voice: &str,
        request: &SpeechRequest,
    ) -> Result<Vec<u8>>;

    /// Submit a video job.
    async fn create_video(&self, model: &str, request: &VideoRequest) -> Result<VideoPoll>;

    /// Fetch the current state of a video job.
    async fn retrieve_video(&self, video_id: &str) -> Result<VideoPoll>;

    /// Download one derived asset of a completed video job.
    async fn download_video_content(&self, video_id: &str, variant: VideoVariant)
    -> Result<Vec<u8>>;

    /// Release the client. Called once at shutdown.
    async fn close(&self) -> Result<()> {
        Ok(())
    }
}
