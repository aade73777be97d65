//! Types Module
//!
//! Capability-tagged request and result types shared by the normalizer,
//! the provider adapter, and the response normalizer.

pub mod artifact;
pub mod audio;
pub mod capability;
pub mod chat;
pub mod image;
pub mod video;

pub use artifact::{ArtifactCategory, ArtifactPayload, DEFAULT_CONTENT_TYPE, MediaArtifact};
pub use audio::{SpeechParams, SpeechRequest, SpeechResult};
pub use capability::Capability;
pub use chat::{ChatParams, ChatRequest, ChatResult, ResponseFormat};
pub use image::{ImageEntry, ImageParams, ImageQuality, ImageRequest, ImageResult, ImageSize};
pub use video::{
    VideoJob, VideoJobStatus, VideoParams, VideoRequest, VideoResult, VideoSeconds, VideoVariant,
};
