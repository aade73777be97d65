//! Provider-neutral response shapes.

use serde::Deserialize;
use std::time::Duration;

use crate::types::VideoJob;

/// One image variation as returned by `images.generate`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GeneratedImage {
    #[serde(default)]
    pub b64_json: Option<String>,
    #[serde(default)]
    pub revised_prompt: Option<String>,
}

/// `images.generate` response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GeneratedImages {
    #[serde(default)]
    pub created: Option<i64>,
    #[serde(default, rename = "data")]
    pub images: Vec<GeneratedImage>,
}

/// A video job snapshot plus the provider's suggested wait before the next poll.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoPoll {
    pub job: VideoJob,
    pub retry_after: Option<Duration>,
}

impl VideoPoll {
    pub fn new(job: VideoJob) -> Self {
        Self {
            job,
            retry_after: None,
        }
    }

    pub fn with_retry_after(mut self, retry_after: Option<Duration>) -> Self {
        self.retry_after = retry_after;
        self
    }
}
