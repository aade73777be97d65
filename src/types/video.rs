//! Video Generation Types
//!
//! Request, job-handle, and result types for the task-based video API.

use serde::{Deserialize, Deserializer, Serialize};

/// Accepted clip durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VideoSeconds {
    Four,
    Eight,
    Twelve,
}

impl VideoSeconds {
    pub fn as_u32(&self) -> u32 {
        match self {
            Self::Four => 4,
            Self::Eight => 8,
            Self::Twelve => 12,
        }
    }
}

/// Downloadable asset variants of a completed video job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VideoVariant {
    Video,
    Thumbnail,
    Spritesheet,
}

impl VideoVariant {
    pub const ACCEPTED: [&'static str; 3] = ["video", "thumbnail", "spritesheet"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Thumbnail => "thumbnail",
            Self::Spritesheet => "spritesheet",
        }
    }
}

/// Raw video arguments as received from the tool-calling layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoParams {
    /// Description of the motion scene to synthesize.
    pub prompt: String,
    pub model: Option<String>,
    /// Clip duration; must be 4, 8, or 12.
    pub seconds: i64,
    /// Output resolution such as `720x1280`; validated by the provider.
    pub size: String,
    /// Download target: `video`, `thumbnail`, or `spritesheet`.
    pub variant: String,
}

impl Default for VideoParams {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            model: None,
            seconds: 4,
            size: "720x1280".to_string(),
            variant: "video".to_string(),
        }
    }
}

impl VideoParams {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Default::default()
        }
    }

    pub fn with_seconds(mut self, seconds: i64) -> Self {
        self.seconds = seconds;
        self
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = size.into();
        self
    }

    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = variant.into();
        self
    }
}

/// Normalized video request.
#[derive(Debug, Clone)]
pub struct VideoRequest {
    pub prompt: String,
    pub model: Option<String>,
    pub seconds: VideoSeconds,
    pub size: String,
    pub variant: VideoVariant,
}

/// Video job status as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VideoJobStatus {
    Queued,
    InProgress,
    Completed,
    Failed,
    /// Provider-defined status this crate does not know about.
    Other(String),
}

impl VideoJobStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Queued => "queued",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Other(s) => s.as_str(),
        }
    }

    /// `completed` and `failed` end the job; every other status keeps polling.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl From<String> for VideoJobStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "queued" => Self::Queued,
            "in_progress" => Self::InProgress,
            "completed" => Self::Completed,
            "failed" => Self::Failed,
            _ => Self::Other(value),
        }
    }
}

impl From<VideoJobStatus> for String {
    fn from(value: VideoJobStatus) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for VideoJobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handle to a provider video job, owned by one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoJob {
    pub id: String,
    pub status: VideoJobStatus,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub seconds: Option<String>,
    #[serde(default)]
    pub progress: Option<u32>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Flattened video generation result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoResult {
    pub video_id: String,
    pub status: String,
    pub model: Option<String>,
    pub size: Option<String>,
    pub seconds: Option<String>,
    pub variant: String,
    pub byte_length: usize,
    pub blob_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_status_terminality() {
        assert!(!VideoJobStatus::Queued.is_terminal());
        assert!(!VideoJobStatus::InProgress.is_terminal());
        assert!(!VideoJobStatus::Other("preprocessing".into()).is_terminal());
        assert!(VideoJobStatus::Completed.is_terminal());
        assert!(VideoJobStatus::Failed.is_terminal());
    }

    #[test]
    fn job_deserializes_numeric_or_string_seconds() {
        let job: VideoJob = serde_json::from_value(serde_json::json!({
            "id": "video_1",
            "object": "video",
            "status": "in_progress",
            "model": "sora-2",
            "seconds": "8",
            "size": "1280x720",
            "progress": 40
        }))
        .unwrap();
        assert_eq!(job.status, VideoJobStatus::InProgress);
        assert_eq!(job.seconds.as_deref(), Some("8"));

        let job: VideoJob = serde_json::from_value(serde_json::json!({
            "id": "video_2",
            "status": "rendering",
            "seconds": 12
        }))
        .unwrap();
        assert_eq!(job.status, VideoJobStatus::Other("rendering".into()));
        assert_eq!(job.seconds.as_deref(), Some("12"));
        assert_eq!(job.model, None);
    }
}
