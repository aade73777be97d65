//! Video Job Orchestrator
//!
//! Drives one video job through `submitted -> {queued | in_progress}* ->
//! completed | failed`. Status is polled at the cadence the provider
//! suggests; no partial result is visible before a terminal state. On
//! completion exactly one asset variant is downloaded.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

use crate::error::{GatewayError, Result};
use crate::params::video_variant_meta;
use crate::providers::{ProviderApi, VideoPoll};
use crate::types::{ArtifactCategory, MediaArtifact, VideoJob, VideoJobStatus, VideoRequest};

/// Polling cadence and optional overall bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOptions {
    /// Wait between polls when the provider gives no hint.
    pub default_interval: Duration,
    /// Total time allowed before giving up; `None` waits for the provider.
    pub max_wait: Option<Duration>,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            default_interval: Duration::from_secs(1),
            max_wait: None,
        }
    }
}

impl PollOptions {
    pub fn with_default_interval(mut self, interval: Duration) -> Self {
        self.default_interval = interval;
        self
    }

    pub fn with_max_wait(mut self, max_wait: Duration) -> Self {
        self.max_wait = Some(max_wait);
        self
    }
}

/// Orchestrator state for one job.
#[derive(Debug, Clone, PartialEq)]
pub enum JobState {
    /// Created by the provider; not yet observed terminal.
    Submitted(VideoPoll),
    /// Still running (`queued`, `in_progress`, or a provider-specific status).
    Pending(VideoPoll),
    Completed(VideoJob),
    /// Terminal but not `completed`.
    Failed(VideoJob),
}

impl JobState {
    fn observe(poll: VideoPoll) -> Self {
        if poll.job.status == VideoJobStatus::Completed {
            Self::Completed(poll.job)
        } else if poll.job.status.is_terminal() {
            Self::Failed(poll.job)
        } else {
            Self::Pending(poll)
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed(_) | Self::Failed(_))
    }
}

/// A completed job with its downloaded asset ready for persistence.
#[derive(Debug, Clone)]
pub struct CompletedVideo {
    pub job: VideoJob,
    pub artifact: MediaArtifact,
    pub byte_length: usize,
}

pub struct VideoJobOrchestrator {
    provider: Arc<dyn ProviderApi>,
    options: PollOptions,
}

impl VideoJobOrchestrator {
    pub fn new(provider: Arc<dyn ProviderApi>) -> Self {
        Self::with_options(provider, PollOptions::default())
    }

    pub fn with_options(provider: Arc<dyn ProviderApi>, options: PollOptions) -> Self {
        Self { provider, options }
    }

    pub fn options(&self) -> PollOptions {
        self.options
    }

    /// Submit, wait for a terminal state, then download the requested variant.
    pub async fn run(&self, model: &str, request: &VideoRequest) -> Result<CompletedVideo> {
        let submitted = self.provider.create_video(model, request).await?;
        tracing::info!(
            video_id = %submitted.job.id,
            status = %submitted.job.status,
            model,
            "Video job submitted"
        );

        let job = match self.wait(JobState::Submitted(submitted)).await? {
            JobState::Completed(job) => job,
            JobState::Failed(job) => {
                tracing::error!(video_id = %job.id, status = %job.status, "Video job failed");
                return Err(GatewayError::VideoJobFailed {
                    job_id: job.id,
                    status: job.status.to_string(),
                });
            }
            JobState::Submitted(poll) | JobState::Pending(poll) => {
                return Err(GatewayError::VideoJobFailed {
                    job_id: poll.job.id,
                    status: poll.job.status.to_string(),
                });
            }
        };

        let variant = request.variant;
        let content = self
            .provider
            .download_video_content(&job.id, variant)
            .await?;
        let (extension, content_type) = video_variant_meta(variant.as_str());
        tracing::info!(
            video_id = %job.id,
            variant = variant.as_str(),
            byte_length = content.len(),
            "Video asset downloaded"
        );

        Ok(CompletedVideo {
            byte_length: content.len(),
            artifact: MediaArtifact::bytes(
                content,
                ArtifactCategory::Videos,
                extension,
                content_type,
            ),
            job,
        })
    }

    /// Poll until a terminal state is observed.
    async fn wait(&self, mut state: JobState) -> Result<JobState> {
        let started = Instant::now();
        loop {
            let poll = match state {
                JobState::Submitted(poll) => match JobState::observe(poll) {
                    JobState::Pending(poll) => poll,
                    terminal => return Ok(terminal),
                },
                JobState::Pending(poll) => poll,
                terminal => return Ok(terminal),
            };

            if let Some(max_wait) = self.options.max_wait {
                if started.elapsed() >= max_wait {
                    return Err(GatewayError::TimeoutError(format!(
                        "Video job {} did not finish within {}s (status={})",
                        poll.job.id,
                        max_wait.as_secs(),
                        poll.job.status
                    )));
                }
            }

            let delay = poll.retry_after.unwrap_or(self.options.default_interval);
            tracing::debug!(
                video_id = %poll.job.id,
                status = %poll.job.status,
                progress = poll.job.progress,
                delay_ms = delay.as_millis() as u64,
                "Video job pending"
            );
            tokio::time::sleep(delay).await;

            state = JobState::observe(self.provider.retrieve_video(&poll.job.id).await?);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BackendKind;
    use crate::providers::GeneratedImages;
    use crate::types::{
        ChatRequest, ImageRequest, SpeechRequest, VideoSeconds, VideoVariant,
    };
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays a fixed sequence of job states.
    struct ScriptedVideos {
        statuses: Mutex<VecDeque<&'static str>>,
        downloads: Mutex<Vec<VideoVariant>>,
        polls: Mutex<usize>,
    }

    impl ScriptedVideos {
        fn new(statuses: &[&'static str]) -> Self {
            Self {
                statuses: Mutex::new(statuses.iter().copied().collect()),
                downloads: Mutex::new(Vec::new()),
                polls: Mutex::new(0),
            }
        }

        fn next(&self) -> VideoPoll {
            let status = self
                .statuses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or("completed");
            VideoPoll::new(VideoJob {
                id: "video_abc".into(),
                status: VideoJobStatus::from(status.to_string()),
                model: Some("sora-2".into()),
                size: Some("1280x720".into()),
                seconds: Some("8".into()),
                progress: None,
            })
        }
    }

    #[async_trait]
    impl ProviderApi for ScriptedVideos {
        fn kind(&self) -> BackendKind {
            BackendKind::Direct
        }
        async fn create_chat_completion(
            &self,
            _: &str,
            _: &ChatRequest,
        ) -> Result<serde_json::Value> {
            unreachable!()
        }
        async fn generate_images(&self, _: &str, _: &ImageRequest) -> Result<GeneratedImages> {
            unreachable!()
        }
        async fn create_speech(&self, _: &str, _: &str, _: &SpeechRequest) -> Result<Vec<u8>> {
            unreachable!()
        }
        async fn create_video(&self, _: &str, _: &VideoRequest) -> Result<VideoPoll> {
            Ok(self.next())
        }
        async fn retrieve_video(&self, _: &str) -> Result<VideoPoll> {
            *self.polls.lock().unwrap() += 1;
            Ok(self.next())
        }
        async fn download_video_content(&self, _: &str, variant: VideoVariant) -> Result<Vec<u8>> {
            self.downloads.lock().unwrap().push(variant);
            Ok(b"\x89PNG".to_vec())
        }
    }

    fn request(variant: VideoVariant) -> VideoRequest {
        VideoRequest {
            prompt: "waves".into(),
            model: None,
            seconds: VideoSeconds::Eight,
            size: "1280x720".into(),
            variant,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn polls_through_unknown_statuses_until_completed() {
        let provider = Arc::new(ScriptedVideos::new(&[
            "queued",
            "in_progress",
            "preprocessing",
            "completed",
        ]));
        let orchestrator = VideoJobOrchestrator::new(provider.clone());

        let done = orchestrator
            .run("sora-2", &request(VideoVariant::Thumbnail))
            .await
            .unwrap();

        assert_eq!(*provider.polls.lock().unwrap(), 3);
        assert_eq!(*provider.downloads.lock().unwrap(), vec![VideoVariant::Thumbnail]);
        assert_eq!(done.artifact.extension, "png");
        assert_eq!(done.artifact.content_type, "image/png");
        assert_eq!(done.byte_length, 4);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_job_carries_id_and_status() {
        let provider = Arc::new(ScriptedVideos::new(&["queued", "failed"]));
        let orchestrator = VideoJobOrchestrator::new(provider.clone());

        let err = orchestrator
            .run("sora-2", &request(VideoVariant::Video))
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Video job video_abc did not complete successfully (status=failed)"
        );
        assert!(provider.downloads.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn max_wait_bounds_polling() {
        let provider = Arc::new(ScriptedVideos::new(&["queued"; 64]));
        let orchestrator = VideoJobOrchestrator::with_options(
            provider,
            PollOptions::default().with_max_wait(Duration::from_secs(5)),
        );

        let err = orchestrator
            .run("sora-2", &request(VideoVariant::Video))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::TimeoutError(_)));
    }

    #[test]
    fn observe_classifies_statuses() {
        let poll = |status: &str| {
            VideoPoll::new(VideoJob {
                id: "v".into(),
                status: VideoJobStatus::from(status.to_string()),
                model: None,
                size: None,
                seconds: None,
                progress: None,
            })
        };
        assert!(matches!(JobState::observe(poll("completed")), JobState::Completed(_)));
        assert!(matches!(JobState::observe(poll("failed")), JobState::Failed(_)));
        assert!(matches!(JobState::observe(poll("in_progress")), JobState::Pending(_)));
        assert!(!JobState::observe(poll("cancelling")).is_terminal());
    }
}
