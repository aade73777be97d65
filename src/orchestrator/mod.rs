//! Orchestrators for long-running provider jobs.

pub mod video;

pub use video::{CompletedVideo, JobState, PollOptions, VideoJobOrchestrator};
