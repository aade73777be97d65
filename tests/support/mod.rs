//! Shared fixtures: a media service wired to a wiremock provider and an
//! in-memory artifact store.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use serde_json::{Value, json};
use siumai_media_gateway::config::{ProviderConfig, StorageConfig};
use siumai_media_gateway::orchestrator::PollOptions;
use siumai_media_gateway::providers::OpenAiClient;
use siumai_media_gateway::service::MediaService;
use siumai_media_gateway::storage::{ArtifactPersister, MemoryArtifactStore};
use wiremock::MockServer;

pub const PUBLIC_BASE: &str = "https://cdn.example.com/media";

pub fn storage_config() -> StorageConfig {
    StorageConfig::new(
        "AccountName=devacct;AccountKey=Z2F0ZXdheS10ZXN0LWFjY291bnQta2V5",
        "media",
        format!("{PUBLIC_BASE}/"),
    )
}

pub fn direct_config(server: &MockServer) -> ProviderConfig {
    ProviderConfig::direct("test-api-key").with_base_url(server.uri())
}

pub fn managed_config(server: &MockServer) -> ProviderConfig {
    ProviderConfig::managed("azure-key", server.uri())
}

/// Service backed by `store`, polling every few milliseconds.
pub fn service_with_store(config: ProviderConfig, store: Arc<MemoryArtifactStore>) -> MediaService {
    let api = OpenAiClient::new(&config).expect("client");
    let persister = ArtifactPersister::new(store, &storage_config());
    MediaService::with_components(config, Arc::new(api), persister)
        .with_poll_options(fast_polling())
}

/// Service with no artifact storage.
pub fn service_without_storage(config: ProviderConfig) -> MediaService {
    let api = OpenAiClient::new(&config).expect("client");
    MediaService::with_components(config, Arc::new(api), ArtifactPersister::disabled())
        .with_poll_options(fast_polling())
}

pub fn fast_polling() -> PollOptions {
    PollOptions::default()
        .with_default_interval(Duration::from_millis(5))
        .with_max_wait(Duration::from_secs(10))
}

pub fn chat_completion(content: Value) -> Value {
    json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "created": 1727784000,
        "model": "gpt-4.1-mini",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 9, "completion_tokens": 12, "total_tokens": 21 }
    })
}

pub fn video_job(id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "object": "video",
        "status": status,
        "model": "sora-2",
        "size": "1280x720",
        "seconds": "8",
        "progress": if status == "completed" { 100 } else { 40 }
    })
}

pub fn openai_error(message: &str) -> Value {
    json!({
        "error": {
            "message": message,
            "type": "invalid_request_error",
            "param": null,
            "code": null
        }
    })
}
