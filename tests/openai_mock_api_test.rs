//! Mock API tests for the direct `OpenAI` backend
//!
//! Response bodies follow the public API reference for chat completions,
//! image generations and speech.

mod support;

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::json;
use siumai_media_gateway::prelude::*;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use support::{PUBLIC_BASE, chat_completion, direct_config, openai_error, service_with_store};

#[tokio::test]
async fn chat_completion_sends_json_directive_and_returns_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("Authorization", "Bearer test-api-key"))
        .and(body_partial_json(json!({
            "model": "gpt-4.1-mini",
            "response_format": { "type": "json_object" },
            "messages": [
                { "role": "system", "content": "Reply in JSON" },
                { "role": "user", "content": "List two colors" }
            ]
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(chat_completion(json!("{\"colors\":[\"red\",\"blue\"]}"))),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = Arc::new(MemoryArtifactStore::new());
    let service = service_with_store(direct_config(&mock_server), store.clone());

    let result = service
        .chat_completion(
            ChatParams::new("List two colors")
                .with_system_prompt("Reply in JSON")
                .with_response_format("JSON"),
        )
        .await
        .unwrap();

    assert_eq!(result.text, "{\"colors\":[\"red\",\"blue\"]}");
    assert_eq!(result.finish_reason.as_deref(), Some("stop"));
    assert_eq!(result.model.as_deref(), Some("gpt-4.1-mini"));
    assert_eq!(result.usage.unwrap()["total_tokens"], 21);
    assert_eq!(result.raw_payload["id"], "chatcmpl-123");
    assert!(store.uploads().is_empty());
}

#[tokio::test]
async fn chat_completion_flattens_content_chunks() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_completion(json!([
            { "type": "text", "text": "Hello" },
            { "type": "image_url", "image_url": { "url": "https://x" } },
            " world"
        ]))))
        .mount(&mock_server)
        .await;

    let service = service_with_store(
        direct_config(&mock_server),
        Arc::new(MemoryArtifactStore::new()),
    );
    let result = service.chat_completion(ChatParams::new("hi")).await.unwrap();

    assert_eq!(result.text, "Hello world");
}

#[tokio::test]
async fn image_generation_persists_every_variation_in_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/images/generations"))
        .and(body_partial_json(json!({
            "model": "gpt-image-1",
            "quality": "high",
            "size": "1024x1536",
            "n": 2
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "created": 1727784000,
            "data": [
                { "b64_json": STANDARD.encode(b"first-image"), "revised_prompt": "a red fox" },
                { "b64_json": STANDARD.encode(b"second-image") }
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = Arc::new(MemoryArtifactStore::new());
    let service = service_with_store(direct_config(&mock_server), store.clone());

    let result = service
        .generate_image(
            ImageParams::new("a fox")
                .with_quality("hd")
                .with_size("1024x1536")
                .with_count(2),
        )
        .await
        .unwrap();

    assert_eq!(result.model, "gpt-image-1");
    assert_eq!(result.created_timestamp, Some(1727784000));
    assert_eq!(result.images.len(), 2);
    assert_eq!(result.images[0].revised_prompt.as_deref(), Some("a red fox"));
    assert!(result.images[1].revised_prompt.is_none());

    let uploads = store.uploads();
    assert_eq!(uploads.len(), 2);
    for (entry, expected) in result.images.iter().zip([&b"first-image"[..], &b"second-image"[..]]) {
        let path = entry
            .blob_url
            .strip_prefix(&format!("{PUBLIC_BASE}/"))
            .expect("public url prefix");
        assert!(path.starts_with("images/"));
        assert!(path.ends_with(".png"));
        let stored = uploads.iter().find(|u| u.path == path).expect("uploaded");
        assert_eq!(stored.data, expected);
        assert_eq!(stored.content_type, "image/png");
    }
}

#[tokio::test]
async fn invalid_image_count_never_reaches_provider() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/images/generations"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let service = service_with_store(
        direct_config(&mock_server),
        Arc::new(MemoryArtifactStore::new()),
    );
    let err = service
        .generate_image(ImageParams::new("a fox").with_count(11))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "count must be between 1 and 10");
    assert_eq!(err.category(), ErrorCategory::Validation);
}

#[tokio::test]
async fn speech_bytes_are_uploaded_with_format_content_type() {
    let mock_server = MockServer::start().await;
    let audio = b"ID3-fake-audio-bytes".to_vec();

    Mock::given(method("POST"))
        .and(path("/audio/speech"))
        .and(body_partial_json(json!({
            "model": "gpt-4o-mini-tts",
            "voice": "verse",
            "input": "Good morning",
            "response_format": "wav"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(audio.clone()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = Arc::new(MemoryArtifactStore::new());
    let service = service_with_store(direct_config(&mock_server), store.clone());

    let result = service
        .synthesize_speech(
            SpeechParams::new("Good morning")
                .with_voice("verse")
                .with_response_format("wav"),
        )
        .await
        .unwrap();

    assert_eq!(result.voice, "verse");
    assert_eq!(result.format, "wav");
    assert_eq!(result.byte_length, audio.len());

    let uploads = store.uploads();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].content_type, "audio/wav");
    assert!(uploads[0].path.starts_with("audio/"));
    assert!(uploads[0].path.ends_with(".wav"));
    assert_eq!(result.blob_url, format!("{PUBLIC_BASE}/{}", uploads[0].path));
}

#[tokio::test]
async fn speech_uses_default_voice_when_absent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/audio/speech"))
        .and(body_partial_json(json!({ "voice": "alloy", "response_format": "mp3" })))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"mp3".to_vec()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = service_with_store(
        direct_config(&mock_server),
        Arc::new(MemoryArtifactStore::new()),
    );
    let result = service
        .synthesize_speech(SpeechParams::new("hello"))
        .await
        .unwrap();

    assert_eq!(result.voice, "alloy");
}

#[tokio::test]
async fn provider_errors_surface_status_and_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(429).set_body_json(openai_error("Rate limit reached")),
        )
        .mount(&mock_server)
        .await;

    let service = service_with_store(
        direct_config(&mock_server),
        Arc::new(MemoryArtifactStore::new()),
    );
    let err = service
        .chat_completion(ChatParams::new("hi"))
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(429));
    assert_eq!(err.category(), ErrorCategory::Provider);
    assert!(err.to_string().contains("Rate limit reached"));
}
