//! Response transformation
//!
//! Converts provider responses into the flat result types returned to callers.

use serde_json::Value;

use crate::error::{GatewayError, Result};
use crate::types::{ChatResult, ImageEntry, ImageResult, SpeechResult, VideoJob, VideoResult};

/// Assistant text from a heterogeneous `message.content` value.
///
/// Strings are returned as-is. Arrays concatenate `text` chunks; `tool_call`
/// chunks are rendered as their JSON text, never invoked. Null yields `""`.
pub fn extract_text(content: &Value) -> String {
    match content {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(chunks) => chunks.iter().map(chunk_text).collect(),
        other => other.to_string(),
    }
}

fn chunk_text(chunk: &Value) -> String {
    match chunk {
        Value::Object(obj) => match obj.get("type").and_then(Value::as_str) {
            Some("text") => match obj.get("text") {
                Some(Value::String(s)) => s.clone(),
                Some(other) if !is_falsy(other) => other.to_string(),
                _ => String::new(),
            },
            Some("tool_call") => chunk.to_string(),
            _ => String::new(),
        },
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        Value::String(s) => s.is_empty(),
        Value::Null => true,
    }
}

/// `{text, finish_reason, model, usage, raw}` from a chat completion payload.
pub fn chat_result(raw: Value) -> Result<ChatResult> {
    let choice = raw
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|choices| choices.first())
        .ok_or_else(|| GatewayError::ParseError("Chat completion contained no choices".into()))?;

    let text = extract_text(choice.pointer("/message/content").unwrap_or(&Value::Null));
    let finish_reason = choice
        .get("finish_reason")
        .and_then(Value::as_str)
        .map(str::to_string);
    let model = raw.get("model").and_then(Value::as_str).map(str::to_string);
    let usage = raw.get("usage").filter(|u| !u.is_null()).cloned();

    Ok(ChatResult {
        text,
        finish_reason,
        model,
        usage,
        raw_payload: raw,
    })
}

/// Image entries are kept in provider order.
pub fn image_result(model: String, created: Option<i64>, images: Vec<ImageEntry>) -> ImageResult {
    ImageResult {
        model,
        created_timestamp: created,
        images,
    }
}

pub fn speech_result(
    voice: String,
    format: String,
    byte_length: usize,
    blob_url: String,
) -> SpeechResult {
    SpeechResult {
        voice,
        format,
        byte_length,
        blob_url,
    }
}

pub fn video_result(
    job: VideoJob,
    variant: &str,
    byte_length: usize,
    blob_url: String,
) -> VideoResult {
    VideoResult {
        video_id: job.id,
        status: job.status.to_string(),
        model: job.model,
        size: job.size,
        seconds: job.seconds,
        variant: variant.to_string(),
        byte_length,
        blob_url,
    }
}
