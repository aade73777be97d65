//! Request bodies for the provider endpoints.

use reqwest::multipart::Form;
use serde_json::{Value, json};

use crate::types::{ChatRequest, ImageRequest, SpeechRequest, VideoRequest};

/// `POST /chat/completions` body. The system prompt, when present, precedes the user turn.
pub fn chat_body(model: &str, request: &ChatRequest) -> Value {
    let mut messages = Vec::with_capacity(2);
    if let Some(system) = &request.system_prompt {
        messages.push(json!({ "role": "system", "content": system }));
    }
    messages.push(json!({ "role": "user", "content": request.prompt }));

    let mut body = json!({
        "model": model,
        "messages": messages,
        "temperature": request.temperature,
        "top_p": request.top_p,
        "presence_penalty": request.presence_penalty,
        "frequency_penalty": request.frequency_penalty,
    });
    if let Some(obj) = body.as_object_mut() {
        if let Some(max_tokens) = request.max_output_tokens {
            obj.insert("max_tokens".to_string(), json!(max_tokens));
        }
        if let Some(directive) = request.response_format.directive() {
            obj.insert("response_format".to_string(), directive);
        }
        if let Some(user) = &request.user {
            obj.insert("user".to_string(), json!(user));
        }
        if let Some(seed) = request.seed {
            obj.insert("seed".to_string(), json!(seed));
        }
        if let Some(metadata) = &request.metadata {
            obj.insert("metadata".to_string(), Value::Object(metadata.clone()));
        }
    }
    body
}

/// `POST /images/generations` body.
pub fn image_body(model: &str, request: &ImageRequest) -> Value {
    let mut body = json!({
        "model": model,
        "prompt": request.prompt,
        "size": request.size.as_str(),
        "quality": request.quality.as_str(),
        "n": request.count,
    });
    if let (Some(obj), Some(user)) = (body.as_object_mut(), &request.user) {
        obj.insert("user".to_string(), json!(user));
    }
    body
}

/// `POST /audio/speech` body.
pub fn speech_body(model: &str, voice: &str, request: &SpeechRequest) -> Value {
    json!({
        "model": model,
        "voice": voice,
        "input": request.text,
        "response_format": request.format,
        "speed": request.speed,
    })
}

/// `POST /videos` multipart form.
pub fn video_form(model: &str, request: &VideoRequest) -> Form {
    Form::new()
        .text("prompt", request.prompt.clone())
        .text("model", model.to_string())
        .text("seconds", request.seconds.as_u32().to_string())
        .text("size", request.size.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::NormalizeParams;
    use crate::types::{ChatParams, ImageParams};

    #[test]
    fn chat_body_places_system_prompt_first() {
        let request = ChatParams::new("Hello")
            .with_system_prompt("Be brief")
            .with_response_format("json")
            .normalize()
            .unwrap();
        let body = chat_body("gpt-4.1-mini", &request);

        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "Hello");
        assert_eq!(body["response_format"], json!({"type": "json_object"}));
        assert!(body.get("max_tokens").is_none());
        assert!(body.get("seed").is_none());
    }

    #[test]
    fn image_body_uses_canonical_values() {
        let request = ImageParams::new("fox")
            .with_quality("hd")
            .with_size("AUTO")
            .with_count(2)
            .normalize()
            .unwrap();
        let body = image_body("gpt-image-1", &request);

        assert_eq!(body["quality"], "high");
        assert_eq!(body["size"], "auto");
        assert_eq!(body["n"], 2);
        assert!(body.get("user").is_none());
    }
}
