//! Tool descriptors and dispatch.

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use super::{AppState, ToolError};
use crate::error::GatewayError;
use crate::types::{ChatParams, ImageParams, SpeechParams, VideoParams};

pub const TOOL_NAMES: [&str; 5] = [
    "chat_completion",
    "generate_image",
    "synthesize_speech",
    "generate_video",
    "list_supported_models",
];

#[derive(Debug, Deserialize)]
#[serde(default)]
struct ListModelsArgs {
    capability: Option<String>,
    include_provider_metadata: bool,
}

impl Default for ListModelsArgs {
    fn default() -> Self {
        Self {
            capability: None,
            include_provider_metadata: true,
        }
    }
}

/// Descriptor list returned by `GET /tools`.
pub fn descriptors() -> Value {
    json!([
        {
            "name": "chat_completion",
            "description": "Run a chat completion with the configured chat model.",
            "input_schema": {
                "type": "object",
                "required": ["prompt"],
                "properties": {
                    "prompt": { "type": "string" },
                    "system_prompt": { "type": "string" },
                    "model": { "type": "string" },
                    "temperature": { "type": "number", "default": 0.2 },
                    "top_p": { "type": "number", "default": 1.0 },
                    "max_output_tokens": { "type": "integer" },
                    "user": { "type": "string" },
                    "response_format": {
                        "type": "string",
                        "description": "json requests a JSON object; others are forwarded"
                    },
                    "presence_penalty": { "type": "number", "default": 0.0 },
                    "frequency_penalty": { "type": "number", "default": 0.0 },
                    "seed": { "type": "integer" },
                    "metadata": { "type": "object" }
                }
            }
        },
        {
            "name": "generate_image",
            "description": "Generate images and return public blob URLs.",
            "input_schema": {
                "type": "object",
                "required": ["prompt"],
                "properties": {
                    "prompt": { "type": "string" },
                    "size": {
                        "type": "string",
                        "enum": ["1024x1024", "1024x1536", "1536x1024", "auto"],
                        "default": "1024x1024"
                    },
                    "quality": {
                        "type": "string",
                        "enum": ["low", "medium", "high", "auto", "standard", "hd"],
                        "default": "high"
                    },
                    "count": { "type": "integer", "minimum": 1, "maximum": 10, "default": 1 },
                    "user": { "type": "string" }
                }
            }
        },
        {
            "name": "synthesize_speech",
            "description": "Convert text to speech and return a public blob URL.",
            "input_schema": {
                "type": "object",
                "required": ["text"],
                "properties": {
                    "text": { "type": "string" },
                    "model": { "type": "string" },
                    "voice": { "type": "string" },
                    "response_format": { "type": "string", "default": "mp3" },
                    "speed": { "type": "number", "default": 1.0 }
                }
            }
        },
        {
            "name": "generate_video",
            "description": "Create a video job, wait for it and return a public blob URL.",
            "input_schema": {
                "type": "object",
                "required": ["prompt"],
                "properties": {
                    "prompt": { "type": "string" },
                    "model": { "type": "string" },
                    "seconds": { "type": "integer", "enum": [4, 8, 12], "default": 4 },
                    "size": { "type": "string", "default": "720x1280" },
                    "variant": {
                        "type": "string",
                        "enum": ["video", "thumbnail", "spritesheet"],
                        "default": "video"
                    }
                }
            }
        },
        {
            "name": "list_supported_models",
            "description": "List the configured model for each capability.",
            "input_schema": {
                "type": "object",
                "properties": {
                    "capability": {
                        "type": "string",
                        "enum": ["chat", "image", "audio", "video"]
                    },
                    "include_provider_metadata": { "type": "boolean", "default": true }
                }
            }
        }
    ])
}

pub async fn list_tools() -> Json<Value> {
    Json(json!({ "tools": descriptors() }))
}

pub async fn call_tool(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: Bytes,
) -> Result<Json<Value>, ToolError> {
    if !TOOL_NAMES.contains(&name.as_str()) {
        return Err(ToolError::UnknownTool(name));
    }
    tracing::debug!(tool = %name, "Tool call received");

    let service = &state.service;
    let output = match name.as_str() {
        "chat_completion" => {
            let params: ChatParams = parse_arguments(&body)?;
            to_json(service.chat_completion(params).await?)?
        }
        "generate_image" => {
            let params: ImageParams = parse_arguments(&body)?;
            to_json(service.generate_image(params).await?)?
        }
        "synthesize_speech" => {
            let params: SpeechParams = parse_arguments(&body)?;
            to_json(service.synthesize_speech(params).await?)?
        }
        "generate_video" => {
            let params: VideoParams = parse_arguments(&body)?;
            to_json(service.generate_video(params).await?)?
        }
        _ => {
            let args: ListModelsArgs = parse_arguments(&body)?;
            service.list_supported_models(
                args.capability.as_deref(),
                args.include_provider_metadata,
            )?
        }
    };
    Ok(Json(output))
}

/// An empty body means "no arguments".
fn parse_arguments<T: DeserializeOwned>(body: &[u8]) -> Result<T, ToolError> {
    let body = if body.iter().all(u8::is_ascii_whitespace) {
        b"{}".as_slice()
    } else {
        body
    };
    serde_json::from_slice(body)
        .map_err(|e| ToolError::InvalidArguments(format!("Invalid tool arguments: {e}")))
}

fn to_json<T: serde::Serialize>(value: T) -> Result<Value, ToolError> {
    serde_json::to_value(value).map_err(|e| ToolError::Gateway(GatewayError::from(e)))
}
