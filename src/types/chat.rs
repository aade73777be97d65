//! Chat completion request and result types.

use serde::{Deserialize, Serialize};

/// Raw chat arguments as received from the tool-calling layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatParams {
    /// Primary user content sent to the chat model.
    pub prompt: String,
    /// Optional system instruction injected ahead of the user message.
    pub system_prompt: Option<String>,
    /// Override for the configured chat model.
    pub model: Option<String>,
    pub temperature: f64,
    pub top_p: f64,
    pub max_output_tokens: Option<u32>,
    /// Opaque end-user identifier forwarded for abuse monitoring.
    pub user: Option<String>,
    /// `"json"` or a named format; empty means unconstrained.
    pub response_format: Option<String>,
    pub presence_penalty: f64,
    pub frequency_penalty: f64,
    pub seed: Option<i64>,
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

impl Default for ChatParams {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            system_prompt: None,
            model: None,
            temperature: 0.2,
            top_p: 1.0,
            max_output_tokens: None,
            user: None,
            response_format: None,
            presence_penalty: 0.0,
            frequency_penalty: 0.0,
            seed: None,
            metadata: None,
        }
    }
}

impl ChatParams {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Default::default()
        }
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_response_format(mut self, format: impl Into<String>) -> Self {
        self.response_format = Some(format.into());
        self
    }
}

/// Output constraint applied to a chat completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseFormat {
    /// No constraint.
    Unconstrained,
    /// Structured JSON output (`{"type": "json_object"}`).
    JsonObject,
    /// Provider-named format passed through verbatim.
    Named(String),
}

impl ResponseFormat {
    /// The `response_format` directive sent to the provider, if any.
    pub fn directive(&self) -> Option<serde_json::Value> {
        match self {
            Self::Unconstrained => None,
            Self::JsonObject => Some(serde_json::json!({ "type": "json_object" })),
            Self::Named(name) => Some(serde_json::json!({ "type": name })),
        }
    }
}

/// Normalized chat request.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub prompt: String,
    pub system_prompt: Option<String>,
    pub model: Option<String>,
    pub temperature: f64,
    pub top_p: f64,
    pub max_output_tokens: Option<u32>,
    pub user: Option<String>,
    pub response_format: ResponseFormat,
    pub presence_penalty: f64,
    pub frequency_penalty: f64,
    pub seed: Option<i64>,
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

/// Flattened chat completion result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResult {
    pub text: String,
    pub finish_reason: Option<String>,
    pub model: Option<String>,
    pub usage: Option<serde_json::Value>,
    /// Full provider payload.
    #[serde(rename = "raw")]
    pub raw_payload: serde_json::Value,
}
