//! Chat parameter normalization.

use super::NormalizeParams;
use crate::error::Result;
use crate::types::{ChatParams, ChatRequest, ResponseFormat};

impl From<Option<&str>> for ResponseFormat {
    /// `"json"` (any case) requests structured output; empty or absent is unconstrained.
    fn from(value: Option<&str>) -> Self {
        match value {
            None | Some("") => Self::Unconstrained,
            Some(v) if v.eq_ignore_ascii_case("json") => Self::JsonObject,
            Some(v) => Self::Named(v.to_string()),
        }
    }
}

impl NormalizeParams for ChatParams {
    type Output = ChatRequest;

    fn normalize(self) -> Result<ChatRequest> {
        let response_format = ResponseFormat::from(self.response_format.as_deref());
        Ok(ChatRequest {
            prompt: self.prompt,
            system_prompt: self.system_prompt.filter(|s| !s.is_empty()),
            model: self.model,
            temperature: self.temperature,
            top_p: self.top_p,
            max_output_tokens: self.max_output_tokens,
            user: self.user,
            response_format,
            presence_penalty: self.presence_penalty,
            frequency_penalty: self.frequency_penalty,
            seed: self.seed,
            metadata: self.metadata,
        })
    }
}
