//! Tool-calling server settings.

use secrecy::SecretString;

use super::env::{Lookup, as_port, as_scopes, non_empty, or_default, require};
use crate::error::GatewayError;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Static bearer token accepted by the tool endpoints.
    pub api_key: SecretString,
    pub host: String,
    pub port: u16,
    pub base_url: Option<String>,
    pub required_scopes: Vec<String>,
    pub name: String,
    pub instructions: Option<String>,
}

impl ServerConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            host: "0.0.0.0".to_string(),
            port: 8000,
            base_url: None,
            required_scopes: Vec::new(),
            name: "OpenAI Media Gateway".to_string(),
            instructions: None,
        }
    }

    pub fn from_lookup(lookup: Lookup<'_>) -> Result<Self, GatewayError> {
        Ok(Self {
            api_key: SecretString::from(require(lookup, "MCP_SERVER_API_KEY")?),
            host: or_default(lookup, "MCP_SERVER_HOST", "0.0.0.0"),
            port: as_port(lookup("MCP_SERVER_PORT"), 8000, "MCP_SERVER_PORT")?,
            base_url: non_empty(lookup, "MCP_SERVER_BASE_URL"),
            required_scopes: as_scopes(lookup("MCP_REQUIRED_SCOPES")),
            name: or_default(lookup, "MCP_SERVER_NAME", "OpenAI Media Gateway"),
            instructions: non_empty(lookup, "MCP_SERVER_INSTRUCTIONS"),
        })
    }

    /// Socket address string for binding.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
