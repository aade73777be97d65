//! Configuration
//!
//! Settings are read once at startup and never re-read. `Settings::from_env`
//! loads an optional `.env` file first; `Settings::from_lookup` takes any
//! name-to-value function so tests never touch the process environment.

pub(crate) mod env;
pub mod provider;
pub mod server;
pub mod storage;

pub use env::Lookup;
pub use provider::{
    BackendKind, BackendVariant, DEFAULT_AZURE_API_VERSION, DEFAULT_OPENAI_BASE_URL,
    DirectEndpoint, ManagedDeployment, ProviderConfig,
};
pub use server::ServerConfig;
pub use storage::StorageConfig;

use crate::error::GatewayError;

/// Full process configuration.
#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerConfig,
    pub provider: ProviderConfig,
    /// `None` disables artifact persistence.
    pub storage: Option<StorageConfig>,
}

impl Settings {
    /// Load from the process environment, honoring a `.env` file when present.
    pub fn from_env() -> Result<Self, GatewayError> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!("Failed to load .env file: {e}");
            }
        }
        let lookup = |name: &str| std::env::var(name).ok();
        Self::from_lookup(&lookup)
    }

    pub fn from_lookup(lookup: Lookup<'_>) -> Result<Self, GatewayError> {
        Ok(Self {
            server: ServerConfig::from_lookup(lookup)?,
            provider: ProviderConfig::from_lookup(lookup)?,
            storage: StorageConfig::from_lookup(lookup),
        })
    }
}
