//! Tracing subscriber setup
//!
//! ## Example
//!
//! ```rust,ignore
//! use siumai_media_gateway::observability::{init_subscriber, OutputFormat, SubscriberConfig};
//!
//! init_subscriber(SubscriberConfig::default().with_output_format(OutputFormat::Json))?;
//! ```

use crate::error::{GatewayError, Result};

/// Output format for tracing logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text format
    #[default]
    Text,
    /// One JSON object per line with span context
    Json,
    /// Flattened JSON without span context
    JsonCompact,
}

impl std::str::FromStr for OutputFormat {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "json-compact" | "json_compact" | "compact" => Ok(Self::JsonCompact),
            other => Err(GatewayError::ConfigurationError(format!(
                "Invalid log format: {other}. Valid options: text, json, json-compact"
            ))),
        }
    }
}

/// Configuration for the tracing subscriber
#[derive(Debug, Clone)]
pub struct SubscriberConfig {
    pub log_level: tracing::Level,
    pub output_format: OutputFormat,
    /// Extra `EnvFilter` directives appended after the crate-level default.
    pub directives: Option<String>,
}

impl Default for SubscriberConfig {
    fn default() -> Self {
        Self {
            log_level: tracing::Level::INFO,
            output_format: OutputFormat::Text,
            directives: None,
        }
    }
}

impl SubscriberConfig {
    pub fn with_log_level(mut self, level: tracing::Level) -> Self {
        self.log_level = level;
        self
    }

    /// Set the log level from a string
    pub fn with_log_level_str(mut self, level: &str) -> Result<Self> {
        self.log_level = match level.trim().to_ascii_lowercase().as_str() {
            "trace" => tracing::Level::TRACE,
            "debug" => tracing::Level::DEBUG,
            "info" => tracing::Level::INFO,
            "warn" | "warning" => tracing::Level::WARN,
            "error" => tracing::Level::ERROR,
            _ => {
                return Err(GatewayError::ConfigurationError(format!(
                    "Invalid log level: {level}. Valid options: trace, debug, info, warn, error"
                )));
            }
        };
        Ok(self)
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    pub fn with_directives(mut self, directives: impl Into<String>) -> Self {
        self.directives = Some(directives.into());
        self
    }

    fn filter(&self) -> String {
        let level = self.log_level.as_str().to_ascii_lowercase();
        let mut filter = format!("siumai_media_gateway={level},warn");
        if let Some(extra) = self.directives.as_deref().filter(|d| !d.is_empty()) {
            filter.push(',');
            filter.push_str(extra);
        }
        filter
    }
}

/// Install a global fmt subscriber. An already-installed subscriber is left in place.
pub fn init_subscriber(config: SubscriberConfig) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_new(config.filter()).map_err(|e| {
        GatewayError::ConfigurationError(format!("Invalid tracing filter: {e}"))
    })?;

    let init_result = match config.output_format {
        OutputFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(true)
            .json()
            .try_init(),
        OutputFormat::JsonCompact => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .flatten_event(true)
            .with_current_span(false)
            .with_span_list(false)
            .try_init(),
        OutputFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .try_init(),
    };

    match init_result {
        Ok(()) => Ok(()),
        Err(e) => {
            // a subscriber or `log` logger installed earlier is kept
            let error_msg = e.to_string();
            if error_msg.contains("already") {
                Ok(())
            } else {
                Err(GatewayError::ConfigurationError(format!(
                    "Failed to initialize tracing: {e}"
                )))
            }
        }
    }
}

/// Initialize from `GATEWAY_LOG_LEVEL`, `GATEWAY_LOG_FORMAT` and `RUST_LOG`.
pub fn init_from_env() -> Result<()> {
    let mut config = SubscriberConfig::default();
    if let Ok(level) = std::env::var("GATEWAY_LOG_LEVEL") {
        config = config.with_log_level_str(&level)?;
    }
    if let Ok(format) = std::env::var("GATEWAY_LOG_FORMAT") {
        config = config.with_output_format(format.parse()?);
    }
    if let Ok(directives) = std::env::var("RUST_LOG") {
        config = config.with_directives(directives);
    }
    init_subscriber(config)
}
