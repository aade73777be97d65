//! Core error types for the media gateway.

use thiserror::Error;

/// Guidance appended to every storage-related failure so operators know which
/// environment variables enable artifact URLs.
pub const STORAGE_REQUIRED_MSG: &str = "Azure Blob Storage uploads are not configured. \
Set AZURE_STORAGE_CONNECTION_STRING, AZURE_BLOB_CONTAINER, and AZURE_BLOB_PUBLIC_BASE_URL \
to enable asset URLs.";

/// Coarse-grained error classification used by the tool-calling surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Caller-supplied value outside its closed set.
    Validation,
    /// Capability not available on the configured backend variant.
    Unsupported,
    /// The provider rejected or failed the request.
    Provider,
    /// Artifact persistence is unavailable or failed.
    Storage,
    /// Transport-level failure.
    Network,
    /// Malformed provider payload.
    Parsing,
    /// Invalid or missing configuration.
    Configuration,
    /// The service has been shut down.
    Lifecycle,
}

impl ErrorCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Unsupported => "unsupported",
            Self::Provider => "provider",
            Self::Storage => "storage",
            Self::Network => "network",
            Self::Parsing => "parsing",
            Self::Configuration => "configuration",
            Self::Lifecycle => "lifecycle",
        }
    }
}

/// Gateway error taxonomy.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// A caller-supplied field is outside its accepted set or range.
    #[error("{message}")]
    Validation { field: String, message: String },

    /// The capability cannot run on the configured backend variant.
    #[error("{backend} does not currently support {capability} generation")]
    UnsupportedCapability { capability: String, backend: String },

    /// A video job reached a terminal state other than `completed`.
    #[error("Video job {job_id} did not complete successfully (status={status})")]
    VideoJobFailed { job_id: String, status: String },

    /// Persistence was required but no storage is configured.
    #[error("{}", STORAGE_REQUIRED_MSG)]
    StorageNotConfigured,

    /// Persistence ran but produced no public URL.
    #[error(
        "Unable to produce a publicly accessible {asset_type} asset URL. {}",
        STORAGE_REQUIRED_MSG
    )]
    MissingArtifactUrl { asset_type: String },

    /// Non-success HTTP response from the provider.
    #[error("API error {code}: {message}")]
    ApiError {
        code: u16,
        message: String,
        details: Option<serde_json::Value>,
    },

    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("JSON error: {0}")]
    JsonError(String),

    /// Upload to the object store failed.
    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Timeout: {0}")]
    TimeoutError(String),

    /// A call was issued after `MediaService::close`.
    #[error("Media service has been shut down")]
    ServiceClosed,
}

impl GatewayError {
    /// Build a validation error for a value outside a closed set.
    ///
    /// The accepted values are listed in sorted order.
    pub fn invalid_choice(field: &str, allowed: &[&str], received: impl std::fmt::Debug) -> Self {
        let mut sorted = allowed.to_vec();
        sorted.sort_unstable();
        Self::Validation {
            field: field.to_string(),
            message: format!(
                "{field} must be one of {} (received: {received:?})",
                sorted.join(", ")
            ),
        }
    }

    /// Build a validation error with a free-form message.
    pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Validation { .. } => ErrorCategory::Validation,
            Self::UnsupportedCapability { .. } => ErrorCategory::Unsupported,
            Self::VideoJobFailed { .. } | Self::ApiError { .. } | Self::TimeoutError(_) => {
                ErrorCategory::Provider
            }
            Self::StorageNotConfigured
            | Self::MissingArtifactUrl { .. }
            | Self::StorageError(_) => ErrorCategory::Storage,
            Self::HttpError(_) => ErrorCategory::Network,
            Self::ParseError(_) | Self::JsonError(_) => ErrorCategory::Parsing,
            Self::ConfigurationError(_) => ErrorCategory::Configuration,
            Self::ServiceClosed => ErrorCategory::Lifecycle,
        }
    }

    /// HTTP status code carried by provider errors.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::ApiError { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        self.category() == ErrorCategory::Validation
    }

    /// Name of the offending field for validation errors.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } => Some(field.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_choice_lists_sorted_values() {
        let err =
            GatewayError::invalid_choice("quality", &["low", "medium", "high", "auto"], "ultra");
        assert_eq!(
            err.to_string(),
            "quality must be one of auto, high, low, medium (received: \"ultra\")"
        );
        assert_eq!(err.field(), Some("quality"));
        assert!(err.is_validation());
    }

    #[test]
    fn storage_errors_name_missing_configuration() {
        let err = GatewayError::StorageNotConfigured;
        assert!(err.to_string().contains("AZURE_STORAGE_CONNECTION_STRING"));
        assert_eq!(err.category(), ErrorCategory::Storage);

        let err = GatewayError::MissingArtifactUrl {
            asset_type: "image".into(),
        };
        assert!(err.to_string().starts_with(
            "Unable to produce a publicly accessible image asset URL."
        ));
    }

    #[test]
    fn video_failure_carries_job_and_status() {
        let err = GatewayError::VideoJobFailed {
            job_id: "video_123".into(),
            status: "failed".into(),
        };
        assert_eq!(
            err.to_string(),
            "Video job video_123 did not complete successfully (status=failed)"
        );
        assert_eq!(err.category(), ErrorCategory::Provider);
    }
}
