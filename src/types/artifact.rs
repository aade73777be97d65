//! Binary artifacts produced by provider calls.

/// Default content type for payloads with no known mapping.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Storage category of an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactCategory {
    Images,
    Audio,
    Videos,
}

impl ArtifactCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Images => "images",
            Self::Audio => "audio",
            Self::Videos => "videos",
        }
    }

    /// Asset label used in missing-URL errors.
    pub fn asset_type(&self) -> &'static str {
        match self {
            Self::Images => "image",
            Self::Audio => "audio",
            Self::Videos => "video",
        }
    }
}

/// Artifact payload before persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactPayload {
    Bytes(Vec<u8>),
    /// Base64 text that still has to be decoded.
    Base64(String),
}

/// A binary output awaiting persistence. Consumed by value exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaArtifact {
    pub payload: ArtifactPayload,
    pub category: ArtifactCategory,
    pub extension: String,
    pub content_type: String,
}

impl MediaArtifact {
    pub fn bytes(
        data: Vec<u8>,
        category: ArtifactCategory,
        extension: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            payload: ArtifactPayload::Bytes(data),
            category,
            extension: extension.into(),
            content_type: content_type.into(),
        }
    }

    pub fn base64(
        data: impl Into<String>,
        category: ArtifactCategory,
        extension: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            payload: ArtifactPayload::Base64(data.into()),
            category,
            extension: extension.into(),
            content_type: content_type.into(),
        }
    }

    /// Length of the raw payload (encoded length for base64).
    pub fn len(&self) -> usize {
        match &self.payload {
            ArtifactPayload::Bytes(b) => b.len(),
            ArtifactPayload::Base64(s) => s.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
