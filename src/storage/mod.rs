//! Artifact Naming & Persistence
//!
//! Binary outputs are uploaded through an [`ArtifactStore`] under a
//! collision-resistant name and exposed through the configured public base URL.

pub mod azure;
pub mod memory;
pub mod naming;
pub mod persist;

pub use azure::{AzureBlobStore, ConnectionString};
pub use memory::{MemoryArtifactStore, StoredArtifact};
pub use naming::BlobNamer;
pub use persist::{ArtifactPersister, require_blob_url};

use async_trait::async_trait;

use crate::error::Result;

/// Object store port. Uploads must overwrite an existing object at `path`.
///
/// Implementations are shared across concurrent calls and must not require
/// external locking.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Upload `data` to `path` tagged with `content_type`.
    async fn upload(&self, data: Vec<u8>, path: &str, content_type: &str) -> Result<()>;

    /// Release any held resources. Called once at shutdown.
    async fn close(&self) -> Result<()> {
        Ok(())
    }
}
