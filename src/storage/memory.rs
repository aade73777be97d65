//! In-memory artifact store for tests and local runs.

use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use super::ArtifactStore;
use crate::error::{GatewayError, Result};

/// An upload recorded by [`MemoryArtifactStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredArtifact {
    pub path: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Records uploads in memory; can be switched into a failing mode.
#[derive(Debug, Default)]
pub struct MemoryArtifactStore {
    uploads: Mutex<Vec<StoredArtifact>>,
    failing: AtomicBool,
    close_calls: AtomicUsize,
}

impl MemoryArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose uploads always fail.
    pub fn failing() -> Self {
        let store = Self::default();
        store.set_failing(true);
        store
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn uploads(&self) -> Vec<StoredArtifact> {
        self.uploads
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn close_calls(&self) -> usize {
        self.close_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ArtifactStore for MemoryArtifactStore {
    async fn upload(&self, data: Vec<u8>, path: &str, content_type: &str) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(GatewayError::StorageError(format!(
                "simulated upload failure for {path}"
            )));
        }
        let mut uploads = self
            .uploads
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        // overwrite semantics
        uploads.retain(|u| u.path != path);
        uploads.push(StoredArtifact {
            path: path.to_string(),
            content_type: content_type.to_string(),
            data,
        });
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        self.close_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
