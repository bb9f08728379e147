use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::StoragePath;

/// Staging area for uploaded audio between submission and worker pickup.
/// Artifacts are short-lived: the worker deletes them after processing.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Persists the audio bytes and returns the stored size.
    async fn store(&self, path: &StoragePath, data: Bytes) -> Result<u64, ArtifactStoreError>;

    async fn fetch(&self, path: &StoragePath) -> Result<Vec<u8>, ArtifactStoreError>;

    async fn delete(&self, path: &StoragePath) -> Result<(), ArtifactStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ArtifactStoreError {
    #[error("failed to write artifact: {0}")]
    WriteFailed(String),
    #[error("artifact not found: {0}")]
    NotFound(String),
    #[error("failed to read artifact: {0}")]
    ReadFailed(String),
    #[error("failed to delete artifact: {0}")]
    DeleteFailed(String),
}
