use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::AudioFormat;

/// Stages uploaded bytes to a request-scoped file and removes it afterwards.
#[async_trait]
pub trait UploadStore: Send + Sync {
    /// Persist the bytes to a uniquely named file, returning its path.
    /// The extension is derived from `format`, falling back to `.wav`.
    async fn stage(
        &self,
        data: &[u8],
        format: Option<AudioFormat>,
    ) -> Result<PathBuf, UploadStoreError>;

    /// Remove a previously staged file.
    async fn remove(&self, path: &Path) -> Result<(), UploadStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum UploadStoreError {
    #[error("staging write failed: {0}")]
    WriteFailed(String),
    #[error("staging cleanup failed: {0}")]
    RemoveFailed(String),
}
