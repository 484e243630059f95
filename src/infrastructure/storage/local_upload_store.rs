use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::application::ports::{UploadStore, UploadStoreError};
use crate::domain::AudioFormat;

/// Stages uploads under a local directory with timestamp-derived names.
pub struct LocalUploadStore {
    base_dir: PathBuf,
}

impl LocalUploadStore {
    pub fn new(base_dir: PathBuf) -> Result<Self, UploadStoreError> {
        std::fs::create_dir_all(&base_dir)
            .map_err(|e| UploadStoreError::WriteFailed(format!("create upload dir: {}", e)))?;
        Ok(Self { base_dir })
    }
}

#[async_trait]
impl UploadStore for LocalUploadStore {
    async fn stage(
        &self,
        data: &[u8],
        format: Option<AudioFormat>,
    ) -> Result<PathBuf, UploadStoreError> {
        let extension = format
            .map(|f| f.extension())
            .unwrap_or_else(AudioFormat::fallback_extension);

        // Timestamp for operator legibility, uuid suffix for uniqueness
        // under concurrent requests.
        let stamp = Utc::now().format("%Y%m%dT%H%M%S%.3f");
        let id = Uuid::new_v4().simple().to_string();
        let path = self
            .base_dir
            .join(format!("{}-{}{}", stamp, &id[..8], extension));

        tokio::fs::write(&path, data)
            .await
            .map_err(|e| UploadStoreError::WriteFailed(format!("{}: {}", path.display(), e)))?;

        tracing::debug!(
            path = %path.display(),
            bytes = data.len(),
            "Upload staged"
        );

        Ok(path)
    }

    async fn remove(&self, path: &Path) -> Result<(), UploadStoreError> {
        tokio::fs::remove_file(path)
            .await
            .map_err(|e| UploadStoreError::RemoveFailed(format!("{}: {}", path.display(), e)))
    }
}
