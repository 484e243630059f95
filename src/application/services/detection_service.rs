use std::collections::HashMap;
use std::sync::Arc;

use crate::application::ports::{
    DetectorError, PathologyDetector, UploadStore, UploadStoreError,
};
use crate::domain::{AudioFormat, ModelKind, Prediction};

/// Routes an uploaded clip to a pathology model and manages the staged
/// file's lifecycle around the call.
///
/// The registry is built once at startup and never written again; detectors
/// are shared read-only across requests.
pub struct DetectionService {
    registry: HashMap<ModelKind, Arc<dyn PathologyDetector>>,
    upload_store: Arc<dyn UploadStore>,
}

impl DetectionService {
    pub fn new(
        registry: HashMap<ModelKind, Arc<dyn PathologyDetector>>,
        upload_store: Arc<dyn UploadStore>,
    ) -> Self {
        Self {
            registry,
            upload_store,
        }
    }

    /// Resolve the model, validate the age covariate, stage the upload,
    /// predict, and remove the staged file whatever the outcome.
    pub async fn detect(
        &self,
        audio: &[u8],
        format: Option<AudioFormat>,
        model_name: &str,
        age: Option<f32>,
    ) -> Result<Prediction, DetectionError> {
        let kind = ModelKind::resolve(model_name);

        let detector = self
            .registry
            .get(&kind)
            .cloned()
            .ok_or(DetectionError::ModelUnavailable)?;

        if kind.requires_age() && age.is_none() {
            return Err(DetectionError::MissingAge);
        }

        let staged = self.upload_store.stage(audio, format).await?;

        let result = detector.predict(&staged, age).await;

        if let Err(e) = self.upload_store.remove(&staged).await {
            tracing::warn!(
                error = %e,
                path = %staged.display(),
                "Failed to remove staged upload"
            );
        }

        let score = result?;

        tracing::info!(model = %kind, score = score, "Prediction completed");

        Ok(Prediction { score, model: kind })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DetectionError {
    #[error("no usable model for the requested name")]
    ModelUnavailable,
    #[error("missing age covariate")]
    MissingAge,
    #[error(transparent)]
    Staging(#[from] UploadStoreError),
    #[error(transparent)]
    Detector(#[from] DetectorError),
}
