use std::path::Path;

use async_trait::async_trait;

/// One pretrained pathology model plus its feature-extraction preprocessing,
/// behind a uniform predict capability.
///
/// `age` is only meaningful for detectors whose model carries an age
/// covariate; the others ignore it.
#[async_trait]
pub trait PathologyDetector: Send + Sync {
    async fn predict(&self, audio_path: &Path, age: Option<f32>) -> Result<f32, DetectorError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DetectorError {
    #[error("audio decoding failed: {0}")]
    Decoding(String),
    #[error("feature extraction failed: {0}")]
    FeatureExtraction(String),
    #[error("inference failed: {0}")]
    Inference(String),
    #[error("model loading failed: {0}")]
    ModelLoad(String),
    #[error("missing age covariate")]
    MissingCovariate,
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
