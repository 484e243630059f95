use std::path::Path;

use async_trait::async_trait;
use candle_core::{DType, Device, Tensor};
use candle_nn::{Linear, Module, VarBuilder};

use crate::application::ports::{DetectorError, PathologyDetector};
use crate::infrastructure::audio::{decode_to_pcm, f0_contour, mfcc_mean, smoothed_derivative};

const N_MFCC: usize = 13;

/// Feature order the classifier was fit with:
/// age, mean first F0 derivative, MFCC-3, MFCC-1, MFCC-8, mean second
/// F0 derivative.
const N_FEATURES: usize = 6;

/// Classical linear classifier over phonation features, served as `model1`.
///
/// Only constructed when explicitly enabled by settings; the model needs an
/// age covariate and is disabled in the default configuration.
pub struct PhonationDetector {
    clf: Linear,
    device: Device,
}

impl PhonationDetector {
    pub fn load(weights_path: &Path) -> Result<Self, DetectorError> {
        let device = Device::Cpu;

        tracing::info!(
            path = %weights_path.display(),
            "Loading phonation detector weights"
        );

        // SAFETY: safetensors files are memory-mapped read-only
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, &device)
                .map_err(|e| DetectorError::ModelLoad(format!("weights: {}", e)))?
        };

        let clf = candle_nn::linear(N_FEATURES, 1, vb.pp("clf"))
            .map_err(|e| DetectorError::ModelLoad(format!("clf: {}", e)))?;

        Ok(Self { clf, device })
    }

    fn score(&self, features: [f32; N_FEATURES]) -> Result<f32, DetectorError> {
        let inference = |e: candle_core::Error| DetectorError::Inference(e.to_string());

        let x = Tensor::from_vec(features.to_vec(), (1, N_FEATURES), &self.device)
            .map_err(inference)?;
        let logits = self.clf.forward(&x).map_err(inference)?;
        let probs = candle_nn::ops::sigmoid(&logits).map_err(inference)?;

        probs
            .flatten_all()
            .map_err(inference)?
            .to_vec1::<f32>()
            .map_err(inference)?
            .first()
            .copied()
            .ok_or_else(|| DetectorError::Inference("empty classifier output".to_string()))
    }
}

#[async_trait]
impl PathologyDetector for PhonationDetector {
    async fn predict(&self, audio_path: &Path, age: Option<f32>) -> Result<f32, DetectorError> {
        let age = age.ok_or(DetectorError::MissingCovariate)?;

        let data = tokio::fs::read(audio_path).await?;
        let decoded = decode_to_pcm(&data)?;

        let contour = f0_contour(&decoded.samples, decoded.sample_rate);
        if contour.is_empty() {
            return Err(DetectorError::FeatureExtraction(
                "no voiced frames detected".to_string(),
            ));
        }

        let d1 = mean(&smoothed_derivative(&contour, 1));
        let d2 = mean(&smoothed_derivative(&contour, 2));

        let coeffs = mfcc_mean(&decoded.samples, decoded.sample_rate, N_MFCC)?;

        self.score([age, d1, coeffs[2], coeffs[0], coeffs[7], d2])
    }
}

fn mean(series: &[f32]) -> f32 {
    series.iter().sum::<f32>() / series.len() as f32
}
