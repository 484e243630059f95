use std::path::Path;

use async_trait::async_trait;
use candle_core::{DType, Device, Tensor};
use candle_nn::{Linear, Module, VarBuilder};

use crate::application::ports::{DetectorError, PathologyDetector};
use crate::infrastructure::audio::{decode_to_pcm, mfcc_mean, resample};

/// Sample rate the network was trained at; input audio is resampled to it.
pub const TARGET_SAMPLE_RATE: u32 = 22_050;

const N_MFCC: usize = 13;
const HIDDEN_1: usize = 64;
const HIDDEN_2: usize = 32;

/// Dense network over time-averaged 13-coefficient MFCCs, served as
/// `model2`.
///
/// Weights are a safetensors file with `fc1`/`fc2`/`out` linear layers.
pub struct MfccMeanDetector {
    fc1: Linear,
    fc2: Linear,
    out: Linear,
    device: Device,
}

impl MfccMeanDetector {
    pub fn load(weights_path: &Path) -> Result<Self, DetectorError> {
        let device = Device::Cpu;

        tracing::info!(
            path = %weights_path.display(),
            "Loading MFCC-mean detector weights"
        );

        // SAFETY: safetensors files are memory-mapped read-only
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, &device)
                .map_err(|e| DetectorError::ModelLoad(format!("weights: {}", e)))?
        };

        let fc1 = candle_nn::linear(N_MFCC, HIDDEN_1, vb.pp("fc1"))
            .map_err(|e| DetectorError::ModelLoad(format!("fc1: {}", e)))?;
        let fc2 = candle_nn::linear(HIDDEN_1, HIDDEN_2, vb.pp("fc2"))
            .map_err(|e| DetectorError::ModelLoad(format!("fc2: {}", e)))?;
        let out = candle_nn::linear(HIDDEN_2, 1, vb.pp("out"))
            .map_err(|e| DetectorError::ModelLoad(format!("out: {}", e)))?;

        Ok(Self {
            fc1,
            fc2,
            out,
            device,
        })
    }

    fn score(&self, features: &[f32]) -> Result<f32, DetectorError> {
        let inference = |e: candle_core::Error| DetectorError::Inference(e.to_string());

        let x = Tensor::from_vec(features.to_vec(), (1, N_MFCC), &self.device)
            .map_err(inference)?;
        let x = self.fc1.forward(&x).map_err(inference)?.relu().map_err(inference)?;
        let x = self.fc2.forward(&x).map_err(inference)?.relu().map_err(inference)?;
        let logits = self.out.forward(&x).map_err(inference)?;
        let probs = candle_nn::ops::sigmoid(&logits).map_err(inference)?;

        probs
            .flatten_all()
            .map_err(inference)?
            .to_vec1::<f32>()
            .map_err(inference)?
            .first()
            .copied()
            .ok_or_else(|| DetectorError::Inference("empty network output".to_string()))
    }
}

#[async_trait]
impl PathologyDetector for MfccMeanDetector {
    async fn predict(&self, audio_path: &Path, _age: Option<f32>) -> Result<f32, DetectorError> {
        let data = tokio::fs::read(audio_path).await?;

        let decoded = decode_to_pcm(&data)?;
        let samples = resample(&decoded.samples, decoded.sample_rate, TARGET_SAMPLE_RATE)?;
        let features = mfcc_mean(&samples, TARGET_SAMPLE_RATE, N_MFCC)?;

        self.score(&features)
    }
}
