use std::path::Path;

use async_trait::async_trait;
use candle_core::{D, DType, Device, Tensor};
use candle_nn::{Conv2d, Conv2dConfig, Linear, Module, VarBuilder};
use ndarray::{s, Array2};

use crate::application::ports::{DetectorError, PathologyDetector};
use crate::infrastructure::audio::{decode_to_pcm, mfcc};

const N_MFCC: usize = 20;

/// Fixed time-axis length the network expects; shorter clips are
/// zero-padded, longer ones truncated.
pub const MFCC_FRAMES: usize = 2095;

const CONV_1: usize = 8;
const CONV_2: usize = 16;

/// Convolutional network over a single-channel 20-coefficient MFCC matrix,
/// served as `model3` and as the fallback for unrecognized model names.
///
/// Audio is analyzed at its native sample rate. Weights are a safetensors
/// file with `conv1`/`conv2` stages and an `out` linear head.
pub struct MfccMatrixDetector {
    conv1: Conv2d,
    conv2: Conv2d,
    out: Linear,
    device: Device,
}

impl MfccMatrixDetector {
    pub fn load(weights_path: &Path) -> Result<Self, DetectorError> {
        let device = Device::Cpu;

        tracing::info!(
            path = %weights_path.display(),
            "Loading MFCC-matrix detector weights"
        );

        // SAFETY: safetensors files are memory-mapped read-only
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, &device)
                .map_err(|e| DetectorError::ModelLoad(format!("weights: {}", e)))?
        };

        let conv_cfg = Conv2dConfig {
            padding: 1,
            ..Default::default()
        };

        let conv1 = candle_nn::conv2d(1, CONV_1, 3, conv_cfg, vb.pp("conv1"))
            .map_err(|e| DetectorError::ModelLoad(format!("conv1: {}", e)))?;
        let conv2 = candle_nn::conv2d(CONV_1, CONV_2, 3, conv_cfg, vb.pp("conv2"))
            .map_err(|e| DetectorError::ModelLoad(format!("conv2: {}", e)))?;
        let out = candle_nn::linear(CONV_2, 1, vb.pp("out"))
            .map_err(|e| DetectorError::ModelLoad(format!("out: {}", e)))?;

        Ok(Self {
            conv1,
            conv2,
            out,
            device,
        })
    }

    /// Pad or truncate the frame axis to `MFCC_FRAMES` rows.
    fn fixed_length(matrix: Array2<f32>) -> Array2<f32> {
        let frames = matrix.nrows();
        let mut fixed = Array2::<f32>::zeros((MFCC_FRAMES, N_MFCC));
        let take = frames.min(MFCC_FRAMES);
        fixed
            .slice_mut(s![..take, ..])
            .assign(&matrix.slice(s![..take, ..]));
        fixed
    }

    fn score(&self, features: Array2<f32>) -> Result<f32, DetectorError> {
        let inference = |e: candle_core::Error| DetectorError::Inference(e.to_string());

        let (data, _) = features.into_raw_vec_and_offset();
        let x = Tensor::from_vec(data, (1, 1, MFCC_FRAMES, N_MFCC), &self.device)
            .map_err(inference)?;

        let x = self.conv1.forward(&x).map_err(inference)?.relu().map_err(inference)?;
        let x = x.max_pool2d(2).map_err(inference)?;
        let x = self.conv2.forward(&x).map_err(inference)?.relu().map_err(inference)?;
        let x = x.max_pool2d(2).map_err(inference)?;

        // Global average pool over the spatial axes
        let x = x.mean(D::Minus1).map_err(inference)?.mean(D::Minus1).map_err(inference)?;

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
impl PathologyDetector for MfccMatrixDetector {
    async fn predict(&self, audio_path: &Path, _age: Option<f32>) -> Result<f32, DetectorError> {
        let data = tokio::fs::read(audio_path).await?;

        let decoded = decode_to_pcm(&data)?;
        let matrix = mfcc(&decoded.samples, decoded.sample_rate, N_MFCC)?;

        self.score(Self::fixed_length(matrix))
    }
}
