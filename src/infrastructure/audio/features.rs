//! Mel-frequency cepstral coefficient extraction.
//!
//! Hann-windowed power spectra over a radix-2 FFT, a triangular mel
//! filterbank, log compression, then an orthonormal DCT-II. Trained-model
//! math lives in the detectors; this module is preprocessing only.

use std::f32::consts::PI;

use ndarray::{Array2, Axis};

use crate::application::ports::DetectorError;

pub const N_FFT: usize = 2048;
pub const HOP_LENGTH: usize = 512;

const N_MELS: usize = 40;
const LOG_FLOOR: f32 = 1e-10;

/// MFCC matrix, frames x coefficients.
pub fn mfcc(
    samples: &[f32],
    sample_rate: u32,
    n_mfcc: usize,
) -> Result<Array2<f32>, DetectorError> {
    if samples.is_empty() {
        return Err(DetectorError::FeatureExtraction(
            "no audio samples".to_string(),
        ));
    }
    if n_mfcc == 0 || n_mfcc > N_MELS {
        return Err(DetectorError::FeatureExtraction(format!(
            "unsupported coefficient count: {}",
            n_mfcc
        )));
    }

    // Center-pad so the first frame straddles the first sample.
    let mut padded = vec![0.0f32; samples.len() + N_FFT];
    padded[N_FFT / 2..N_FFT / 2 + samples.len()].copy_from_slice(samples);

    let n_frames = 1 + (padded.len() - N_FFT) / HOP_LENGTH;
    let n_bins = N_FFT / 2 + 1;

    let window = hann_window(N_FFT);
    let filterbank = mel_filterbank(sample_rate, N_MELS, N_FFT);
    let dct = dct_matrix(n_mfcc, N_MELS);

    let mut out = Array2::<f32>::zeros((n_frames, n_mfcc));
    let mut re = vec![0.0f32; N_FFT];
    let mut im = vec![0.0f32; N_FFT];
    let mut power = vec![0.0f32; n_bins];
    let mut log_mel = vec![0.0f32; N_MELS];

    for frame in 0..n_frames {
        let start = frame * HOP_LENGTH;
        for i in 0..N_FFT {
            re[i] = padded[start + i] * window[i];
            im[i] = 0.0;
        }

        fft_in_place(&mut re, &mut im);

        for (k, p) in power.iter_mut().enumerate() {
            *p = re[k] * re[k] + im[k] * im[k];
        }

        for (m, filter) in filterbank.iter().enumerate() {
            let energy: f32 = filter.iter().zip(&power).map(|(w, p)| w * p).sum();
            log_mel[m] = (energy + LOG_FLOOR).ln();
        }

        for (c, row) in dct.iter().enumerate() {
            out[[frame, c]] = row.iter().zip(&log_mel).map(|(d, e)| d * e).sum();
        }
    }

    Ok(out)
}

/// 1 x `n_mfcc` feature row: the MFCC matrix averaged over the time axis.
pub fn mfcc_mean(
    samples: &[f32],
    sample_rate: u32,
    n_mfcc: usize,
) -> Result<Vec<f32>, DetectorError> {
    let matrix = mfcc(samples, sample_rate, n_mfcc)?;
    let mean = matrix.mean_axis(Axis(0)).ok_or_else(|| {
        DetectorError::FeatureExtraction("empty feature matrix".to_string())
    })?;
    Ok(mean.to_vec())
}

fn hann_window(n: usize) -> Vec<f32> {
    (0..n)
        .map(|i| 0.5 - 0.5 * (2.0 * PI * i as f32 / n as f32).cos())
        .collect()
}

fn hz_to_mel(hz: f32) -> f32 {
    2595.0 * (1.0 + hz / 700.0).log10()
}

fn mel_to_hz(mel: f32) -> f32 {
    700.0 * (10.0f32.powf(mel / 2595.0) - 1.0)
}

/// Triangular filters over the FFT bins, `n_mels` x (n_fft / 2 + 1).
fn mel_filterbank(sample_rate: u32, n_mels: usize, n_fft: usize) -> Vec<Vec<f32>> {
    let n_bins = n_fft / 2 + 1;
    let max_mel = hz_to_mel(sample_rate as f32 / 2.0);

    let mel_points: Vec<f32> = (0..n_mels + 2)
        .map(|i| mel_to_hz(max_mel * i as f32 / (n_mels + 1) as f32))
        .collect();

    let bin_hz = sample_rate as f32 / n_fft as f32;

    let mut bank = vec![vec![0.0f32; n_bins]; n_mels];
    for (m, filter) in bank.iter_mut().enumerate() {
        let lower = mel_points[m];
        let center = mel_points[m + 1];
        let upper = mel_points[m + 2];

        for (k, weight) in filter.iter_mut().enumerate() {
            let freq = k as f32 * bin_hz;
            if freq > lower && freq < center {
                *weight = (freq - lower) / (center - lower);
            } else if freq >= center && freq < upper {
                *weight = (upper - freq) / (upper - center);
            }
        }
    }
    bank
}

/// Orthonormal DCT-II basis, `n_mfcc` x `n_mels`.
fn dct_matrix(n_mfcc: usize, n_mels: usize) -> Vec<Vec<f32>> {
    let mut basis = vec![vec![0.0f32; n_mels]; n_mfcc];
    for (k, row) in basis.iter_mut().enumerate() {
        let scale = if k == 0 {
            (1.0 / n_mels as f32).sqrt()
        } else {
            (2.0 / n_mels as f32).sqrt()
        };
        for (n, value) in row.iter_mut().enumerate() {
            *value = scale * (PI / n_mels as f32 * (n as f32 + 0.5) * k as f32).cos();
        }
    }
    basis
}

/// In-place iterative radix-2 Cooley-Tukey. Length must be a power of two.
fn fft_in_place(re: &mut [f32], im: &mut [f32]) {
    let n = re.len();
    debug_assert!(n.is_power_of_two());

    let mut j = 0;
    for i in 1..n {
        let mut bit = n >> 1;
        while j & bit != 0 {
            j ^= bit;
            bit >>= 1;
        }
        j |= bit;
        if i < j {
            re.swap(i, j);
            im.swap(i, j);
        }
    }

    let mut len = 2;
    while len <= n {
        let angle = -2.0 * PI / len as f32;
        let (w_re, w_im) = (angle.cos(), angle.sin());
        let mut base = 0;
        while base < n {
            let (mut cur_re, mut cur_im) = (1.0f32, 0.0f32);
            for k in 0..len / 2 {
                let (u_re, u_im) = (re[base + k], im[base + k]);
                let (t_re, t_im) = (re[base + k + len / 2], im[base + k + len / 2]);
                let v_re = t_re * cur_re - t_im * cur_im;
                let v_im = t_re * cur_im + t_im * cur_re;

                re[base + k] = u_re + v_re;
                im[base + k] = u_im + v_im;
                re[base + k + len / 2] = u_re - v_re;
                im[base + k + len / 2] = u_im - v_im;

                let next_re = cur_re * w_re - cur_im * w_im;
                cur_im = cur_re * w_im + cur_im * w_re;
                cur_re = next_re;
            }
            base += len;
        }
        len <<= 1;
    }
}
