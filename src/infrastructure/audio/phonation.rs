//! Voice-source analysis for the phonation-feature model: a frame-wise F0
//! contour and smoothed derivatives of that contour.

/// F0 search band, Hz. Covers typical adult speech.
const F0_MIN_HZ: u32 = 75;
const F0_MAX_HZ: u32 = 500;

const FRAME_MS: usize = 40;
const HOP_MS: usize = 10;

/// Normalized autocorrelation threshold below which a frame is unvoiced.
const VOICING_THRESHOLD: f32 = 0.3;

/// Fundamental-frequency contour in Hz, one entry per voiced frame.
/// Unvoiced and silent frames are omitted.
pub fn f0_contour(samples: &[f32], sample_rate: u32) -> Vec<f32> {
    let frame_len = sample_rate as usize * FRAME_MS / 1000;
    let hop = sample_rate as usize * HOP_MS / 1000;
    let min_lag = (sample_rate / F0_MAX_HZ).max(1) as usize;
    let max_lag = (sample_rate / F0_MIN_HZ) as usize;

    if frame_len == 0 || hop == 0 || samples.len() < frame_len || max_lag >= frame_len {
        return Vec::new();
    }

    let mut contour = Vec::new();
    let mut start = 0;
    while start + frame_len <= samples.len() {
        let frame = &samples[start..start + frame_len];
        let energy: f32 = frame.iter().map(|s| s * s).sum();

        if energy > 1e-6 {
            let mut best_lag = 0;
            let mut best = 0.0f32;
            for lag in min_lag..=max_lag {
                let mut acf = 0.0f32;
                for i in 0..frame_len - lag {
                    acf += frame[i] * frame[i + lag];
                }
                let normalized = acf / energy;
                if normalized > best {
                    best = normalized;
                    best_lag = lag;
                }
            }
            if best > VOICING_THRESHOLD && best_lag > 0 {
                contour.push(sample_rate as f32 / best_lag as f32);
            }
        }

        start += hop;
    }

    contour
}

/// Savitzky-Golay smoothed derivative with nearest-edge padding.
///
/// `deriv` 1 uses a 3-point linear fit, anything higher a 5-point quadratic
/// fit for the second derivative.
pub fn smoothed_derivative(series: &[f32], deriv: usize) -> Vec<f32> {
    let kernel: &[f32] = match deriv {
        1 => &[-0.5, 0.0, 0.5],
        _ => &[2.0 / 7.0, -1.0 / 7.0, -2.0 / 7.0, -1.0 / 7.0, 2.0 / 7.0],
    };
    convolve_nearest(series, kernel)
}

fn convolve_nearest(series: &[f32], kernel: &[f32]) -> Vec<f32> {
    if series.is_empty() {
        return Vec::new();
    }
    let half = kernel.len() / 2;
    (0..series.len())
        .map(|i| {
            kernel
                .iter()
                .enumerate()
                .map(|(k, coeff)| {
                    let idx = (i + k).saturating_sub(half).min(series.len() - 1);
                    coeff * series[idx]
                })
                .sum()
        })
        .collect()
}
