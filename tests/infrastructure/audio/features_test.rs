use phonoscreen::application::ports::DetectorError;
use phonoscreen::infrastructure::audio::{mfcc, mfcc_mean};

use crate::helpers;

#[test]
fn given_one_second_clip_when_extracting_mfcc_then_shape_is_frames_by_coefficients() {
    let samples = helpers::sine(440.0, 22_050, 1.0);

    let matrix = mfcc(&samples, 22_050, 13).expect("mfcc");

    // 2048-sample frames, 512-sample hop, center padding.
    let expected_frames = 1 + samples.len() / 512;
    assert_eq!(matrix.nrows(), expected_frames);
    assert_eq!(matrix.ncols(), 13);
    assert!(matrix.iter().all(|v| v.is_finite()));
}

#[test]
fn given_twenty_coefficients_when_extracting_then_width_follows() {
    let samples = helpers::sine(200.0, 16_000, 0.5);

    let matrix = mfcc(&samples, 16_000, 20).expect("mfcc");

    assert_eq!(matrix.ncols(), 20);
}

#[test]
fn given_a_clip_when_averaging_mfcc_then_one_row_of_requested_width() {
    let samples = helpers::sine(440.0, 22_050, 0.5);

    let mean = mfcc_mean(&samples, 22_050, 13).expect("mfcc mean");

    assert_eq!(mean.len(), 13);
    assert!(mean.iter().all(|v| v.is_finite()));
}

#[test]
fn given_identical_clips_when_extracting_then_features_match() {
    let samples = helpers::sine(330.0, 22_050, 0.5);

    let first = mfcc_mean(&samples, 22_050, 13).expect("first");
    let second = mfcc_mean(&samples, 22_050, 13).expect("second");

    assert_eq!(first, second);
}

#[test]
fn given_different_tones_when_extracting_then_features_differ() {
    let low = helpers::sine(110.0, 22_050, 0.5);
    let high = helpers::sine(1_760.0, 22_050, 0.5);

    let low_mean = mfcc_mean(&low, 22_050, 13).expect("low");
    let high_mean = mfcc_mean(&high, 22_050, 13).expect("high");

    assert_ne!(low_mean, high_mean);
}

#[test]
fn given_no_samples_when_extracting_then_feature_error() {
    let result = mfcc(&[], 22_050, 13);

    assert!(matches!(result, Err(DetectorError::FeatureExtraction(_))));
}

#[test]
fn given_unsupported_coefficient_count_when_extracting_then_feature_error() {
    let samples = helpers::sine(440.0, 22_050, 0.1);

    assert!(matches!(
        mfcc(&samples, 22_050, 0),
        Err(DetectorError::FeatureExtraction(_))
    ));
    assert!(matches!(
        mfcc(&samples, 22_050, 64),
        Err(DetectorError::FeatureExtraction(_))
    ));
}
