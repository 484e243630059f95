use phonoscreen::application::ports::{DetectorError, PathologyDetector};
use phonoscreen::infrastructure::detectors::PhonationDetector;

use crate::helpers;

use super::write_weights;

fn clf_weights(path: &std::path::Path) {
    write_weights(path, &[("clf.weight", &[1, 6]), ("clf.bias", &[1])]);
}

#[tokio::test]
async fn given_no_age_when_predicting_then_missing_covariate_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let weights = dir.path().join("phonation_clf.safetensors");
    clf_weights(&weights);

    let clip = dir.path().join("clip.wav");
    std::fs::write(&clip, helpers::wav_bytes(&helpers::sine(150.0, 16_000, 1.0), 16_000))
        .expect("write clip");

    let detector = PhonationDetector::load(&weights).expect("load");
    let result = detector.predict(&clip, None).await;

    assert!(matches!(result, Err(DetectorError::MissingCovariate)));
}

#[tokio::test]
async fn given_voiced_clip_and_age_when_predicting_then_score_is_a_probability() {
    let dir = tempfile::tempdir().expect("tempdir");
    let weights = dir.path().join("phonation_clf.safetensors");
    clf_weights(&weights);

    let clip = dir.path().join("clip.wav");
    std::fs::write(&clip, helpers::wav_bytes(&helpers::sine(150.0, 16_000, 1.0), 16_000))
        .expect("write clip");

    let detector = PhonationDetector::load(&weights).expect("load");
    let score = detector.predict(&clip, Some(63.0)).await.expect("predict");

    assert!(score.is_finite());
    assert!(score > 0.0 && score < 1.0);
}

#[tokio::test]
async fn given_silent_clip_when_predicting_then_feature_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let weights = dir.path().join("phonation_clf.safetensors");
    clf_weights(&weights);

    let clip = dir.path().join("clip.wav");
    std::fs::write(&clip, helpers::wav_bytes(&vec![0.0f32; 16_000], 16_000))
        .expect("write clip");

    let detector = PhonationDetector::load(&weights).expect("load");
    let result = detector.predict(&clip, Some(63.0)).await;

    assert!(matches!(result, Err(DetectorError::FeatureExtraction(_))));
}
