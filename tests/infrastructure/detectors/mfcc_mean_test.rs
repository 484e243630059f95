use phonoscreen::application::ports::{DetectorError, PathologyDetector};
use phonoscreen::infrastructure::detectors::MfccMeanDetector;

use crate::helpers;

use super::write_weights;

fn dense_weights(path: &std::path::Path) {
    write_weights(
        path,
        &[
            ("fc1.weight", &[64, 13]),
            ("fc1.bias", &[64]),
            ("fc2.weight", &[32, 64]),
            ("fc2.bias", &[32]),
            ("out.weight", &[1, 32]),
            ("out.bias", &[1]),
        ],
    );
}

#[tokio::test]
async fn given_generated_weights_when_predicting_then_score_is_a_probability() {
    let dir = tempfile::tempdir().expect("tempdir");
    let weights = dir.path().join("mfcc_dense.safetensors");
    dense_weights(&weights);

    let clip = dir.path().join("clip.wav");
    std::fs::write(&clip, helpers::wav_bytes(&helpers::sine(440.0, 16_000, 0.5), 16_000))
        .expect("write clip");

    let detector = MfccMeanDetector::load(&weights).expect("load");
    let score = detector.predict(&clip, None).await.expect("predict");

    assert!(score.is_finite());
    assert!(score > 0.0 && score < 1.0);
}

#[tokio::test]
async fn given_same_clip_twice_when_predicting_then_scores_match() {
    let dir = tempfile::tempdir().expect("tempdir");
    let weights = dir.path().join("mfcc_dense.safetensors");
    dense_weights(&weights);

    let clip = dir.path().join("clip.wav");
    std::fs::write(&clip, helpers::wav_bytes(&helpers::sine(440.0, 16_000, 0.5), 16_000))
        .expect("write clip");

    let detector = MfccMeanDetector::load(&weights).expect("load");
    let first = detector.predict(&clip, None).await.expect("first");
    let second = detector.predict(&clip, None).await.expect("second");

    assert_eq!(first, second);
}

#[test]
fn given_missing_weights_file_when_loading_then_model_load_error() {
    let result = MfccMeanDetector::load(std::path::Path::new("does/not/exist.safetensors"));

    assert!(matches!(result, Err(DetectorError::ModelLoad(_))));
}
