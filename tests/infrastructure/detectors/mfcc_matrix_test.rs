use phonoscreen::application::ports::{DetectorError, PathologyDetector};
use phonoscreen::infrastructure::detectors::MfccMatrixDetector;

use crate::helpers;

use super::write_weights;

fn conv_weights(path: &std::path::Path) {
    write_weights(
        path,
        &[
            ("conv1.weight", &[8, 1, 3, 3]),
            ("conv1.bias", &[8]),
            ("conv2.weight", &[16, 8, 3, 3]),
            ("conv2.bias", &[16]),
            ("out.weight", &[1, 16]),
            ("out.bias", &[1]),
        ],
    );
}

#[tokio::test]
async fn given_short_clip_when_predicting_then_padded_input_yields_probability() {
    let dir = tempfile::tempdir().expect("tempdir");
    let weights = dir.path().join("mfcc_conv.safetensors");
    conv_weights(&weights);

    // Well under 2095 frames; the adapter zero-pads the time axis.
    let clip = dir.path().join("clip.wav");
    std::fs::write(&clip, helpers::wav_bytes(&helpers::sine(300.0, 8_000, 0.3), 8_000))
        .expect("write clip");

    let detector = MfccMatrixDetector::load(&weights).expect("load");
    let score = detector.predict(&clip, None).await.expect("predict");

    assert!(score.is_finite());
    assert!(score > 0.0 && score < 1.0);
}

#[tokio::test]
async fn given_unreadable_audio_when_predicting_then_decoding_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let weights = dir.path().join("mfcc_conv.safetensors");
    conv_weights(&weights);

    let clip = dir.path().join("clip.wav");
    std::fs::write(&clip, b"not audio at all").expect("write clip");

    let detector = MfccMatrixDetector::load(&weights).expect("load");
    let result = detector.predict(&clip, None).await;

    assert!(matches!(result, Err(DetectorError::Decoding(_))));
}
