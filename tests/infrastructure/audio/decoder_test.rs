use std::io::Cursor;

use phonoscreen::application::ports::DetectorError;
use phonoscreen::infrastructure::audio::{decode_to_pcm, resample};

use crate::helpers;

#[test]
fn given_mono_wav_when_decoding_then_rate_and_length_are_preserved() {
    let samples = helpers::sine(440.0, 16_000, 0.5);
    let bytes = helpers::wav_bytes(&samples, 16_000);

    let decoded = decode_to_pcm(&bytes).expect("decode");

    assert_eq!(decoded.sample_rate, 16_000);
    assert_eq!(decoded.samples.len(), samples.len());
}

#[test]
fn given_stereo_wav_when_decoding_then_downmixed_to_mono() {
    let spec = hound::WavSpec {
        channels: 2,
        sample_rate: 16_000,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let frames = 4_000usize;
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec).expect("wav writer");
        for _ in 0..frames {
            writer.write_sample(12_000i16).expect("left");
            writer.write_sample(-12_000i16).expect("right");
        }
        writer.finalize().expect("finalize");
    }

    let decoded = decode_to_pcm(&cursor.into_inner()).expect("decode");

    assert_eq!(decoded.samples.len(), frames);
    // Opposite-phase channels cancel under downmix.
    assert!(decoded.samples.iter().all(|s| s.abs() < 1e-3));
}

#[test]
fn given_garbage_bytes_when_decoding_then_decoding_error() {
    let result = decode_to_pcm(&[0u8, 1, 2, 3, 4, 5, 6, 7]);

    assert!(matches!(result, Err(DetectorError::Decoding(_))));
}

#[test]
fn given_equal_rates_when_resampling_then_samples_are_unchanged() {
    let samples = helpers::sine(440.0, 16_000, 0.1);
    let out = resample(&samples, 16_000, 16_000).expect("resample");

    assert_eq!(out, samples);
}

#[test]
fn given_rate_change_when_resampling_then_length_scales_with_ratio() {
    let samples = helpers::sine(440.0, 16_000, 1.0);
    let out = resample(&samples, 16_000, 22_050).expect("resample");

    let expected = (samples.len() as f64 * 22_050.0 / 16_000.0) as usize;
    assert!(!out.is_empty());
    assert!(out.len() <= expected);
    // The sinc filter swallows a little of the tail; nothing more.
    assert!(expected - out.len() < 2_048);
}
