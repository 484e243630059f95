use phonoscreen::domain::AudioFormat;

#[test]
fn given_common_mime_types_when_mapping_then_format_is_recognized() {
    assert_eq!(AudioFormat::from_mime("audio/wav"), Some(AudioFormat::Wav));
    assert_eq!(AudioFormat::from_mime("audio/x-wav"), Some(AudioFormat::Wav));
    assert_eq!(AudioFormat::from_mime("audio/mpeg"), Some(AudioFormat::Mp3));
    assert_eq!(AudioFormat::from_mime("audio/ogg"), Some(AudioFormat::Ogg));
    assert_eq!(AudioFormat::from_mime("audio/flac"), Some(AudioFormat::Flac));
    assert_eq!(AudioFormat::from_mime("audio/mp4"), Some(AudioFormat::Mp4));
}

#[test]
fn given_unknown_mime_type_when_mapping_then_none() {
    assert_eq!(AudioFormat::from_mime("application/pdf"), None);
    assert_eq!(AudioFormat::from_mime(""), None);
    assert_eq!(AudioFormat::from_mime("multipart/form-data"), None);
}

#[test]
fn given_each_format_when_reading_extension_then_extension_has_leading_dot() {
    assert_eq!(AudioFormat::Wav.extension(), ".wav");
    assert_eq!(AudioFormat::Mp3.extension(), ".mp3");
    assert_eq!(AudioFormat::Ogg.extension(), ".ogg");
    assert_eq!(AudioFormat::Flac.extension(), ".flac");
    assert_eq!(AudioFormat::Mp4.extension(), ".m4a");
}

#[test]
fn given_undetermined_content_type_when_staging_then_wav_is_the_fallback() {
    assert_eq!(AudioFormat::fallback_extension(), ".wav");
}
