mod audio_format;
mod model_kind;
mod prediction;

pub use audio_format::AudioFormat;
pub use model_kind::ModelKind;
pub use prediction::Prediction;
