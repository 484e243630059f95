mod decoder;
mod features;
mod phonation;

pub use decoder::{decode_to_pcm, resample, DecodedAudio};
pub use features::{mfcc, mfcc_mean};
pub use phonation::{f0_contour, smoothed_derivative};
