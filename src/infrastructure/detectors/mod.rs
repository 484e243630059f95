mod factory;
mod mfcc_matrix;
mod mfcc_mean;
mod phonation;

pub use factory::DetectorFactory;
pub use mfcc_matrix::{MfccMatrixDetector, MFCC_FRAMES};
pub use mfcc_mean::{MfccMeanDetector, TARGET_SAMPLE_RATE};
pub use phonation::PhonationDetector;
