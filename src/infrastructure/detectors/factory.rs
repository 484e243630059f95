use std::collections::HashMap;
use std::sync::Arc;

use crate::application::ports::{DetectorError, PathologyDetector};
use crate::domain::ModelKind;
use crate::presentation::config::ModelSettings;

use super::mfcc_matrix::MfccMatrixDetector;
use super::mfcc_mean::MfccMeanDetector;
use super::phonation::PhonationDetector;

pub struct DetectorFactory;

impl DetectorFactory {
    /// Build the model registry from settings.
    ///
    /// The phonation model is only registered when enabled; requests naming
    /// it otherwise resolve to "no usable model". A weight-loading failure
    /// for any registered model is fatal to startup.
    pub fn build_registry(
        settings: &ModelSettings,
    ) -> Result<HashMap<ModelKind, Arc<dyn PathologyDetector>>, DetectorError> {
        let mut registry: HashMap<ModelKind, Arc<dyn PathologyDetector>> = HashMap::new();

        if settings.model1_enabled {
            let detector = PhonationDetector::load(&settings.model1_weights)?;
            registry.insert(ModelKind::Phonation, Arc::new(detector));
        } else {
            tracing::info!("Phonation model (model1) disabled by configuration");
        }

        let mean_detector = MfccMeanDetector::load(&settings.model2_weights)?;
        registry.insert(ModelKind::MfccMean, Arc::new(mean_detector));

        let matrix_detector = MfccMatrixDetector::load(&settings.model3_weights)?;
        registry.insert(ModelKind::MfccMatrix, Arc::new(matrix_detector));

        tracing::info!(models = registry.len(), "Detector registry built");

        Ok(registry)
    }
}
