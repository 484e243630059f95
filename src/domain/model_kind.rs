use std::fmt;

/// The pathology models the service can route a clip to.
///
/// Wire names (`model1`..`model3`) are the tokens clients send and the names
/// echoed back in responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelKind {
    /// Classical predictor over phonation features; needs an age covariate.
    Phonation,
    /// Dense network over time-averaged 13-coefficient MFCCs.
    MfccMean,
    /// Convolutional network over a fixed-length 20-coefficient MFCC matrix.
    MfccMatrix,
}

impl ModelKind {
    /// Resolve a client-supplied model name, case-insensitively.
    ///
    /// Unrecognized names fall back to the MFCC-matrix model, which is then
    /// attributed as `model3` in the response.
    pub fn resolve(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "model1" => Self::Phonation,
            "model2" => Self::MfccMean,
            _ => Self::MfccMatrix,
        }
    }

    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::Phonation => "model1",
            Self::MfccMean => "model2",
            Self::MfccMatrix => "model3",
        }
    }

    /// Whether the model's feature vector carries an age covariate.
    pub fn requires_age(&self) -> bool {
        matches!(self, Self::Phonation)
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}
