use super::model_kind::ModelKind;

/// Outcome of a successful model invocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub score: f32,
    pub model: ModelKind,
}
