//! Probability-output binary classifiers.

pub mod onnx;

pub use onnx::OnnxClassifier;

use std::path::PathBuf;

/// Index of the positive ("fraud") class in a two-class probability output.
pub const POSITIVE_CLASS: usize = 1;

#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("failed to load model from {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("model expects {expected} features, got {actual}")]
    InputWidth { expected: usize, actual: usize },

    #[error("model produced no probability output")]
    NoProbabilityOutput,

    #[error("model returned {0} class probabilities, expected at least 2")]
    MissingPositiveClass(usize),

    #[error("model evaluation failed: {0}")]
    Runtime(#[from] anyhow::Error),
}

/// A trained model that scores one row of features.
///
/// Implementations are loaded once and shared read-only between requests.
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
pub trait Classifier: Send + Sync {
    /// Number of columns the model was built for, when the model knows it.
    fn input_width(&self) -> Option<usize>;

    /// Class probabilities for a single row, one entry per class.
    fn predict_proba(&self, row: &[f32]) -> Result<Vec<f32>, ClassifierError>;
}

/// Picks the positive-class probability out of a `predict_proba` result.
pub fn positive_class_probability(probabilities: &[f32]) -> Result<f32, ClassifierError> {
    probabilities
        .get(POSITIVE_CLASS)
        .copied()
        .ok_or(ClassifierError::MissingPositiveClass(probabilities.len()))
}
