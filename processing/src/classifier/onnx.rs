use std::path::Path;

use tract_onnx::prelude::*;
use tracing::info;

use super::{Classifier, ClassifierError};

type RunnablePlan = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

/// ONNX classifier evaluated with tract.
///
/// The graph is specialised for a single `[1, input_width]` float row at load
/// time. The first `f32` output is read as class probabilities, so exporters
/// must emit probabilities as a plain tensor rather than a sequence of maps.
pub struct OnnxClassifier {
    model: RunnablePlan,
    input_width: usize,
}

impl OnnxClassifier {
    pub fn load(path: impl AsRef<Path>, input_width: usize) -> Result<Self, ClassifierError> {
        let path = path.as_ref();
        info!(model = %path.display(), input_width, "Loading ONNX classifier");

        let model = Self::build_plan(path, input_width).map_err(|source| ClassifierError::Load {
            path: path.to_path_buf(),
            source,
        })?;

        info!(model = %path.display(), "Model loaded successfully");
        Ok(Self { model, input_width })
    }

    fn build_plan(path: &Path, input_width: usize) -> TractResult<RunnablePlan> {
        tract_onnx::onnx()
            .model_for_path(path)?
            .with_input_fact(
                0,
                InferenceFact::dt_shape(f32::datum_type(), tvec!(1, input_width)),
            )?
            .into_optimized()?
            .into_runnable()
    }
}

impl Classifier for OnnxClassifier {
    fn input_width(&self) -> Option<usize> {
        Some(self.input_width)
    }

    fn predict_proba(&self, row: &[f32]) -> Result<Vec<f32>, ClassifierError> {
        if row.len() != self.input_width {
            return Err(ClassifierError::InputWidth {
                expected: self.input_width,
                actual: row.len(),
            });
        }

        let input = Tensor::from_shape(&[1, self.input_width], row)?;
        let outputs = self.model.run(tvec!(input.into()))?;

        let probabilities = outputs
            .iter()
            .find(|output| output.datum_type() == f32::datum_type())
            .ok_or(ClassifierError::NoProbabilityOutput)?;

        Ok(probabilities.to_array_view::<f32>()?.iter().copied().collect())
    }
}
