use std::sync::Arc;
use std::time::Instant;

use common::config::ModelConfig;
use metrics::histogram;
use processing::{
    classifier::{Classifier, ClassifierError, OnnxClassifier, positive_class_probability},
    schema::{FeatureSchema, FeatureVector, SchemaError},
    scorers::Scorer,
};
use strum_macros::Display as EnumDisplay;
use tracing::info;

use crate::{
    features::build_feature_vector,
    rules::get_expression_based_scorer,
    transaction::{PredictForm, TransactionInput, ValidationError},
};

/// Model probability above which a transaction is labelled fraud. Compared
/// at the model's own `f32` precision.
pub const FRAUD_PROBABILITY_THRESHOLD: f32 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumDisplay)]
pub enum Verdict {
    Fraud,
    Safe,
}

impl Verdict {
    pub fn from_signals(probability: f32, rule_fraud: bool) -> Self {
        if probability > FRAUD_PROBABILITY_THRESHOLD || rule_fraud {
            Verdict::Fraud
        } else {
            Verdict::Safe
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub verdict: Verdict,
    /// Positive-class probability as returned by the model, in `[0, 1]`.
    pub probability: f32,
    pub rule_fraud: bool,
}

impl Decision {
    pub fn new(probability: f32, rule_fraud: bool) -> Self {
        Self {
            verdict: Verdict::from_signals(probability, rule_fraud),
            probability,
            rule_fraud,
        }
    }

    /// Percentage shown to the user, rounded to two decimals. The rule
    /// override never changes it.
    pub fn display_probability(&self) -> f64 {
        display_percentage(f64::from(self.probability))
    }

    /// [`Self::display_probability`] as page text, always with at least one
    /// decimal (`20.0`, `12.35`).
    pub fn display_probability_text(&self) -> String {
        format_percentage(self.display_probability())
    }
}

pub fn display_percentage(probability: f64) -> f64 {
    (probability * 100.0 * 100.0).round() / 100.0
}

pub fn format_percentage(percentage: f64) -> String {
    if percentage.fract() == 0.0 {
        format!("{:.1}", percentage)
    } else {
        percentage.to_string()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DecisionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Inference(#[from] ClassifierError),
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Classifier(#[from] ClassifierError),

    #[error("feature schema has {schema} columns but the model expects {model}")]
    SchemaMismatch { schema: usize, model: usize },
}

/// Read-only context shared by every request: the feature schema, the model
/// and the override rules. Built once at startup.
pub struct DecisionService {
    schema: FeatureSchema,
    classifier: Arc<dyn Classifier>,
    scorer: Box<dyn Scorer>,
}

impl DecisionService {
    pub fn new(
        schema: FeatureSchema,
        classifier: Arc<dyn Classifier>,
        scorer: Box<dyn Scorer>,
    ) -> Result<Self, ServiceError> {
        if let Some(model) = classifier.input_width() {
            if model != schema.len() {
                return Err(ServiceError::SchemaMismatch {
                    schema: schema.len(),
                    model,
                });
            }
        }

        Ok(Self {
            schema,
            classifier,
            scorer,
        })
    }

    /// Loads the schema and ONNX model named in `config` and wires in the
    /// PaySim override rules.
    pub fn load(config: &ModelConfig) -> Result<Self, ServiceError> {
        let schema = FeatureSchema::load(&config.features_path)?;
        let classifier = OnnxClassifier::load(&config.model_path, schema.len())?;
        info!(columns = schema.len(), "Decision service ready");

        Self::new(
            schema,
            Arc::new(classifier),
            Box::new(get_expression_based_scorer()),
        )
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn feature_vector(&self, input: &TransactionInput) -> FeatureVector {
        build_feature_vector(&self.schema, input)
    }

    pub fn rule_fraud(&self, input: &TransactionInput) -> bool {
        self.scorer
            .score(&input.features())
            .iter()
            .any(|result| result.triggered())
    }

    pub fn evaluate(&self, input: &TransactionInput) -> Result<Decision, DecisionError> {
        let row = self.feature_vector(input).to_row();

        let started = Instant::now();
        let probabilities = self.classifier.predict_proba(&row)?;
        histogram!("paysim_inference_seconds").record(started.elapsed().as_secs_f64());

        let probability = positive_class_probability(&probabilities)?;
        Ok(Decision::new(probability, self.rule_fraud(input)))
    }

    /// Validates a raw form and evaluates it.
    pub fn evaluate_form(&self, form: PredictForm) -> Result<Decision, DecisionError> {
        let input = TransactionInput::try_from(form)?;
        self.evaluate(&input)
    }
}
