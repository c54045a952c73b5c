use evalexpr::Value as EvalValue;
use serde::{Deserialize, Serialize};
use std::error::Error;

pub type GenericError = Box<dyn Error + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpressionRule {
    pub name: String,
    pub description: String,
    pub rule: String,
    pub score: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScorerResult {
    pub name: String,
    pub score: i32,
}

impl ScorerResult {
    pub fn triggered(&self) -> bool {
        self.score > 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    Int(i64),
    Double(f64),
    String(String),
    Bool(bool),
}

impl FeatureValue {
    /// Numeric view used when a feature lands in a model input row.
    /// Strings have no numeric meaning and yield `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FeatureValue::Int(v) => Some(*v as f64),
            FeatureValue::Double(v) => Some(*v),
            FeatureValue::Bool(v) => Some(if *v { 1.0 } else { 0.0 }),
            FeatureValue::String(_) => None,
        }
    }
}

impl From<FeatureValue> for EvalValue {
    fn from(value: FeatureValue) -> Self {
        match value {
            FeatureValue::Int(v) => EvalValue::Int(v),
            FeatureValue::Double(v) => EvalValue::Float(v),
            FeatureValue::String(v) => EvalValue::String(v),
            FeatureValue::Bool(v) => EvalValue::Boolean(v),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub name: String,
    pub value: Box<FeatureValue>,
}

impl Feature {
    pub fn new(name: impl Into<String>, value: FeatureValue) -> Self {
        Self {
            name: name.into(),
            value: Box::new(value),
        }
    }

    pub fn double(name: impl Into<String>, value: f64) -> Self {
        Self::new(name, FeatureValue::Double(value))
    }
}
