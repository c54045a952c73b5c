use processing::model::{Feature, FeatureValue};
use serde::Deserialize;

pub const STEP: &str = "step";
pub const AMOUNT: &str = "amount";
pub const OLD_BALANCE_ORG: &str = "oldbalanceOrg";
pub const NEW_BALANCE_ORIG: &str = "newbalanceOrig";
pub const OLD_BALANCE_DEST: &str = "oldbalanceDest";
pub const NEW_BALANCE_DEST: &str = "newbalanceDest";
pub const TYPE: &str = "type";

/// Rule feature carrying the transaction type.
pub const TRANSACTION_TYPE: &str = "transaction_type";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing form field '{0}'")]
    MissingField(&'static str),

    #[error("field '{field}' is not a number: '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("field '{field}' must be a finite number, got {value}")]
    NonFiniteNumber { field: &'static str, value: f64 },

    #[error("field 'type' must not be empty")]
    EmptyTransactionType,

    #[error("malformed form body: {0}")]
    MalformedBody(String),
}

/// Raw `/predict` form. Every field is optional here so that a missing field
/// is reported by [`TransactionInput::try_from`] instead of the extractor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictForm {
    pub step: Option<String>,
    pub amount: Option<String>,
    #[serde(rename = "oldbalanceOrg")]
    pub old_balance_org: Option<String>,
    #[serde(rename = "newbalanceOrig")]
    pub new_balance_orig: Option<String>,
    #[serde(rename = "oldbalanceDest")]
    pub old_balance_dest: Option<String>,
    #[serde(rename = "newbalanceDest")]
    pub new_balance_dest: Option<String>,
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionInput {
    pub step: f64,
    pub amount: f64,
    pub old_balance_org: f64,
    pub new_balance_orig: f64,
    pub old_balance_dest: f64,
    pub new_balance_dest: f64,
    pub transaction_type: String,
}

impl TransactionInput {
    /// The six numeric fields under their form names, which are also the
    /// model's column names.
    pub fn numeric_features(&self) -> Vec<Feature> {
        vec![
            Feature::double(STEP, self.step),
            Feature::double(AMOUNT, self.amount),
            Feature::double(OLD_BALANCE_ORG, self.old_balance_org),
            Feature::double(NEW_BALANCE_ORIG, self.new_balance_orig),
            Feature::double(OLD_BALANCE_DEST, self.old_balance_dest),
            Feature::double(NEW_BALANCE_DEST, self.new_balance_dest),
        ]
    }

    /// Numeric features plus the transaction type, as seen by the rules.
    pub fn features(&self) -> Vec<Feature> {
        let mut features = self.numeric_features();
        features.push(Feature::new(
            TRANSACTION_TYPE,
            FeatureValue::String(self.transaction_type.clone()),
        ));
        features
    }
}

impl TryFrom<PredictForm> for TransactionInput {
    type Error = ValidationError;

    fn try_from(form: PredictForm) -> Result<Self, Self::Error> {
        let step = parse_number(STEP, form.step)?;
        let amount = parse_number(AMOUNT, form.amount)?;
        let old_balance_org = parse_number(OLD_BALANCE_ORG, form.old_balance_org)?;
        let new_balance_orig = parse_number(NEW_BALANCE_ORIG, form.new_balance_orig)?;
        let old_balance_dest = parse_number(OLD_BALANCE_DEST, form.old_balance_dest)?;
        let new_balance_dest = parse_number(NEW_BALANCE_DEST, form.new_balance_dest)?;

        // Kept verbatim: " TRANSFER" is a different, unrecognized type
        let transaction_type = form
            .transaction_type
            .ok_or(ValidationError::MissingField(TYPE))?;
        if transaction_type.is_empty() {
            return Err(ValidationError::EmptyTransactionType);
        }

        Ok(Self {
            step,
            amount,
            old_balance_org,
            new_balance_orig,
            old_balance_dest,
            new_balance_dest,
            transaction_type,
        })
    }
}

fn parse_number(field: &'static str, raw: Option<String>) -> Result<f64, ValidationError> {
    let raw = raw.ok_or(ValidationError::MissingField(field))?;
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| ValidationError::InvalidNumber {
            field,
            value: raw.clone(),
        })?;

    if !value.is_finite() {
        return Err(ValidationError::NonFiniteNumber { field, value });
    }
    Ok(value)
}
