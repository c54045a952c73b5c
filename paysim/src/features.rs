use processing::schema::{FeatureSchema, FeatureVector};

use crate::transaction::TransactionInput;

/// Substring marking a schema column as a transaction-type indicator.
pub const TYPE_MARKER: &str = "type_";

/// Model input for `input`: the numeric fields as-is, the `type_*` indicator
/// block for its transaction type, zeros everywhere else.
pub fn build_feature_vector(schema: &FeatureSchema, input: &TransactionInput) -> FeatureVector {
    let mut features = input.numeric_features();
    features.extend(schema.one_hot(TYPE_MARKER, &input.transaction_type));
    schema.assemble(&features)
}
