#![allow(dead_code)]

use std::sync::Arc;

use common::test_helpers::{TestError, TestResult};
use paysim::{
    decision::DecisionService,
    rules::get_expression_based_scorer,
    transaction::{PredictForm, TransactionInput},
};
use processing::{
    classifier::{ClassifierError, MockClassifier},
    schema::FeatureSchema,
};

pub const COLUMNS: [&str; 10] = [
    "step",
    "amount",
    "oldbalanceOrg",
    "newbalanceOrig",
    "oldbalanceDest",
    "newbalanceDest",
    "type_CASH_OUT",
    "type_DEBIT",
    "type_PAYMENT",
    "type_TRANSFER",
];

pub fn paysim_schema() -> TestResult<FeatureSchema> {
    FeatureSchema::new(COLUMNS.iter().map(|c| c.to_string()).collect())
        .map_err(|e| TestError::generic(e.to_string()))
}

/// Classifier answering `[1 - p, p]` for every row of the right width.
pub fn classifier_returning(probability: f32) -> MockClassifier {
    let mut classifier = MockClassifier::new();
    classifier.expect_input_width().return_const(Some(COLUMNS.len()));
    classifier
        .expect_predict_proba()
        .returning(move |_| Ok(vec![1.0 - probability, probability]));
    classifier
}

pub fn failing_classifier() -> MockClassifier {
    let mut classifier = MockClassifier::new();
    classifier.expect_input_width().return_const(Some(COLUMNS.len()));
    classifier.expect_predict_proba().returning(|row| {
        Err(ClassifierError::InputWidth {
            expected: COLUMNS.len() + 1,
            actual: row.len(),
        })
    });
    classifier
}

pub fn service_with(classifier: MockClassifier) -> TestResult<DecisionService> {
    DecisionService::new(
        paysim_schema()?,
        Arc::new(classifier),
        Box::new(get_expression_based_scorer()),
    )
    .map_err(|e| TestError::generic(e.to_string()))
}

/// TRANSFER that trips the reconciliation rule: neither side adds up.
pub fn suspicious_transfer() -> TransactionInput {
    TransactionInput {
        step: 1.0,
        amount: 150_000.0,
        old_balance_org: 200_000.0,
        new_balance_orig: 200_000.0,
        old_balance_dest: 0.0,
        new_balance_dest: 0.0,
        transaction_type: "TRANSFER".to_string(),
    }
}

pub fn small_payment() -> TransactionInput {
    TransactionInput {
        step: 1.0,
        amount: 9_839.64,
        old_balance_org: 170_136.0,
        new_balance_orig: 160_296.36,
        old_balance_dest: 0.0,
        new_balance_dest: 0.0,
        transaction_type: "PAYMENT".to_string(),
    }
}

pub fn form_fields(input: &TransactionInput) -> Vec<(&'static str, String)> {
    vec![
        ("step", input.step.to_string()),
        ("type", input.transaction_type.clone()),
        ("amount", input.amount.to_string()),
        ("oldbalanceOrg", input.old_balance_org.to_string()),
        ("newbalanceOrig", input.new_balance_orig.to_string()),
        ("oldbalanceDest", input.old_balance_dest.to_string()),
        ("newbalanceDest", input.new_balance_dest.to_string()),
    ]
}

pub fn form_of(input: &TransactionInput) -> PredictForm {
    PredictForm {
        step: Some(input.step.to_string()),
        amount: Some(input.amount.to_string()),
        old_balance_org: Some(input.old_balance_org.to_string()),
        new_balance_orig: Some(input.new_balance_orig.to_string()),
        old_balance_dest: Some(input.old_balance_dest.to_string()),
        new_balance_dest: Some(input.new_balance_dest.to_string()),
        transaction_type: Some(input.transaction_type.clone()),
    }
}
