use std::fs;

use common::test_helpers::{TestError, TestResult};
use common::{test_assert, test_assert_eq};
use processing::{
    model::{Feature, FeatureValue},
    schema::{FeatureSchema, SchemaError},
};

fn schema(names: &[&str]) -> TestResult<FeatureSchema> {
    FeatureSchema::new(names.iter().map(|n| n.to_string()).collect())
        .map_err(|e| TestError::generic(e.to_string()))
}

#[test]
fn test_load_schema_from_json() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("features.json");
    fs::write(&path, r#"["step", "amount", "type_TRANSFER"]"#)?;

    let schema = FeatureSchema::load(&path).map_err(|e| TestError::generic(e.to_string()))?;

    test_assert_eq!(schema.names(), &["step", "amount", "type_TRANSFER"]);
    test_assert_eq!(schema.len(), 3);
    Ok(())
}

#[test]
fn test_load_rejects_non_list() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("features.json");
    fs::write(&path, r#"{"step": 0}"#)?;

    let result = FeatureSchema::load(&path);

    test_assert!(matches!(result, Err(SchemaError::Parse { .. })), "got {:?}", result);
    Ok(())
}

#[test]
fn test_load_missing_file() -> TestResult {
    let dir = tempfile::tempdir()?;

    let result = FeatureSchema::load(dir.path().join("absent.json"));

    test_assert!(matches!(result, Err(SchemaError::Io { .. })), "got {:?}", result);
    Ok(())
}

#[test]
fn test_empty_and_duplicate_schemas_are_rejected() -> TestResult {
    test_assert!(matches!(FeatureSchema::new(Vec::new()), Err(SchemaError::Empty)));

    let duplicate = FeatureSchema::new(vec!["amount".into(), "step".into(), "amount".into()]);
    match duplicate {
        Err(SchemaError::Duplicate(name)) => test_assert_eq!(name, "amount"),
        other => return Err(TestError::assertion_failure(format!("expected duplicate error, got {:?}", other))),
    }
    Ok(())
}

#[test]
fn test_one_hot_marks_only_matching_column() -> TestResult {
    let schema = schema(&["amount", "type_CASH_OUT", "type_PAYMENT", "type_TRANSFER"])?;

    let features = schema.one_hot("type_", "PAYMENT");

    let names: Vec<&str> = features.iter().map(|f| f.name.as_str()).collect();
    test_assert_eq!(names, vec!["type_CASH_OUT", "type_PAYMENT", "type_TRANSFER"]);
    let hot: Vec<&str> = features
        .iter()
        .filter(|f| *f.value == FeatureValue::Double(1.0))
        .map(|f| f.name.as_str())
        .collect();
    test_assert_eq!(hot, vec!["type_PAYMENT"]);
    Ok(())
}

#[test]
fn test_one_hot_unknown_category_is_all_zero() -> TestResult {
    let schema = schema(&["amount", "type_CASH_OUT", "type_TRANSFER"])?;

    let features = schema.one_hot("type_", "CRYPTO");

    test_assert_eq!(features.len(), 2);
    test_assert!(features.iter().all(|f| *f.value == FeatureValue::Double(0.0)));
    Ok(())
}

#[test]
fn test_one_hot_requires_exact_column_match() -> TestResult {
    let schema = schema(&["type_CASH", "type_CASH_OUT"])?;

    let features = schema.one_hot("type_", "CASH");

    let vector = schema.assemble(&features);
    test_assert_eq!(vector.get("type_CASH"), Some(1.0));
    test_assert_eq!(vector.get("type_CASH_OUT"), Some(0.0));
    Ok(())
}

#[test]
fn test_assemble_follows_schema_order_and_fills_zeros() -> TestResult {
    let schema = schema(&["newbalanceDest", "amount", "isFlaggedFraud", "step"])?;
    let features = vec![
        Feature::double("step", 7.0),
        Feature::double("amount", 1500.5),
        Feature::double("newbalanceDest", 42.0),
        Feature::double("not_in_schema", 9.0),
    ];

    let vector = schema.assemble(&features);

    let names: Vec<&str> = vector.names().collect();
    test_assert_eq!(names, vec!["newbalanceDest", "amount", "isFlaggedFraud", "step"]);
    test_assert_eq!(vector.to_row(), vec![42.0_f32, 1500.5, 0.0, 7.0]);
    test_assert_eq!(vector.get("not_in_schema"), None);
    Ok(())
}

#[test]
fn test_assemble_later_feature_wins_and_strings_are_zero() -> TestResult {
    let schema = schema(&["amount", "type"])?;
    let features = vec![
        Feature::double("amount", 1.0),
        Feature::double("amount", 2.0),
        Feature::new("type", FeatureValue::String("TRANSFER".into())),
    ];

    let vector = schema.assemble(&features);

    test_assert_eq!(vector.get("amount"), Some(2.0));
    test_assert_eq!(vector.get("type"), Some(0.0));
    Ok(())
}

#[test]
fn test_assemble_converts_int_and_bool() -> TestResult {
    let schema = schema(&["count", "flag"])?;
    let features = vec![
        Feature::new("count", FeatureValue::Int(3)),
        Feature::new("flag", FeatureValue::Bool(true)),
    ];

    let vector = schema.assemble(&features);

    let pairs: Vec<(&str, f64)> = vector.iter().collect();
    test_assert_eq!(pairs, vec![("count", 3.0), ("flag", 1.0)]);
    Ok(())
}
