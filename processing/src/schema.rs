//! Feature schema of a trained model and the input vectors built against it.
//!
//! The schema is the ordered list of column names the model saw at training
//! time. A [`FeatureVector`] is always assembled from a schema, so its columns
//! are exactly the schema's columns in the schema's order.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use crate::model::{Feature, FeatureValue};

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("failed to read feature schema {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("feature schema {path} is not a JSON list of names: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("feature schema is empty")]
    Empty,

    #[error("feature schema lists '{0}' more than once")]
    Duplicate(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSchema {
    names: Vec<String>,
}

impl FeatureSchema {
    pub fn new(names: Vec<String>) -> Result<Self, SchemaError> {
        if names.is_empty() {
            return Err(SchemaError::Empty);
        }

        let mut seen = HashSet::with_capacity(names.len());
        for name in &names {
            if !seen.insert(name.as_str()) {
                return Err(SchemaError::Duplicate(name.clone()));
            }
        }

        Ok(Self { names })
    }

    /// Reads a schema stored as a JSON array of column names.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let names: Vec<String> =
            serde_json::from_str(&contents).map_err(|source| SchemaError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let schema = Self::new(names)?;
        tracing::info!(
            path = %path.display(),
            columns = schema.len(),
            "Loaded feature schema"
        );
        Ok(schema)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// One-hot indicators for a categorical value.
    ///
    /// Every column whose name contains `marker` becomes an indicator: 1 when
    /// the column is exactly `marker` followed by `category`, 0 otherwise. A
    /// category with no matching column yields all zeros.
    pub fn one_hot(&self, marker: &str, category: &str) -> Vec<Feature> {
        let hot_column = format!("{marker}{category}");
        self.names
            .iter()
            .filter(|name| name.contains(marker))
            .map(|name| {
                let indicator = if name.as_str() == hot_column { 1.0 } else { 0.0 };
                Feature::double(name.as_str(), indicator)
            })
            .collect()
    }

    /// Builds the model input for this schema.
    ///
    /// Features are matched to columns by name; when a name occurs more than
    /// once the later feature wins. Columns without a numeric feature are 0,
    /// and features that name no column are dropped.
    pub fn assemble(&self, features: &[Feature]) -> FeatureVector {
        let provided: HashMap<&str, &FeatureValue> = features
            .iter()
            .map(|feature| (feature.name.as_str(), feature.value.as_ref()))
            .collect();

        let entries = self
            .names
            .iter()
            .map(|name| {
                let value = provided
                    .get(name.as_str())
                    .and_then(|value| value.as_f64())
                    .unwrap_or(0.0);
                (name.clone(), value)
            })
            .collect();

        FeatureVector { entries }
    }
}

/// Column/value pairs in schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    entries: Vec<(String, f64)>,
}

impl FeatureVector {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, value)| *value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), *value))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Single input row for the classifier, narrowed to `f32`.
    pub fn to_row(&self) -> Vec<f32> {
        self.entries.iter().map(|(_, value)| *value as f32).collect()
    }
}
