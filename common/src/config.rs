use serde::Deserialize;
use std::path::{Path, PathBuf};
use yaml_rust2::YamlEmitter;

use crate::yaml_include::load_yaml_with_includes;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML in config: {0}")]
    Scan(#[from] yaml_rust2::ScanError),

    #[error("failed to emit merged config: {0}")]
    Emit(#[from] yaml_rust2::EmitError),

    #[error("config does not match the expected layout: {0}")]
    Parse(#[from] serde_yml::Error),

    #[error("empty !include directive in {path}")]
    EmptyInclude { path: PathBuf },

    #[error("!include nesting deeper than {limit} levels at {path}")]
    IncludeDepth { path: PathBuf, limit: usize },
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CommonConfig {
    pub project_name: String,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            project_name: "paysim".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct BackendConfig {
    pub server_address: String,
    pub log_level: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            server_address: "127.0.0.1:5000".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Locations of the two startup artifacts: the serialized classifier and the
/// ordered list of feature names it was trained on.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ModelConfig {
    pub model_path: PathBuf,
    pub features_path: PathBuf,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("model/fraud_detection_model.onnx"),
            features_path: PathBuf::from("model/model_features.json"),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub common: CommonConfig,
    pub backend: BackendConfig,
    pub model: ModelConfig,
}

impl Config {
    pub fn load(config_path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let yaml = load_yaml_with_includes(config_path.as_ref())?;

        let mut merged = String::new();
        {
            let mut emitter = YamlEmitter::new(&mut merged);
            emitter.dump(&yaml)?;
        }

        Self::from_yaml_str(&merged)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(contents)?)
    }
}
