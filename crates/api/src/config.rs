//! Service configuration

use advice::AdviceConfig;
use config::{Config, Environment, File, FileFormat};
use feature_engine::FeatureConfig;
use serde::{Deserialize, Serialize};

use crate::error::SetupError;

/// Default config file, relative to the working directory (extension optional)
pub const DEFAULT_CONFIG_PATH: &str = "config/drawing-emotion";
/// Environment variable prefix, e.g. `DRAWING_EMOTION__BIND_ADDR`
pub const ENV_PREFIX: &str = "DRAWING_EMOTION";

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Pretrained classifier settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// ONNX model path; the feature heuristic alone is used when unset
    pub path: Option<String>,
    /// Square input edge in pixels
    pub input_size: u32,
    /// Model output class order; empty means canonical order
    pub labels: Vec<String>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: None,
            input_size: 224,
            labels: Vec::new(),
        }
    }
}

/// Top-level service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listen address
    pub bind_addr: String,
    /// Max tracing level (trace, debug, info, warn, error)
    pub log_level: String,
    pub log_format: LogFormat,
    /// Upload body limit in bytes
    pub max_upload_bytes: usize,
    pub features: FeatureConfig,
    pub model: ModelConfig,
    pub advice: AdviceConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8000".to_string(),
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
            max_upload_bytes: 10 * 1024 * 1024,
            features: FeatureConfig::default(),
            model: ModelConfig::default(),
            advice: AdviceConfig::default(),
        }
    }
}

impl ServiceConfig {
    /// Load from the default file and environment
    pub fn load() -> Result<Self, SetupError> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Load from an optional config file, then environment overrides
    pub fn load_from(path: &str) -> Result<Self, SetupError> {
        let settings = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(environment())
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    /// Parse a TOML document (no environment overrides)
    pub fn from_toml_str(toml: &str) -> Result<Self, SetupError> {
        let settings = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("model.labels")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.bind_addr, "0.0.0.0:8000");
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
        assert_eq!(config.features, FeatureConfig::default());
        assert!(config.model.path.is_none());
        assert_eq!(config.model.input_size, 224);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = ServiceConfig::load_from("/nonexistent/drawing-emotion").unwrap();
        assert_eq!(config.features.binarize_threshold, 127);
    }

    #[test]
    fn test_toml_overrides() {
        let config = ServiceConfig::from_toml_str(
            r#"
            bind_addr = "127.0.0.1:9000"
            log_format = "json"

            [features]
            canny_low = 30.0

            [model]
            path = "models/emotion.onnx"
            labels = ["anger", "joy", "sadness"]

            [advice.overrides]
            joy = "Sigue dibujando"
            "#,
        )
        .unwrap();

        assert_eq!(config.bind_addr, "127.0.0.1:9000");
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.features.canny_low, 30.0);
        assert_eq!(config.features.canny_high, 150.0);
        assert_eq!(config.model.path.as_deref(), Some("models/emotion.onnx"));
        assert_eq!(config.model.labels.len(), 3);
        assert_eq!(config.advice.overrides.get("joy").map(String::as_str), Some("Sigue dibujando"));
        assert_eq!(config.log_level, "info");
    }
}
