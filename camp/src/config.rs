//! Pipeline configuration
//!
//! Every stage takes its own options struct; [`PipelineConfig`] bundles
//! them so a host can load all of them from one JSON document. Missing
//! fields fall back to their defaults.

use camp_recog::{RecogError, TextOptions};
use camp_region::SegmentationOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(#[from] RecogError),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Options for every stage of the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub segmentation: SegmentationOptions,
    pub text: TextOptions,
}

impl PipelineConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.text.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camp_region::ConnectivityType;

    #[test]
    fn test_empty_document_is_default() {
        let config = PipelineConfig::from_json("{}").unwrap();
        assert_eq!(config, PipelineConfig::default());
    }

    #[test]
    fn test_partial_document() {
        let config = PipelineConfig::from_json(
            r#"{"segmentation": {"adjacency": "eightway"}, "text": {"border": 0}}"#,
        )
        .unwrap();
        assert_eq!(config.segmentation.adjacency, ConnectivityType::EightWay);
        assert_eq!(config.text.border, 0);
        assert_eq!(config.text.word_delta, TextOptions::default().word_delta);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = PipelineConfig::from_json(r#"{"text": {"vertical_ratio": -1.0}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = PipelineConfig::from_json("{").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_json_round_trip() {
        let config = PipelineConfig {
            text: TextOptions::default().with_letter_delta(5),
            ..Default::default()
        };
        let back = PipelineConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(back, config);
    }
}
