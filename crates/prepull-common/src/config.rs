//! Configuration model for a single collection run.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_ALWAYS_INCLUDE_KEYS, DEFAULT_COMPOSE_FILE, DEFAULT_ENV_FILE, DEFAULT_OUTPUT_FILE,
};
use crate::error::{PrepullError, Result};

/// Inputs and options for one image collection run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectConfig {
    /// Path to the `KEY=VALUE` environment file.
    pub env_file: PathBuf,
    /// Compose documents to scan, main document first.
    pub compose_files: Vec<PathBuf>,
    /// Destination of the JSON image list.
    pub output: PathBuf,
    /// Environment keys whose values are always included as image references.
    pub always_include: Vec<String>,
}

impl Default for CollectConfig {
    fn default() -> Self {
        Self {
            env_file: PathBuf::from(DEFAULT_ENV_FILE),
            compose_files: vec![PathBuf::from(DEFAULT_COMPOSE_FILE)],
            output: PathBuf::from(DEFAULT_OUTPUT_FILE),
            always_include: DEFAULT_ALWAYS_INCLUDE_KEYS
                .iter()
                .map(|k| (*k).to_string())
                .collect(),
        }
    }
}

impl CollectConfig {
    /// Checks that the configuration describes a runnable collection.
    ///
    /// # Errors
    ///
    /// Returns [`PrepullError::Config`] if no compose file is given or an
    /// input/output path is empty.
    pub fn validate(&self) -> Result<()> {
        if self.compose_files.is_empty() {
            return Err(PrepullError::Config {
                message: "at least one compose file is required".into(),
            });
        }
        if self.env_file.as_os_str().is_empty() {
            return Err(PrepullError::Config {
                message: "environment file path is empty".into(),
            });
        }
        if self.output.as_os_str().is_empty() {
            return Err(PrepullError::Config {
                message: "output path is empty".into(),
            });
        }
        if let Some(path) = self.compose_files.iter().find(|p| p.as_os_str().is_empty()) {
            return Err(PrepullError::Config {
                message: format!("compose file path is empty: {path:?}"),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_includes_known_image_keys() {
        let config = CollectConfig::default();
        assert_eq!(config.always_include.len(), DEFAULT_ALWAYS_INCLUDE_KEYS.len());
        assert!(
            config
                .always_include
                .iter()
                .any(|k| k == "SANDBOX_BASE_PYTHON_IMAGE")
        );
    }

    #[test]
    fn default_config_is_valid() {
        assert!(CollectConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_missing_compose_files() {
        let config = CollectConfig {
            compose_files: Vec::new(),
            ..CollectConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(PrepullError::Config { .. })
        ));
    }

    #[test]
    fn validate_rejects_empty_output() {
        let config = CollectConfig {
            output: PathBuf::new(),
            ..CollectConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn config_roundtrips_through_json() {
        let config = CollectConfig::default();
        let json = serde_json::to_string(&config).expect("serialize");
        let back: CollectConfig = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, config);
    }
}
