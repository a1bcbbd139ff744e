//! Unified error types for the prepull workspace.
//!
//! Only fatal conditions are errors. Candidates dropped during filtering
//! are reported as [`crate::types::Rejection`] values instead.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum PrepullError {
    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A compose document could not be decoded as YAML.
    #[error("invalid YAML in {path}: {source}")]
    Yaml {
        /// Path of the offending document.
        path: PathBuf,
        /// Underlying decoder error.
        source: serde_yaml::Error,
    },

    /// A configuration value is invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, PrepullError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_display_includes_path() {
        let err = PrepullError::Io {
            path: PathBuf::from("/tmp/missing.env"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/tmp/missing.env"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn config_error_display_includes_message() {
        let err = PrepullError::Config {
            message: "no compose files given".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid configuration: no compose files given"
        );
    }
}
