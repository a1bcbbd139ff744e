//! Loading of environment files and compose documents from disk.
//!
//! Both loaders decode leniently: invalid UTF-8 sequences are dropped
//! rather than failing the run. A file that cannot be read at all is a
//! fatal error.

use std::path::Path;

use prepull_common::error::{PrepullError, Result};
use serde_yaml::Value;

use crate::env::EnvStore;

/// Decodes `bytes` as UTF-8, dropping invalid sequences.
///
/// Only the invalid bytes are removed; a U+FFFD already present in the
/// input is kept.
#[must_use]
pub fn decode_lenient(bytes: &[u8]) -> String {
    bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()
}

fn read_lenient(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|source| PrepullError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(decode_lenient(&bytes))
}

/// Reads and parses a `KEY=VALUE` environment file.
///
/// # Errors
///
/// Returns [`PrepullError::Io`] if the file cannot be read.
pub fn load_env_file(path: &Path) -> Result<EnvStore> {
    tracing::info!(path = %path.display(), "loading environment file");
    let content = read_lenient(path)?;
    Ok(EnvStore::parse(&content))
}

/// Reads and decodes a compose document.
///
/// An empty or whitespace-only file decodes to [`Value::Null`].
///
/// # Errors
///
/// Returns [`PrepullError::Io`] if the file cannot be read, or
/// [`PrepullError::Yaml`] if it is not valid YAML.
pub fn load_compose_file(path: &Path) -> Result<Value> {
    tracing::info!(path = %path.display(), "loading compose document");
    let content = read_lenient(path)?;
    if content.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_yaml::from_str(&content).map_err(|source| PrepullError::Yaml {
        path: path.to_path_buf(),
        source,
    })
}
