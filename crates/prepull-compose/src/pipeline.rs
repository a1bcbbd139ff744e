//! End-to-end collection run driven by a [`CollectConfig`].

use std::path::PathBuf;

use prepull_common::config::CollectConfig;
use prepull_common::error::Result;

use crate::collector::collect_from_documents;
use crate::filter::{CollectReport, finalize};
use crate::source::{load_compose_file, load_env_file};

/// Loads every input named by `config` and produces the final image list.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or any input file
/// cannot be read or decoded. Rejected candidates are not errors; they are
/// listed in [`CollectReport::rejections`].
pub fn run(config: &CollectConfig) -> Result<CollectReport> {
    config.validate()?;

    let env = load_env_file(&config.env_file)?;
    let documents = config
        .compose_files
        .iter()
        .map(PathBuf::as_path)
        .map(load_compose_file)
        .collect::<Result<Vec<_>>>()?;

    let candidates = collect_from_documents(&documents, &env);
    tracing::info!(
        documents = documents.len(),
        candidates = candidates.len(),
        "collected image candidates"
    );

    let report = finalize(candidates, &env, &config.always_include);
    tracing::info!(
        images = report.images.len(),
        rejected = report.rejections.len(),
        "image list finalized"
    );
    Ok(report)
}
