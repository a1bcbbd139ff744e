//! JSON output of the collected image list.

use std::path::Path;

use anyhow::Context;
use prepull_common::types::ImageRef;

/// Renders the image list as a JSON array with two-space indentation.
///
/// Non-ASCII characters are written as-is, not escaped.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_image_list(images: &[ImageRef]) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(images)?)
}

/// Writes the image list to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn write_image_list(path: &Path, images: &[ImageRef]) -> anyhow::Result<()> {
    let json = render_image_list(images)?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write image list to {}", path.display()))?;
    tracing::info!(path = %path.display(), count = images.len(), "wrote image list");
    Ok(())
}
