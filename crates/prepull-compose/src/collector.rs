//! Image reference discovery in compose documents.
//!
//! Two passes run over every entry of the top-level `services` mapping:
//! the explicit `image` field, and a heuristic scan of `environment`
//! values, which may carry image references handed to sub-processes
//! (sandbox base images and similar).

use std::collections::BTreeSet;
use std::num::FpCategory;

use prepull_common::types::is_qualified;
use serde_yaml::Value;

use crate::env::EnvStore;
use crate::expand::{expand, has_placeholder};

/// Collects image references from one decoded compose document.
///
/// A document without a `services` mapping yields nothing. Every returned
/// string is already expanded against `env` and trimmed.
#[must_use]
pub fn collect_images(doc: &Value, env: &EnvStore) -> BTreeSet<String> {
    let mut images = BTreeSet::new();

    let Some(services) = doc.get("services").and_then(Value::as_mapping) else {
        tracing::debug!("document has no services mapping");
        return images;
    };

    for (name, service) in services {
        let name = render_scalar(name).unwrap_or_default();
        if service.as_mapping().is_none() {
            tracing::debug!(service = %name, "skipping non-mapping service entry");
            continue;
        }
        collect_service(&name, service, env, &mut images);
    }

    images
}

/// Collects image references from several documents and unions the results.
#[must_use]
pub fn collect_from_documents<'a, I>(docs: I, env: &EnvStore) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a Value>,
{
    docs.into_iter()
        .flat_map(|doc| collect_images(doc, env))
        .collect()
}

fn collect_service(name: &str, service: &Value, env: &EnvStore, images: &mut BTreeSet<String>) {
    if let Some(raw) = service.get("image").and_then(truthy_scalar) {
        let image = expand(&raw, env).trim().to_string();
        if !image.is_empty() {
            tracing::debug!(service = name, image = %image, "found service image");
            let _ = images.insert(image);
        }
    }

    let Some(block) = service.get("environment") else {
        return;
    };
    for value in environment_values(name, block) {
        for candidate in classify_env_value(&value, env) {
            tracing::debug!(service = name, image = %candidate, "found image in environment");
            let _ = images.insert(candidate);
        }
    }
}

/// Normalizes an `environment` block into its raw values.
///
/// Mapping form yields each non-null scalar value. List form yields the
/// text after the first `=` of every `NAME=VALUE` item; bare `NAME` items
/// carry no value and are skipped.
fn environment_values(service: &str, block: &Value) -> Vec<String> {
    match block {
        Value::Mapping(map) => map.values().filter_map(render_scalar).collect(),
        Value::Sequence(items) => items
            .iter()
            .filter_map(render_scalar)
            .filter_map(|item| {
                item.trim()
                    .split_once('=')
                    .map(|(_, value)| value.to_string())
            })
            .collect(),
        Value::Tagged(tagged) => environment_values(service, &tagged.value),
        Value::Null => Vec::new(),
        other => {
            tracing::debug!(service, kind = ?other, "ignoring unsupported environment block");
            Vec::new()
        }
    }
}

/// Extracts image-like candidates from one environment value.
///
/// After expansion, a value without a remaining placeholder that contains
/// `:` or `@` is taken whole. Otherwise it is split on runs of whitespace
/// and commas, and each token passing the same test is taken. Incidental
/// colon-bearing values such as URLs are collected too.
#[must_use]
pub fn classify_env_value(raw: &str, env: &EnvStore) -> BTreeSet<String> {
    let expanded = expand(raw, env);
    let value = expanded.trim();
    if value.is_empty() {
        return BTreeSet::new();
    }

    if !has_placeholder(value) && is_qualified(value) {
        return BTreeSet::from([value.to_string()]);
    }

    value
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty() && !has_placeholder(token) && is_qualified(token))
        .map(str::to_string)
        .collect()
}

/// Renders a scalar as the string a compose file author wrote.
fn render_scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => render_scalar(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

/// Like [`render_scalar`], but treats `false`, zero, and `""` as absent.
fn truthy_scalar(value: &Value) -> Option<String> {
    match value {
        Value::Bool(false) => None,
        Value::Number(n) if n.as_f64().is_some_and(|f| f.classify() == FpCategory::Zero) => None,
        other => render_scalar(other).filter(|s| !s.is_empty()),
    }
}
