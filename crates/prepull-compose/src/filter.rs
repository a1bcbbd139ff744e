//! Final validation and ordering of collected image references.
//!
//! Candidates that still carry a placeholder, or that have neither a tag
//! nor a digest, are dropped as soft failures: each one is logged and
//! recorded in the report, and the run continues.

use std::collections::BTreeSet;

use prepull_common::types::{ImageRef, Rejection, RejectionReason};

use crate::env::EnvStore;
use crate::expand::{expand, has_placeholder};

/// Outcome of a collection run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectReport {
    /// Accepted references, unique and in ascending order.
    pub images: Vec<ImageRef>,
    /// Dropped candidates, in the order they were examined.
    pub rejections: Vec<Rejection>,
}

impl CollectReport {
    /// Returns the accepted references as plain strings.
    #[must_use]
    pub fn image_strings(&self) -> Vec<&str> {
        self.images.iter().map(ImageRef::as_str).collect()
    }
}

/// Resolves the values of `keys` in `env` as additional candidates.
///
/// Keys that are unset or set to an empty value contribute nothing. Values
/// are expanded first since they may reference other variables.
#[must_use]
pub fn always_include_candidates<S: AsRef<str>>(env: &EnvStore, keys: &[S]) -> BTreeSet<String> {
    keys.iter()
        .filter_map(|key| env.get(key.as_ref()).filter(|v| !v.is_empty()))
        .map(|raw| expand(raw.trim(), env).trim().to_string())
        .filter(|value| !value.is_empty())
        .collect()
}

/// Validates candidates and produces the sorted, deduplicated image list.
#[must_use]
pub fn filter_candidates<I>(candidates: I) -> CollectReport
where
    I: IntoIterator<Item = String>,
{
    let ordered: BTreeSet<String> = candidates.into_iter().collect();
    let mut accepted = BTreeSet::new();
    let mut rejections = Vec::new();

    for candidate in &ordered {
        let candidate = candidate.trim();
        if candidate.is_empty() {
            continue;
        }

        if has_placeholder(candidate) {
            tracing::warn!(image = candidate, "unexpanded image skipped");
            rejections.push(Rejection {
                candidate: candidate.to_string(),
                reason: RejectionReason::Unresolved,
            });
            continue;
        }

        match ImageRef::new(candidate) {
            Some(image) => {
                let _ = accepted.insert(image);
            }
            None => {
                tracing::warn!(image = candidate, "untagged image skipped");
                rejections.push(Rejection {
                    candidate: candidate.to_string(),
                    reason: RejectionReason::Untagged,
                });
            }
        }
    }

    CollectReport {
        images: accepted.into_iter().collect(),
        rejections,
    }
}

/// Merges collected candidates with the always-included environment keys,
/// then filters the union.
#[must_use]
pub fn finalize<S: AsRef<str>>(
    mut candidates: BTreeSet<String>,
    env: &EnvStore,
    always_include: &[S],
) -> CollectReport {
    candidates.extend(always_include_candidates(env, always_include));
    filter_candidates(candidates)
}
