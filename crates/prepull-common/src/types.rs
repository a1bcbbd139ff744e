//! Domain primitive types used across the prepull workspace.

use std::fmt;

use serde::Serialize;

/// A container image reference qualified by a tag or a digest.
///
/// Only a shallow check is applied: the reference must contain `:` (tag or
/// port-qualified registry host) or `@` (digest). Registry, repository and
/// tag grammar is not parsed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    /// Creates an image reference, returning `None` if it carries neither
    /// a tag nor a digest.
    #[must_use]
    pub fn new(reference: impl Into<String>) -> Option<Self> {
        let reference = reference.into();
        is_qualified(&reference).then_some(Self(reference))
    }

    /// Returns the inner string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Returns `true` if `reference` contains a tag/port separator or a digest marker.
#[must_use]
pub fn is_qualified(reference: &str) -> bool {
    reference.contains(':') || reference.contains('@')
}

/// Why a candidate was dropped from the final image list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectionReason {
    /// A `${...}` placeholder survived expansion.
    Unresolved,
    /// Neither a tag nor a digest is present.
    Untagged,
}

/// A candidate dropped during filtering. Soft failure; the run continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    /// The offending candidate, trimmed.
    pub candidate: String,
    /// Why it was dropped.
    pub reason: RejectionReason,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            RejectionReason::Unresolved => {
                write!(f, "Unexpanded image skipped: {}", self.candidate)
            }
            RejectionReason::Untagged => write!(f, "Untagged image skipped: {}", self.candidate),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_ref_accepts_tag() {
        let image = ImageRef::new("redis:7").expect("tagged ref");
        assert_eq!(image.as_str(), "redis:7");
    }

    #[test]
    fn image_ref_accepts_digest() {
        assert!(ImageRef::new("alpine@sha256:abcdef").is_some());
    }

    #[test]
    fn image_ref_rejects_bare_name() {
        assert!(ImageRef::new("myimage").is_none());
    }

    #[test]
    fn image_ref_serializes_as_plain_string() {
        let image = ImageRef::new("repo/app:1.0").expect("tagged ref");
        let json = serde_json::to_string(&image).expect("serialize");
        assert_eq!(json, "\"repo/app:1.0\"");
    }

    #[test]
    fn rejection_display_unresolved() {
        let rejection = Rejection {
            candidate: "repo/app:${TAG}".into(),
            reason: RejectionReason::Unresolved,
        };
        assert_eq!(
            rejection.to_string(),
            "Unexpanded image skipped: repo/app:${TAG}"
        );
    }

    #[test]
    fn rejection_display_untagged() {
        let rejection = Rejection {
            candidate: "myimage".into(),
            reason: RejectionReason::Untagged,
        };
        assert_eq!(rejection.to_string(), "Untagged image skipped: myimage");
    }
}
