//! System-wide constants and defaults.

/// Environment keys whose values are always treated as image references,
/// even when no compose service mentions them (e.g. images behind a
/// disabled compose profile, or sandbox base images pulled at runtime).
pub const DEFAULT_ALWAYS_INCLUDE_KEYS: &[&str] = &[
    "RAGFLOW_IMAGE",
    "TEI_IMAGE_CPU",
    "TEI_IMAGE_GPU",
    "SANDBOX_BASE_PYTHON_IMAGE",
    "SANDBOX_BASE_NODEJS_IMAGE",
];

/// Upper bound on substitution passes over a single string.
pub const MAX_EXPANSION_PASSES: usize = 5;

/// Opening marker of a `${...}` placeholder.
pub const PLACEHOLDER_OPEN: &str = "${";

/// Default environment file name.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Default main compose file name.
pub const DEFAULT_COMPOSE_FILE: &str = "docker-compose.yml";

/// Default output path for the collected image list.
pub const DEFAULT_OUTPUT_FILE: &str = "images.json";
