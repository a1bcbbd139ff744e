//! # prepull-compose
//!
//! Extraction of container image references from compose deployments.
//!
//! Handles:
//! - **Env**: Parsing of `KEY=VALUE` environment files into an [`env::EnvStore`].
//! - **Expand**: Compose-style `${VAR}`, `${VAR:-default}` and `${VAR-default}` substitution.
//! - **Collector**: Discovery of image references in `services.*.image` and
//!   `services.*.environment`.
//! - **Filter**: Validation, deduplication, and ordering of the final list.
//! - **Source**: Lenient loading of environment files and compose documents.
//! - **Pipeline**: The full run from a [`prepull_common::config::CollectConfig`].

pub mod collector;
pub mod env;
pub mod expand;
pub mod filter;
pub mod pipeline;
pub mod source;
