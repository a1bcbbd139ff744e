//! Compose-style variable expansion.
//!
//! Supports three placeholder forms:
//! - `${VAR}`: the value of `VAR`, or the placeholder text itself when unset.
//! - `${VAR:-default}`: `default` when `VAR` is unset or empty.
//! - `${VAR-default}`: `default` only when `VAR` is unset.
//!
//! Nested placeholders are not parsed recursively. Instead the whole string
//! is re-scanned after each pass until it stops changing, bounded by
//! [`MAX_EXPANSION_PASSES`].

use nom::{
    IResult, Parser,
    bytes::complete::{tag, take_till1},
    character::complete::char,
    sequence::delimited,
};
use prepull_common::constants::{MAX_EXPANSION_PASSES, PLACEHOLDER_OPEN};

use crate::env::EnvStore;

/// A parsed placeholder body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder<'a> {
    /// `${VAR}`
    Plain(&'a str),
    /// `${VAR:-default}`
    DefaultIfUnsetOrEmpty {
        /// Variable name.
        var: &'a str,
        /// Fallback text.
        default: &'a str,
    },
    /// `${VAR-default}`
    DefaultIfUnset {
        /// Variable name.
        var: &'a str,
        /// Fallback text.
        default: &'a str,
    },
}

impl<'a> Placeholder<'a> {
    /// Classifies a placeholder body (the text between `${` and `}`).
    ///
    /// `:-` takes precedence over `-`, and both split on their first
    /// occurrence: `A-b:-c` is variable `A-b` with default `c`.
    #[must_use]
    pub fn parse(body: &'a str) -> Self {
        if let Some((var, default)) = body.split_once(":-") {
            Self::DefaultIfUnsetOrEmpty { var, default }
        } else if let Some((var, default)) = body.split_once('-') {
            Self::DefaultIfUnset { var, default }
        } else {
            Self::Plain(body)
        }
    }

    /// Resolves against `env`. `None` means the placeholder must be kept
    /// as written.
    fn resolve<'e>(&self, env: &'e EnvStore) -> Option<&'e str>
    where
        'a: 'e,
    {
        match *self {
            Self::Plain(var) => env.get(var),
            Self::DefaultIfUnsetOrEmpty { var, default } => {
                Some(env.get(var).filter(|v| !v.is_empty()).unwrap_or(default))
            }
            Self::DefaultIfUnset { var, default } => Some(env.get(var).unwrap_or(default)),
        }
    }
}

/// Matches `${BODY}` where BODY is non-empty and contains no `}`.
fn placeholder(input: &str) -> IResult<&str, &str> {
    delimited(tag(PLACEHOLDER_OPEN), take_till1(|c: char| c == '}'), char('}')).parse(input)
}

/// Runs one left-to-right substitution pass over `input`.
fn substitute_once(input: &str, env: &EnvStore) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(idx) = rest.find('$') {
        out.push_str(&rest[..idx]);
        let candidate = &rest[idx..];
        if let Ok((after, body)) = placeholder(candidate) {
            let whole = &candidate[..candidate.len() - after.len()];
            out.push_str(Placeholder::parse(body).resolve(env).unwrap_or(whole));
            rest = after;
        } else {
            out.push('$');
            rest = &candidate[1..];
        }
    }

    out.push_str(rest);
    out
}

/// Returns `true` if `s` still contains a `${` placeholder marker.
#[must_use]
pub fn has_placeholder(s: &str) -> bool {
    s.contains(PLACEHOLDER_OPEN)
}

/// Expands every placeholder in `text` against `env`.
///
/// Passes repeat while the output keeps changing, at most
/// [`MAX_EXPANSION_PASSES`] times. Placeholders that cannot be resolved
/// are left as literal `${...}` text, never replaced with an empty string.
#[must_use]
pub fn expand(text: &str, env: &EnvStore) -> String {
    let mut current = text.to_string();
    for _ in 0..MAX_EXPANSION_PASSES {
        if !has_placeholder(&current) {
            break;
        }
        let next = substitute_once(&current, env);
        if next == current {
            break;
        }
        current = next;
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> EnvStore {
        pairs.iter().copied().collect()
    }

    #[test]
    fn placeholder_parse_plain() {
        assert_eq!(Placeholder::parse("TAG"), Placeholder::Plain("TAG"));
    }

    #[test]
    fn placeholder_parse_colon_dash_wins_over_dash() {
        assert_eq!(
            Placeholder::parse("A-b:-c"),
            Placeholder::DefaultIfUnsetOrEmpty {
                var: "A-b",
                default: "c"
            }
        );
    }

    #[test]
    fn placeholder_parse_dash_splits_on_first() {
        assert_eq!(
            Placeholder::parse("VAR-x-y"),
            Placeholder::DefaultIfUnset {
                var: "VAR",
                default: "x-y"
            }
        );
    }

    #[test]
    fn expand_plain_set_variable() {
        assert_eq!(expand("${TAG}", &env(&[("TAG", "1.2")])), "1.2");
    }

    #[test]
    fn expand_plain_unset_keeps_placeholder() {
        assert_eq!(expand("${TAG}", &EnvStore::new()), "${TAG}");
    }

    #[test]
    fn expand_plain_empty_value_is_empty() {
        assert_eq!(expand("a${TAG}b", &env(&[("TAG", "")])), "ab");
    }

    #[test]
    fn expand_colon_dash_uses_value_when_non_empty() {
        assert_eq!(expand("${V:-d}", &env(&[("V", "x")])), "x");
    }

    #[test]
    fn expand_colon_dash_uses_default_when_empty() {
        assert_eq!(expand("${V:-d}", &env(&[("V", "")])), "d");
    }

    #[test]
    fn expand_colon_dash_uses_default_when_unset() {
        assert_eq!(expand("${V:-d}", &EnvStore::new()), "d");
    }

    #[test]
    fn expand_dash_keeps_empty_value() {
        assert_eq!(expand("${V-d}", &env(&[("V", "")])), "");
    }

    #[test]
    fn expand_dash_uses_default_when_unset() {
        assert_eq!(expand("${V-d}", &EnvStore::new()), "d");
    }

    #[test]
    fn expand_empty_default_collapses() {
        assert_eq!(expand("pre${V:-}post", &EnvStore::new()), "prepost");
    }

    #[test]
    fn expand_multiple_placeholders_in_one_string() {
        let e = env(&[("REG", "docker.io"), ("TAG", "7")]);
        assert_eq!(expand("${REG}/library/redis:${TAG}", &e), "docker.io/library/redis:7");
    }

    #[test]
    fn expand_default_containing_colon() {
        assert_eq!(
            expand(
                "${SANDBOX_BASE_PYTHON_IMAGE:-infiniflow/sandbox-base-python:latest}",
                &EnvStore::new()
            ),
            "infiniflow/sandbox-base-python:latest"
        );
    }

    #[test]
    fn expand_resolves_value_referencing_other_variable() {
        let e = env(&[("IMAGE", "repo/app:${TAG}"), ("TAG", "2.0")]);
        assert_eq!(expand("${IMAGE}", &e), "repo/app:2.0");
    }

    #[test]
    fn expand_nested_default_resolves_over_passes() {
        let e = env(&[("B", "inner")]);
        assert_eq!(expand("${A:-${B:-x}}", &e), "inner");
        assert_eq!(expand("${A:-${B:-x}}", &EnvStore::new()), "x");
    }

    #[test]
    fn expand_stops_after_bounded_passes() {
        let e = env(&[
            ("A", "${B}"),
            ("B", "${C}"),
            ("C", "${D}"),
            ("D", "${E}"),
            ("E", "${F}"),
            ("F", "done"),
        ]);
        assert_eq!(expand("${A}", &e), "${F}");
        assert_eq!(expand("${B}", &e), "done");
    }

    #[test]
    fn expand_terminates_on_cycle() {
        let e = env(&[("A", "${B}"), ("B", "${A}")]);
        let out = expand("${A}", &e);
        assert!(has_placeholder(&out));
    }

    #[test]
    fn expand_ignores_malformed_markers() {
        let e = env(&[("A", "1")]);
        assert_eq!(expand("${}", &e), "${}");
        assert_eq!(expand("${A", &e), "${A");
        assert_eq!(expand("$A", &e), "$A");
        assert_eq!(expand("$${A}", &e), "$1");
    }

    #[test]
    fn expand_without_placeholder_is_identity() {
        let e = env(&[("A", "1")]);
        for s in ["", "plain", "redis:7", "price $5", "a}b{c"] {
            assert_eq!(expand(s, &e), s);
        }
    }

    #[test]
    fn expand_is_idempotent_on_resolved_output() {
        let e = env(&[("TAG", "1.2")]);
        let once = expand("repo/app:${TAG}", &e);
        assert_eq!(expand(&once, &e), once);
    }

    #[test]
    fn expand_preserves_non_ascii() {
        let e = env(&[("NAME", "données")]);
        assert_eq!(expand("é${NAME}ü", &e), "édonnéesü");
    }

    #[test]
    fn has_placeholder_detects_marker() {
        assert!(has_placeholder("x${Y}"));
        assert!(has_placeholder("x${"));
        assert!(!has_placeholder("x$Y"));
    }
}
