//! Environment store built from `KEY=VALUE` files.
//!
//! Parsing is lenient: comments, blank lines, and lines without `=` are
//! skipped without error. Values are kept verbatim; quotes are not
//! stripped and nothing is expanded at load time.

use std::collections::BTreeMap;

/// Returns `true` for every character that ends a line in an env file:
/// `\n`, `\r`, vertical tab, form feed, the file/group/record separators,
/// NEL, and the Unicode line and paragraph separators.
const fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r'
            | '\x0b'
            | '\x0c'
            | '\x1c'
            | '\x1d'
            | '\x1e'
            | '\u{85}'
            | '\u{2028}'
            | '\u{2029}'
    )
}

/// Splits `content` into lines. A `\r\n` pair leaves an empty segment
/// between its two breaks, which the parser skips like any blank line.
fn split_lines(content: &str) -> impl Iterator<Item = &str> {
    content.split(is_line_break)
}

/// Flat mapping of variable name to raw, unexpanded value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvStore {
    vars: BTreeMap<String, String>,
}

impl EnvStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses environment file content.
    ///
    /// Lines end at `\n`, `\r`, `\r\n`, vertical tab, form feed, the
    /// `\x1c`..`\x1e` separators, NEL, and U+2028/U+2029. Each line is
    /// trimmed; empty lines and `#` comments are ignored, as are lines with
    /// no `=`. The rest is split on the first `=` and both
    /// halves are trimmed. A later assignment overwrites an earlier one.
    #[must_use]
    pub fn parse(content: &str) -> Self {
        let mut store = Self::new();
        for line in split_lines(content) {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let _ = store
                .vars
                .insert(key.trim().to_string(), value.trim().to_string());
        }
        tracing::debug!(vars = store.len(), "parsed environment file");
        store
    }

    /// Returns the raw value of `key`, if set.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Returns `true` if `key` is set, even to an empty string.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    /// Number of variables in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Returns `true` if no variables are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Iterates over variables in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for EnvStore
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
