//! Variable reference resolution for configuration values.
//!
//! Supports `${Section:Key}` syntax for cross-referencing values within the tree.
//! Use `$${...}` to escape and produce a literal `${...}`.

use super::ConfigError;
use crate::node::{ConfigNode, KEY_DELIMITER};

/// Upper bound on nested reference expansion.
const MAX_DEPTH: usize = 100;

/// Resolves all `${Path:To:Key}` references in the tree.
///
/// Referenced values are expanded recursively before substitution. Returns an
/// error if a circular reference is detected or a referenced path doesn't exist.
pub fn resolve_references(root: &mut ConfigNode) -> Result<(), ConfigError> {
    let snapshot = root.clone();

    root.try_for_each_value_mut(&mut |value: &mut String| {
        if value.contains('$') {
            *value = Expander::new(&snapshot).expand(value)?;
        }
        Ok(())
    })
}

struct Expander<'a> {
    root: &'a ConfigNode,
    /// Paths currently being expanded, for cycle detection.
    stack: Vec<&'a str>,
}

impl<'a> Expander<'a> {
    fn new(root: &'a ConfigNode) -> Self {
        Self {
            root,
            stack: Vec::new(),
        }
    }

    /// Expands every reference in `s`, handling `$$` escapes.
    fn expand(&mut self, s: &str) -> Result<String, ConfigError> {
        let mut result = String::with_capacity(s.len());
        let mut chars = s.chars().peekable();

        while let Some(ch) = chars.next() {
            if ch != '$' {
                result.push(ch);
                continue;
            }

            match chars.peek() {
                Some('$') => {
                    chars.next();
                    result.push('$');
                }
                Some('{') => {
                    chars.next();
                    let path = consume_until(&mut chars, '}')
                        .ok_or_else(|| ConfigError::UnclosedReference(s.to_string()))?;
                    result.push_str(&self.lookup(&path)?);
                }
                _ => result.push('$'),
            }
        }

        Ok(result)
    }

    fn lookup(&mut self, path: &str) -> Result<String, ConfigError> {
        if path.split(KEY_DELIMITER).any(str::is_empty) {
            return Err(ConfigError::InvalidReferencePath(path.to_string()));
        }

        let node = self
            .root
            .get(path)
            .ok_or_else(|| ConfigError::ReferenceNotFound(path.to_string()))?;
        let raw = node
            .value()
            .ok_or_else(|| ConfigError::NonScalarReference(path.to_string()))?;
        let canonical = node.path().unwrap_or_default();

        if self.stack.contains(&canonical) || self.stack.len() >= MAX_DEPTH {
            return Err(ConfigError::CircularReference(canonical.to_string()));
        }

        self.stack.push(canonical);
        let expanded = self.expand(raw);
        self.stack.pop();
        expanded
    }
}

/// Consumes characters until the delimiter, returning the collected string.
fn consume_until(chars: &mut std::iter::Peekable<std::str::Chars>, delim: char) -> Option<String> {
    let mut result = String::new();
    for ch in chars.by_ref() {
        if ch == delim {
            return Some(result);
        }
        result.push(ch);
    }
    None
}
