use thiserror::Error;

use super::ScalarKind;

/// Failure while resolving a value from a configuration section.
///
/// Both variants carry the qualified path of the offending key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ResolveError {
    #[error("configuration key not found: {path}")]
    KeyNotFound { path: String },

    #[error("malformed configuration value at '{path}': expected {expected}, found '{value}'")]
    MalformedValue {
        path: String,
        expected: ScalarKind,
        value: String,
    },
}

impl ResolveError {
    /// The qualified path of the key that failed.
    pub fn path(&self) -> &str {
        match self {
            ResolveError::KeyNotFound { path } | ResolveError::MalformedValue { path, .. } => path,
        }
    }

    pub(crate) fn not_found(path: String) -> Self {
        ResolveError::KeyNotFound { path }
    }

    pub(crate) fn malformed(path: String, expected: ScalarKind, value: &str) -> Self {
        ResolveError::MalformedValue {
            path,
            expected,
            value: value.to_string(),
        }
    }
}
