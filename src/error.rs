use crate::config::ConfigError;
use crate::section::ResolveError;
use thiserror::Error;

/// Top-level error type for the section-bind library.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("resolution error: {0}")]
    Resolve(#[from] ResolveError),
}
