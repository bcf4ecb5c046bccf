//! Layered loading of configuration trees.

mod builder;
mod env;
mod error;
mod file;
mod memory;
mod reference;
mod source;

pub use builder::Config;
pub use env::EnvSource;
pub use error::ConfigError;
pub use file::FileSource;
pub use memory::{InlineSource, MemorySource};
pub use source::{ConfigEntry, ConfigSource};
