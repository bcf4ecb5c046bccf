//! Sources that hold their configuration in memory.

use toml::Value;

use super::source::{ConfigEntry, ConfigSource};
use super::ConfigError;
use crate::node::KEY_DELIMITER;

/// Key/value pairs where each key is a `:`-separated path.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    values: Vec<(String, String)>,
}

impl MemorySource {
    pub fn new<K, V>(values: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: values
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl ConfigSource for MemorySource {
    fn entries(&self) -> Result<Vec<ConfigEntry>, ConfigError> {
        Ok(self
            .values
            .iter()
            .map(|(key, value)| {
                let path = key.split(KEY_DELIMITER).map(str::to_string).collect();
                ConfigEntry::at_path(path, Value::String(value.clone()))
            })
            .collect())
    }
}

/// A TOML document held as a string.
#[derive(Debug, Clone)]
pub struct InlineSource {
    contents: String,
}

impl InlineSource {
    pub fn new(contents: impl Into<String>) -> Self {
        Self {
            contents: contents.into(),
        }
    }
}

impl ConfigSource for InlineSource {
    fn entries(&self) -> Result<Vec<ConfigEntry>, ConfigError> {
        let table = toml::from_str(&self.contents).map_err(ConfigError::InlineParseError)?;
        Ok(vec![ConfigEntry::root(table)])
    }
}
