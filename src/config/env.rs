use toml::Value;
use tracing::debug;

use super::source::{ConfigEntry, ConfigSource};
use super::ConfigError;

/// Reads `PREFIX{sep}A{sep}B=value` variables as the string value of `A:B`.
#[derive(Debug, Clone)]
pub struct EnvSource {
    prefix: String,
    separator: String,
}

impl EnvSource {
    pub fn new(prefix: impl Into<String>, separator: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            separator: separator.into(),
        }
    }

    fn entries_from(
        &self,
        vars: impl IntoIterator<Item = (String, String)>,
    ) -> Result<Vec<ConfigEntry>, ConfigError> {
        if self.separator.is_empty() {
            return Err(ConfigError::EmptyEnvSeparator);
        }

        let prefix_with_sep = format!("{}{}", self.prefix, self.separator);
        let mut entries = Vec::new();

        for (key, value) in vars {
            let Some(path_str) = key.strip_prefix(&prefix_with_sep) else {
                continue;
            };
            if path_str.is_empty() {
                continue;
            }

            let path: Vec<String> = path_str
                .split(self.separator.as_str())
                .map(str::to_string)
                .collect();
            entries.push(ConfigEntry::at_path(path, Value::String(value)));
        }

        debug!(prefix = %self.prefix, count = entries.len(), "loaded environment overrides");
        Ok(entries)
    }
}

impl ConfigSource for EnvSource {
    fn entries(&self) -> Result<Vec<ConfigEntry>, ConfigError> {
        self.entries_from(std::env::vars())
    }
}
