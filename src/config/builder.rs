use std::path::Path;

use tracing::debug;

use super::env::EnvSource;
use super::file::FileSource;
use super::memory::{InlineSource, MemorySource};
use super::reference::resolve_references;
use super::source::ConfigSource;
use super::ConfigError;
use crate::node::ConfigNode;
use crate::section::{resolve, FromSection};
use crate::Error;

/// Builder for assembling a configuration tree from layered sources.
///
/// Sources are merged in registration order, with later sources overriding
/// earlier ones. Sections are merged recursively with case-insensitive key
/// matching; other values (including arrays) are replaced entirely.
///
/// ## Variable References
///
/// String values can reference other values using `${Path:To:Key}` syntax:
///
/// ```toml
/// [Server]
/// Host = "localhost"
/// Port = 8080
/// Url = "http://${Server:Host}:${Server:Port}/api"
/// ```
///
/// Use `$$` to escape a literal `$` (e.g., `$${VAR}` becomes `${VAR}`).
///
/// ## Example
///
/// ```no_run
/// use section_bind::{bind_section, Config};
///
/// struct MyConfig {
///     name: String,
///     port: u16,
/// }
///
/// bind_section!(MyConfig {
///     name => get_string("Name"),
///     port => get_int("Port"),
/// });
///
/// let config: MyConfig = Config::builder()
///     .with_file("config/default.toml", true)
///     .with_file("config/local.toml", false)
///     .build_as()?;
/// # Ok::<(), section_bind::Error>(())
/// ```
#[derive(Debug, Default)]
#[must_use = "builders do nothing until .build() is called"]
pub struct Config {
    sources: Vec<Box<dyn ConfigSource>>,
}

impl Config {
    /// Creates a new configuration builder.
    pub fn builder() -> Self {
        Self::default()
    }

    /// Adds a custom source.
    pub fn with_source(mut self, source: impl ConfigSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Adds a TOML file to be loaded.
    ///
    /// If `required` is `true`, the build will fail if the file doesn't exist.
    /// Optional files that are missing are silently skipped.
    pub fn with_file(self, path: impl AsRef<Path>, required: bool) -> Self {
        self.with_source(FileSource::new(path, required))
    }

    /// Adds a TOML document given as a string.
    pub fn with_toml(self, contents: impl Into<String>) -> Self {
        self.with_source(InlineSource::new(contents))
    }

    /// Adds values keyed by `:`-separated paths.
    ///
    /// ```
    /// # use section_bind::Config;
    /// let root = Config::builder()
    ///     .with_values([("Database:Port", "5432")])
    ///     .build()?;
    /// assert_eq!(root.lookup("Database:Port"), Some("5432"));
    /// # Ok::<(), section_bind::ConfigError>(())
    /// ```
    pub fn with_values<K, V>(self, values: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.with_source(MemorySource::new(values))
    }

    /// Loads configuration from environment variables with the given prefix.
    ///
    /// `MYAPP__Database__Port=5432` with prefix `MYAPP` and separator `__` sets
    /// `Database:Port`. Segments keep their case; since keys match
    /// case-insensitively, `MYAPP__DATABASE__PORT` overrides the same key.
    ///
    /// ```no_run
    /// # use section_bind::Config;
    /// // defaults -> env overrides -> local file overrides env
    /// let root = Config::builder()
    ///     .with_file("config/default.toml", true)
    ///     .with_env("MYAPP", "__")
    ///     .with_file("config/local.toml", false)
    ///     .build()?;
    /// # Ok::<(), section_bind::ConfigError>(())
    /// ```
    pub fn with_env(self, prefix: impl Into<String>, separator: impl Into<String>) -> Self {
        self.with_source(EnvSource::new(prefix, separator))
    }

    /// Loads and merges every source, then resolves `${...}` references.
    pub fn build(self) -> Result<ConfigNode, ConfigError> {
        let mut root = ConfigNode::root();

        for source in &self.sources {
            let entries = source.entries()?;
            debug!(?source, entries = entries.len(), "merging config source");
            for entry in entries {
                root.merge(&entry.path, &entry.value);
            }
        }

        resolve_references(&mut root)?;
        Ok(root)
    }

    /// Builds the tree and resolves `T` from its root.
    pub fn build_as<T: FromSection>(self) -> Result<T, Error> {
        let root = self.build()?;
        Ok(resolve(&root)?)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::time::Duration;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::{ResolveError, TimeUnit};

    #[derive(Debug, PartialEq)]
    struct Retry {
        count: u32,
        delay: Duration,
    }

    crate::bind_section!(Retry {
        count => get_int("Count"),
        delay => get_duration("Delay", TimeUnit::InSeconds),
    });

    #[derive(Debug, PartialEq)]
    struct Service {
        name: String,
        retry: Retry,
        hosts: Vec<String>,
    }

    crate::bind_section!(Service {
        name => get_string("Name"),
        retry => get("Retry"),
        hosts => get_strings("Hosts"),
    });

    #[test]
    fn test_later_sources_override_earlier() {
        let mut defaults = NamedTempFile::new().unwrap();
        writeln!(
            defaults,
            r#"
            Name = "svc"
            Hosts = ["a", "b"]

            [Retry]
            Count = 3
            DelayInSeconds = 1
            "#
        )
        .unwrap();

        let service: Service = Config::builder()
            .with_file(defaults.path(), true)
            .with_file("/nonexistent/local.toml", false)
            .with_toml("Hosts = [\"c\"]")
            .with_values([("retry:delayinseconds", "2.5")])
            .build_as()
            .unwrap();

        assert_eq!(
            service,
            Service {
                name: "svc".into(),
                retry: Retry {
                    count: 3,
                    delay: Duration::from_millis(2500),
                },
                hosts: vec!["c".into()],
            }
        );
    }

    #[test]
    fn test_env_overrides_file_values() {
        std::env::set_var("SECTION_BIND_BUILDER_TEST__RETRY__COUNT", "9");

        let root = Config::builder()
            .with_toml("[Retry]\nCount = 3")
            .with_env("SECTION_BIND_BUILDER_TEST", "__")
            .build()
            .unwrap();

        assert_eq!(root.lookup("Retry:Count"), Some("9"));
        assert_eq!(root.get("Retry:Count").unwrap().path(), Some("Retry:Count"));
    }

    #[test]
    fn test_references_resolve_across_sources() {
        let root = Config::builder()
            .with_toml("Url = \"http://${Server:Host}\"")
            .with_values([("Server:Host", "example.com")])
            .build()
            .unwrap();

        assert_eq!(root.lookup("Url"), Some("http://example.com"));
    }

    #[test]
    fn test_build_as_surfaces_resolve_errors() {
        let result = Config::builder()
            .with_toml("Name = \"svc\"\n[Retry]\nCount = 1")
            .build_as::<Service>();

        match result {
            Err(Error::Resolve(ResolveError::KeyNotFound { path })) => {
                assert_eq!(path, "Retry:DelayInSeconds");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_build_surfaces_source_errors() {
        let result = Config::builder()
            .with_file("/nonexistent/required.toml", true)
            .build();

        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }
}
