//! Strongly-typed configuration objects resolved from a hierarchical key/value tree.
//!
//! A [`ConfigNode`] tree is assembled with [`Config`] (TOML files, inline TOML,
//! key/value pairs, environment variables). Types implementing [`FromSection`]
//! are then built from it through the typed accessors of [`Section`]; errors
//! carry the qualified path of the key that failed.
//!
//! ## Example
//!
//! ```
//! use std::time::Duration;
//! use section_bind::{bind_section, config_enum, resolve, Config, TimeUnit};
//!
//! #[derive(Debug, Clone, Copy, PartialEq)]
//! enum Engine {
//!     Postgres,
//!     Sqlite,
//! }
//!
//! config_enum!(Engine { Postgres, Sqlite });
//!
//! #[derive(Debug)]
//! struct Database {
//!     engine: Engine,
//!     port: u16,
//!     timeout: Duration,
//! }
//!
//! bind_section!(Database {
//!     engine => get_enum("Engine"),
//!     port => get_int("Port"),
//!     timeout => get_duration("Timeout", TimeUnit::InSeconds),
//! });
//!
//! let root = Config::builder()
//!     .with_toml(
//!         r#"
//!         [Database]
//!         Engine = "postgres"
//!         Port = 5432
//!         TimeoutInSeconds = 2.5
//!         "#,
//!     )
//!     .build()?;
//!
//! let database: Database = section_bind::Section::new(&root).get("Database")?;
//! assert_eq!(database.engine, Engine::Postgres);
//! assert_eq!(database.timeout, Duration::from_millis(2500));
//!
//! let error = resolve::<Database>(&root).unwrap_err();
//! assert_eq!(error.path(), "Engine");
//! # Ok::<(), section_bind::Error>(())
//! ```

pub mod config;
mod error;
pub mod node;
pub mod section;

pub use config::{Config, ConfigError};
pub use error::Error;
pub use node::{ConfigNode, KEY_DELIMITER};
pub use section::{
    resolve, resolve_many, try_resolve, ConfigEnum, FromSection, Integer, ResolveError,
    ScalarKind, Section, TimeUnit, UnknownTimeUnit,
};
