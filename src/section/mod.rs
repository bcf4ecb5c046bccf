//! Typed lookups over a configuration section.
//!
//! [`Section`] wraps a [`ConfigNode`] and turns keys relative to it into typed
//! values. Every accessor comes in two forms: `get_*` fails with
//! [`ResolveError::KeyNotFound`] when the key is absent, `try_get_*` returns
//! `None` instead. Both forms fail with [`ResolveError::MalformedValue`] when the
//! key is present but its value does not parse.

mod error;
mod kind;
mod resolver;

use std::any::type_name;
use std::collections::HashMap;
use std::hash::Hash;
use std::time::Duration;

use tracing::trace;

use crate::node::{combine_path, ConfigNode};

pub use error::ResolveError;
pub use kind::{ConfigEnum, Integer, ScalarKind, TimeUnit, UnknownTimeUnit};
pub use resolver::{resolve, resolve_many, try_resolve, FromSection};

use kind::{parse_bool, parse_char};

/// A read-only view of one configuration section.
#[derive(Debug, Clone, Copy)]
pub struct Section<'a> {
    node: &'a ConfigNode,
}

impl<'a> Section<'a> {
    pub fn new(node: &'a ConfigNode) -> Self {
        Self { node }
    }

    pub fn node(&self) -> &'a ConfigNode {
        self.node
    }

    pub fn key(&self) -> &'a str {
        self.node.key()
    }

    /// Qualified path of this section, `None` at the root.
    pub fn path(&self) -> Option<&'a str> {
        self.node.path()
    }

    /// Direct child sections in source order.
    pub fn children(&self) -> impl Iterator<Item = Section<'a>> + 'a {
        self.node.children().iter().map(Section::new)
    }

    /// The section at `key`, or `None` if it is missing or has neither a value
    /// nor children.
    pub fn try_section(&self, key: &str) -> Option<Section<'a>> {
        self.node
            .get(key)
            .filter(|node| node.exists())
            .map(Section::new)
    }

    /// The section at `key`; an empty section is still returned.
    pub fn section(&self, key: &str) -> Result<Section<'a>, ResolveError> {
        self.node
            .get(key)
            .map(Section::new)
            .ok_or_else(|| self.not_found(key))
    }

    pub fn try_get_string(&self, key: &str) -> Result<Option<String>, ResolveError> {
        Ok(self.raw(key).map(str::to_string))
    }

    pub fn get_string(&self, key: &str) -> Result<String, ResolveError> {
        let value = self.try_get_string(key)?;
        self.require(key, value)
    }

    pub fn try_get_int<T: Integer>(&self, key: &str) -> Result<Option<T>, ResolveError> {
        self.parse(key, ScalarKind::Integer(T::TYPE_NAME), |raw| {
            raw.trim().parse().ok()
        })
    }

    pub fn get_int<T: Integer>(&self, key: &str) -> Result<T, ResolveError> {
        let value = self.try_get_int(key)?;
        self.require(key, value)
    }

    pub fn try_get_float(&self, key: &str) -> Result<Option<f64>, ResolveError> {
        self.parse(key, ScalarKind::Float, |raw| raw.trim().parse().ok())
    }

    pub fn get_float(&self, key: &str) -> Result<f64, ResolveError> {
        let value = self.try_get_float(key)?;
        self.require(key, value)
    }

    pub fn try_get_bool(&self, key: &str) -> Result<Option<bool>, ResolveError> {
        self.parse(key, ScalarKind::Boolean, parse_bool)
    }

    pub fn get_bool(&self, key: &str) -> Result<bool, ResolveError> {
        let value = self.try_get_bool(key)?;
        self.require(key, value)
    }

    /// Reads a value that must be exactly one character long.
    pub fn try_get_char(&self, key: &str) -> Result<Option<char>, ResolveError> {
        self.parse(key, ScalarKind::Character, parse_char)
    }

    pub fn get_char(&self, key: &str) -> Result<char, ResolveError> {
        let value = self.try_get_char(key)?;
        self.require(key, value)
    }

    /// Reads an enum variant by name, ignoring ASCII case.
    pub fn try_get_enum<E: ConfigEnum>(&self, key: &str) -> Result<Option<E>, ResolveError> {
        self.parse(key, ScalarKind::Enum(type_name::<E>()), |raw| {
            E::from_name(raw.trim())
        })
    }

    pub fn get_enum<E: ConfigEnum>(&self, key: &str) -> Result<E, ResolveError> {
        let value = self.try_get_enum(key)?;
        self.require(key, value)
    }

    /// Reads the key `{prefix}{unit}` as a floating-point magnitude in `unit`.
    ///
    /// ```
    /// use std::time::Duration;
    /// use section_bind::{ConfigNode, Section, TimeUnit};
    ///
    /// let root = ConfigNode::root().with_value("TimeoutInSeconds", "5");
    /// let timeout = Section::new(&root).get_duration("Timeout", TimeUnit::InSeconds)?;
    /// assert_eq!(timeout, Duration::from_secs(5));
    /// # Ok::<(), section_bind::ResolveError>(())
    /// ```
    pub fn try_get_duration(
        &self,
        prefix: &str,
        unit: TimeUnit,
    ) -> Result<Option<Duration>, ResolveError> {
        let key = duration_key(prefix, unit);
        self.parse(&key, ScalarKind::Duration(unit), |raw| {
            raw.trim()
                .parse::<f64>()
                .ok()
                .and_then(|magnitude| unit.to_duration(magnitude))
        })
    }

    pub fn get_duration(&self, prefix: &str, unit: TimeUnit) -> Result<Duration, ResolveError> {
        let value = self.try_get_duration(prefix, unit)?;
        self.require(&duration_key(prefix, unit), value)
    }

    /// Values of the direct children of `key`, in source order.
    ///
    /// A child without a value contributes an empty string.
    pub fn try_get_strings(&self, key: &str) -> Result<Option<Vec<String>>, ResolveError> {
        Ok(self.try_section(key).map(Section::child_values))
    }

    pub fn get_strings(&self, key: &str) -> Result<Vec<String>, ResolveError> {
        Ok(self.section(key)?.child_values())
    }

    /// Maps each direct child key of `key` to its value.
    ///
    /// A child without a value maps to an empty string.
    pub fn try_get_dict(
        &self,
        key: &str,
    ) -> Result<Option<HashMap<String, String>>, ResolveError> {
        Ok(self.try_section(key).map(Section::child_dict))
    }

    pub fn get_dict(&self, key: &str) -> Result<HashMap<String, String>, ResolveError> {
        Ok(self.section(key)?.child_dict())
    }

    /// Like [`try_get_dict`](Self::try_get_dict), parsing both keys and values as
    /// integers. Any child that does not parse, or whose key parses to an integer
    /// already seen, fails the whole lookup.
    pub fn try_get_int_dict<K, V>(&self, key: &str) -> Result<Option<HashMap<K, V>>, ResolveError>
    where
        K: Integer + Eq + Hash,
        V: Integer,
    {
        self.try_section(key).map(Section::child_int_dict).transpose()
    }

    pub fn get_int_dict<K, V>(&self, key: &str) -> Result<HashMap<K, V>, ResolveError>
    where
        K: Integer + Eq + Hash,
        V: Integer,
    {
        self.section(key)?.child_int_dict()
    }

    /// Resolves `T` from the section at `key`, or `None` if that section is
    /// missing or empty.
    pub fn try_get<T: FromSection>(&self, key: &str) -> Result<Option<T>, ResolveError> {
        self.try_section(key).map(Section::resolve).transpose()
    }

    pub fn get<T: FromSection>(&self, key: &str) -> Result<T, ResolveError> {
        self.section(key)?.resolve()
    }

    /// Resolves one `T` per direct child of `key`, in source order.
    pub fn try_get_many<T: FromSection>(&self, key: &str) -> Result<Option<Vec<T>>, ResolveError> {
        self.try_section(key)
            .map(Section::resolve_children)
            .transpose()
    }

    pub fn get_many<T: FromSection>(&self, key: &str) -> Result<Vec<T>, ResolveError> {
        self.section(key)?.resolve_children()
    }

    fn raw(&self, key: &str) -> Option<&'a str> {
        let value = self.node.lookup(key);
        trace!(
            path = %self.qualify(key),
            found = value.is_some(),
            "configuration lookup"
        );
        value
    }

    fn parse<T>(
        &self,
        key: &str,
        expected: ScalarKind,
        parse: impl FnOnce(&str) -> Option<T>,
    ) -> Result<Option<T>, ResolveError> {
        match self.raw(key) {
            None => Ok(None),
            Some(raw) => parse(raw)
                .map(Some)
                .ok_or_else(|| ResolveError::malformed(self.qualify(key), expected, raw)),
        }
    }

    fn require<T>(&self, key: &str, value: Option<T>) -> Result<T, ResolveError> {
        value.ok_or_else(|| self.not_found(key))
    }

    fn child_values(self) -> Vec<String> {
        self.children()
            .map(|child| child.node.value().unwrap_or_default().to_string())
            .collect()
    }

    fn child_dict(self) -> HashMap<String, String> {
        self.children()
            .map(|child| {
                let value = child.node.value().unwrap_or_default().to_string();
                (child.key().to_string(), value)
            })
            .collect()
    }

    fn child_int_dict<K, V>(self) -> Result<HashMap<K, V>, ResolveError>
    where
        K: Integer + Eq + Hash,
        V: Integer,
    {
        let mut entries = HashMap::new();
        for child in self.children() {
            let (key, value) = child.int_entry::<K, V>()?;
            if entries.insert(key, value).is_some() {
                return Err(ResolveError::malformed(
                    child.path().unwrap_or_default().to_string(),
                    ScalarKind::Integer(K::TYPE_NAME),
                    child.key(),
                ));
            }
        }
        Ok(entries)
    }

    fn int_entry<K: Integer, V: Integer>(&self) -> Result<(K, V), ResolveError> {
        let path = self.path().unwrap_or_default();
        let key = self.key().trim().parse::<K>().map_err(|_| {
            ResolveError::malformed(path.to_string(), ScalarKind::Integer(K::TYPE_NAME), self.key())
        })?;
        let raw = self
            .node
            .value()
            .ok_or_else(|| ResolveError::not_found(path.to_string()))?;
        let value = raw.trim().parse::<V>().map_err(|_| {
            ResolveError::malformed(path.to_string(), ScalarKind::Integer(V::TYPE_NAME), raw)
        })?;
        Ok((key, value))
    }

    fn qualify(&self, key: &str) -> String {
        combine_path(self.path(), key)
    }

    fn not_found(&self, key: &str) -> ResolveError {
        ResolveError::not_found(self.qualify(key))
    }
}

fn duration_key(prefix: &str, unit: TimeUnit) -> String {
    format!("{prefix}{}", unit.name())
}
