//! In-memory configuration tree.
//!
//! A [`ConfigNode`] is one addressable section: it has a key, a qualified path
//! (absent for the root), an optional scalar value and an ordered list of child
//! sections. Keys are matched ASCII case-insensitively and keep the spelling they
//! were first inserted with.

use toml::{Table, Value};

/// Separator between the segments of a configuration path, e.g. `Database:Port`.
pub const KEY_DELIMITER: &str = ":";

/// Joins a parent path and a key into a qualified path.
pub(crate) fn combine_path(parent: Option<&str>, key: &str) -> String {
    match parent {
        Some(parent) => format!("{parent}{KEY_DELIMITER}{key}"),
        None => key.to_string(),
    }
}

/// A section of a hierarchical configuration tree.
///
/// Having a value and having children are independent: a node may carry both.
///
/// ## Example
///
/// ```
/// use section_bind::ConfigNode;
///
/// let root = ConfigNode::root()
///     .with_value("Database:Host", "localhost")
///     .with_value("Database:Port", "5432");
///
/// let database = root.get("database").unwrap();
/// assert_eq!(database.path(), Some("Database"));
/// assert_eq!(database.lookup("PORT"), Some("5432"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigNode {
    key: String,
    path: Option<String>,
    value: Option<String>,
    children: Vec<ConfigNode>,
}

impl ConfigNode {
    /// Creates an empty root node.
    pub fn root() -> Self {
        Self::default()
    }

    /// Builds a tree from a parsed TOML document.
    ///
    /// Tables become sections in document order, arrays become sections keyed
    /// `"0"`, `"1"`, ..., and every other value is stored as its textual form.
    pub fn from_table(table: &Table) -> Self {
        let mut root = Self::root();
        root.merge_table(table);
        root
    }

    /// The last segment of this node's path; empty for the root.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The qualified path of this node, `None` for the root.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// The scalar value stored at this node, if any.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Direct children in insertion order.
    pub fn children(&self) -> &[ConfigNode] {
        &self.children
    }

    /// Whether this node carries a value or at least one child.
    ///
    /// An empty section is present in the tree but does not exist.
    pub fn exists(&self) -> bool {
        self.value.is_some() || !self.children.is_empty()
    }

    /// Returns the direct child with the given key.
    pub fn child(&self, key: &str) -> Option<&ConfigNode> {
        self.children
            .iter()
            .find(|child| child.key.eq_ignore_ascii_case(key))
    }

    /// Returns the descendant at a `:`-separated path relative to this node.
    pub fn get(&self, path: &str) -> Option<&ConfigNode> {
        path.split(KEY_DELIMITER)
            .try_fold(self, |node, segment| node.child(segment))
    }

    /// Returns the scalar value at a `:`-separated path relative to this node.
    pub fn lookup(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(ConfigNode::value)
    }

    /// Sets the scalar value at a `:`-separated path, creating sections as needed.
    pub fn insert(&mut self, path: &str, value: impl Into<String>) {
        let node = path
            .split(KEY_DELIMITER)
            .fold(self, |node, segment| node.child_mut(segment));
        node.value = Some(value.into());
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with_value(mut self, path: &str, value: impl Into<String>) -> Self {
        self.insert(path, value);
        self
    }

    /// Merges a TOML value at the given segment path.
    ///
    /// Tables are merged key by key; any other value replaces whatever was
    /// stored at the target node, children included. A non-table value at the
    /// root is ignored.
    pub(crate) fn merge(&mut self, path: &[String], value: &Value) {
        if path.is_empty() {
            if let Value::Table(table) = value {
                self.merge_table(table);
            }
            return;
        }

        let node = path
            .iter()
            .fold(self, |node, segment| node.child_mut(segment));
        node.assign(value);
    }

    /// Applies `f` to every scalar value in the tree, depth first.
    pub(crate) fn try_for_each_value_mut<E, F>(&mut self, f: &mut F) -> Result<(), E>
    where
        F: FnMut(&mut String) -> Result<(), E>,
    {
        if let Some(value) = self.value.as_mut() {
            f(value)?;
        }
        for child in &mut self.children {
            child.try_for_each_value_mut(f)?;
        }
        Ok(())
    }

    fn merge_table(&mut self, table: &Table) {
        for (key, value) in table {
            let node = key
                .split(KEY_DELIMITER)
                .fold(&mut *self, |node, segment| node.child_mut(segment));
            node.assign(value);
        }
    }

    fn assign(&mut self, value: &Value) {
        match value {
            Value::Table(table) => self.merge_table(table),
            Value::Array(items) => {
                self.value = None;
                self.children.clear();
                for (index, item) in items.iter().enumerate() {
                    self.child_mut(&index.to_string()).assign(item);
                }
            }
            scalar => {
                self.children.clear();
                self.value = Some(scalar_text(scalar));
            }
        }
    }

    fn child_mut(&mut self, key: &str) -> &mut ConfigNode {
        let index = match self
            .children
            .iter()
            .position(|child| child.key.eq_ignore_ascii_case(key))
        {
            Some(index) => index,
            None => {
                let path = combine_path(self.path(), key);
                self.children.push(ConfigNode {
                    key: key.to_string(),
                    path: Some(path),
                    value: None,
                    children: Vec::new(),
                });
                self.children.len() - 1
            }
        };
        &mut self.children[index]
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Integer(i) => i.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Boolean(b) => b.to_string(),
        Value::Datetime(dt) => dt.to_string(),
        Value::Array(_) | Value::Table(_) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml_str: &str) -> ConfigNode {
        ConfigNode::from_table(&toml::from_str(toml_str).unwrap())
    }

    #[test]
    fn test_paths_are_qualified_from_root() {
        let root = parse(
            r#"
            [Database.Primary]
            Host = "db1"
            "#,
        );

        assert_eq!(root.path(), None);
        let primary = root.get("Database:Primary").unwrap();
        assert_eq!(primary.path(), Some("Database:Primary"));
        assert_eq!(primary.key(), "Primary");
        assert_eq!(
            primary.child("Host").unwrap().path(),
            Some("Database:Primary:Host")
        );
    }

    #[test]
    fn test_keys_match_case_insensitively() {
        let root = parse(
            r#"
            [Server]
            Port = 8080
            "#,
        );

        assert_eq!(root.lookup("server:port"), Some("8080"));
        assert_eq!(root.lookup("SERVER:PORT"), Some("8080"));
    }

    #[test]
    fn test_scalars_are_rendered_as_text() {
        let root = parse(
            r#"
            name = "app"
            count = 3
            ratio = 1.5
            enabled = true
            "#,
        );

        assert_eq!(root.lookup("name"), Some("app"));
        assert_eq!(root.lookup("count"), Some("3"));
        assert_eq!(root.lookup("ratio"), Some("1.5"));
        assert_eq!(root.lookup("enabled"), Some("true"));
    }

    #[test]
    fn test_tables_keep_document_order() {
        let root = parse(
            r#"
            [Servers.C]
            [Servers.A]
            [Servers.B]
            "#,
        );

        let keys: Vec<&str> = root
            .get("Servers")
            .unwrap()
            .children()
            .iter()
            .map(ConfigNode::key)
            .collect();
        assert_eq!(keys, ["C", "A", "B"]);
    }

    #[test]
    fn test_arrays_become_indexed_sections() {
        let root = parse(
            r#"
            hosts = ["a", "b"]
            "#,
        );

        let hosts = root.get("hosts").unwrap();
        assert_eq!(hosts.value(), None);
        assert_eq!(hosts.children().len(), 2);
        assert_eq!(root.lookup("hosts:1"), Some("b"));
        assert_eq!(hosts.children()[0].path(), Some("hosts:0"));
    }

    #[test]
    fn test_insert_creates_intermediate_sections() {
        let mut root = ConfigNode::root();
        root.insert("Retry:Count", "3");
        root.insert("retry:DelayInSeconds", "1.5");

        let retry = root.child("Retry").unwrap();
        assert_eq!(retry.children().len(), 2);
        assert_eq!(retry.value(), None);
        assert_eq!(
            retry.child("delayinseconds").unwrap().path(),
            Some("Retry:DelayInSeconds")
        );
    }

    #[test]
    fn test_value_and_children_are_independent() {
        let root = ConfigNode::root()
            .with_value("Logging", "verbose")
            .with_value("Logging:Level", "debug");

        let logging = root.child("Logging").unwrap();
        assert_eq!(logging.value(), Some("verbose"));
        assert_eq!(logging.children().len(), 1);
    }

    #[test]
    fn test_merge_replaces_scalars_and_arrays() {
        let mut root = parse(
            r#"
            hosts = ["a", "b", "c"]
            [server]
            port = 1
            host = "x"
            "#,
        );

        let overlay: Table = toml::from_str(
            r#"
            hosts = ["z"]
            [SERVER]
            PORT = 2
            "#,
        )
        .unwrap();
        root.merge(&[], &Value::Table(overlay));

        assert_eq!(root.get("hosts").unwrap().children().len(), 1);
        assert_eq!(root.lookup("hosts:0"), Some("z"));
        assert_eq!(root.lookup("server:port"), Some("2"));
        assert_eq!(root.lookup("server:host"), Some("x"));
        assert_eq!(root.get("server:port").unwrap().path(), Some("server:port"));
    }

    #[test]
    fn test_merge_at_nested_path() {
        let mut root = ConfigNode::root();
        root.merge(
            &["Database".to_string(), "Port".to_string()],
            &Value::String("5432".into()),
        );

        assert_eq!(root.lookup("Database:Port"), Some("5432"));
    }

    #[test]
    fn test_delimited_table_keys_nest() {
        let root = parse(
            r#"
            "Database:Port" = 5432
            [Database]
            Host = "db"
            "#,
        );

        let database = root.child("Database").unwrap();
        assert_eq!(database.children().len(), 2);
        assert_eq!(root.lookup("Database:Port"), Some("5432"));
        assert_eq!(
            database.child("Port").unwrap().path(),
            Some("Database:Port")
        );
    }

    #[test]
    fn test_exists_requires_value_or_children() {
        let root = parse(
            r#"
            hosts = []
            [Empty]
            [Filled]
            Key = "v"
            "#,
        );

        assert!(!root.get("Empty").unwrap().exists());
        assert!(!root.get("hosts").unwrap().exists());
        assert!(root.get("Filled").unwrap().exists());
        assert!(root.get("Filled:Key").unwrap().exists());
    }

    #[test]
    fn test_missing_path_is_none() {
        let root = ConfigNode::root().with_value("a:b", "1");

        assert!(root.get("a:c").is_none());
        assert!(root.get("x").is_none());
        assert_eq!(root.lookup("a"), None);
    }
}
