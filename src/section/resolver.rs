//! Construction of typed configuration objects from sections.

use std::any::type_name;

use tracing::debug;

use super::{ResolveError, Section};
use crate::node::ConfigNode;

/// A type that can be built from a configuration section.
///
/// The implementation is the binding table for the type: it names, in order,
/// the key each field is read from and the accessor used to read it. Most
/// implementations are generated with [`bind_section!`](crate::bind_section).
///
/// Resolution is fail-fast: the first missing or malformed key aborts it.
pub trait FromSection: Sized {
    fn from_section(section: Section<'_>) -> Result<Self, ResolveError>;
}

impl<'a> Section<'a> {
    /// Builds a `T` from this section.
    pub fn resolve<T: FromSection>(self) -> Result<T, ResolveError> {
        debug!(
            path = self.path().unwrap_or_default(),
            target = type_name::<T>(),
            "resolving configuration section"
        );
        T::from_section(self)
    }

    /// Builds one `T` per direct child of this section, in source order.
    pub fn resolve_children<T: FromSection>(self) -> Result<Vec<T>, ResolveError> {
        self.children().map(Section::resolve).collect()
    }
}

/// Builds a `T` from `node`.
pub fn resolve<T: FromSection>(node: &ConfigNode) -> Result<T, ResolveError> {
    Section::new(node).resolve()
}

/// Builds a `T` from the child section `key` of `node`, or `None` if that
/// section does not exist.
pub fn try_resolve<T: FromSection>(node: &ConfigNode, key: &str) -> Result<Option<T>, ResolveError> {
    Section::new(node).try_get(key)
}

/// Builds one `T` per child of the section `key` of `node`.
pub fn resolve_many<T: FromSection>(node: &ConfigNode, key: &str) -> Result<Vec<T>, ResolveError> {
    Section::new(node).get_many(key)
}

/// Implements [`FromSection`] for a struct by listing, per field, the
/// [`Section`] accessor and arguments that produce it.
///
/// Fields are read in the order they are listed.
///
/// ```
/// use std::time::Duration;
/// use section_bind::{bind_section, resolve, ConfigNode, TimeUnit};
///
/// #[derive(Debug, PartialEq)]
/// struct Retry {
///     count: u32,
///     delay: Duration,
///     jitter: Option<f64>,
/// }
///
/// bind_section!(Retry {
///     count => get_int("Count"),
///     delay => get_duration("Delay", TimeUnit::InSeconds),
///     jitter => try_get_float("Jitter"),
/// });
///
/// let root = ConfigNode::root()
///     .with_value("Count", "3")
///     .with_value("DelayInSeconds", "1.5");
/// let retry: Retry = resolve(&root)?;
/// assert_eq!(retry.delay, Duration::from_millis(1500));
/// # Ok::<(), section_bind::ResolveError>(())
/// ```
#[macro_export]
macro_rules! bind_section {
    ($ty:ident { $($field:ident => $accessor:ident ( $($arg:expr),* $(,)? )),* $(,)? }) => {
        impl $crate::FromSection for $ty {
            fn from_section(
                section: $crate::Section<'_>,
            ) -> ::core::result::Result<Self, $crate::ResolveError> {
                ::core::result::Result::Ok(Self {
                    $($field: section.$accessor($($arg),*)?,)*
                })
            }
        }
    };
}
