//! The closed set of scalar kinds a section value can be coerced into.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// Description of the type a value was expected to parse as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    /// An integer of the named primitive type.
    Integer(&'static str),
    Float,
    Boolean,
    Character,
    /// A variant of the named enumeration.
    Enum(&'static str),
    /// A magnitude expressed in the given unit.
    Duration(TimeUnit),
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarKind::Integer(ty) => write!(f, "an integer ({ty})"),
            ScalarKind::Float => f.write_str("a floating-point number"),
            ScalarKind::Boolean => f.write_str("a boolean (true or false)"),
            ScalarKind::Character => f.write_str("a single character"),
            ScalarKind::Enum(ty) => write!(f, "a variant of {ty}"),
            ScalarKind::Duration(unit) => {
                write!(f, "a non-negative number of {}", unit.plural_noun())
            }
        }
    }
}

/// Unit selector for duration lookups.
///
/// The unit's name is appended to the key prefix, so `("Timeout", InSeconds)`
/// reads the key `TimeoutInSeconds`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    InMilliseconds,
    InSeconds,
    InMinutes,
    InHours,
    InDays,
}

impl TimeUnit {
    pub const ALL: [TimeUnit; 5] = [
        TimeUnit::InMilliseconds,
        TimeUnit::InSeconds,
        TimeUnit::InMinutes,
        TimeUnit::InHours,
        TimeUnit::InDays,
    ];

    /// The key suffix for this unit.
    pub fn name(self) -> &'static str {
        match self {
            TimeUnit::InMilliseconds => "InMilliseconds",
            TimeUnit::InSeconds => "InSeconds",
            TimeUnit::InMinutes => "InMinutes",
            TimeUnit::InHours => "InHours",
            TimeUnit::InDays => "InDays",
        }
    }

    fn plural_noun(self) -> &'static str {
        match self {
            TimeUnit::InMilliseconds => "milliseconds",
            TimeUnit::InSeconds => "seconds",
            TimeUnit::InMinutes => "minutes",
            TimeUnit::InHours => "hours",
            TimeUnit::InDays => "days",
        }
    }

    /// Converts a magnitude in this unit to a [`Duration`].
    ///
    /// Returns `None` for negative, non-finite or overflowing magnitudes.
    pub fn to_duration(self, magnitude: f64) -> Option<Duration> {
        let seconds = match self {
            TimeUnit::InMilliseconds => magnitude / 1000.0,
            TimeUnit::InSeconds => magnitude,
            TimeUnit::InMinutes => magnitude * 60.0,
            TimeUnit::InHours => magnitude * 3600.0,
            TimeUnit::InDays => magnitude * 86400.0,
        };
        Duration::try_from_secs_f64(seconds).ok()
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown time unit '{0}'")]
pub struct UnknownTimeUnit(pub String);

impl FromStr for TimeUnit {
    type Err = UnknownTimeUnit;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeUnit::ALL
            .into_iter()
            .find(|unit| unit.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownTimeUnit(s.to_string()))
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Primitive integer types readable from configuration.
pub trait Integer: sealed::Sealed + FromStr + Copy {
    const TYPE_NAME: &'static str;
}

macro_rules! impl_integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Integer for $ty {
                const TYPE_NAME: &'static str = stringify!($ty);
            }
        )*
    };
}

impl_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

/// An enumeration whose variants can be named in configuration.
///
/// Names are matched ASCII case-insensitively. Usually implemented with
/// [`config_enum!`](crate::config_enum).
pub trait ConfigEnum: Copy + 'static {
    const VARIANTS: &'static [(&'static str, Self)];

    fn from_name(name: &str) -> Option<Self> {
        Self::VARIANTS
            .iter()
            .find(|(variant, _)| variant.eq_ignore_ascii_case(name))
            .map(|(_, value)| *value)
    }
}

/// Implements [`ConfigEnum`] for a fieldless enum, naming each variant after its
/// identifier.
///
/// ```
/// use section_bind::{config_enum, ConfigEnum};
///
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// enum Level {
///     Debug,
///     Info,
/// }
///
/// config_enum!(Level { Debug, Info });
///
/// assert_eq!(Level::from_name("INFO"), Some(Level::Info));
/// ```
#[macro_export]
macro_rules! config_enum {
    ($ty:ident { $($variant:ident),+ $(,)? }) => {
        impl $crate::ConfigEnum for $ty {
            const VARIANTS: &'static [(&'static str, Self)] =
                &[$((::core::stringify!($variant), $ty::$variant)),+];
        }
    };
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("true") {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

pub(crate) fn parse_char(raw: &str) -> Option<char> {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}
