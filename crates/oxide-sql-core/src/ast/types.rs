//! Abstract column types.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Database-agnostic column types.
///
/// Reflection produces these from catalog type names; the type compiler of
/// each dialect turns them back into DDL spellings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "args", rename_all = "snake_case")]
pub enum TypeEngine {
    // Integer types
    /// Small integer (2 bytes).
    SmallInteger,
    /// Integer (4 bytes).
    Integer,
    /// Big integer (8 bytes).
    BigInteger,
    /// Tiny integer (1 byte).
    TinyInteger,
    /// Machine word sized integer.
    Wrd,

    // Floating point
    /// Real (4-byte float).
    Real,
    /// Float with optional binary precision.
    Float {
        /// Precision in bits.
        precision: Option<u32>,
    },
    /// Double precision (8-byte float).
    DoublePrecision,
    /// Numeric with precision and scale.
    Numeric {
        /// Total number of digits.
        precision: Option<u32>,
        /// Number of digits after decimal point.
        scale: Option<u32>,
    },
    /// Decimal with precision and scale.
    Decimal {
        /// Total number of digits.
        precision: Option<u32>,
        /// Number of digits after decimal point.
        scale: Option<u32>,
    },

    // String types
    /// Fixed-length character string.
    Char(Option<u32>),
    /// Variable-length character string.
    Varchar(Option<u32>),
    /// Unbounded text.
    Text,

    /// Binary large object.
    Blob,
    /// Boolean.
    Boolean,

    // Date/time types
    /// Date.
    Date,
    /// Time of day.
    Time,
    /// Generic date-time.
    DateTime,
    /// Timestamp, optionally zoned.
    Timestamp {
        /// Whether the timestamp carries a time zone.
        timezone: bool,
    },

    // Network types
    /// Internet address.
    Inet,
    /// URL.
    Url,

    /// Untyped placeholder for types the dialect could not resolve.
    Null,

    /// Database-specific type rendered verbatim.
    Custom(String),
}

impl TypeEngine {
    /// Returns whether this type has integer affinity.
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(
            self,
            Self::SmallInteger | Self::Integer | Self::BigInteger | Self::TinyInteger | Self::Wrd
        )
    }

    /// Returns whether this is one of the narrow integer types.
    #[must_use]
    pub const fn is_small_integer(&self) -> bool {
        matches!(self, Self::SmallInteger | Self::TinyInteger)
    }

    /// Lowercase family name, used in log messages.
    #[must_use]
    pub const fn family(&self) -> &'static str {
        match self {
            Self::SmallInteger => "smallint",
            Self::Integer => "int",
            Self::BigInteger => "bigint",
            Self::TinyInteger => "tinyint",
            Self::Wrd => "wrd",
            Self::Real => "real",
            Self::Float { .. } => "float",
            Self::DoublePrecision => "double",
            Self::Numeric { .. } => "numeric",
            Self::Decimal { .. } => "decimal",
            Self::Char(_) => "char",
            Self::Varchar(_) => "varchar",
            Self::Text => "text",
            Self::Blob => "blob",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Time => "time",
            Self::DateTime => "datetime",
            Self::Timestamp { .. } => "timestamp",
            Self::Inet => "inet",
            Self::Url => "url",
            Self::Null => "null",
            Self::Custom(_) => "custom",
        }
    }
}

impl fmt::Display for TypeEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Custom(name) => f.write_str(name),
            other => f.write_str(other.family()),
        }
    }
}
