//! Catalog type names and their abstract column types.

use oxide_sql_core::TypeEngine;

/// Type names reported by `sys.columns.type` that [`resolve`] understands.
pub const MONETDB_TYPE_NAMES: &[&str] = &[
    "tinyint",
    "wrd",
    "url",
    "inet",
    "bigint",
    "blob",
    "boolean",
    "char",
    "clob",
    "date",
    "decimal",
    "double",
    "int",
    "real",
    "smallint",
    "time",
    "timestamp",
    "timestamptz",
    "varchar",
];

/// Maps a catalog type name to an abstract column type.
///
/// `digits` is the length of `char`/`varchar` and the precision of
/// `decimal`; `scale` only applies to `decimal`. Unknown names yield `None`
/// and the caller decides whether that is fatal.
#[must_use]
pub fn resolve(name: &str, digits: Option<u32>, scale: Option<u32>) -> Option<TypeEngine> {
    let type_ = match name {
        "tinyint" => TypeEngine::TinyInteger,
        "wrd" => TypeEngine::Wrd,
        "url" => TypeEngine::Url,
        "inet" => TypeEngine::Inet,
        "bigint" => TypeEngine::BigInteger,
        "blob" => TypeEngine::Blob,
        "boolean" => TypeEngine::Boolean,
        "char" => TypeEngine::Char(digits),
        "clob" => TypeEngine::Text,
        "date" => TypeEngine::Date,
        "decimal" => TypeEngine::Decimal {
            precision: digits,
            scale,
        },
        "double" => TypeEngine::DoublePrecision,
        "int" => TypeEngine::Integer,
        "real" => TypeEngine::Real,
        "smallint" => TypeEngine::SmallInteger,
        "time" => TypeEngine::Time,
        "timestamp" => TypeEngine::Timestamp { timezone: false },
        "timestamptz" => TypeEngine::Timestamp { timezone: true },
        "varchar" => TypeEngine::Varchar(digits),
        _ => return None,
    };
    Some(type_)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_listed_name_resolves() {
        for name in MONETDB_TYPE_NAMES {
            assert!(resolve(name, Some(10), Some(2)).is_some(), "{name}");
        }
    }

    #[test]
    fn test_parameterized_types() {
        assert_eq!(
            resolve("decimal", Some(12), Some(2)),
            Some(TypeEngine::Decimal {
                precision: Some(12),
                scale: Some(2)
            })
        );
        assert_eq!(resolve("varchar", Some(40), Some(0)), Some(TypeEngine::Varchar(Some(40))));
        assert_eq!(resolve("char", Some(1), None), Some(TypeEngine::Char(Some(1))));
        assert_eq!(resolve("int", Some(32), Some(0)), Some(TypeEngine::Integer));
    }

    #[test]
    fn test_unknown_name() {
        assert_eq!(resolve("geometry", None, None), None);
    }
}
