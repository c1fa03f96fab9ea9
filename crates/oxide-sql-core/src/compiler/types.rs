//! Column type rendering.

use crate::ast::TypeEngine;
use crate::error::{Error, Result};

/// Renders abstract column types as DDL type clauses.
pub trait TypeCompiler {
    /// Renders `type_`.
    fn process(&self, type_: &TypeEngine) -> Result<String> {
        default_type_sql(type_)
    }
}

/// Base type spellings.
///
/// Engine-specific types and the untyped placeholder have no portable
/// spelling and fail with [`Error::UnsupportedType`].
pub fn default_type_sql(type_: &TypeEngine) -> Result<String> {
    let sql = match type_ {
        TypeEngine::SmallInteger => String::from("SMALLINT"),
        TypeEngine::Integer => String::from("INTEGER"),
        TypeEngine::BigInteger => String::from("BIGINT"),
        TypeEngine::Real => String::from("REAL"),
        TypeEngine::Float { precision: None } => String::from("FLOAT"),
        TypeEngine::Float {
            precision: Some(p),
        } => format!("FLOAT({p})"),
        TypeEngine::DoublePrecision => String::from("DOUBLE PRECISION"),
        TypeEngine::Numeric { precision, scale } => numeric("NUMERIC", *precision, *scale),
        TypeEngine::Decimal { precision, scale } => numeric("DECIMAL", *precision, *scale),
        TypeEngine::Char(len) => sized("CHAR", *len),
        TypeEngine::Varchar(len) => sized("VARCHAR", *len),
        TypeEngine::Text => String::from("TEXT"),
        TypeEngine::Blob => String::from("BLOB"),
        TypeEngine::Boolean => String::from("BOOLEAN"),
        TypeEngine::Date => String::from("DATE"),
        TypeEngine::Time => String::from("TIME"),
        TypeEngine::DateTime => String::from("DATETIME"),
        TypeEngine::Timestamp { .. } => String::from("TIMESTAMP"),
        TypeEngine::Custom(name) => name.clone(),
        TypeEngine::TinyInteger
        | TypeEngine::Wrd
        | TypeEngine::Inet
        | TypeEngine::Url
        | TypeEngine::Null => {
            return Err(Error::UnsupportedType(type_.family().to_string()));
        }
    };
    Ok(sql)
}

fn numeric(name: &str, precision: Option<u32>, scale: Option<u32>) -> String {
    match (precision, scale) {
        (Some(p), Some(s)) => format!("{name}({p}, {s})"),
        (Some(p), None) => format!("{name}({p})"),
        _ => name.to_string(),
    }
}

fn sized(name: &str, len: Option<u32>) -> String {
    match len {
        Some(n) => format!("{name}({n})"),
        None => name.to_string(),
    }
}

/// The base type compiler.
#[derive(Debug, Default, Clone, Copy)]
pub struct GenericTypeCompiler;

impl TypeCompiler for GenericTypeCompiler {}
