//! Connection, driver and result contracts.
//!
//! The engine layer is blocking and single-threaded: every call issues its
//! queries over the connection it is handed and waits for each to finish.
//! Pooling and thread affinity are the host's concern; dialects only
//! advertise a [`PoolClass`](crate::dialect::PoolClass).

mod execution;
mod reflection;

pub use execution::{default_column_default, DefaultExecutionContext, ExecutionContext};
pub use reflection::{
    InfoCache, Inspector, ReflectedColumn, ReflectedForeignKey, ReflectedIndex,
    ReflectedPrimaryKey, ReflectedTable, ReflectedUniqueConstraint, Reflector,
};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::value::SqlValue;

/// Named statement parameters, in placeholder order.
pub type Params = Vec<(String, SqlValue)>;

/// Builds a parameter list from name/value pairs.
#[must_use]
pub fn named_params<const N: usize>(pairs: [(&str, SqlValue); N]) -> Params {
    pairs
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

/// An open database connection.
pub trait Connection {
    /// Executes one statement and returns its rows (empty for DML and DDL).
    fn execute(&mut self, sql: &str, params: &[(String, SqlValue)]) -> Result<ResultSet>;

    /// Commits the current transaction.
    fn commit(&mut self) -> Result<()>;

    /// Rolls back the current transaction.
    fn rollback(&mut self) -> Result<()>;
}

impl<C: Connection + ?Sized> Connection for Box<C> {
    fn execute(&mut self, sql: &str, params: &[(String, SqlValue)]) -> Result<ResultSet> {
        (**self).execute(sql, params)
    }

    fn commit(&mut self) -> Result<()> {
        (**self).commit()
    }

    fn rollback(&mut self) -> Result<()> {
        (**self).rollback()
    }
}

/// Opens connections for a dialect.
pub trait Driver {
    /// Driver name, as reported by the dialect.
    fn name(&self) -> &str;

    /// Opens a connection.
    fn connect(&self, args: &ConnectArgs) -> Result<Box<dyn Connection>>;
}

/// Keyword arguments handed to a driver's connect call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectArgs {
    /// Server host name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    /// Server port.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// User name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Password.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Database name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    /// Extra driver options.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub query: BTreeMap<String, String>,
}

/// Rows returned by a statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    columns: Vec<String>,
    rows: Vec<Vec<SqlValue>>,
}

impl ResultSet {
    /// Creates a result set. Every row must have one value per column.
    #[must_use]
    pub fn new(columns: Vec<String>, rows: Vec<Vec<SqlValue>>) -> Self {
        Self { columns, rows }
    }

    /// A result with no columns and no rows.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Column names.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns whether there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterates over the rows.
    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(|values| Row {
            columns: &self.columns,
            values,
        })
    }

    /// The first row, if any.
    #[must_use]
    pub fn first(&self) -> Option<Row<'_>> {
        self.rows().next()
    }

    /// The first column of the first row, or `None` when there are no rows
    /// or the value is NULL.
    #[must_use]
    pub fn scalar(&self) -> Option<&SqlValue> {
        self.rows
            .first()
            .and_then(|row| row.first())
            .filter(|value| !value.is_null())
    }
}

/// A borrowed view of one result row.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    columns: &'a [String],
    values: &'a [SqlValue],
}

impl<'a> Row<'a> {
    /// All values, in column order.
    #[must_use]
    pub const fn values(&self) -> &'a [SqlValue] {
        self.values
    }

    /// The value at `index`.
    pub fn get_index(&self, index: usize) -> Result<&'a SqlValue> {
        self.values.get(index).ok_or_else(|| Error::RowDecode {
            column: format!("#{index}"),
            expected: "a value",
            found: "no such column",
        })
    }

    /// The value of the named column.
    pub fn get(&self, column: &str) -> Result<&'a SqlValue> {
        self.columns
            .iter()
            .position(|c| c == column)
            .and_then(|i| self.values.get(i))
            .ok_or_else(|| Error::RowDecode {
                column: column.to_string(),
                expected: "a value",
                found: "no such column",
            })
    }

    /// A non-NULL text column.
    pub fn get_str(&self, column: &str) -> Result<&'a str> {
        match self.get(column)? {
            SqlValue::Text(s) => Ok(s),
            other => Err(decode_error(column, "text", other)),
        }
    }

    /// A nullable text column.
    pub fn get_opt_str(&self, column: &str) -> Result<Option<&'a str>> {
        match self.get(column)? {
            SqlValue::Null => Ok(None),
            SqlValue::Text(s) => Ok(Some(s)),
            other => Err(decode_error(column, "text", other)),
        }
    }

    /// A non-NULL integer column.
    pub fn get_i64(&self, column: &str) -> Result<i64> {
        match self.get(column)? {
            SqlValue::Int(n) => Ok(*n),
            other => Err(decode_error(column, "int", other)),
        }
    }

    /// A nullable integer column.
    pub fn get_opt_i64(&self, column: &str) -> Result<Option<i64>> {
        match self.get(column)? {
            SqlValue::Null => Ok(None),
            SqlValue::Int(n) => Ok(Some(*n)),
            other => Err(decode_error(column, "int", other)),
        }
    }

    /// A boolean column. Integers are accepted as C-style truth values.
    pub fn get_bool(&self, column: &str) -> Result<bool> {
        match self.get(column)? {
            SqlValue::Bool(b) => Ok(*b),
            SqlValue::Int(n) => Ok(*n != 0),
            other => Err(decode_error(column, "bool", other)),
        }
    }
}

fn decode_error(column: &str, expected: &'static str, found: &SqlValue) -> Error {
    Error::RowDecode {
        column: column.to_string(),
        expected,
        found: found.kind(),
    }
}
