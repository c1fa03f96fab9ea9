//! SQL Dialect support.
//!
//! A dialect bundles the pieces a host needs to talk to one database: the
//! identifier preparer, the statement and DDL compilers, the parameter
//! style of its driver, and a set of capability flags.

mod generic;

pub use generic::GenericDialect;

use serde::{Deserialize, Serialize};

use crate::compiler::{CompiledSql, DdlCompiler, DdlElement, IdentifierPreparer, SqlCompiler};
use crate::ast::Statement;
use crate::engine::Connection;
use crate::error::Result;

/// Placeholder syntax expected by a driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Paramstyle {
    /// `?`
    #[default]
    Qmark,
    /// `:1`, `:2`, ...
    Numeric,
    /// `:name`
    Named,
    /// `%s`
    Format,
    /// `%(name)s`
    Pyformat,
}

impl Paramstyle {
    /// Renders the placeholder for a parameter.
    ///
    /// `position` is 1-based and only used by the numeric style.
    #[must_use]
    pub fn placeholder(self, name: &str, position: usize) -> String {
        match self {
            Self::Qmark => String::from("?"),
            Self::Numeric => format!(":{position}"),
            Self::Named => format!(":{name}"),
            Self::Format => String::from("%s"),
            Self::Pyformat => format!("%({name})s"),
        }
    }

    /// Whether a literal `%` in statement text must be written as `%%`.
    #[must_use]
    pub const fn escapes_percent(self) -> bool {
        matches!(self, Self::Format | Self::Pyformat)
    }

    /// Parses the conventional lowercase name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "qmark" => Some(Self::Qmark),
            "numeric" => Some(Self::Numeric),
            "named" => Some(Self::Named),
            "format" => Some(Self::Format),
            "pyformat" => Some(Self::Pyformat),
            _ => None,
        }
    }
}

/// Connection pooling policy a dialect asks its host to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PoolClass {
    /// A shared pool of interchangeable connections.
    #[default]
    Queue,
    /// One connection per thread; the driver cannot share a connection
    /// across threads.
    SingletonThread,
    /// No pooling.
    Null,
}

/// Trait for SQL dialect-specific behavior.
pub trait Dialect {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Returns the name of the driver the dialect talks through.
    fn driver(&self) -> &'static str {
        self.name()
    }

    /// Returns the parameter placeholder style.
    fn paramstyle(&self) -> Paramstyle {
        Paramstyle::Qmark
    }

    /// Returns the identifier preparer.
    fn identifier_preparer(&self) -> &IdentifierPreparer;

    /// Returns the statement compiler.
    fn statement_compiler(&self) -> &dyn SqlCompiler;

    /// Returns the DDL compiler.
    fn ddl_compiler(&self) -> &dyn DdlCompiler;

    /// Compiles a statement to SQL text and parameters.
    fn compile(&self, statement: &Statement) -> Result<CompiledSql> {
        self.statement_compiler().compile(statement)
    }

    /// Compiles a DDL element to SQL text.
    fn compile_ddl(&self, element: &DdlElement) -> Result<String> {
        self.ddl_compiler().compile(element)
    }

    /// Quotes an identifier if necessary.
    fn quote_identifier(&self, name: &str) -> String {
        self.identifier_preparer().quote(name)
    }

    /// Whether sequences exist as schema objects.
    fn supports_sequences(&self) -> bool {
        false
    }

    /// Whether sequences are only needed where nothing else generates keys.
    fn sequences_optional(&self) -> bool {
        false
    }

    /// Whether primary-key sequence values are fetched before the insert.
    fn preexecute_pk_sequences(&self) -> bool {
        false
    }

    /// Whether integer primary keys can autoincrement.
    fn supports_pk_autoincrement(&self) -> bool {
        true
    }

    /// Whether DECIMAL values round-trip without loss.
    fn supports_native_decimal(&self) -> bool {
        false
    }

    /// Whether BOOLEAN is a native type.
    fn supports_native_boolean(&self) -> bool {
        false
    }

    /// Whether `INSERT ... DEFAULT VALUES` is accepted.
    fn supports_default_values(&self) -> bool {
        false
    }

    /// Pooling policy for connections of this dialect.
    fn pool_class(&self) -> PoolClass {
        PoolClass::Queue
    }

    /// Commits the connection's transaction.
    fn do_commit(&self, connection: &mut dyn Connection) -> Result<()> {
        connection.commit()
    }

    /// Rolls back the connection's transaction.
    fn do_rollback(&self, connection: &mut dyn Connection) -> Result<()> {
        connection.rollback()
    }
}
