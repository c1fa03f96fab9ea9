//! # oxide-sql-core
//!
//! The database-agnostic layer that SQL dialects plug into.
//!
//! This crate provides:
//! - An expression and statement AST plus abstract column types
//! - Schema elements (tables, columns, constraints, sequences, indexes)
//! - Statement, type and DDL compiler traits whose provided methods are
//!   the base rendering a dialect overrides piecemeal
//! - Connection, driver, reflection and execution-context contracts
//!
//! ## Compiling a statement
//!
//! ```rust
//! use oxide_sql_core::ast::{Expr, SelectStatement, TableRef};
//! use oxide_sql_core::dialect::{Dialect, GenericDialect};
//!
//! let dialect = GenericDialect::new();
//! let select = SelectStatement::new()
//!     .column(Expr::column("id"))
//!     .from(TableRef::table("users"))
//!     .filter(Expr::column("name").eq(Expr::bind("O'Brien")))
//!     .limit(10);
//!
//! let compiled = dialect.compile(&select.into()).unwrap();
//! assert_eq!(compiled.sql, "SELECT id FROM users WHERE name = ? LIMIT ?");
//! assert_eq!(compiled.params.len(), 2);
//! ```
//!
//! ## Generating DDL
//!
//! ```rust
//! use oxide_sql_core::ast::TypeEngine;
//! use oxide_sql_core::compiler::DdlElement;
//! use oxide_sql_core::dialect::{Dialect, GenericDialect};
//! use oxide_sql_core::schema::{Column, Table};
//!
//! let table = Table::new("users")
//!     .column(Column::new("id", TypeEngine::Integer).primary_key())
//!     .column(Column::new("email", TypeEngine::Varchar(Some(255))).not_null());
//!
//! let sql = GenericDialect::new()
//!     .compile_ddl(&DdlElement::CreateTable { table, if_not_exists: false })
//!     .unwrap();
//! assert!(sql.starts_with("CREATE TABLE users ("));
//! ```

pub mod ast;
pub mod compiler;
pub mod dialect;
pub mod engine;
pub mod error;
pub mod schema;
pub mod value;

pub use ast::{Expr, Statement, TypeEngine};
pub use dialect::{Dialect, Paramstyle};
pub use error::{Error, Result};
pub use value::{SqlValue, ToSqlValue};
