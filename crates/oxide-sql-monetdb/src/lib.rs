//! # oxide-sql-monetdb
//!
//! MonetDB dialect for `oxide-sql-core`.
//!
//! # How MonetDB differs from other dialects
//!
//! - **[LIMIT and OFFSET]**: MonetDB does not accept bound parameters
//!   for `LIMIT`/`OFFSET`, so both are inlined as integer literals.
//! - **Inequality** is always spelled `<>`.
//! - **[Sequences]**: `NEXT VALUE FOR seq` is only valid as a scalar
//!   subquery inside expressions, so sequences compile to
//!   `(SELECT NEXT VALUE FOR seq)`. Sequences are created `AS INTEGER`.
//! - **[AUTO_INCREMENT]**: an integer primary key is declared
//!   `INT AUTO_INCREMENT`; MonetDB backs it with a sequence whose
//!   `next value for "schema"."seq"` expression becomes the column
//!   default, which is how reflection recognizes autoincrement columns.
//! - **Types**: `CLOB` for unbounded text, `DOUBLE PRECISION`, and the
//!   MonetDB-specific `INET`, `URL`, `WRD` and `TINYINT`.
//! - **No `CHECK` constraints**: they are skipped with a warning.
//! - **Catalog**: reflection queries the `sys` schema (`sys.schemas`,
//!   `sys.tables`, `sys.columns`, `sys.keys`, `sys.objects`, `sys.idxs`,
//!   `sys.sequences`).
//!
//! [LIMIT and OFFSET]: https://www.monetdb.org/documentation/user-guide/sql-manual/data-manipulation/table-expressions/
//! [Sequences]: https://www.monetdb.org/documentation/user-guide/sql-manual/data-definition/sequence-definition/
//! [AUTO_INCREMENT]: https://www.monetdb.org/documentation/user-guide/sql-manual/data-types/serial-types/
//!
//! ## Example
//!
//! ```rust
//! use oxide_sql_core::ast::{Expr, SelectStatement, TableRef};
//! use oxide_sql_core::Dialect;
//! use oxide_sql_monetdb::MonetDialect;
//!
//! let dialect = MonetDialect::new();
//! let select = SelectStatement::new()
//!     .column(Expr::column("email"))
//!     .from(TableRef::table("users"))
//!     .filter(Expr::column("status").not_eq(Expr::bind("banned")))
//!     .limit(5)
//!     .offset(10);
//!
//! let compiled = dialect.compile(&select.into()).unwrap();
//! assert_eq!(
//!     compiled.sql,
//!     "SELECT email FROM users WHERE status <> %(param_1)s LIMIT 5 OFFSET 10"
//! );
//! ```

pub mod compiler;
pub mod ddl;
pub mod dialect;
pub mod document;
pub mod execution;
pub mod options;
pub mod preparer;
mod reflection;
pub mod types;

pub use compiler::{MonetCompiler, MonetTypeCompiler};
pub use ddl::MonetDdlCompiler;
pub use dialect::MonetDialect;
pub use document::SchemaDocument;
pub use execution::MonetExecutionContext;
pub use options::{DialectOptions, DriverKind, UnknownTypePolicy};
pub use preparer::{monet_preparer, RESERVED_WORDS};
pub use types::MONETDB_TYPE_NAMES;
