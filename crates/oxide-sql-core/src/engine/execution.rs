//! Insert-time default resolution.

use super::Connection;
use crate::compiler::IdentifierPreparer;
use crate::error::{Error, Result};
use crate::schema::{Column, ColumnDefault, Sequence, Table};
use crate::value::SqlValue;

/// Per-statement execution hooks.
///
/// Before an insert runs, the host asks the context for the values of
/// columns the statement leaves out.
pub trait ExecutionContext {
    /// The connection statements run on.
    fn connection(&mut self) -> &mut dyn Connection;

    /// The identifier preparer of the dialect.
    fn preparer(&self) -> &IdentifierPreparer;

    /// Runs `sql` and returns its single value.
    fn execute_scalar(&mut self, sql: &str) -> Result<SqlValue> {
        tracing::debug!(sql, "executing scalar");
        let rows = self.connection().execute(sql, &[])?;
        rows.scalar()
            .cloned()
            .ok_or_else(|| Error::NoResult(sql.to_string()))
    }

    /// Resolves the default of a column the insert leaves out.
    ///
    /// `None` means the server supplies the value.
    fn get_column_default(&mut self, column: &Column) -> Result<Option<SqlValue>> {
        default_column_default(self, column)
    }

    /// Fetches the next value of a sequence.
    fn fire_sequence(&mut self, sequence: &Sequence) -> Result<SqlValue> {
        Err(Error::InvalidRequest(format!(
            "sequence {} cannot be fired by this dialect",
            sequence.name
        )))
    }

    /// Adds a value for every column of `table` missing from `params` that
    /// has a client-side default.
    fn prefetch_insert_defaults(
        &mut self,
        table: &Table,
        params: &mut Vec<(String, SqlValue)>,
    ) -> Result<()> {
        for column in &table.columns {
            if params.iter().any(|(name, _)| *name == column.name) {
                continue;
            }
            if let Some(value) = self.get_column_default(column)? {
                params.push((column.name.clone(), value));
            }
        }
        Ok(())
    }
}

/// Base default resolution: client-side scalars are used as is, sequences
/// are fired, and server defaults are left to the server.
pub fn default_column_default<E: ExecutionContext + ?Sized>(
    ctx: &mut E,
    column: &Column,
) -> Result<Option<SqlValue>> {
    match &column.default {
        Some(ColumnDefault::Value(value)) => Ok(Some(value.clone())),
        Some(ColumnDefault::Sequence(sequence)) => ctx.fire_sequence(sequence).map(Some),
        Some(ColumnDefault::Server(_)) | None => Ok(None),
    }
}

/// Execution context with the base behavior.
pub struct DefaultExecutionContext<'a> {
    connection: &'a mut dyn Connection,
    preparer: &'a IdentifierPreparer,
}

impl<'a> DefaultExecutionContext<'a> {
    /// Creates a context over a connection.
    pub fn new(connection: &'a mut dyn Connection, preparer: &'a IdentifierPreparer) -> Self {
        Self {
            connection,
            preparer,
        }
    }
}

impl ExecutionContext for DefaultExecutionContext<'_> {
    fn connection(&mut self) -> &mut dyn Connection {
        &mut *self.connection
    }

    fn preparer(&self) -> &IdentifierPreparer {
        self.preparer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::TypeEngine;
    use crate::compiler::ANSI_RESERVED_WORDS;
    use crate::dialect::Paramstyle;
    use crate::engine::ResultSet;

    #[derive(Default)]
    struct Recorder {
        executed: Vec<String>,
    }

    impl Connection for Recorder {
        fn execute(&mut self, sql: &str, _params: &[(String, SqlValue)]) -> Result<ResultSet> {
            self.executed.push(sql.to_string());
            Ok(ResultSet::new(
                vec![String::from("v")],
                vec![vec![SqlValue::Int(1)]],
            ))
        }

        fn commit(&mut self) -> Result<()> {
            Ok(())
        }

        fn rollback(&mut self) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_scalar_defaults_are_prefetched() {
        let preparer = IdentifierPreparer::new(ANSI_RESERVED_WORDS, Paramstyle::Qmark);
        let mut conn = Recorder::default();
        let table = Table::new("t")
            .column(Column::new("id", TypeEngine::Integer).primary_key())
            .column(
                Column::new("status", TypeEngine::Varchar(Some(8)))
                    .default(ColumnDefault::Value(SqlValue::Text(String::from("new")))),
            )
            .column(
                Column::new("created", TypeEngine::Timestamp { timezone: false })
                    .default(ColumnDefault::Server(String::from("now()"))),
            );

        let mut params = vec![(String::from("id"), SqlValue::Int(3))];
        {
            let mut ctx = DefaultExecutionContext::new(&mut conn, &preparer);
            ctx.prefetch_insert_defaults(&table, &mut params).unwrap();
        }
        assert_eq!(
            params,
            vec![
                (String::from("id"), SqlValue::Int(3)),
                (String::from("status"), SqlValue::Text(String::from("new"))),
            ]
        );
        assert!(conn.executed.is_empty());
    }

    #[test]
    fn test_base_context_cannot_fire_sequences() {
        let preparer = IdentifierPreparer::new(ANSI_RESERVED_WORDS, Paramstyle::Qmark);
        let mut conn = Recorder::default();
        let mut ctx = DefaultExecutionContext::new(&mut conn, &preparer);
        let column = Column::new("id", TypeEngine::Integer)
            .default(ColumnDefault::Sequence(Sequence::new("s")));
        assert!(matches!(
            ctx.get_column_default(&column),
            Err(Error::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_execute_scalar() {
        let preparer = IdentifierPreparer::new(ANSI_RESERVED_WORDS, Paramstyle::Qmark);
        let mut conn = Recorder::default();
        let mut ctx = DefaultExecutionContext::new(&mut conn, &preparer);
        assert_eq!(ctx.execute_scalar("SELECT 1").unwrap(), SqlValue::Int(1));
    }
}
