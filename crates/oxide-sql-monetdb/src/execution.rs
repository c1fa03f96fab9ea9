//! Insert-time default resolution for MonetDB.

use oxide_sql_core::compiler::IdentifierPreparer;
use oxide_sql_core::engine::{default_column_default, Connection, ExecutionContext};
use oxide_sql_core::schema::{Column, ColumnDefault, Sequence};
use oxide_sql_core::{Result, SqlValue};

/// Execution context for MonetDB.
///
/// Primary-key defaults are evaluated before the insert: a server default
/// runs as `SELECT <expr>`, and an integer column drawing from a sequence
/// runs `SELECT NEXT VALUE FOR <seq>`. Everything else follows the base
/// behavior.
pub struct MonetExecutionContext<'a> {
    connection: &'a mut dyn Connection,
    preparer: &'a IdentifierPreparer,
}

impl<'a> MonetExecutionContext<'a> {
    /// Creates a context over a connection.
    pub fn new(connection: &'a mut dyn Connection, preparer: &'a IdentifierPreparer) -> Self {
        Self {
            connection,
            preparer,
        }
    }

    fn next_value_sql(&self, sequence: &Sequence) -> String {
        format!(
            "SELECT NEXT VALUE FOR {}",
            self.preparer.format_sequence(sequence)
        )
    }
}

impl ExecutionContext for MonetExecutionContext<'_> {
    fn connection(&mut self) -> &mut dyn Connection {
        &mut *self.connection
    }

    fn preparer(&self) -> &IdentifierPreparer {
        self.preparer
    }

    fn get_column_default(&mut self, column: &Column) -> Result<Option<SqlValue>> {
        if column.primary_key {
            match &column.default {
                Some(ColumnDefault::Server(expr)) => {
                    return self.execute_scalar(&format!("SELECT {expr}")).map(Some);
                }
                Some(ColumnDefault::Sequence(sequence)) if column.type_.is_integer() => {
                    let sql = self.next_value_sql(sequence);
                    return self.execute_scalar(&sql).map(Some);
                }
                _ => {}
            }
        }
        default_column_default(self, column)
    }

    fn fire_sequence(&mut self, sequence: &Sequence) -> Result<SqlValue> {
        let sql = self.next_value_sql(sequence);
        self.execute_scalar(&sql)
    }
}
