//! MonetDB DDL compiler.

use oxide_sql_core::compiler::{
    default_column_specification, default_create_table, sequence_options, DdlCompiler,
    SqlCompiler,
};
use oxide_sql_core::schema::{Column, ColumnDefault, Sequence, Table};
use oxide_sql_core::{Result, TypeEngine};
use tracing::warn;

use crate::compiler::MonetCompiler;

/// DDL compiler for MonetDB.
///
/// MonetDB has no `IF [NOT] EXISTS` on the statements rendered here, so the
/// guard flags of a [`DdlElement`](oxide_sql_core::compiler::DdlElement) are
/// not rendered; [`MonetDialect::execute_ddl`](crate::MonetDialect::execute_ddl)
/// checks the catalog instead.
#[derive(Debug, Clone)]
pub struct MonetDdlCompiler {
    compiler: MonetCompiler,
}

impl MonetDdlCompiler {
    /// Wraps a statement compiler.
    #[must_use]
    pub const fn new(compiler: MonetCompiler) -> Self {
        Self { compiler }
    }
}

/// Whether `column` is rendered as an `AUTO_INCREMENT` column of `table`.
fn renders_auto_increment(table: &Table, column: &Column) -> bool {
    let is_auto = table
        .autoincrement_column()
        .is_some_and(|c| c.name == column.name);
    let default_ok = match &column.default {
        None => true,
        Some(ColumnDefault::Sequence(seq)) => seq.optional,
        Some(_) => false,
    };
    is_auto && !column.type_.is_small_integer() && default_ok
}

impl DdlCompiler for MonetDdlCompiler {
    fn sql_compiler(&self) -> &dyn SqlCompiler {
        &self.compiler
    }

    fn visit_create_table(&self, table: &Table, _if_not_exists: bool) -> Result<String> {
        default_create_table(self, table, false)
    }

    fn visit_drop_table(&self, table: &Table, _if_exists: bool) -> Result<String> {
        Ok(format!(
            "DROP TABLE {}",
            self.preparer()
                .format_table(table.schema.as_deref(), &table.name)
        ))
    }

    fn visit_create_sequence(&self, sequence: &Sequence, _if_not_exists: bool) -> Result<String> {
        Ok(format!(
            "CREATE SEQUENCE {} AS INTEGER{}",
            self.preparer().format_sequence(sequence),
            sequence_options(sequence)
        ))
    }

    fn visit_drop_sequence(&self, sequence: &Sequence, _if_exists: bool) -> Result<String> {
        Ok(format!(
            "DROP SEQUENCE {}",
            self.preparer().format_sequence(sequence)
        ))
    }

    fn get_column_specification(&self, table: &Table, column: &Column) -> Result<String> {
        if !renders_auto_increment(table, column) {
            return default_column_specification(self, column);
        }
        let int = if column.type_ == TypeEngine::BigInteger {
            "BIGINT"
        } else {
            "INT"
        };
        let mut sql = format!("{} {int} AUTO_INCREMENT", self.preparer().quote(&column.name));
        if !column.nullable {
            sql.push_str(" NOT NULL");
        }
        Ok(sql)
    }

    fn visit_check_constraint(&self, name: Option<&str>, _sqltext: &str) -> Result<Option<String>> {
        warn!(
            constraint = name.unwrap_or("<unnamed>"),
            "Skipped unsupported check constraint"
        );
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preparer::monet_preparer;
    use oxide_sql_core::schema::AutoIncrement;
    use oxide_sql_core::Paramstyle;

    fn ddl() -> MonetDdlCompiler {
        MonetDdlCompiler::new(MonetCompiler::new(monet_preparer(Paramstyle::Pyformat, false)))
    }

    #[test]
    fn test_sequence_statements() {
        let seq = Sequence::new("order_seq").start(100).increment(5);
        assert_eq!(
            ddl().visit_create_sequence(&seq, true).unwrap(),
            "CREATE SEQUENCE order_seq AS INTEGER START WITH 100 INCREMENT BY 5"
        );
        assert_eq!(
            ddl().visit_create_sequence(&Sequence::new("s").increment(2), false).unwrap(),
            "CREATE SEQUENCE s AS INTEGER INCREMENT BY 2"
        );
        assert_eq!(
            ddl().visit_drop_sequence(&seq, true).unwrap(),
            "DROP SEQUENCE order_seq"
        );
    }

    #[test]
    fn test_small_integer_pk_is_not_auto_increment() {
        let table = Table::new("t").column(
            Column::new("id", TypeEngine::SmallInteger)
                .primary_key()
                .autoincrement(AutoIncrement::Always),
        );
        let spec = ddl()
            .get_column_specification(&table, &table.columns[0])
            .unwrap();
        assert_eq!(spec, "id SMALLINT NOT NULL");
    }

    #[test]
    fn test_required_sequence_default_keeps_plain_type() {
        let table = Table::new("t").column(
            Column::new("id", TypeEngine::Integer)
                .primary_key()
                .default(ColumnDefault::Sequence(Sequence::new("t_seq"))),
        );
        let spec = ddl()
            .get_column_specification(&table, &table.columns[0])
            .unwrap();
        assert_eq!(spec, "id INTEGER NOT NULL");
    }
}
