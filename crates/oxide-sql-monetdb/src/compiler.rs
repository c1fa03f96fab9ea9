//! MonetDB statement and type compilers.

use oxide_sql_core::ast::{BinaryOp, Expr, Join, SelectStatement};
use oxide_sql_core::compiler::{
    default_render_literal, default_type_sql, process_operand, render_join, CompileState,
    IdentifierPreparer, Operand, OperatorTable, SqlCompiler, TypeCompiler,
};
use oxide_sql_core::schema::Sequence;
use oxide_sql_core::{Result, SqlValue, TypeEngine};

/// Statement compiler for MonetDB.
///
/// Differences from the base compiler:
/// - `!=` is spelled `<>`.
/// - Modulo is `%%` whenever the paramstyle uses `%` placeholders.
/// - A sequence used as a value becomes `(SELECT NEXT VALUE FOR seq)`.
/// - LIMIT and OFFSET are inlined; MonetDB cannot bind them.
/// - Joins are `JOIN`, `LEFT OUTER JOIN` or `FULL OUTER JOIN`.
/// - Backslashes in inline literals are doubled.
#[derive(Debug, Clone)]
pub struct MonetCompiler {
    preparer: IdentifierPreparer,
    operators: OperatorTable,
    types: MonetTypeCompiler,
}

impl MonetCompiler {
    /// Creates a compiler around a MonetDB preparer.
    #[must_use]
    pub fn new(preparer: IdentifierPreparer) -> Self {
        Self {
            preparer,
            operators: OperatorTable::new().with_override(BinaryOp::NotEq, "<>"),
            types: MonetTypeCompiler,
        }
    }
}

impl SqlCompiler for MonetCompiler {
    fn preparer(&self) -> &IdentifierPreparer {
        &self.preparer
    }

    fn operators(&self) -> &OperatorTable {
        &self.operators
    }

    fn type_compiler(&self) -> &dyn TypeCompiler {
        &self.types
    }

    fn visit_mod(&self, left: &Expr, right: &Expr, state: &mut CompileState) -> Result<String> {
        let l = process_operand(self, left, BinaryOp::Mod, Operand::Left, state)?;
        let r = process_operand(self, right, BinaryOp::Mod, Operand::Right, state)?;
        let op = if self.paramstyle().escapes_percent() {
            "%%"
        } else {
            "%"
        };
        Ok(format!("{l} {op} {r}"))
    }

    fn visit_sequence(&self, sequence: &Sequence) -> Result<String> {
        Ok(format!(
            "(SELECT NEXT VALUE FOR {})",
            self.preparer.format_sequence(sequence)
        ))
    }

    fn visit_join(&self, join: &Join, state: &mut CompileState) -> Result<String> {
        let keyword = match (join.is_outer, join.full) {
            (true, true) => "FULL OUTER JOIN",
            (true, false) => "LEFT OUTER JOIN",
            (false, _) => "JOIN",
        };
        render_join(self, join, keyword, state)
    }

    fn limit_clause(&self, select: &SelectStatement, _state: &mut CompileState) -> Result<String> {
        let mut sql = String::new();
        if let Some(limit) = select.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }
        if let Some(offset) = select.offset {
            sql.push_str(&format!(" OFFSET {offset}"));
        }
        Ok(sql)
    }

    fn render_literal_value(&self, value: &SqlValue) -> Result<String> {
        Ok(default_render_literal(&self.preparer, value)?.replace('\\', "\\\\"))
    }
}

/// Type compiler for MonetDB.
#[derive(Debug, Default, Clone, Copy)]
pub struct MonetTypeCompiler;

impl TypeCompiler for MonetTypeCompiler {
    fn process(&self, type_: &TypeEngine) -> Result<String> {
        let sql = match type_ {
            TypeEngine::DoublePrecision => "DOUBLE PRECISION",
            TypeEngine::Inet => "INET",
            TypeEngine::Url => "URL",
            TypeEngine::Wrd => "WRD",
            TypeEngine::TinyInteger => "TINYINT",
            TypeEngine::DateTime | TypeEngine::Timestamp { timezone: false } => "TIMESTAMP",
            TypeEngine::Timestamp { timezone: true } => "TIMESTAMP WITH TIME ZONE",
            TypeEngine::Varchar(None) | TypeEngine::Text => "CLOB",
            other => return default_type_sql(other),
        };
        Ok(sql.to_string())
    }
}
