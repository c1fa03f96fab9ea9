//! DDL generation.

use serde::{Deserialize, Serialize};

use super::{IdentifierPreparer, SqlCompiler, TypeCompiler};
use crate::error::Result;
use crate::schema::{Column, ColumnDefault, Constraint, ForeignKeyAction, Index, Sequence, Table};

/// A schema-definition statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DdlElement {
    /// CREATE TABLE.
    CreateTable {
        /// Table definition.
        table: Table,
        /// Skip when the table already exists.
        #[serde(default)]
        if_not_exists: bool,
    },
    /// DROP TABLE.
    DropTable {
        /// Table definition.
        table: Table,
        /// Skip when the table does not exist.
        #[serde(default)]
        if_exists: bool,
    },
    /// CREATE SEQUENCE.
    CreateSequence {
        /// Sequence definition.
        sequence: Sequence,
        /// Skip when the sequence already exists.
        #[serde(default)]
        if_not_exists: bool,
    },
    /// DROP SEQUENCE.
    DropSequence {
        /// Sequence definition.
        sequence: Sequence,
        /// Skip when the sequence does not exist.
        #[serde(default)]
        if_exists: bool,
    },
    /// CREATE INDEX.
    CreateIndex(Index),
    /// DROP INDEX.
    DropIndex(Index),
}

/// Renders schema-definition statements.
pub trait DdlCompiler {
    /// The statement compiler used for literals.
    fn sql_compiler(&self) -> &dyn SqlCompiler;

    /// The identifier preparer.
    fn preparer(&self) -> &IdentifierPreparer {
        self.sql_compiler().preparer()
    }

    /// The type compiler.
    fn type_compiler(&self) -> &dyn TypeCompiler {
        self.sql_compiler().type_compiler()
    }

    /// Renders a DDL element.
    fn compile(&self, element: &DdlElement) -> Result<String> {
        match element {
            DdlElement::CreateTable {
                table,
                if_not_exists,
            } => self.visit_create_table(table, *if_not_exists),
            DdlElement::DropTable { table, if_exists } => self.visit_drop_table(table, *if_exists),
            DdlElement::CreateSequence {
                sequence,
                if_not_exists,
            } => self.visit_create_sequence(sequence, *if_not_exists),
            DdlElement::DropSequence {
                sequence,
                if_exists,
            } => self.visit_drop_sequence(sequence, *if_exists),
            DdlElement::CreateIndex(index) => self.visit_create_index(index),
            DdlElement::DropIndex(index) => self.visit_drop_index(index),
        }
    }

    /// Renders CREATE TABLE.
    fn visit_create_table(&self, table: &Table, if_not_exists: bool) -> Result<String> {
        default_create_table(self, table, if_not_exists)
    }

    /// Renders DROP TABLE.
    fn visit_drop_table(&self, table: &Table, if_exists: bool) -> Result<String> {
        let mut sql = String::from("DROP TABLE ");
        if if_exists {
            sql.push_str("IF EXISTS ");
        }
        sql.push_str(
            &self
                .preparer()
                .format_table(table.schema.as_deref(), &table.name),
        );
        Ok(sql)
    }

    /// Renders CREATE SEQUENCE.
    fn visit_create_sequence(&self, sequence: &Sequence, if_not_exists: bool) -> Result<String> {
        let mut sql = String::from("CREATE SEQUENCE ");
        if if_not_exists {
            sql.push_str("IF NOT EXISTS ");
        }
        sql.push_str(&self.preparer().format_sequence(sequence));
        sql.push_str(&sequence_options(sequence));
        Ok(sql)
    }

    /// Renders DROP SEQUENCE.
    fn visit_drop_sequence(&self, sequence: &Sequence, if_exists: bool) -> Result<String> {
        let mut sql = String::from("DROP SEQUENCE ");
        if if_exists {
            sql.push_str("IF EXISTS ");
        }
        sql.push_str(&self.preparer().format_sequence(sequence));
        Ok(sql)
    }

    /// Renders CREATE INDEX.
    fn visit_create_index(&self, index: &Index) -> Result<String> {
        let preparer = self.preparer();
        let mut sql = String::from("CREATE ");
        if index.unique {
            sql.push_str("UNIQUE ");
        }
        sql.push_str("INDEX ");
        sql.push_str(&preparer.quote(&index.name));
        sql.push_str(" ON ");
        sql.push_str(&preparer.format_table(index.schema.as_deref(), &index.table));
        sql.push_str(&format!(" ({})", quote_list(preparer, &index.columns)));
        Ok(sql)
    }

    /// Renders DROP INDEX.
    fn visit_drop_index(&self, index: &Index) -> Result<String> {
        Ok(format!(
            "DROP INDEX {}",
            self.preparer()
                .format_index(index.schema.as_deref(), &index.name)
        ))
    }

    /// Renders one column of CREATE TABLE.
    fn get_column_specification(&self, _table: &Table, column: &Column) -> Result<String> {
        default_column_specification(self, column)
    }

    /// The DEFAULT clause body for a column, if any.
    fn get_column_default_string(&self, column: &Column) -> Result<Option<String>> {
        match &column.default {
            Some(ColumnDefault::Server(text)) => Ok(Some(text.clone())),
            Some(ColumnDefault::Value(value)) => {
                self.sql_compiler().render_literal_value(value).map(Some)
            }
            Some(ColumnDefault::Sequence(_)) | None => Ok(None),
        }
    }

    /// Renders a table constraint, or `None` to skip it.
    fn visit_constraint(&self, constraint: &Constraint) -> Result<Option<String>> {
        match constraint {
            Constraint::PrimaryKey { name, columns } => {
                self.visit_primary_key_constraint(name.as_deref(), columns)
            }
            Constraint::Unique { name, columns } => {
                self.visit_unique_constraint(name.as_deref(), columns)
            }
            Constraint::ForeignKey { .. } => self.visit_foreign_key_constraint(constraint),
            Constraint::Check { name, sqltext } => {
                self.visit_check_constraint(name.as_deref(), sqltext)
            }
        }
    }

    /// Renders PRIMARY KEY.
    fn visit_primary_key_constraint(
        &self,
        name: Option<&str>,
        columns: &[String],
    ) -> Result<Option<String>> {
        if columns.is_empty() {
            return Ok(None);
        }
        Ok(Some(format!(
            "{}PRIMARY KEY ({})",
            constraint_prefix(self.preparer(), name),
            quote_list(self.preparer(), columns)
        )))
    }

    /// Renders UNIQUE.
    fn visit_unique_constraint(
        &self,
        name: Option<&str>,
        columns: &[String],
    ) -> Result<Option<String>> {
        Ok(Some(format!(
            "{}UNIQUE ({})",
            constraint_prefix(self.preparer(), name),
            quote_list(self.preparer(), columns)
        )))
    }

    /// Renders FOREIGN KEY.
    fn visit_foreign_key_constraint(&self, constraint: &Constraint) -> Result<Option<String>> {
        let Constraint::ForeignKey {
            name,
            columns,
            referred_schema,
            referred_table,
            referred_columns,
            on_delete,
            on_update,
        } = constraint
        else {
            return Ok(None);
        };
        let preparer = self.preparer();
        let mut sql = format!(
            "{}FOREIGN KEY ({}) REFERENCES {} ({})",
            constraint_prefix(preparer, name.as_deref()),
            quote_list(preparer, columns),
            preparer.format_table(referred_schema.as_deref(), referred_table),
            quote_list(preparer, referred_columns)
        );
        push_action(&mut sql, " ON DELETE ", *on_delete);
        push_action(&mut sql, " ON UPDATE ", *on_update);
        Ok(Some(sql))
    }

    /// Renders CHECK.
    fn visit_check_constraint(&self, name: Option<&str>, sqltext: &str) -> Result<Option<String>> {
        Ok(Some(format!(
            "{}CHECK ({sqltext})",
            constraint_prefix(self.preparer(), name)
        )))
    }
}

fn push_action(sql: &mut String, clause: &str, action: Option<ForeignKeyAction>) {
    if let Some(action) = action {
        sql.push_str(clause);
        sql.push_str(action.as_sql());
    }
}

fn constraint_prefix(preparer: &IdentifierPreparer, name: Option<&str>) -> String {
    name.map_or_else(String::new, |n| {
        format!("CONSTRAINT {} ", preparer.quote(n))
    })
}

/// Quotes and comma-joins identifiers.
#[must_use]
pub fn quote_list(preparer: &IdentifierPreparer, names: &[String]) -> String {
    names
        .iter()
        .map(|n| preparer.quote(n))
        .collect::<Vec<_>>()
        .join(", ")
}

/// The optional `START WITH` / `INCREMENT BY` tail of CREATE SEQUENCE.
#[must_use]
pub fn sequence_options(sequence: &Sequence) -> String {
    let mut sql = String::new();
    if let Some(start) = sequence.start {
        sql.push_str(&format!(" START WITH {start}"));
    }
    if let Some(increment) = sequence.increment {
        sql.push_str(&format!(" INCREMENT BY {increment}"));
    }
    sql
}

/// Base column rendering: name, type, default clause, NOT NULL.
pub fn default_column_specification<D: DdlCompiler + ?Sized>(
    ddl: &D,
    column: &Column,
) -> Result<String> {
    let mut sql = format!(
        "{} {}",
        ddl.preparer().quote(&column.name),
        ddl.type_compiler().process(&column.type_)?
    );
    if let Some(default) = ddl.get_column_default_string(column)? {
        sql.push_str(" DEFAULT ");
        sql.push_str(&default);
    }
    if !column.nullable {
        sql.push_str(" NOT NULL");
    }
    Ok(sql)
}

/// Base CREATE TABLE rendering.
///
/// Columns come first, then a primary key built from the column flags
/// unless the table declares one explicitly, then column-level foreign
/// keys, then the table constraints. Constraints whose visitor returns
/// `None` are left out.
pub fn default_create_table<D: DdlCompiler + ?Sized>(
    ddl: &D,
    table: &Table,
    if_not_exists: bool,
) -> Result<String> {
    let preparer = ddl.preparer();
    let mut sql = String::from("CREATE ");
    if table.temporary {
        sql.push_str("TEMPORARY ");
    }
    sql.push_str("TABLE ");
    if if_not_exists {
        sql.push_str("IF NOT EXISTS ");
    }
    sql.push_str(&preparer.format_table(table.schema.as_deref(), &table.name));
    sql.push_str(" (\n");

    let mut lines = Vec::with_capacity(table.columns.len() + table.constraints.len() + 1);
    for column in &table.columns {
        lines.push(ddl.get_column_specification(table, column)?);
    }

    let explicit_pk = table
        .constraints
        .iter()
        .any(|c| matches!(c, Constraint::PrimaryKey { .. }));
    if !explicit_pk {
        let pk: Vec<String> = table.primary_key_columns().map(|c| c.name.clone()).collect();
        if let Some(line) = ddl.visit_primary_key_constraint(None, &pk)? {
            lines.push(line);
        }
    }

    for column in &table.columns {
        if let Some(fk) = &column.foreign_key {
            let constraint = Constraint::ForeignKey {
                name: None,
                columns: vec![column.name.clone()],
                referred_schema: fk.schema.clone(),
                referred_table: fk.table.clone(),
                referred_columns: vec![fk.column.clone()],
                on_delete: None,
                on_update: None,
            };
            if let Some(line) = ddl.visit_foreign_key_constraint(&constraint)? {
                lines.push(line);
            }
        }
    }

    for constraint in &table.constraints {
        if let Some(line) = ddl.visit_constraint(constraint)? {
            lines.push(line);
        }
    }

    let body: Vec<String> = lines.into_iter().map(|l| format!("    {l}")).collect();
    sql.push_str(&body.join(",\n"));
    sql.push_str("\n)");
    Ok(sql)
}

/// The base DDL compiler.
#[derive(Debug, Clone)]
pub struct GenericDdlCompiler<C> {
    compiler: C,
}

impl<C: SqlCompiler> GenericDdlCompiler<C> {
    /// Wraps a statement compiler.
    #[must_use]
    pub const fn new(compiler: C) -> Self {
        Self { compiler }
    }
}

impl<C: SqlCompiler> DdlCompiler for GenericDdlCompiler<C> {
    fn sql_compiler(&self) -> &dyn SqlCompiler {
        &self.compiler
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::TypeEngine;
    use crate::compiler::GenericCompiler;
    use crate::value::SqlValue;

    fn ddl() -> GenericDdlCompiler<GenericCompiler> {
        GenericDdlCompiler::new(GenericCompiler::default())
    }

    #[test]
    fn test_create_table() {
        let table = Table::new("users")
            .column(Column::new("id", TypeEngine::Integer).primary_key())
            .column(
                Column::new("status", TypeEngine::Varchar(Some(10)))
                    .not_null()
                    .default(ColumnDefault::Value(SqlValue::Text(String::from("new")))),
            )
            .column(Column::new("team_id", TypeEngine::Integer).references("teams", "id"))
            .constraint(Constraint::Check {
                name: Some(String::from("status_ok")),
                sqltext: String::from("status <> ''"),
            });
        let sql = ddl()
            .compile(&DdlElement::CreateTable {
                table,
                if_not_exists: false,
            })
            .unwrap();
        assert_eq!(
            sql,
            "CREATE TABLE users (\n    id INTEGER NOT NULL,\n    status VARCHAR(10) DEFAULT 'new' NOT NULL,\n    team_id INTEGER,\n    PRIMARY KEY (id),\n    FOREIGN KEY (team_id) REFERENCES teams (id),\n    CONSTRAINT status_ok CHECK (status <> '')\n)"
        );
    }

    #[test]
    fn test_temporary_table_and_explicit_pk() {
        let table = Table::new("Scratch")
            .temporary()
            .column(Column::new("a", TypeEngine::Integer).primary_key())
            .column(Column::new("b", TypeEngine::Integer).primary_key())
            .constraint(Constraint::PrimaryKey {
                name: Some(String::from("pk_scratch")),
                columns: vec![String::from("b"), String::from("a")],
            });
        let sql = ddl().visit_create_table(&table, true).unwrap();
        assert!(sql.starts_with("CREATE TEMPORARY TABLE IF NOT EXISTS \"Scratch\" (\n"));
        assert!(sql.contains("    CONSTRAINT pk_scratch PRIMARY KEY (b, a)\n)"));
        assert_eq!(sql.matches("PRIMARY KEY").count(), 1);
    }

    #[test]
    fn test_sequences() {
        let seq = Sequence::new("s").start(5).increment(2);
        assert_eq!(
            ddl().visit_create_sequence(&seq, false).unwrap(),
            "CREATE SEQUENCE s START WITH 5 INCREMENT BY 2"
        );
        assert_eq!(
            ddl().visit_create_sequence(&Sequence::new("s"), true).unwrap(),
            "CREATE SEQUENCE IF NOT EXISTS s"
        );
        assert_eq!(
            ddl().visit_drop_sequence(&seq, true).unwrap(),
            "DROP SEQUENCE IF EXISTS s"
        );
    }

    #[test]
    fn test_indexes() {
        let index = Index {
            name: String::from("ix_users_email"),
            table: String::from("users"),
            schema: Some(String::from("app")),
            columns: vec![String::from("email")],
            unique: true,
        };
        assert_eq!(
            ddl().visit_create_index(&index).unwrap(),
            "CREATE UNIQUE INDEX ix_users_email ON app.users (email)"
        );
        assert_eq!(
            ddl().visit_drop_index(&index).unwrap(),
            "DROP INDEX app.ix_users_email"
        );
    }

    #[test]
    fn test_foreign_key_actions() {
        let fk = Constraint::ForeignKey {
            name: Some(String::from("fk_owner")),
            columns: vec![String::from("owner_id")],
            referred_schema: None,
            referred_table: String::from("users"),
            referred_columns: vec![String::from("id")],
            on_delete: Some(ForeignKeyAction::Cascade),
            on_update: None,
        };
        assert_eq!(
            ddl().visit_constraint(&fk).unwrap().unwrap(),
            "CONSTRAINT fk_owner FOREIGN KEY (owner_id) REFERENCES users (id) ON DELETE CASCADE"
        );
    }

    #[test]
    fn test_element_from_json() {
        let element: DdlElement = serde_json::from_str(
            r#"{"op": "drop_sequence", "sequence": {"name": "s"}, "if_exists": true}"#,
        )
        .unwrap();
        assert!(matches!(element, DdlElement::DropSequence { if_exists: true, .. }));
    }
}
