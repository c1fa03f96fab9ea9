//! Schema elements: tables, columns, constraints, sequences and indexes.
//!
//! These are the inputs of DDL compilation and of insert-time default
//! handling. All of them deserialize from JSON so tools can load a schema
//! description from disk.

mod constraint;

pub use constraint::{Constraint, ForeignKeyAction};

use serde::{Deserialize, Serialize};

use crate::ast::TypeEngine;
use crate::value::SqlValue;

/// A server-side sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequence {
    /// Sequence name.
    pub name: String,
    /// Owning schema, or the connection's current schema when absent.
    #[serde(default)]
    pub schema: Option<String>,
    /// START WITH value.
    #[serde(default)]
    pub start: Option<i64>,
    /// INCREMENT BY value.
    #[serde(default)]
    pub increment: Option<i64>,
    /// Only used when the backend has no other autoincrement mechanism.
    #[serde(default)]
    pub optional: bool,
}

impl Sequence {
    /// Creates a sequence in the current schema.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema: None,
            start: None,
            increment: None,
            optional: false,
        }
    }

    /// Places the sequence in a schema.
    #[must_use]
    pub fn schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Sets START WITH.
    #[must_use]
    pub fn start(mut self, start: i64) -> Self {
        self.start = Some(start);
        self
    }

    /// Sets INCREMENT BY.
    #[must_use]
    pub fn increment(mut self, increment: i64) -> Self {
        self.increment = Some(increment);
        self
    }

    /// Marks the sequence optional.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

/// Where a column's default value comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ColumnDefault {
    /// A client-side scalar used when the insert omits the column.
    Value(SqlValue),
    /// The next value of a sequence.
    Sequence(Sequence),
    /// A server-evaluated SQL expression (passive default).
    Server(String),
}

/// Autoincrement intent for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutoIncrement {
    /// Autoincrement when the column qualifies.
    #[default]
    Auto,
    /// Always treat as autoincrement, even for narrow integer types.
    Always,
    /// Never autoincrement.
    Never,
}

/// A column-level foreign key reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKeyRef {
    /// Referenced schema.
    #[serde(default)]
    pub schema: Option<String>,
    /// Referenced table.
    pub table: String,
    /// Referenced column.
    pub column: String,
}

/// A table column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Column name.
    pub name: String,
    /// Abstract type.
    #[serde(rename = "type")]
    pub type_: TypeEngine,
    /// Whether NULL is allowed.
    #[serde(default = "default_true")]
    pub nullable: bool,
    /// Whether the column is part of the primary key.
    #[serde(default)]
    pub primary_key: bool,
    /// Default value source.
    #[serde(default)]
    pub default: Option<ColumnDefault>,
    /// Autoincrement intent.
    #[serde(default)]
    pub autoincrement: AutoIncrement,
    /// Foreign key reference.
    #[serde(default)]
    pub foreign_key: Option<ForeignKeyRef>,
}

const fn default_true() -> bool {
    true
}

impl Column {
    /// Creates a nullable column.
    #[must_use]
    pub fn new(name: impl Into<String>, type_: TypeEngine) -> Self {
        Self {
            name: name.into(),
            type_,
            nullable: true,
            primary_key: false,
            default: None,
            autoincrement: AutoIncrement::Auto,
            foreign_key: None,
        }
    }

    /// Marks the column NOT NULL.
    #[must_use]
    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Marks the column as primary key (implies NOT NULL).
    #[must_use]
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.nullable = false;
        self
    }

    /// Sets the default source.
    #[must_use]
    pub fn default(mut self, default: ColumnDefault) -> Self {
        self.default = Some(default);
        self
    }

    /// Sets the autoincrement intent.
    #[must_use]
    pub fn autoincrement(mut self, autoincrement: AutoIncrement) -> Self {
        self.autoincrement = autoincrement;
        self
    }

    /// Adds a foreign key reference.
    #[must_use]
    pub fn references(mut self, table: impl Into<String>, column: impl Into<String>) -> Self {
        self.foreign_key = Some(ForeignKeyRef {
            schema: None,
            table: table.into(),
            column: column.into(),
        });
        self
    }

    /// Returns the sequence this column draws defaults from, if any.
    #[must_use]
    pub fn sequence(&self) -> Option<&Sequence> {
        match &self.default {
            Some(ColumnDefault::Sequence(seq)) => Some(seq),
            _ => None,
        }
    }
}

/// A table definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Table name.
    pub name: String,
    /// Owning schema.
    #[serde(default)]
    pub schema: Option<String>,
    /// Columns in declaration order.
    pub columns: Vec<Column>,
    /// Table-level constraints beyond the column primary key flags.
    #[serde(default)]
    pub constraints: Vec<Constraint>,
    /// Whether the table is temporary.
    #[serde(default)]
    pub temporary: bool,
}

impl Table {
    /// Creates an empty table definition.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema: None,
            columns: Vec::new(),
            constraints: Vec::new(),
            temporary: false,
        }
    }

    /// Places the table in a schema.
    #[must_use]
    pub fn schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Adds a column.
    #[must_use]
    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    /// Adds a table-level constraint.
    #[must_use]
    pub fn constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Marks the table temporary.
    #[must_use]
    pub fn temporary(mut self) -> Self {
        self.temporary = true;
        self
    }

    /// Looks up a column by name.
    #[must_use]
    pub fn get_column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Primary-key columns in declaration order.
    pub fn primary_key_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.primary_key)
    }

    /// The column whose value the database generates on insert.
    ///
    /// Only a single-column integer primary key qualifies. The column must
    /// not reference another table and may only default to a sequence.
    /// Narrow integer types qualify only with [`AutoIncrement::Always`].
    #[must_use]
    pub fn autoincrement_column(&self) -> Option<&Column> {
        let mut pk = self.primary_key_columns();
        let column = pk.next()?;
        if pk.next().is_some() {
            return None;
        }
        let eligible = match column.autoincrement {
            AutoIncrement::Never => false,
            AutoIncrement::Always => column.type_.is_integer(),
            AutoIncrement::Auto => column.type_.is_integer() && !column.type_.is_small_integer(),
        };
        let default_ok = matches!(column.default, None | Some(ColumnDefault::Sequence(_)));
        (eligible && default_ok && column.foreign_key.is_none()).then_some(column)
    }
}

/// An index definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Index {
    /// Index name.
    pub name: String,
    /// Indexed table.
    pub table: String,
    /// Schema of the indexed table.
    #[serde(default)]
    pub schema: Option<String>,
    /// Indexed columns, in order.
    pub columns: Vec<String>,
    /// Whether the index enforces uniqueness.
    #[serde(default)]
    pub unique: bool,
}
