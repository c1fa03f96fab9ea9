//! Table-level constraints.

use serde::{Deserialize, Serialize};

/// Foreign key referential action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForeignKeyAction {
    /// No action.
    NoAction,
    /// Restrict deletion/update.
    Restrict,
    /// Cascade the operation.
    Cascade,
    /// Set to NULL.
    SetNull,
    /// Set to default value.
    SetDefault,
}

impl ForeignKeyAction {
    /// Returns the SQL representation of the action.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::NoAction => "NO ACTION",
            Self::Restrict => "RESTRICT",
            Self::Cascade => "CASCADE",
            Self::SetNull => "SET NULL",
            Self::SetDefault => "SET DEFAULT",
        }
    }
}

/// Table-level constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Constraint {
    /// Primary key on the listed columns.
    PrimaryKey {
        /// Optional constraint name.
        #[serde(default)]
        name: Option<String>,
        /// Column names.
        columns: Vec<String>,
    },
    /// Unique constraint on the listed columns.
    Unique {
        /// Optional constraint name.
        #[serde(default)]
        name: Option<String>,
        /// Column names.
        columns: Vec<String>,
    },
    /// Foreign key constraint.
    ForeignKey {
        /// Optional constraint name.
        #[serde(default)]
        name: Option<String>,
        /// Columns in this table.
        columns: Vec<String>,
        /// Referenced schema.
        #[serde(default)]
        referred_schema: Option<String>,
        /// Referenced table.
        referred_table: String,
        /// Referenced columns.
        referred_columns: Vec<String>,
        /// ON DELETE action.
        #[serde(default)]
        on_delete: Option<ForeignKeyAction>,
        /// ON UPDATE action.
        #[serde(default)]
        on_update: Option<ForeignKeyAction>,
    },
    /// CHECK constraint.
    Check {
        /// Optional constraint name.
        #[serde(default)]
        name: Option<String>,
        /// Boolean SQL expression.
        sqltext: String,
    },
}

impl Constraint {
    /// Returns the constraint name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::PrimaryKey { name, .. }
            | Self::Unique { name, .. }
            | Self::ForeignKey { name, .. }
            | Self::Check { name, .. } => name.as_deref(),
        }
    }
}
