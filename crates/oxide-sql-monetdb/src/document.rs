//! JSON schema documents consumed by the `oxide-monetdb ddl` command.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use oxide_sql_core::schema::{Index, Sequence, Table};
use oxide_sql_core::{Error, Result};

/// Sequences, tables and indexes to create or drop together.
///
/// ```json
/// {
///   "sequences": [{"name": "order_seq", "start": 100}],
///   "tables": [{"name": "orders", "columns": [...]}],
///   "indexes": [{"name": "ix_orders_day", "table": "orders", "columns": ["day"]}]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaDocument {
    /// Sequences, created first.
    pub sequences: Vec<Sequence>,
    /// Tables, in dependency order.
    pub tables: Vec<Table>,
    /// Indexes, created last.
    pub indexes: Vec<Index>,
}

impl SchemaDocument {
    /// Parses a document from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::InvalidRequest(format!("invalid schema document: {e}")))
    }

    /// Reads a document from a file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| {
            Error::InvalidRequest(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json(&json)
    }

    /// Whether the document declares nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty() && self.tables.is_empty() && self.indexes.is_empty()
    }
}
