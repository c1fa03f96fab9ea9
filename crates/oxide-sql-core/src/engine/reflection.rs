//! Catalog reflection.
//!
//! A [`Reflector`] answers structural questions about a live database by
//! querying its catalog. Each call is independent; the only state is an
//! [`InfoCache`] that memoizes name-to-id lookups for one reflection pass.
//! [`Inspector`] bundles a reflector, a connection and a cache.

use std::collections::HashMap;

use serde::Serialize;

use super::Connection;
use crate::ast::TypeEngine;
use crate::error::Result;
use crate::schema::Sequence;

/// A reflected column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReflectedColumn {
    /// Column name.
    pub name: String,
    /// Resolved abstract type.
    #[serde(rename = "type")]
    pub type_: TypeEngine,
    /// Default expression text as stored in the catalog.
    pub default: Option<String>,
    /// Whether NULL is allowed.
    pub nullable: bool,
    /// Whether the column draws its values from a sequence.
    pub autoincrement: bool,
    /// The sequence named by the default expression, if any.
    pub sequence: Option<Sequence>,
}

/// A reflected foreign key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReflectedForeignKey {
    /// Constraint name.
    pub name: Option<String>,
    /// Columns of the reflected table.
    pub constrained_columns: Vec<String>,
    /// Schema of the referred table.
    pub referred_schema: Option<String>,
    /// Referred table.
    pub referred_table: String,
    /// Referred columns, paired with `constrained_columns`.
    pub referred_columns: Vec<String>,
}

/// A reflected index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReflectedIndex {
    /// Index name.
    pub name: String,
    /// Indexed columns, in order.
    pub column_names: Vec<String>,
    /// Whether the index is unique.
    pub unique: bool,
}

/// A reflected primary key. Empty when the table has none.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReflectedPrimaryKey {
    /// Constraint name.
    pub name: Option<String>,
    /// Key columns.
    pub constrained_columns: Vec<String>,
}

impl ReflectedPrimaryKey {
    /// Returns whether the table has no primary key.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.constrained_columns.is_empty()
    }
}

/// A reflected unique constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReflectedUniqueConstraint {
    /// Constraint name.
    pub name: String,
    /// Constrained columns, in order.
    pub column_names: Vec<String>,
}

/// Everything known about one table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReflectedTable {
    /// Schema the table was looked up in.
    pub schema: Option<String>,
    /// Table name.
    pub name: String,
    /// Columns in catalog order.
    pub columns: Vec<ReflectedColumn>,
    /// Primary key.
    pub primary_key: ReflectedPrimaryKey,
    /// Foreign keys.
    pub foreign_keys: Vec<ReflectedForeignKey>,
    /// Indexes.
    pub indexes: Vec<ReflectedIndex>,
    /// Unique constraints.
    pub unique_constraints: Vec<ReflectedUniqueConstraint>,
}

/// Memoized catalog lookups for one reflection pass.
///
/// Keys are the arguments the lookup was called with, so `None` (the
/// current schema) and an explicit schema name are cached separately.
#[derive(Debug, Default, Clone)]
pub struct InfoCache {
    default_schema: Option<String>,
    schema_names: Option<Vec<String>>,
    schema_ids: HashMap<Option<String>, i64>,
    table_ids: HashMap<(Option<String>, String), i64>,
}

impl InfoCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached current schema name.
    #[must_use]
    pub fn default_schema(&self) -> Option<&str> {
        self.default_schema.as_deref()
    }

    /// Remembers the current schema name.
    pub fn set_default_schema(&mut self, name: impl Into<String>) {
        self.default_schema = Some(name.into());
    }

    /// Cached schema names.
    #[must_use]
    pub fn schema_names(&self) -> Option<&[String]> {
        self.schema_names.as_deref()
    }

    /// Remembers the schema names.
    pub fn set_schema_names(&mut self, names: Vec<String>) {
        self.schema_names = Some(names);
    }

    /// Cached id of `schema`.
    #[must_use]
    pub fn schema_id(&self, schema: Option<&str>) -> Option<i64> {
        self.schema_ids.get(&schema.map(str::to_string)).copied()
    }

    /// Remembers the id of `schema`.
    pub fn insert_schema_id(&mut self, schema: Option<&str>, id: i64) {
        self.schema_ids.insert(schema.map(str::to_string), id);
    }

    /// Cached id of `schema.table`.
    #[must_use]
    pub fn table_id(&self, schema: Option<&str>, table: &str) -> Option<i64> {
        self.table_ids
            .get(&(schema.map(str::to_string), table.to_string()))
            .copied()
    }

    /// Remembers the id of `schema.table`.
    pub fn insert_table_id(&mut self, schema: Option<&str>, table: &str, id: i64) {
        self.table_ids
            .insert((schema.map(str::to_string), table.to_string()), id);
    }

    /// Forgets everything.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Catalog reflection operations of a dialect.
///
/// `schema` is `None` for the connection's current schema. Names that do
/// not resolve fail with a not-found error; no operation returns an empty
/// result for a missing schema or table.
pub trait Reflector {
    /// The connection's current schema.
    fn get_default_schema_name(
        &self,
        conn: &mut dyn Connection,
        cache: &mut InfoCache,
    ) -> Result<String>;

    /// All schema names.
    fn get_schema_names(
        &self,
        conn: &mut dyn Connection,
        cache: &mut InfoCache,
    ) -> Result<Vec<String>>;

    /// User tables in `schema`.
    fn get_table_names(
        &self,
        conn: &mut dyn Connection,
        cache: &mut InfoCache,
        schema: Option<&str>,
    ) -> Result<Vec<String>>;

    /// Views in `schema`.
    fn get_view_names(
        &self,
        conn: &mut dyn Connection,
        cache: &mut InfoCache,
        schema: Option<&str>,
    ) -> Result<Vec<String>>;

    /// The defining query of a view, or `None` when no such view exists.
    fn get_view_definition(
        &self,
        conn: &mut dyn Connection,
        cache: &mut InfoCache,
        view: &str,
        schema: Option<&str>,
    ) -> Result<Option<String>>;

    /// Columns of a table, in catalog order.
    fn get_columns(
        &self,
        conn: &mut dyn Connection,
        cache: &mut InfoCache,
        table: &str,
        schema: Option<&str>,
    ) -> Result<Vec<ReflectedColumn>>;

    /// Primary key of a table.
    fn get_pk_constraint(
        &self,
        conn: &mut dyn Connection,
        cache: &mut InfoCache,
        table: &str,
        schema: Option<&str>,
    ) -> Result<ReflectedPrimaryKey>;

    /// Foreign keys of a table.
    fn get_foreign_keys(
        &self,
        conn: &mut dyn Connection,
        cache: &mut InfoCache,
        table: &str,
        schema: Option<&str>,
    ) -> Result<Vec<ReflectedForeignKey>>;

    /// Indexes of a table.
    fn get_indexes(
        &self,
        conn: &mut dyn Connection,
        cache: &mut InfoCache,
        table: &str,
        schema: Option<&str>,
    ) -> Result<Vec<ReflectedIndex>>;

    /// Unique constraints of a table.
    fn get_unique_constraints(
        &self,
        conn: &mut dyn Connection,
        cache: &mut InfoCache,
        table: &str,
        schema: Option<&str>,
    ) -> Result<Vec<ReflectedUniqueConstraint>>;

    /// Whether `table` is among the tables of `schema`.
    fn has_table(
        &self,
        conn: &mut dyn Connection,
        cache: &mut InfoCache,
        table: &str,
        schema: Option<&str>,
    ) -> Result<bool> {
        Ok(self
            .get_table_names(conn, cache, schema)?
            .iter()
            .any(|name| name == table))
    }

    /// Whether a sequence exists.
    fn has_sequence(
        &self,
        conn: &mut dyn Connection,
        cache: &mut InfoCache,
        sequence: &str,
        schema: Option<&str>,
    ) -> Result<bool>;
}

/// A reflector bound to one connection and one cache.
pub struct Inspector<'a, R: ?Sized> {
    reflector: &'a R,
    connection: &'a mut dyn Connection,
    cache: InfoCache,
}

impl<'a, R: Reflector + ?Sized> Inspector<'a, R> {
    /// Starts a reflection pass.
    pub fn new(reflector: &'a R, connection: &'a mut dyn Connection) -> Self {
        Self {
            reflector,
            connection,
            cache: InfoCache::new(),
        }
    }

    /// The lookup cache of this pass.
    #[must_use]
    pub const fn cache(&self) -> &InfoCache {
        &self.cache
    }

    /// Drops memoized lookups.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// See [`Reflector::get_default_schema_name`].
    pub fn default_schema_name(&mut self) -> Result<String> {
        self.reflector
            .get_default_schema_name(self.connection, &mut self.cache)
    }

    /// See [`Reflector::get_schema_names`].
    pub fn schema_names(&mut self) -> Result<Vec<String>> {
        self.reflector
            .get_schema_names(self.connection, &mut self.cache)
    }

    /// See [`Reflector::get_table_names`].
    pub fn table_names(&mut self, schema: Option<&str>) -> Result<Vec<String>> {
        self.reflector
            .get_table_names(self.connection, &mut self.cache, schema)
    }

    /// See [`Reflector::get_view_names`].
    pub fn view_names(&mut self, schema: Option<&str>) -> Result<Vec<String>> {
        self.reflector
            .get_view_names(self.connection, &mut self.cache, schema)
    }

    /// See [`Reflector::get_view_definition`].
    pub fn view_definition(&mut self, view: &str, schema: Option<&str>) -> Result<Option<String>> {
        self.reflector
            .get_view_definition(self.connection, &mut self.cache, view, schema)
    }

    /// See [`Reflector::get_columns`].
    pub fn columns(&mut self, table: &str, schema: Option<&str>) -> Result<Vec<ReflectedColumn>> {
        self.reflector
            .get_columns(self.connection, &mut self.cache, table, schema)
    }

    /// See [`Reflector::get_pk_constraint`].
    pub fn pk_constraint(
        &mut self,
        table: &str,
        schema: Option<&str>,
    ) -> Result<ReflectedPrimaryKey> {
        self.reflector
            .get_pk_constraint(self.connection, &mut self.cache, table, schema)
    }

    /// See [`Reflector::get_foreign_keys`].
    pub fn foreign_keys(
        &mut self,
        table: &str,
        schema: Option<&str>,
    ) -> Result<Vec<ReflectedForeignKey>> {
        self.reflector
            .get_foreign_keys(self.connection, &mut self.cache, table, schema)
    }

    /// See [`Reflector::get_indexes`].
    pub fn indexes(&mut self, table: &str, schema: Option<&str>) -> Result<Vec<ReflectedIndex>> {
        self.reflector
            .get_indexes(self.connection, &mut self.cache, table, schema)
    }

    /// See [`Reflector::get_unique_constraints`].
    pub fn unique_constraints(
        &mut self,
        table: &str,
        schema: Option<&str>,
    ) -> Result<Vec<ReflectedUniqueConstraint>> {
        self.reflector
            .get_unique_constraints(self.connection, &mut self.cache, table, schema)
    }

    /// See [`Reflector::has_table`].
    pub fn has_table(&mut self, table: &str, schema: Option<&str>) -> Result<bool> {
        self.reflector
            .has_table(self.connection, &mut self.cache, table, schema)
    }

    /// See [`Reflector::has_sequence`].
    pub fn has_sequence(&mut self, sequence: &str, schema: Option<&str>) -> Result<bool> {
        self.reflector
            .has_sequence(self.connection, &mut self.cache, sequence, schema)
    }

    /// Reflects every structural aspect of one table.
    pub fn reflect_table(&mut self, table: &str, schema: Option<&str>) -> Result<ReflectedTable> {
        Ok(ReflectedTable {
            schema: schema.map(str::to_string),
            name: table.to_string(),
            columns: self.columns(table, schema)?,
            primary_key: self.pk_constraint(table, schema)?,
            foreign_keys: self.foreign_keys(table, schema)?,
            indexes: self.indexes(table, schema)?,
            unique_constraints: self.unique_constraints(table, schema)?,
        })
    }
}
