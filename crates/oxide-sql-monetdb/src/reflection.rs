//! Catalog reflection against MonetDB's `sys` schema.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use oxide_sql_core::engine::{
    Connection, InfoCache, Params, ReflectedColumn, ReflectedForeignKey, ReflectedIndex,
    ReflectedPrimaryKey, ReflectedUniqueConstraint, Reflector, ResultSet,
};
use oxide_sql_core::schema::Sequence;
use oxide_sql_core::{Error, Result, SqlValue, TypeEngine};

use crate::dialect::MonetDialect;
use crate::options::UnknownTypePolicy;
use crate::types;

/// Default expression MonetDB stores for an `AUTO_INCREMENT` column.
static AUTOINCREMENT_DEFAULT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)next value for "(\w*)"\."(\w*)"$"#)
        .expect("Invalid autoincrement default regex")
});

/// Rows grouped by name, groups kept in first-seen order.
struct Grouped<V> {
    groups: Vec<(String, V)>,
    positions: HashMap<String, usize>,
}

impl<V> Grouped<V> {
    fn new() -> Self {
        Self {
            groups: Vec::new(),
            positions: HashMap::new(),
        }
    }

    fn entry(&mut self, name: &str, init: impl FnOnce() -> V) -> &mut V {
        let index = match self.positions.get(name) {
            Some(&index) => index,
            None => {
                self.groups.push((name.to_string(), init()));
                self.positions.insert(name.to_string(), self.groups.len() - 1);
                self.groups.len() - 1
            }
        };
        &mut self.groups[index].1
    }

    fn into_groups(self) -> impl Iterator<Item = (String, V)> {
        self.groups.into_iter()
    }
}

/// Foreign key rows collected under one constraint name.
struct ForeignKeyRows {
    referred_schema: Option<String>,
    referred_table: String,
    pairs: Vec<(i64, String, String)>,
}

/// The sequence named by an `AUTO_INCREMENT` default, if `default` is one.
fn autoincrement_sequence(default: &str) -> Option<Sequence> {
    let captures = AUTOINCREMENT_DEFAULT.captures(default)?;
    let schema = captures.get(1)?.as_str();
    let name = captures.get(2)?.as_str();
    Some(Sequence::new(name).schema(schema))
}

fn to_u32(value: Option<i64>) -> Option<u32> {
    value.and_then(|v| u32::try_from(v).ok())
}

impl MonetDialect {
    fn query(&self, conn: &mut dyn Connection, sql: &str, params: Params) -> Result<ResultSet> {
        debug!(%sql, ?params, "catalog query");
        conn.execute(sql, &params)
    }

    /// Resolves a schema name to its catalog id. `None` is the current
    /// schema.
    pub(crate) fn schema_id(
        &self,
        conn: &mut dyn Connection,
        cache: &mut InfoCache,
        schema: Option<&str>,
    ) -> Result<i64> {
        if let Some(id) = cache.schema_id(schema) {
            return Ok(id);
        }
        let name = match schema {
            Some(name) => name.to_string(),
            None => self.get_default_schema_name(conn, cache)?,
        };
        let sql = format!(
            "SELECT id FROM sys.schemas WHERE name = {}",
            self.param("schema_name", 1)
        );
        let rows = self.query(
            conn,
            &sql,
            vec![("schema_name".to_string(), SqlValue::Text(name.clone()))],
        )?;
        let id = rows
            .scalar()
            .and_then(SqlValue::as_i64)
            .ok_or(Error::NoSuchSchema(name))?;
        cache.insert_schema_id(schema, id);
        Ok(id)
    }

    /// Resolves a table (or view) name to its catalog id.
    pub(crate) fn table_id(
        &self,
        conn: &mut dyn Connection,
        cache: &mut InfoCache,
        table: &str,
        schema: Option<&str>,
    ) -> Result<i64> {
        if let Some(id) = cache.table_id(schema, table) {
            return Ok(id);
        }
        let schema_id = self.schema_id(conn, cache, schema)?;
        let sql = format!(
            "SELECT id FROM sys.tables WHERE name = {} AND schema_id = {}",
            self.param("name", 1),
            self.param("schema_id", 2)
        );
        let rows = self.query(
            conn,
            &sql,
            vec![
                ("name".to_string(), SqlValue::Text(table.to_string())),
                ("schema_id".to_string(), SqlValue::Int(schema_id)),
            ],
        )?;
        let id = rows
            .scalar()
            .and_then(SqlValue::as_i64)
            .ok_or_else(|| Error::NoSuchTable(table.to_string()))?;
        cache.insert_table_id(schema, table, id);
        Ok(id)
    }

    fn table_id_params(
        &self,
        conn: &mut dyn Connection,
        cache: &mut InfoCache,
        table: &str,
        schema: Option<&str>,
    ) -> Result<Params> {
        let id = self.table_id(conn, cache, table, schema)?;
        Ok(vec![("table_id".to_string(), SqlValue::Int(id))])
    }

    fn names_in_schema(
        &self,
        conn: &mut dyn Connection,
        cache: &mut InfoCache,
        schema: Option<&str>,
        filter: &str,
    ) -> Result<Vec<String>> {
        let schema_id = self.schema_id(conn, cache, schema)?;
        let sql = format!(
            "SELECT name FROM sys.tables WHERE {filter} AND schema_id = {}",
            self.param("schema_id", 1)
        );
        let rows = self.query(
            conn,
            &sql,
            vec![("schema_id".to_string(), SqlValue::Int(schema_id))],
        )?;
        rows.rows()
            .map(|row| row.get_str("name").map(str::to_string))
            .collect()
    }

    fn resolve_type(
        &self,
        type_name: &str,
        column: &str,
        digits: Option<u32>,
        scale: Option<u32>,
    ) -> Result<TypeEngine> {
        if let Some(type_) = types::resolve(type_name, digits, scale) {
            return Ok(type_);
        }
        match self.options().unknown_types {
            UnknownTypePolicy::Warn => {
                warn!(type_name, column, "Did not recognize type, reflecting as NULL type");
                Ok(TypeEngine::Null)
            }
            UnknownTypePolicy::Error => Err(Error::UnknownType {
                type_name: type_name.to_string(),
                column: column.to_string(),
            }),
        }
    }

    fn grouped_key_columns(
        &self,
        conn: &mut dyn Connection,
        cache: &mut InfoCache,
        table: &str,
        schema: Option<&str>,
        key_type: i64,
    ) -> Result<Vec<(String, Vec<String>)>> {
        let params = self.table_id_params(conn, cache, table, schema)?;
        let sql = format!(
            "SELECT objects.name AS col, keys.name AS name \
             FROM sys.keys AS keys \
             JOIN sys.objects AS objects ON (keys.id = objects.id) \
             WHERE keys.type = {key_type} AND keys.table_id = {} \
             ORDER BY keys.name, objects.nr",
            self.param("table_id", 1)
        );
        let rows = self.query(conn, &sql, params)?;
        let mut grouped = Grouped::new();
        for row in rows.rows() {
            grouped
                .entry(row.get_str("name")?, Vec::new)
                .push(row.get_str("col")?.to_string());
        }
        Ok(grouped.into_groups().collect())
    }
}

impl Reflector for MonetDialect {
    fn get_default_schema_name(
        &self,
        conn: &mut dyn Connection,
        cache: &mut InfoCache,
    ) -> Result<String> {
        if let Some(name) = cache.default_schema() {
            return Ok(name.to_string());
        }
        let sql = "SELECT CURRENT_SCHEMA";
        let rows = self.query(conn, sql, Vec::new())?;
        let name = rows
            .scalar()
            .and_then(SqlValue::as_str)
            .ok_or_else(|| Error::NoResult(sql.to_string()))?
            .to_string();
        cache.set_default_schema(name.clone());
        Ok(name)
    }

    fn get_schema_names(
        &self,
        conn: &mut dyn Connection,
        cache: &mut InfoCache,
    ) -> Result<Vec<String>> {
        if let Some(names) = cache.schema_names() {
            return Ok(names.to_vec());
        }
        let rows = self.query(conn, "SELECT name FROM sys.schemas ORDER BY name", Vec::new())?;
        let names = rows
            .rows()
            .map(|row| row.get_str("name").map(str::to_string))
            .collect::<Result<Vec<_>>>()?;
        cache.set_schema_names(names.clone());
        Ok(names)
    }

    fn get_table_names(
        &self,
        conn: &mut dyn Connection,
        cache: &mut InfoCache,
        schema: Option<&str>,
    ) -> Result<Vec<String>> {
        self.names_in_schema(conn, cache, schema, "system = false AND type = 0")
    }

    fn get_view_names(
        &self,
        conn: &mut dyn Connection,
        cache: &mut InfoCache,
        schema: Option<&str>,
    ) -> Result<Vec<String>> {
        self.names_in_schema(conn, cache, schema, "type = 1")
    }

    fn get_view_definition(
        &self,
        conn: &mut dyn Connection,
        cache: &mut InfoCache,
        view: &str,
        schema: Option<&str>,
    ) -> Result<Option<String>> {
        let schema_id = self.schema_id(conn, cache, schema)?;
        let sql = format!(
            "SELECT query FROM sys.tables WHERE type = 1 AND name = {} AND schema_id = {}",
            self.param("name", 1),
            self.param("schema_id", 2)
        );
        let rows = self.query(
            conn,
            &sql,
            vec![
                ("name".to_string(), SqlValue::Text(view.to_string())),
                ("schema_id".to_string(), SqlValue::Int(schema_id)),
            ],
        )?;
        match rows.first() {
            Some(row) => Ok(row.get_opt_str("query")?.map(str::to_string)),
            None => Ok(None),
        }
    }

    fn get_columns(
        &self,
        conn: &mut dyn Connection,
        cache: &mut InfoCache,
        table: &str,
        schema: Option<&str>,
    ) -> Result<Vec<ReflectedColumn>> {
        let params = self.table_id_params(conn, cache, table, schema)?;
        let sql = format!(
            "SELECT id, name, type, \"default\", \"null\", type_digits, type_scale \
             FROM sys.columns WHERE table_id = {} ORDER BY number",
            self.param("table_id", 1)
        );
        let rows = self.query(conn, &sql, params)?;

        let mut columns = Vec::with_capacity(rows.len());
        for row in rows.rows() {
            let name = row.get_str("name")?;
            let type_ = self.resolve_type(
                row.get_str("type")?,
                name,
                to_u32(row.get_opt_i64("type_digits")?),
                to_u32(row.get_opt_i64("type_scale")?),
            )?;
            let default = row.get_opt_str("default")?.map(str::to_string);
            let sequence = default
                .as_deref()
                .and_then(autoincrement_sequence);
            columns.push(ReflectedColumn {
                name: name.to_string(),
                type_,
                default,
                nullable: row.get_bool("null")?,
                autoincrement: sequence.is_some(),
                sequence,
            });
        }
        Ok(columns)
    }

    fn get_pk_constraint(
        &self,
        conn: &mut dyn Connection,
        cache: &mut InfoCache,
        table: &str,
        schema: Option<&str>,
    ) -> Result<ReflectedPrimaryKey> {
        let groups = self.grouped_key_columns(conn, cache, table, schema, 0)?;
        Ok(groups
            .into_iter()
            .next()
            .map(|(name, columns)| ReflectedPrimaryKey {
                name: Some(name),
                constrained_columns: columns,
            })
            .unwrap_or_default())
    }

    fn get_foreign_keys(
        &self,
        conn: &mut dyn Connection,
        cache: &mut InfoCache,
        table: &str,
        schema: Option<&str>,
    ) -> Result<Vec<ReflectedForeignKey>> {
        let params = self.table_id_params(conn, cache, table, schema)?;
        let sql = format!(
            "SELECT fkkey.name AS name, \
             fkkeycol.name AS fkcolumn_name, \
             pkschema.name AS pktable_schema, \
             pktable.name AS pktable_name, \
             pkkeycol.name AS pkcolumn_name, \
             pkkeycol.nr AS key_seq \
             FROM sys.keys AS fkkey \
             JOIN sys.tables AS fktable ON (fktable.id = fkkey.table_id) \
             JOIN sys.objects AS fkkeycol ON (fkkey.id = fkkeycol.id) \
             JOIN sys.keys AS pkkey ON (fkkey.rkey = pkkey.id) \
             JOIN sys.objects AS pkkeycol ON (pkkey.id = pkkeycol.id) \
             JOIN sys.tables AS pktable ON (pktable.id = pkkey.table_id) \
             JOIN sys.schemas AS pkschema ON (pkschema.id = pktable.schema_id) \
             WHERE fkkey.rkey > -1 \
             AND fkkeycol.nr = pkkeycol.nr \
             AND fktable.id = {} \
             ORDER BY name, key_seq",
            self.param("table_id", 1)
        );
        let rows = self.query(conn, &sql, params)?;

        let mut grouped: Grouped<ForeignKeyRows> = Grouped::new();
        for row in rows.rows() {
            let referred_schema = row.get_opt_str("pktable_schema")?.map(str::to_string);
            let referred_table = row.get_str("pktable_name")?.to_string();
            grouped
                .entry(row.get_str("name")?, || ForeignKeyRows {
                    referred_schema,
                    referred_table,
                    pairs: Vec::new(),
                })
                .pairs
                .push((
                    row.get_i64("key_seq")?,
                    row.get_str("fkcolumn_name")?.to_string(),
                    row.get_str("pkcolumn_name")?.to_string(),
                ));
        }

        Ok(grouped
            .into_groups()
            .map(|(name, mut fk)| {
                fk.pairs.sort_by_key(|(seq, _, _)| *seq);
                let (constrained_columns, referred_columns): (Vec<_>, Vec<_>) = fk
                    .pairs
                    .into_iter()
                    .map(|(_, local, remote)| (local, remote))
                    .unzip();
                ReflectedForeignKey {
                    name: Some(name),
                    constrained_columns,
                    referred_schema: fk.referred_schema,
                    referred_table: fk.referred_table,
                    referred_columns,
                }
            })
            .collect())
    }

    fn get_indexes(
        &self,
        conn: &mut dyn Connection,
        cache: &mut InfoCache,
        table: &str,
        schema: Option<&str>,
    ) -> Result<Vec<ReflectedIndex>> {
        let params = self.table_id_params(conn, cache, table, schema)?;
        let sql = format!(
            "SELECT idxs.name AS name, objects.name AS column_name, objects.nr AS nr \
             FROM sys.idxs JOIN sys.objects USING (id) \
             WHERE table_id = {} \
             ORDER BY idxs.name, objects.nr",
            self.param("table_id", 1)
        );
        let rows = self.query(conn, &sql, params)?;

        let mut grouped: Grouped<Vec<(i64, String)>> = Grouped::new();
        for row in rows.rows() {
            grouped
                .entry(row.get_str("name")?, Vec::new)
                .push((row.get_i64("nr")?, row.get_str("column_name")?.to_string()));
        }

        Ok(grouped
            .into_groups()
            .map(|(name, mut columns)| {
                columns.sort_by_key(|(nr, _)| *nr);
                ReflectedIndex {
                    name,
                    column_names: columns.into_iter().map(|(_, column)| column).collect(),
                    unique: false,
                }
            })
            .collect())
    }

    fn get_unique_constraints(
        &self,
        conn: &mut dyn Connection,
        cache: &mut InfoCache,
        table: &str,
        schema: Option<&str>,
    ) -> Result<Vec<ReflectedUniqueConstraint>> {
        let groups = self.grouped_key_columns(conn, cache, table, schema, 1)?;
        Ok(groups
            .into_iter()
            .map(|(name, column_names)| ReflectedUniqueConstraint { name, column_names })
            .collect())
    }

    fn has_sequence(
        &self,
        conn: &mut dyn Connection,
        cache: &mut InfoCache,
        sequence: &str,
        schema: Option<&str>,
    ) -> Result<bool> {
        let schema_id = self.schema_id(conn, cache, schema)?;
        let sql = format!(
            "SELECT id FROM sys.sequences WHERE name = {} AND schema_id = {}",
            self.param("name", 1),
            self.param("schema_id", 2)
        );
        let rows = self.query(
            conn,
            &sql,
            vec![
                ("name".to_string(), SqlValue::Text(sequence.to_string())),
                ("schema_id".to_string(), SqlValue::Int(schema_id)),
            ],
        )?;
        Ok(!rows.is_empty())
    }
}
