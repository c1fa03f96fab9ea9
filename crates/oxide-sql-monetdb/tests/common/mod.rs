#![allow(dead_code)]

use oxide_sql_core::engine::{Connection, Params, ResultSet};
use oxide_sql_core::{Error, Result, SqlValue};

/// One statement the connection was asked to run.
#[derive(Debug, Clone, PartialEq)]
pub struct Executed {
    pub sql: String,
    pub params: Params,
}

/// An in-memory connection answering queries from a script.
///
/// Each rule pairs a SQL fragment with a canned result. The first rule
/// whose fragment occurs in the statement answers it; anything else gets
/// an empty result.
#[derive(Debug, Default)]
pub struct ScriptedConnection {
    rules: Vec<(String, ResultSet)>,
    failures: Vec<String>,
    pub executed: Vec<Executed>,
    pub commits: usize,
    pub rollbacks: usize,
}

impl ScriptedConnection {
    pub fn new() -> Self {
        Self::default()
    }

    /// A connection whose current schema `sys` has id 2000 and whose table
    /// `orders` has id 7.
    pub fn with_catalog() -> Self {
        Self::new()
            .on("SELECT CURRENT_SCHEMA", rows(&["current_schema"], vec![vec![text("sys")]]))
            .on(
                "FROM sys.schemas WHERE name",
                rows(&["id"], vec![vec![SqlValue::Int(2000)]]),
            )
            .on(
                "SELECT id FROM sys.tables WHERE name",
                rows(&["id"], vec![vec![SqlValue::Int(7)]]),
            )
    }

    /// Answers statements containing `fragment` with `result`.
    #[must_use]
    pub fn on(mut self, fragment: &str, result: ResultSet) -> Self {
        self.rules.push((fragment.to_string(), result));
        self
    }

    /// Fails statements containing `fragment` with a driver error.
    #[must_use]
    pub fn fail_on(mut self, fragment: &str) -> Self {
        self.failures.push(fragment.to_string());
        self
    }

    /// Executed statements containing `fragment`.
    pub fn matching(&self, fragment: &str) -> Vec<&Executed> {
        self.executed
            .iter()
            .filter(|e| e.sql.contains(fragment))
            .collect()
    }

    pub fn sql_log(&self) -> Vec<&str> {
        self.executed.iter().map(|e| e.sql.as_str()).collect()
    }
}

impl Connection for ScriptedConnection {
    fn execute(&mut self, sql: &str, params: &[(String, SqlValue)]) -> Result<ResultSet> {
        self.executed.push(Executed {
            sql: sql.to_string(),
            params: params.to_vec(),
        });
        if self.failures.iter().any(|f| sql.contains(f.as_str())) {
            return Err(Error::driver(std::io::Error::new(
                std::io::ErrorKind::ConnectionReset,
                "connection reset by peer",
            )));
        }
        Ok(self
            .rules
            .iter()
            .find(|(fragment, _)| sql.contains(fragment.as_str()))
            .map_or_else(ResultSet::empty, |(_, result)| result.clone()))
    }

    fn commit(&mut self) -> Result<()> {
        self.commits += 1;
        Ok(())
    }

    fn rollback(&mut self) -> Result<()> {
        self.rollbacks += 1;
        Ok(())
    }
}

pub fn rows(columns: &[&str], rows: Vec<Vec<SqlValue>>) -> ResultSet {
    ResultSet::new(columns.iter().map(|c| (*c).to_string()).collect(), rows)
}

pub fn text(s: &str) -> SqlValue {
    SqlValue::Text(s.to_string())
}
