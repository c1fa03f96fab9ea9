#![allow(dead_code)]

use oxide_sql_core::ast::Statement;
use oxide_sql_core::compiler::{CompiledSql, DdlElement};
use oxide_sql_core::dialect::{Dialect, GenericDialect, Paramstyle};
use oxide_sql_core::engine::{Connection, ResultSet};
use oxide_sql_core::{Result, SqlValue};

pub fn compile(statement: impl Into<Statement>) -> CompiledSql {
    compile_with(Paramstyle::Qmark, statement)
}

pub fn compile_with(paramstyle: Paramstyle, statement: impl Into<Statement>) -> CompiledSql {
    let statement = statement.into();
    GenericDialect::with_paramstyle(paramstyle)
        .compile(&statement)
        .unwrap_or_else(|e| panic!("Failed to compile: {statement:?}\nError: {e:?}"))
}

pub fn ddl(element: &DdlElement) -> String {
    GenericDialect::new()
        .compile_ddl(element)
        .unwrap_or_else(|e| panic!("Failed to compile DDL: {element:?}\nError: {e:?}"))
}

/// A connection that records statements and answers every one with
/// `result`.
#[derive(Debug, Default)]
pub struct RecordingConnection {
    pub result: ResultSet,
    pub executed: Vec<String>,
}

impl Connection for RecordingConnection {
    fn execute(&mut self, sql: &str, _params: &[(String, SqlValue)]) -> Result<ResultSet> {
        self.executed.push(sql.to_string());
        Ok(self.result.clone())
    }

    fn commit(&mut self) -> Result<()> {
        Ok(())
    }

    fn rollback(&mut self) -> Result<()> {
        Ok(())
    }
}
