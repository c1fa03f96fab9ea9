//! Statement, type and DDL compilation.
//!
//! Compilers are traits whose provided methods implement the base
//! rendering. A dialect overrides only the visitor methods where its
//! grammar differs. When an override needs to fall back to the base
//! behavior it calls the matching `default_*` function of this module.

mod ddl;
mod preparer;
mod types;

pub use ddl::{
    default_column_specification, default_create_table, quote_list, sequence_options, DdlCompiler,
    DdlElement, GenericDdlCompiler,
};
pub use preparer::{IdentifierPreparer, ANSI_RESERVED_WORDS};
pub use types::{default_type_sql, GenericTypeCompiler, TypeCompiler};

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::ast::{
    BinaryOp, DeleteStatement, Expr, InsertSource, InsertStatement, Join, OrderDirection,
    SelectStatement, Statement, TableRef, UpdateStatement,
};
use crate::dialect::Paramstyle;
use crate::error::{Error, Result};
use crate::schema::Sequence;
use crate::value::SqlValue;

/// Compiled SQL text and the parameters it references.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledSql {
    /// Statement text with placeholders.
    pub sql: String,
    /// Parameters in placeholder order, keyed by name.
    pub params: Vec<(String, SqlValue)>,
}

impl CompiledSql {
    /// Parameter values in placeholder order.
    #[must_use]
    pub fn positional_params(&self) -> Vec<&SqlValue> {
        self.params.iter().map(|(_, v)| v).collect()
    }

    /// Looks up a parameter by name.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&SqlValue> {
        self.params.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }
}

/// Mutable state threaded through one compilation.
#[derive(Debug)]
pub struct CompileState {
    paramstyle: Paramstyle,
    params: Vec<(String, SqlValue)>,
}

impl CompileState {
    /// Creates an empty state for the given placeholder style.
    #[must_use]
    pub const fn new(paramstyle: Paramstyle) -> Self {
        Self {
            paramstyle,
            params: Vec::new(),
        }
    }

    /// Registers a parameter and returns its placeholder.
    ///
    /// Anonymous parameters are named `param_<n>`, numbered from 1 in
    /// order of appearance.
    pub fn bind(&mut self, key: Option<&str>, value: SqlValue) -> String {
        let position = self.params.len() + 1;
        let name = key.map_or_else(|| format!("param_{position}"), str::to_string);
        let placeholder = self.paramstyle.placeholder(&name, position);
        self.params.push((name, value));
        placeholder
    }

    /// Number of parameters bound so far.
    #[must_use]
    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    /// Finishes compilation.
    #[must_use]
    pub fn finish(self, sql: String) -> CompiledSql {
        CompiledSql {
            sql,
            params: self.params,
        }
    }
}

/// Operator spellings owned by one compiler instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorTable {
    spellings: HashMap<BinaryOp, &'static str>,
}

impl Default for OperatorTable {
    fn default() -> Self {
        Self {
            spellings: BinaryOp::ALL.iter().map(|op| (*op, op.as_str())).collect(),
        }
    }
}

impl OperatorTable {
    /// Creates a table with the base spellings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the table with `op` spelled as `text`.
    #[must_use]
    pub fn with_override(mut self, op: BinaryOp, text: &'static str) -> Self {
        self.spellings.insert(op, text);
        self
    }

    /// The spelling of `op`.
    #[must_use]
    pub fn get(&self, op: BinaryOp) -> &'static str {
        self.spellings.get(&op).copied().unwrap_or_else(|| op.as_str())
    }
}

/// Renders statements and expressions to SQL text.
pub trait SqlCompiler {
    /// The identifier preparer.
    fn preparer(&self) -> &IdentifierPreparer;

    /// This instance's operator spellings.
    fn operators(&self) -> &OperatorTable;

    /// The type compiler used for CAST targets and DDL.
    fn type_compiler(&self) -> &dyn TypeCompiler;

    /// The placeholder style of emitted statements.
    fn paramstyle(&self) -> Paramstyle {
        self.preparer().paramstyle()
    }

    /// Compiles a statement.
    fn compile(&self, statement: &Statement) -> Result<CompiledSql> {
        let mut state = CompileState::new(self.paramstyle());
        let sql = match statement {
            Statement::Select(select) => self.visit_select(select, &mut state)?,
            Statement::Insert(insert) => self.visit_insert(insert, &mut state)?,
            Statement::Update(update) => self.visit_update(update, &mut state)?,
            Statement::Delete(delete) => self.visit_delete(delete, &mut state)?,
        };
        Ok(state.finish(sql))
    }

    /// Compiles a standalone expression.
    fn compile_expr(&self, expr: &Expr) -> Result<CompiledSql> {
        let mut state = CompileState::new(self.paramstyle());
        let sql = self.process(expr, &mut state)?;
        Ok(state.finish(sql))
    }

    /// Renders any expression node.
    fn process(&self, expr: &Expr, state: &mut CompileState) -> Result<String> {
        default_process(self, expr, state)
    }

    /// Renders a binary operation using the operator table.
    fn visit_binary(
        &self,
        left: &Expr,
        op: BinaryOp,
        right: &Expr,
        state: &mut CompileState,
    ) -> Result<String> {
        let l = process_operand(self, left, op, Operand::Left, state)?;
        let r = process_operand(self, right, op, Operand::Right, state)?;
        Ok(format!("{l} {} {r}", self.operators().get(op)))
    }

    /// Renders the modulo operator.
    fn visit_mod(&self, left: &Expr, right: &Expr, state: &mut CompileState) -> Result<String> {
        self.visit_binary(left, BinaryOp::Mod, right, state)
    }

    /// Renders the inequality operator.
    fn visit_ne(&self, left: &Expr, right: &Expr, state: &mut CompileState) -> Result<String> {
        self.visit_binary(left, BinaryOp::NotEq, right, state)
    }

    /// Renders a sequence used as a value.
    fn visit_sequence(&self, sequence: &Sequence) -> Result<String> {
        Ok(format!(
            "NEXT VALUE FOR {}",
            self.preparer().format_sequence(sequence)
        ))
    }

    /// Renders a FROM item.
    fn visit_table_ref(&self, table: &TableRef, state: &mut CompileState) -> Result<String> {
        match table {
            TableRef::Table {
                schema,
                name,
                alias,
            } => {
                let mut sql = self.preparer().format_table(schema.as_deref(), name);
                if let Some(alias) = alias {
                    sql.push_str(" AS ");
                    sql.push_str(&self.preparer().quote(alias));
                }
                Ok(sql)
            }
            TableRef::Subquery { query, alias } => Ok(format!(
                "({}) AS {}",
                self.visit_select(query, state)?,
                self.preparer().quote(alias)
            )),
            TableRef::Join(join) => self.visit_join(join, state),
        }
    }

    /// Renders a join.
    fn visit_join(&self, join: &Join, state: &mut CompileState) -> Result<String> {
        let keyword = if join.full {
            "FULL JOIN"
        } else if join.is_outer {
            "LEFT JOIN"
        } else {
            "INNER JOIN"
        };
        render_join(self, join, keyword, state)
    }

    /// Renders a SELECT.
    fn visit_select(&self, select: &SelectStatement, state: &mut CompileState) -> Result<String> {
        default_visit_select(self, select, state)
    }

    /// Renders an INSERT.
    fn visit_insert(&self, insert: &InsertStatement, state: &mut CompileState) -> Result<String> {
        let table = self
            .preparer()
            .format_table(insert.schema.as_deref(), &insert.table);
        let mut sql = format!("INSERT INTO {table}");
        if !insert.columns.is_empty() && !matches!(insert.source, InsertSource::DefaultValues) {
            let columns: Vec<String> = insert
                .columns
                .iter()
                .map(|c| self.preparer().quote(c))
                .collect();
            sql.push_str(&format!(" ({})", columns.join(", ")));
        }
        match &insert.source {
            InsertSource::Values(rows) => {
                let mut rendered = Vec::with_capacity(rows.len());
                for row in rows {
                    rendered.push(format!("({})", self.process_list(row, state)?));
                }
                sql.push_str(" VALUES ");
                sql.push_str(&rendered.join(", "));
            }
            InsertSource::Query(query) => {
                sql.push(' ');
                sql.push_str(&self.visit_select(query, state)?);
            }
            InsertSource::DefaultValues => sql.push_str(" DEFAULT VALUES"),
        }
        Ok(sql)
    }

    /// Renders an UPDATE.
    fn visit_update(&self, update: &UpdateStatement, state: &mut CompileState) -> Result<String> {
        if update.assignments.is_empty() {
            return Err(Error::Compile(String::from("UPDATE without assignments")));
        }
        let table = self
            .preparer()
            .format_table(update.schema.as_deref(), &update.table);
        let mut assignments = Vec::with_capacity(update.assignments.len());
        for assignment in &update.assignments {
            assignments.push(format!(
                "{} = {}",
                self.preparer().quote(&assignment.column),
                self.process(&assignment.value, state)?
            ));
        }
        let mut sql = format!("UPDATE {table} SET {}", assignments.join(", "));
        if let Some(where_clause) = &update.where_clause {
            sql.push_str(" WHERE ");
            sql.push_str(&self.process(where_clause, state)?);
        }
        Ok(sql)
    }

    /// Renders a DELETE.
    fn visit_delete(&self, delete: &DeleteStatement, state: &mut CompileState) -> Result<String> {
        let table = self
            .preparer()
            .format_table(delete.schema.as_deref(), &delete.table);
        let mut sql = format!("DELETE FROM {table}");
        if let Some(where_clause) = &delete.where_clause {
            sql.push_str(" WHERE ");
            sql.push_str(&self.process(where_clause, state)?);
        }
        Ok(sql)
    }

    /// Renders the trailing LIMIT/OFFSET text, including its leading space.
    fn limit_clause(&self, select: &SelectStatement, state: &mut CompileState) -> Result<String> {
        let mut sql = String::new();
        if let Some(limit) = select.limit {
            sql.push_str(" LIMIT ");
            sql.push_str(&self.bind_param(None, &SqlValue::Int(to_i64(limit)?), state));
        }
        if let Some(offset) = select.offset {
            sql.push_str(" OFFSET ");
            sql.push_str(&self.bind_param(None, &SqlValue::Int(to_i64(offset)?), state));
        }
        Ok(sql)
    }

    /// Renders an inline literal.
    fn render_literal_value(&self, value: &SqlValue) -> Result<String> {
        default_render_literal(self.preparer(), value)
    }

    /// Registers a bound parameter and returns its placeholder.
    fn bind_param(&self, key: Option<&str>, value: &SqlValue, state: &mut CompileState) -> String {
        state.bind(key, value.clone())
    }

    /// Renders a comma-separated expression list.
    fn process_list(&self, exprs: &[Expr], state: &mut CompileState) -> Result<String> {
        let mut parts = Vec::with_capacity(exprs.len());
        for expr in exprs {
            parts.push(self.process(expr, state)?);
        }
        Ok(parts.join(", "))
    }
}

fn to_i64(n: u64) -> Result<i64> {
    i64::try_from(n).map_err(|_| Error::Compile(format!("row count {n} out of range")))
}

/// Base literal rendering: the escaped inline form, with `%` doubled when
/// the preparer asks for it. NaN and infinities have no SQL literal.
pub fn default_render_literal(preparer: &IdentifierPreparer, value: &SqlValue) -> Result<String> {
    if let SqlValue::Float(f) = value {
        if !f.is_finite() {
            return Err(Error::Compile(format!("float literal {f} is not finite")));
        }
    }
    let sql = value.to_sql_inline();
    if preparer.double_percents() {
        Ok(sql.replace('%', "%%"))
    } else {
        Ok(sql)
    }
}

/// Renders `left <keyword> right ON cond`.
pub fn render_join<C: SqlCompiler + ?Sized>(
    compiler: &C,
    join: &Join,
    keyword: &str,
    state: &mut CompileState,
) -> Result<String> {
    let left = compiler.visit_table_ref(&join.left, state)?;
    let right = compiler.visit_table_ref(&join.right, state)?;
    let on = compiler.process(&join.on, state)?;
    Ok(format!("{left} {keyword} {right} ON {on}"))
}

/// Side of a binary operator an operand is rendered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// Left-hand operand.
    Left,
    /// Right-hand operand.
    Right,
}

/// Renders an operand of `parent`, parenthesizing a child that would
/// otherwise regroup.
///
/// Operators associate to the left, so a right operand of equal
/// precedence is wrapped (`a - (b - c)`). Comparisons do not associate at
/// all and wrap an equal-precedence child on either side.
pub fn process_operand<C: SqlCompiler + ?Sized>(
    compiler: &C,
    expr: &Expr,
    parent: BinaryOp,
    side: Operand,
    state: &mut CompileState,
) -> Result<String> {
    let sql = compiler.process(expr, state)?;
    let Expr::Binary { op, .. } = expr else {
        // `a - -5` would open a line comment.
        if side == Operand::Right && sql.starts_with('-') {
            return Ok(format!("({sql})"));
        }
        return Ok(sql);
    };
    let wrap = match op.precedence().cmp(&parent.precedence()) {
        Ordering::Less => true,
        Ordering::Equal => side == Operand::Right || parent.is_comparison(),
        Ordering::Greater => false,
    };
    if wrap {
        Ok(format!("({sql})"))
    } else {
        Ok(sql)
    }
}

/// Base expression dispatch.
pub fn default_process<C: SqlCompiler + ?Sized>(
    compiler: &C,
    expr: &Expr,
    state: &mut CompileState,
) -> Result<String> {
    let preparer = compiler.preparer();
    match expr {
        Expr::Column { table, name } => Ok(preparer.format_column(table.as_deref(), name)),
        Expr::Literal(value) => compiler.render_literal_value(value),
        Expr::BindParam { key, value } => Ok(compiler.bind_param(key.as_deref(), value, state)),
        Expr::Binary { left, op, right } => match op {
            BinaryOp::Mod => compiler.visit_mod(left, right, state),
            BinaryOp::NotEq => compiler.visit_ne(left, right, state),
            _ => compiler.visit_binary(left, *op, right, state),
        },
        Expr::Unary { op, operand } => {
            let inner = compiler.process(operand, state)?;
            // `--` opens a line comment.
            let wrap = matches!(operand.as_ref(), Expr::Binary { .. } | Expr::Unary { .. })
                || inner.starts_with('-');
            if wrap {
                Ok(format!("{}({inner})", op.as_str()))
            } else {
                Ok(format!("{}{inner}", op.as_str()))
            }
        }
        Expr::Function(func) => {
            let args = compiler.process_list(&func.args, state)?;
            let distinct = if func.distinct { "DISTINCT " } else { "" };
            Ok(format!("{}({distinct}{args})", func.name))
        }
        Expr::Subquery(select) => Ok(format!("({})", compiler.visit_select(select, state)?)),
        Expr::IsNull { expr, negated } => {
            let inner = compiler.process(expr, state)?;
            let not = if *negated { " NOT" } else { "" };
            Ok(format!("{inner} IS{not} NULL"))
        }
        Expr::In {
            expr,
            list,
            negated,
        } => {
            if list.is_empty() {
                return Err(Error::Compile(String::from("IN with an empty list")));
            }
            let inner = compiler.process(expr, state)?;
            let items = compiler.process_list(list, state)?;
            let not = if *negated { " NOT" } else { "" };
            Ok(format!("{inner}{not} IN ({items})"))
        }
        Expr::Between {
            expr,
            low,
            high,
            negated,
        } => {
            let inner = compiler.process(expr, state)?;
            let low = compiler.process(low, state)?;
            let high = compiler.process(high, state)?;
            let not = if *negated { " NOT" } else { "" };
            Ok(format!("{inner}{not} BETWEEN {low} AND {high}"))
        }
        Expr::Cast { expr, type_ } => {
            let inner = compiler.process(expr, state)?;
            let target = compiler.type_compiler().process(type_)?;
            Ok(format!("CAST({inner} AS {target})"))
        }
        Expr::Paren(inner) => Ok(format!("({})", compiler.process(inner, state)?)),
        Expr::NextValue(sequence) => compiler.visit_sequence(sequence),
        Expr::Text(sql) => Ok(sql.clone()),
        Expr::Wildcard { table: None } => Ok(String::from("*")),
        Expr::Wildcard { table: Some(table) } => Ok(format!("{}.*", preparer.quote(table))),
    }
}

/// Base SELECT rendering; the LIMIT/OFFSET tail comes from
/// [`SqlCompiler::limit_clause`].
pub fn default_visit_select<C: SqlCompiler + ?Sized>(
    compiler: &C,
    select: &SelectStatement,
    state: &mut CompileState,
) -> Result<String> {
    let preparer = compiler.preparer();
    let mut sql = String::from("SELECT ");
    if select.distinct {
        sql.push_str("DISTINCT ");
    }

    if select.columns.is_empty() {
        sql.push('*');
    } else {
        let mut columns = Vec::with_capacity(select.columns.len());
        for column in &select.columns {
            let mut rendered = compiler.process(&column.expr, state)?;
            if let Some(alias) = &column.alias {
                rendered.push_str(" AS ");
                rendered.push_str(&preparer.quote(alias));
            }
            columns.push(rendered);
        }
        sql.push_str(&columns.join(", "));
    }

    if !select.from.is_empty() {
        let mut from = Vec::with_capacity(select.from.len());
        for table in &select.from {
            from.push(compiler.visit_table_ref(table, state)?);
        }
        sql.push_str(" FROM ");
        sql.push_str(&from.join(", "));
    }

    if let Some(where_clause) = &select.where_clause {
        sql.push_str(" WHERE ");
        sql.push_str(&compiler.process(where_clause, state)?);
    }

    if !select.group_by.is_empty() {
        sql.push_str(" GROUP BY ");
        sql.push_str(&compiler.process_list(&select.group_by, state)?);
    }

    if let Some(having) = &select.having {
        sql.push_str(" HAVING ");
        sql.push_str(&compiler.process(having, state)?);
    }

    if !select.order_by.is_empty() {
        let mut order = Vec::with_capacity(select.order_by.len());
        for entry in &select.order_by {
            let mut rendered = compiler.process(&entry.expr, state)?;
            if entry.direction == OrderDirection::Desc {
                rendered.push_str(" DESC");
            }
            order.push(rendered);
        }
        sql.push_str(" ORDER BY ");
        sql.push_str(&order.join(", "));
    }

    sql.push_str(&compiler.limit_clause(select, state)?);
    Ok(sql)
}

/// The base statement compiler.
#[derive(Debug, Clone)]
pub struct GenericCompiler {
    preparer: IdentifierPreparer,
    operators: OperatorTable,
    types: GenericTypeCompiler,
}

impl GenericCompiler {
    /// Creates a compiler around a preparer.
    ///
    /// The modulo operator is spelled `%%` when the preparer doubles
    /// percent signs.
    #[must_use]
    pub fn new(preparer: IdentifierPreparer) -> Self {
        let mut operators = OperatorTable::new();
        if preparer.double_percents() {
            operators = operators.with_override(BinaryOp::Mod, "%%");
        }
        Self {
            preparer,
            operators,
            types: GenericTypeCompiler,
        }
    }

    /// Replaces the operator table.
    #[must_use]
    pub fn with_operators(mut self, operators: OperatorTable) -> Self {
        self.operators = operators;
        self
    }
}

impl Default for GenericCompiler {
    fn default() -> Self {
        Self::new(IdentifierPreparer::new(ANSI_RESERVED_WORDS, Paramstyle::Qmark))
    }
}

impl SqlCompiler for GenericCompiler {
    fn preparer(&self) -> &IdentifierPreparer {
        &self.preparer
    }

    fn operators(&self) -> &OperatorTable {
        &self.operators
    }

    fn type_compiler(&self) -> &dyn TypeCompiler {
        &self.types
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{TypeEngine, UpdateAssignment};

    fn compile(select: SelectStatement) -> CompiledSql {
        GenericCompiler::default().compile(&select.into()).unwrap()
    }

    #[test]
    fn test_simple_select() {
        let out = compile(
            SelectStatement::new()
                .column(Expr::column("id"))
                .column_as(Expr::column("name"), "n")
                .from(TableRef::table("users"))
                .filter(Expr::column("id").eq(Expr::bind(5_i64))),
        );
        assert_eq!(out.sql, "SELECT id, name AS n FROM users WHERE id = ?");
        assert_eq!(out.params, vec![(String::from("param_1"), SqlValue::Int(5))]);
    }

    #[test]
    fn test_limit_offset_are_bound() {
        let out = compile(
            SelectStatement::new()
                .from(TableRef::table("t"))
                .limit(5)
                .offset(10),
        );
        assert_eq!(out.sql, "SELECT * FROM t LIMIT ? OFFSET ?");
        assert_eq!(out.positional_params(), vec![&SqlValue::Int(5), &SqlValue::Int(10)]);
    }

    #[test]
    fn test_base_operator_spellings() {
        let compiler = GenericCompiler::default();
        let out = compiler
            .compile_expr(&Expr::column("a").not_eq(Expr::column("b")))
            .unwrap();
        assert_eq!(out.sql, "a != b");
        let out = compiler
            .compile_expr(&Expr::column("a").modulo(Expr::integer(2)))
            .unwrap();
        assert_eq!(out.sql, "a % 2");
    }

    #[test]
    fn test_operator_table_is_per_instance() {
        let custom = GenericCompiler::default()
            .with_operators(OperatorTable::new().with_override(BinaryOp::NotEq, "<>"));
        let base = GenericCompiler::default();
        let expr = Expr::column("a").not_eq(Expr::column("b"));
        assert_eq!(custom.compile_expr(&expr).unwrap().sql, "a <> b");
        assert_eq!(base.compile_expr(&expr).unwrap().sql, "a != b");
    }

    #[test]
    fn test_precedence_parentheses() {
        let expr = Expr::column("a")
            .eq(Expr::integer(1))
            .or(Expr::column("b").eq(Expr::integer(2)))
            .and(Expr::column("c").is_null());
        let out = GenericCompiler::default().compile_expr(&expr).unwrap();
        assert_eq!(out.sql, "(a = 1 OR b = 2) AND c IS NULL");
    }

    #[test]
    fn test_joins() {
        let on = Expr::qualified_column("a", "id").eq(Expr::qualified_column("b", "a_id"));
        let inner = TableRef::table("a").join(TableRef::table("b"), on.clone());
        let left = TableRef::table("a").outer_join(TableRef::table("b"), on.clone());
        let full = TableRef::table("a").full_outer_join(TableRef::table("b"), on);
        assert_eq!(
            compile(SelectStatement::new().from(inner)).sql,
            "SELECT * FROM a INNER JOIN b ON a.id = b.a_id"
        );
        assert_eq!(
            compile(SelectStatement::new().from(left)).sql,
            "SELECT * FROM a LEFT JOIN b ON a.id = b.a_id"
        );
        assert_eq!(
            compile(SelectStatement::new().from(full)).sql,
            "SELECT * FROM a FULL JOIN b ON a.id = b.a_id"
        );
    }

    #[test]
    fn test_sequence_and_cast() {
        let compiler = GenericCompiler::default();
        let out = compiler
            .compile_expr(&Expr::next_value(Sequence::new("order_seq")))
            .unwrap();
        assert_eq!(out.sql, "NEXT VALUE FOR order_seq");
        let out = compiler
            .compile_expr(&Expr::cast(Expr::column("x"), TypeEngine::BigInteger))
            .unwrap();
        assert_eq!(out.sql, "CAST(x AS BIGINT)");
    }

    #[test]
    fn test_pyformat_doubles_percent_in_literals() {
        let compiler = GenericCompiler::new(IdentifierPreparer::new(
            ANSI_RESERVED_WORDS,
            Paramstyle::Pyformat,
        ));
        let out = compiler
            .compile_expr(&Expr::column("name").like(Expr::string("a%")))
            .unwrap();
        assert_eq!(out.sql, "name LIKE 'a%%'");
        let out = compiler
            .compile_expr(&Expr::column("n").modulo(Expr::bind_named("m", 3_i64)))
            .unwrap();
        assert_eq!(out.sql, "n %% %(m)s");
    }

    #[test]
    fn test_insert_update_delete() {
        let compiler = GenericCompiler::default();
        let insert = InsertStatement {
            schema: Some(String::from("app")),
            table: String::from("users"),
            columns: vec![String::from("id"), String::from("name")],
            source: InsertSource::Values(vec![vec![Expr::bind(1_i64), Expr::bind("a")]]),
        };
        let out = compiler.compile(&insert.into()).unwrap();
        assert_eq!(out.sql, "INSERT INTO app.users (id, name) VALUES (?, ?)");
        assert_eq!(out.params.len(), 2);

        let defaults = InsertStatement {
            schema: None,
            table: String::from("t"),
            columns: Vec::new(),
            source: InsertSource::DefaultValues,
        };
        let out = compiler.compile(&defaults.into()).unwrap();
        assert_eq!(out.sql, "INSERT INTO t DEFAULT VALUES");

        let update = UpdateStatement {
            schema: None,
            table: String::from("users"),
            assignments: vec![UpdateAssignment {
                column: String::from("name"),
                value: Expr::bind("b"),
            }],
            where_clause: Some(Expr::column("id").eq(Expr::integer(1))),
        };
        let out = compiler.compile(&update.into()).unwrap();
        assert_eq!(out.sql, "UPDATE users SET name = ? WHERE id = 1");

        let delete = DeleteStatement {
            schema: None,
            table: String::from("users"),
            where_clause: None,
        };
        let out = compiler.compile(&delete.into()).unwrap();
        assert_eq!(out.sql, "DELETE FROM users");
    }

    #[test]
    fn test_empty_in_list_is_an_error() {
        let err = GenericCompiler::default()
            .compile_expr(&Expr::column("a").in_list(Vec::new()))
            .unwrap_err();
        assert!(matches!(err, Error::Compile(_)));
    }

    #[test]
    fn test_left_associative_grouping() {
        let compiler = GenericCompiler::default();
        let nested = Expr::column("a").binary(
            BinaryOp::Sub,
            Expr::column("b").binary(BinaryOp::Add, Expr::column("c")),
        );
        assert_eq!(compiler.compile_expr(&nested).unwrap().sql, "a - (b + c)");
        let chained = Expr::column("a")
            .binary(BinaryOp::Div, Expr::column("b"))
            .binary(BinaryOp::Mul, Expr::column("c"));
        assert_eq!(compiler.compile_expr(&chained).unwrap().sql, "a / b * c");
        let negated = Expr::column("a").binary(BinaryOp::Sub, Expr::column("b").neg());
        assert_eq!(compiler.compile_expr(&negated).unwrap().sql, "a - (-b)");
    }

    #[test]
    fn test_non_finite_float_literal() {
        let err = GenericCompiler::default()
            .compile_expr(&Expr::literal(f64::INFINITY))
            .unwrap_err();
        assert!(matches!(err, Error::Compile(_)));
    }

    #[test]
    fn test_named_params() {
        let compiler = GenericCompiler::new(IdentifierPreparer::new(
            ANSI_RESERVED_WORDS,
            Paramstyle::Numeric,
        ));
        let out = compiler
            .compile_expr(&Expr::column("a").eq(Expr::bind(1_i64)).and(Expr::column("b").eq(Expr::bind(2_i64))))
            .unwrap();
        assert_eq!(out.sql, "a = :1 AND b = :2");
    }
}
