//! SQL statement AST types.

use super::expression::Expr;

/// Order direction for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderDirection {
    /// Ascending order (default).
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl OrderDirection {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// An ORDER BY clause entry.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    /// The expression to order by.
    pub expr: Expr,
    /// The direction (ASC or DESC).
    pub direction: OrderDirection,
}

/// A join between two FROM items.
///
/// The pair of flags mirrors how join nodes are described to dialects:
/// `is_outer` alone is a LEFT OUTER join, `is_outer` with `full` is a FULL
/// OUTER join, and neither is an inner join.
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    /// Left side of the join.
    pub left: TableRef,
    /// Right side of the join.
    pub right: TableRef,
    /// The ON condition.
    pub on: Expr,
    /// Whether the join is an outer join.
    pub is_outer: bool,
    /// Whether an outer join is FULL rather than LEFT.
    pub full: bool,
}

/// A table reference in FROM clause.
#[derive(Debug, Clone, PartialEq)]
pub enum TableRef {
    /// A simple table name.
    Table {
        /// Schema name (optional).
        schema: Option<String>,
        /// Table name.
        name: String,
        /// Alias.
        alias: Option<String>,
    },
    /// A subquery.
    Subquery {
        /// The subquery.
        query: Box<SelectStatement>,
        /// Alias (required for subqueries).
        alias: String,
    },
    /// A joined table.
    Join(Box<Join>),
}

impl TableRef {
    /// Creates a simple table reference.
    #[must_use]
    pub fn table(name: impl Into<String>) -> Self {
        Self::Table {
            schema: None,
            name: name.into(),
            alias: None,
        }
    }

    /// Creates a table reference with schema.
    #[must_use]
    pub fn with_schema(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Table {
            schema: Some(schema.into()),
            name: name.into(),
            alias: None,
        }
    }

    /// Adds an alias to a table or subquery reference.
    #[must_use]
    pub fn alias(self, alias: impl Into<String>) -> Self {
        match self {
            Self::Table { schema, name, .. } => Self::Table {
                schema,
                name,
                alias: Some(alias.into()),
            },
            Self::Subquery { query, .. } => Self::Subquery {
                query,
                alias: alias.into(),
            },
            join @ Self::Join(_) => join,
        }
    }

    fn joined(self, right: Self, on: Expr, is_outer: bool, full: bool) -> Self {
        Self::Join(Box::new(Join {
            left: self,
            right,
            on,
            is_outer,
            full,
        }))
    }

    /// Inner join with `right`.
    #[must_use]
    pub fn join(self, right: Self, on: Expr) -> Self {
        self.joined(right, on, false, false)
    }

    /// Left outer join with `right`.
    #[must_use]
    pub fn outer_join(self, right: Self, on: Expr) -> Self {
        self.joined(right, on, true, false)
    }

    /// Full outer join with `right`.
    #[must_use]
    pub fn full_outer_join(self, right: Self, on: Expr) -> Self {
        self.joined(right, on, true, true)
    }
}

/// A column in SELECT clause.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectColumn {
    /// The expression.
    pub expr: Expr,
    /// Column alias.
    pub alias: Option<String>,
}

impl SelectColumn {
    /// Creates a new select column.
    #[must_use]
    pub const fn new(expr: Expr) -> Self {
        Self { expr, alias: None }
    }

    /// Creates a select column with an alias.
    #[must_use]
    pub fn with_alias(expr: Expr, alias: impl Into<String>) -> Self {
        Self {
            expr,
            alias: Some(alias.into()),
        }
    }
}

/// A SELECT statement.
///
/// LIMIT and OFFSET are plain integers; whether they are bound or inlined
/// is the compiler's decision.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectStatement {
    /// Whether to select DISTINCT values.
    pub distinct: bool,
    /// The columns to select.
    pub columns: Vec<SelectColumn>,
    /// The FROM clause items.
    pub from: Vec<TableRef>,
    /// The WHERE clause.
    pub where_clause: Option<Expr>,
    /// GROUP BY expressions.
    pub group_by: Vec<Expr>,
    /// HAVING clause.
    pub having: Option<Expr>,
    /// ORDER BY clauses.
    pub order_by: Vec<OrderBy>,
    /// LIMIT clause.
    pub limit: Option<u64>,
    /// OFFSET clause.
    pub offset: Option<u64>,
}

impl SelectStatement {
    /// Creates an empty SELECT.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a selected expression.
    #[must_use]
    pub fn column(mut self, expr: Expr) -> Self {
        self.columns.push(SelectColumn::new(expr));
        self
    }

    /// Adds a selected expression with an alias.
    #[must_use]
    pub fn column_as(mut self, expr: Expr, alias: impl Into<String>) -> Self {
        self.columns.push(SelectColumn::with_alias(expr, alias));
        self
    }

    /// Adds a FROM item.
    #[must_use]
    pub fn from(mut self, table: TableRef) -> Self {
        self.from.push(table);
        self
    }

    /// Sets the WHERE clause, AND-ing with any existing condition.
    #[must_use]
    pub fn filter(mut self, expr: Expr) -> Self {
        self.where_clause = Some(match self.where_clause.take() {
            Some(existing) => existing.and(expr),
            None => expr,
        });
        self
    }

    /// Adds a GROUP BY expression.
    #[must_use]
    pub fn group_by(mut self, expr: Expr) -> Self {
        self.group_by.push(expr);
        self
    }

    /// Sets the HAVING clause.
    #[must_use]
    pub fn having(mut self, expr: Expr) -> Self {
        self.having = Some(expr);
        self
    }

    /// Adds an ORDER BY entry.
    #[must_use]
    pub fn order_by(mut self, expr: Expr, direction: OrderDirection) -> Self {
        self.order_by.push(OrderBy { expr, direction });
        self
    }

    /// Sets LIMIT.
    #[must_use]
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets OFFSET.
    #[must_use]
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Selects DISTINCT rows.
    #[must_use]
    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }
}

/// Source of data for INSERT.
#[derive(Debug, Clone, PartialEq)]
pub enum InsertSource {
    /// VALUES (...), (...), ...
    Values(Vec<Vec<Expr>>),
    /// SELECT ...
    Query(Box<SelectStatement>),
    /// DEFAULT VALUES
    DefaultValues,
}

/// An INSERT statement.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertStatement {
    /// Schema name.
    pub schema: Option<String>,
    /// Table name.
    pub table: String,
    /// Column names (optional).
    pub columns: Vec<String>,
    /// Values to insert.
    pub source: InsertSource,
}

/// An assignment in UPDATE SET.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateAssignment {
    /// Column name.
    pub column: String,
    /// Value expression.
    pub value: Expr,
}

/// An UPDATE statement.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateStatement {
    /// Schema name.
    pub schema: Option<String>,
    /// Table name.
    pub table: String,
    /// SET assignments.
    pub assignments: Vec<UpdateAssignment>,
    /// WHERE clause.
    pub where_clause: Option<Expr>,
}

/// A DELETE statement.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteStatement {
    /// Schema name.
    pub schema: Option<String>,
    /// Table name.
    pub table: String,
    /// WHERE clause.
    pub where_clause: Option<Expr>,
}

/// A SQL statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// SELECT statement.
    Select(SelectStatement),
    /// INSERT statement.
    Insert(InsertStatement),
    /// UPDATE statement.
    Update(UpdateStatement),
    /// DELETE statement.
    Delete(DeleteStatement),
}

impl From<SelectStatement> for Statement {
    fn from(select: SelectStatement) -> Self {
        Self::Select(select)
    }
}

impl From<InsertStatement> for Statement {
    fn from(insert: InsertStatement) -> Self {
        Self::Insert(insert)
    }
}

impl From<UpdateStatement> for Statement {
    fn from(update: UpdateStatement) -> Self {
        Self::Update(update)
    }
}

impl From<DeleteStatement> for Statement {
    fn from(delete: DeleteStatement) -> Self {
        Self::Delete(delete)
    }
}
