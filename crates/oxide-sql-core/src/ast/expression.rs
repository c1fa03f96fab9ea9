//! Expression AST types.

use crate::schema::Sequence;
use crate::value::{SqlValue, ToSqlValue};

use super::statement::SelectStatement;
use super::types::TypeEngine;

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Logical
    And,
    Or,

    // String
    Concat,
    Like,
    NotLike,
}

impl BinaryOp {
    /// All operators, in declaration order.
    pub const ALL: [Self; 16] = [
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::Div,
        Self::Mod,
        Self::Eq,
        Self::NotEq,
        Self::Lt,
        Self::LtEq,
        Self::Gt,
        Self::GtEq,
        Self::And,
        Self::Or,
        Self::Concat,
        Self::Like,
        Self::NotLike,
    ];

    /// Returns the base SQL spelling of the operator.
    ///
    /// Dialects replace individual spellings through their compiler's
    /// operator table rather than by changing this mapping.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Eq => "=",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Concat => "||",
            Self::Like => "LIKE",
            Self::NotLike => "NOT LIKE",
        }
    }

    /// Returns the precedence of the operator (higher = binds tighter).
    #[must_use]
    pub const fn precedence(&self) -> u8 {
        match self {
            Self::Or => 1,
            Self::And => 2,
            Self::Eq | Self::NotEq | Self::Lt | Self::LtEq | Self::Gt | Self::GtEq => 3,
            Self::Like | Self::NotLike => 4,
            Self::Add | Self::Sub | Self::Concat => 8,
            Self::Mul | Self::Div | Self::Mod => 9,
        }
    }

    /// Whether this is a comparison; comparisons do not chain.
    #[must_use]
    pub const fn is_comparison(&self) -> bool {
        matches!(
            self,
            Self::Eq
                | Self::NotEq
                | Self::Lt
                | Self::LtEq
                | Self::Gt
                | Self::GtEq
                | Self::Like
                | Self::NotLike
        )
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// Negation (-)
    Neg,
    /// Logical NOT
    Not,
}

impl UnaryOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Neg => "-",
            Self::Not => "NOT ",
        }
    }
}

/// A function call expression.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    /// The function name.
    pub name: String,
    /// The arguments.
    pub args: Vec<Expr>,
    /// Whether DISTINCT was specified.
    pub distinct: bool,
}

/// An SQL expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A column reference (optionally qualified with table name).
    Column {
        /// Table name or alias (optional).
        table: Option<String>,
        /// Column name.
        name: String,
    },

    /// A literal rendered inline into the statement text.
    Literal(SqlValue),

    /// A value sent separately from the statement text.
    BindParam {
        /// Explicit parameter name; generated when absent.
        key: Option<String>,
        /// Bound value.
        value: SqlValue,
    },

    /// A binary expression.
    Binary {
        /// Left operand.
        left: Box<Expr>,
        /// Operator.
        op: BinaryOp,
        /// Right operand.
        right: Box<Expr>,
    },

    /// A unary expression.
    Unary {
        /// Operator.
        op: UnaryOp,
        /// Operand.
        operand: Box<Expr>,
    },

    /// A function call.
    Function(FunctionCall),

    /// A scalar subquery.
    Subquery(Box<SelectStatement>),

    /// IS NULL expression.
    IsNull {
        /// The expression to check.
        expr: Box<Expr>,
        /// Whether this is IS NOT NULL.
        negated: bool,
    },

    /// IN expression.
    In {
        /// The expression to check.
        expr: Box<Expr>,
        /// The list of values.
        list: Vec<Expr>,
        /// Whether this is NOT IN.
        negated: bool,
    },

    /// BETWEEN expression.
    Between {
        /// The expression to check.
        expr: Box<Expr>,
        /// Lower bound.
        low: Box<Expr>,
        /// Upper bound.
        high: Box<Expr>,
        /// Whether this is NOT BETWEEN.
        negated: bool,
    },

    /// CAST expression.
    Cast {
        /// Expression to cast.
        expr: Box<Expr>,
        /// Target type.
        type_: TypeEngine,
    },

    /// Parenthesized expression.
    Paren(Box<Expr>),

    /// The next value of a sequence, used as a value expression.
    NextValue(Sequence),

    /// Raw SQL text, emitted unchanged.
    Text(String),

    /// Wildcard (*) in SELECT.
    Wildcard {
        /// Table qualifier (optional).
        table: Option<String>,
    },
}

impl Expr {
    /// Creates a new column reference.
    #[must_use]
    pub fn column(name: impl Into<String>) -> Self {
        Self::Column {
            table: None,
            name: name.into(),
        }
    }

    /// Creates a new qualified column reference.
    #[must_use]
    pub fn qualified_column(table: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Column {
            table: Some(table.into()),
            name: name.into(),
        }
    }

    /// Creates an inline literal.
    #[must_use]
    pub fn literal(value: impl ToSqlValue) -> Self {
        Self::Literal(value.to_sql_value())
    }

    /// Creates an anonymous bound parameter.
    #[must_use]
    pub fn bind(value: impl ToSqlValue) -> Self {
        Self::BindParam {
            key: None,
            value: value.to_sql_value(),
        }
    }

    /// Creates a named bound parameter.
    #[must_use]
    pub fn bind_named(key: impl Into<String>, value: impl ToSqlValue) -> Self {
        Self::BindParam {
            key: Some(key.into()),
            value: value.to_sql_value(),
        }
    }

    /// Creates an integer literal.
    #[must_use]
    pub const fn integer(value: i64) -> Self {
        Self::Literal(SqlValue::Int(value))
    }

    /// Creates a string literal.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::Literal(SqlValue::Text(value.into()))
    }

    /// Creates a NULL literal.
    #[must_use]
    pub const fn null() -> Self {
        Self::Literal(SqlValue::Null)
    }

    /// Creates a raw text expression.
    #[must_use]
    pub fn text(sql: impl Into<String>) -> Self {
        Self::Text(sql.into())
    }

    /// Creates a function call.
    #[must_use]
    pub fn function(name: impl Into<String>, args: Vec<Self>) -> Self {
        Self::Function(FunctionCall {
            name: name.into(),
            args,
            distinct: false,
        })
    }

    /// Creates a next-value reference for a sequence.
    #[must_use]
    pub const fn next_value(sequence: Sequence) -> Self {
        Self::NextValue(sequence)
    }

    /// Creates a binary expression.
    #[must_use]
    pub fn binary(self, op: BinaryOp, right: Self) -> Self {
        Self::Binary {
            left: Box::new(self),
            op,
            right: Box::new(right),
        }
    }

    /// Creates an equality expression.
    #[must_use]
    pub fn eq(self, right: Self) -> Self {
        self.binary(BinaryOp::Eq, right)
    }

    /// Creates an inequality expression.
    #[must_use]
    pub fn not_eq(self, right: Self) -> Self {
        self.binary(BinaryOp::NotEq, right)
    }

    /// Creates a less-than expression.
    #[must_use]
    pub fn lt(self, right: Self) -> Self {
        self.binary(BinaryOp::Lt, right)
    }

    /// Creates a greater-than expression.
    #[must_use]
    pub fn gt(self, right: Self) -> Self {
        self.binary(BinaryOp::Gt, right)
    }

    /// Creates a modulo expression.
    #[must_use]
    pub fn modulo(self, right: Self) -> Self {
        self.binary(BinaryOp::Mod, right)
    }

    /// Creates an addition expression.
    #[must_use]
    pub fn add(self, right: Self) -> Self {
        self.binary(BinaryOp::Add, right)
    }

    /// Creates a LIKE expression.
    #[must_use]
    pub fn like(self, pattern: Self) -> Self {
        self.binary(BinaryOp::Like, pattern)
    }

    /// Creates an AND expression.
    #[must_use]
    pub fn and(self, right: Self) -> Self {
        self.binary(BinaryOp::And, right)
    }

    /// Creates an OR expression.
    #[must_use]
    pub fn or(self, right: Self) -> Self {
        self.binary(BinaryOp::Or, right)
    }

    /// Creates a NOT expression.
    #[must_use]
    pub fn not(self) -> Self {
        Self::Unary {
            op: UnaryOp::Not,
            operand: Box::new(self),
        }
    }

    /// Creates an arithmetic negation.
    #[must_use]
    pub fn neg(self) -> Self {
        Self::Unary {
            op: UnaryOp::Neg,
            operand: Box::new(self),
        }
    }

    /// Creates an IS NULL expression.
    #[must_use]
    pub fn is_null(self) -> Self {
        Self::IsNull {
            expr: Box::new(self),
            negated: false,
        }
    }

    /// Creates an IS NOT NULL expression.
    #[must_use]
    pub fn is_not_null(self) -> Self {
        Self::IsNull {
            expr: Box::new(self),
            negated: true,
        }
    }

    /// Creates a BETWEEN expression.
    #[must_use]
    pub fn between(self, low: Self, high: Self) -> Self {
        Self::Between {
            expr: Box::new(self),
            low: Box::new(low),
            high: Box::new(high),
            negated: false,
        }
    }

    /// Creates an IN expression.
    #[must_use]
    pub fn in_list(self, list: Vec<Self>) -> Self {
        Self::In {
            expr: Box::new(self),
            list,
            negated: false,
        }
    }

    /// Creates a NOT IN expression.
    #[must_use]
    pub fn not_in_list(self, list: Vec<Self>) -> Self {
        Self::In {
            expr: Box::new(self),
            list,
            negated: true,
        }
    }

    /// Creates a CAST expression.
    #[must_use]
    pub fn cast(self, type_: TypeEngine) -> Self {
        Self::Cast {
            expr: Box::new(self),
            type_,
        }
    }

    /// Wraps the expression in parentheses.
    #[must_use]
    pub fn paren(self) -> Self {
        Self::Paren(Box::new(self))
    }
}
