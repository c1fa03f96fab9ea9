//! Abstract Syntax Tree (AST) types: the intermediate representation that
//! dialect compilers render to SQL text.

mod expression;
mod statement;
mod types;

pub use expression::{BinaryOp, Expr, FunctionCall, UnaryOp};
pub use statement::{
    DeleteStatement, InsertSource, InsertStatement, Join, OrderBy, OrderDirection, SelectColumn,
    SelectStatement, Statement, TableRef, UpdateAssignment, UpdateStatement,
};
pub use types::TypeEngine;
