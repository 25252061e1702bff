//! The compiled query-plan tree consumed by SQL generators.

mod expression;
mod statement;
mod types;

pub use expression::{BinaryOp, Expr, FunctionCall, Literal, UnaryOp};
pub use statement::{
    JoinClause, JoinType, OrderBy, OrderDirection, SelectColumn, SelectStatement, TableRef,
};
pub use types::{ColumnDef, DataType, SqlType};
