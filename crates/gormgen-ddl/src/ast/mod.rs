//! Abstract Syntax Tree (AST) types for MySQL DDL.

mod expression;
mod statement;
mod types;

pub use expression::{Expr, FunctionCall, Literal};
pub use statement::{
    ColumnDef, ColumnOption, Constraint, ConstraintKind, CreateTableStatement, Statement,
    TableOption,
};
pub use types::{DataType, FieldType};
