//! Parsed (pre-inference) abstract syntax tree.

pub mod arena;
pub mod expr;
pub mod items;
pub mod operators;
pub mod stmt;
pub mod types;

pub use arena::Arena;
pub use expr::{ContainerKind, Expr, ExprKind, Generator, Literal};
pub use items::{Class, Function, Item, Module};
pub use operators::{BinaryOp, CompareOp, UnaryOp};
pub use stmt::{ForIter, Param, Stmt, StmtKind};
pub use types::ParsedType;
