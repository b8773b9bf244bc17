//! Shared spans, interned names and parsed-AST types for the static-subset
//! translator.
//!
//! # Design Philosophy
//!
//! - Intern identifiers and string literals: `Name(u32)`.
//! - Flatten the tree: no `Box<Expr>`, children are `ExprId`/`StmtId`
//!   indices into an [`ast::Arena`], sibling lists are `(start, len)`
//!   ranges.
//! - This translator compiles one module at a time as a pure function
//!   (source text in, artifact + diagnostics out); there is no incremental
//!   recompilation, so these types carry only the traits that are actually
//!   used downstream, not a full Salsa-compatible set.

pub mod arena;
pub mod ast;
pub mod name;
pub mod span;

pub use arena::{ExprId, ExprRange, ParamId, ParamRange, StmtId, StmtRange};
pub use name::{Name, StringInterner};
pub use span::{LineCol, LineIndex, Span, Spanned};
