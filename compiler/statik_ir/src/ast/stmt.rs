//! Statement nodes of the parsed (pre-inference) AST.

use std::fmt;

use crate::arena::{ExprId, StmtRange};
use crate::ast::items::Function;
use crate::ast::types::ParsedType;
use crate::name::Name;
use crate::span::{Span, Spanned};

#[derive(Clone, Debug)]
pub enum ForIter {
    /// `for v in range(...)`, kept distinct so the SIR builder can special
    /// case it rather than go through the general iterable path.
    Range {
        start: Option<ExprId>,
        stop: ExprId,
        step: Option<ExprId>,
    },
    Iterable(ExprId),
}

#[derive(Clone, Debug)]
pub enum StmtKind {
    Expr(ExprId),

    /// `target[: annotation] = value`. `annotation` is only ever present on
    /// a local's first assignment; the parser rejects re-annotation.
    Assign {
        target: Name,
        annotation: Option<ParsedType>,
        value: ExprId,
    },

    If {
        condition: ExprId,
        then_branch: StmtRange,
        else_branch: StmtRange,
    },

    While {
        condition: ExprId,
        body: StmtRange,
    },

    For {
        target: Name,
        iter: ForIter,
        body: StmtRange,
    },

    Return(Option<ExprId>),

    Pass,

    /// A nested function definition that does not capture a mutable
    /// enclosing local (anything that does is rejected at parse time,
    /// see `statik_parse`'s normalizer).
    NestedFunctionDef(Box<Function>),
}

#[derive(Clone, Debug)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}

impl Spanned for Stmt {
    fn span(&self) -> Span {
        self.span
    }
}

impl fmt::Display for ForIter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForIter::Range { .. } => write!(f, "range(..)"),
            ForIter::Iterable(_) => write!(f, "<iterable>"),
        }
    }
}

/// A function parameter: name, required annotation (public functions are
/// rejected at parse time if any parameter lacks one, spec.md §4.1), and an
/// optional default value expression.
#[derive(Clone, Debug)]
pub struct Param {
    pub name: Name,
    pub annotation: Option<ParsedType>,
    pub default: Option<ExprId>,
    pub span: Span,
}
